// src/catalog/loader.rs

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use validator::Validate;

use crate::{
    catalog::{CatalogError, Session, store::Catalog},
    models::{
        interaction::InteractionState,
        item::{CatalogItem, CatalogKind},
    },
};

/// On-disk catalog document.
///
/// `interactions` carries facts recorded elsewhere (attempts, progress,
/// flags) keyed by item id.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub interactions: HashMap<String, InteractionState>,
}

impl CatalogFile {
    /// Validates every item and builds a session for `kind`.
    ///
    /// Items of the other kind are rejected so one catalog never mixes quizzes
    /// and tutorials.
    pub fn into_session(self, kind: CatalogKind) -> Result<Session, CatalogError> {
        for item in &self.items {
            item.validate().map_err(|e| CatalogError::InvalidItem {
                id: item.id.clone(),
                reason: e.to_string(),
            })?;
            if item.kind() != kind {
                return Err(CatalogError::InvalidItem {
                    id: item.id.clone(),
                    reason: format!("expected an item for {}", kind),
                });
            }
        }
        let catalog = Catalog::new(self.items)?;
        Session::with_seeded_states(kind, catalog, self.interactions)
    }
}

/// Parses a catalog document from a JSON string.
pub fn parse_catalog(json: &str, kind: CatalogKind) -> Result<Session, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    file.into_session(kind)
}

/// Loads a catalog from `path`, or an empty one when no path is configured.
pub fn load_catalog(path: Option<&Path>, kind: CatalogKind) -> Result<Session, CatalogError> {
    let Some(path) = path else {
        tracing::warn!(catalog = %kind, "No catalog path configured; starting empty");
        return CatalogFile::default().into_session(kind);
    };

    let raw = std::fs::read_to_string(path)?;
    let session = parse_catalog(&raw, kind)?;
    tracing::info!(catalog = %kind, path = %path.display(), items = session.catalog().len(), "Catalog loaded");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TUTORIALS: &str = r#"{
        "items": [
            {
                "id": "1",
                "kind": "tutorial",
                "title": "Introduction to SQL Databases",
                "description": "Learn the basics of relational databases.",
                "category": "Database Management",
                "tags": ["SQL", "Database", "Backend"],
                "difficulty": "Beginner",
                "duration_label": "15:42",
                "views": 45823,
                "rating": 4.8,
                "published_at": "2024-01-15T00:00:00Z",
                "instructor": "Dr. Sarah Johnson"
            },
            {
                "id": "2",
                "kind": "tutorial",
                "title": "Network Protocols and TCP/IP",
                "category": "Computer Networks",
                "difficulty": "Intermediate",
                "duration_label": "22:30",
                "rating": 4.6,
                "published_at": "2024-02-10T00:00:00Z",
                "instructor": "Prof. Michael Chen"
            }
        ],
        "interactions": {
            "1": { "saved": true },
            "2": { "liked": true, "last_accessed": "2024-09-15T00:00:00Z", "progress": 65 }
        }
    }"#;

    #[test]
    fn parses_items_and_seeded_state() {
        let session = parse_catalog(TUTORIALS, CatalogKind::Tutorials).unwrap();

        assert_eq!(session.catalog().len(), 2);
        assert_eq!(session.index().saved, vec!["1"]);
        assert_eq!(session.index().liked, vec!["2"]);
        assert_eq!(session.index().history, vec!["2"]);
        assert!(session.catalog().get("2").unwrap().tags.is_empty());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let err = parse_catalog(TUTORIALS, CatalogKind::Quizzes).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{ "items": [
            { "id": "q1", "kind": "quiz", "title": "A", "category": "Math", "difficulty": "Beginner",
              "total_questions": 5, "max_marks": 50, "passing_marks": 20, "duration_minutes": 10 },
            { "id": "q1", "kind": "quiz", "title": "B", "category": "Math", "difficulty": "Advanced",
              "total_questions": 5, "max_marks": 50, "passing_marks": 20, "duration_minutes": 10 }
        ] }"#;

        let err = parse_catalog(json, CatalogKind::Quizzes).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "q1"));
    }

    #[test]
    fn passing_marks_above_max_fail_validation() {
        let json = r#"{ "items": [
            { "id": "q1", "kind": "quiz", "title": "A", "category": "Math", "difficulty": "Beginner",
              "total_questions": 5, "max_marks": 50, "passing_marks": 60, "duration_minutes": 10 }
        ] }"#;

        let err = parse_catalog(json, CatalogKind::Quizzes).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem { ref id, .. } if id == "q1"));
    }

    #[test]
    fn seeded_progress_is_clamped() {
        let json = r#"{
            "items": [
                { "id": "t1", "kind": "tutorial", "title": "Pointers", "category": "C",
                  "difficulty": "Beginner", "duration_label": "10:00", "rating": 4.0,
                  "published_at": "2024-03-01T00:00:00Z", "instructor": "Dr. Lee" }
            ],
            "interactions": { "t1": { "progress": 250 } }
        }"#;

        let session = parse_catalog(json, CatalogKind::Tutorials).unwrap();

        assert_eq!(session.state("t1").unwrap().progress, Some(100.0));
    }

    #[test]
    fn loads_from_disk_or_starts_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TUTORIALS.as_bytes()).unwrap();

        let session = load_catalog(Some(file.path()), CatalogKind::Tutorials).unwrap();
        assert_eq!(session.catalog().len(), 2);

        let empty = load_catalog(None, CatalogKind::Tutorials).unwrap();
        assert!(empty.catalog().is_empty());
    }
}
