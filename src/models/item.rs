// src/models/item.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Difficulty level shared by quizzes and tutorials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("unknown difficulty '{}'", s.trim())),
        }
    }
}

/// Which of the two catalogs an item (or a request) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Quizzes,
    Tutorials,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Quizzes => f.write_str("quizzes"),
            CatalogKind::Tutorials => f.write_str("tutorials"),
        }
    }
}

/// A browsable entry of either catalog.
///
/// Common fields live here; kind-specific metrics live in `details`, which is
/// flattened so the JSON carries a `kind` tag next to the shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogItem {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    /// Ordered, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,

    pub difficulty: Difficulty,

    #[serde(flatten)]
    #[validate(custom(function = validate_details))]
    pub details: ItemDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetails {
    Quiz(QuizDetails),
    Tutorial(TutorialDetails),
}

/// Practice quiz metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_marks))]
pub struct QuizDetails {
    #[validate(range(min = 1))]
    pub total_questions: u32,
    pub max_marks: u32,
    pub passing_marks: u32,
    /// Time limit in minutes.
    pub duration_minutes: u32,
    #[serde(default)]
    pub subject: Option<String>,
    /// Proctored quizzes open in the secure exam flow.
    #[serde(default)]
    pub is_secure: bool,
}

/// Video tutorial metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TutorialDetails {
    /// Display duration such as "15:42".
    pub duration_label: String,
    #[serde(default)]
    pub views: u64,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f32,
    pub published_at: chrono::DateTime<chrono::Utc>,
    #[validate(length(min = 1, max = 100))]
    pub instructor: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

impl CatalogItem {
    pub fn kind(&self) -> CatalogKind {
        match self.details {
            ItemDetails::Quiz(_) => CatalogKind::Quizzes,
            ItemDetails::Tutorial(_) => CatalogKind::Tutorials,
        }
    }

    pub fn quiz(&self) -> Option<&QuizDetails> {
        match &self.details {
            ItemDetails::Quiz(q) => Some(q),
            ItemDetails::Tutorial(_) => None,
        }
    }

    pub fn tutorial(&self) -> Option<&TutorialDetails> {
        match &self.details {
            ItemDetails::Tutorial(t) => Some(t),
            ItemDetails::Quiz(_) => None,
        }
    }

    /// Text fields the search predicate looks at: title, description,
    /// category, the instructor (tutorials) or subject (quizzes), then each tag.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        let person = match &self.details {
            ItemDetails::Quiz(q) => q.subject.as_deref(),
            ItemDetails::Tutorial(t) => Some(t.instructor.as_str()),
        };

        [
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
        .into_iter()
        .chain(person)
        .chain(self.tags.iter().map(String::as_str))
    }
}

fn validate_details(details: &ItemDetails) -> Result<(), validator::ValidationError> {
    let result = match details {
        ItemDetails::Quiz(q) => q.validate(),
        ItemDetails::Tutorial(t) => t.validate(),
    };
    result.map_err(|_| validator::ValidationError::new("invalid_details"))
}

fn validate_marks(quiz: &QuizDetails) -> Result<(), validator::ValidationError> {
    if quiz.passing_marks > quiz.max_marks {
        return Err(validator::ValidationError::new("passing_marks_exceed_max_marks"));
    }
    Ok(())
}
