// src/state.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    catalog::{CatalogError, Session, loader::load_catalog},
    config::Config,
    models::item::CatalogKind,
};

/// One catalog session behind a lock. A mutation and its index rebuild run
/// under a single write guard.
pub type SharedSession = Arc<RwLock<Session>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub quizzes: SharedSession,
    pub tutorials: SharedSession,
}

impl AppState {
    pub fn new(config: Config, quizzes: Session, tutorials: Session) -> Self {
        Self {
            config,
            quizzes: Arc::new(RwLock::new(quizzes)),
            tutorials: Arc::new(RwLock::new(tutorials)),
        }
    }

    /// Loads both catalogs from the configured paths.
    pub fn load(config: Config) -> Result<Self, CatalogError> {
        let quizzes = load_catalog(config.quiz_catalog_path.as_deref(), CatalogKind::Quizzes)?;
        let tutorials = load_catalog(
            config.tutorial_catalog_path.as_deref(),
            CatalogKind::Tutorials,
        )?;
        Ok(Self::new(config, quizzes, tutorials))
    }

    pub fn session(&self, kind: CatalogKind) -> &SharedSession {
        match kind {
            CatalogKind::Quizzes => &self.quizzes,
            CatalogKind::Tutorials => &self.tutorials,
        }
    }
}
