//! Application state

use crate::db::Database;
use crate::store::{GlobalSettingsStore, ProjectStore, StrategyStore};

pub struct AppState {
    pub db: Database,
    pub projects: ProjectStore,
    pub strategy: StrategyStore,
    pub settings: GlobalSettingsStore,
}

impl AppState {
    pub fn new(db: Database, seed_samples: bool) -> Self {
        Self {
            projects: ProjectStore::new(db.clone()).with_sample_seeding(seed_samples),
            strategy: StrategyStore::new(db.clone()),
            settings: GlobalSettingsStore::new(db.clone()),
            db,
        }
    }
}
