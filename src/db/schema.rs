//! SQL schema definitions

pub const SCHEMA: &str = r#"
-- One row per planning document; values are JSON blobs keyed by the
-- document names the stores use (projects, currentProject, strategy_*,
-- brandVoices, targetAudiences, writingStyles, contentStructures,
-- workspaceSettings).
CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
