//! Project store
//!
//! Owns the project collection plus the single "current project" selection.
//! Projects live under the `projects` document; the current selection is the
//! bare project id under `currentProject` and is resolved against the live
//! collection on every read, so it can never dangle.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Database;

use super::{decode_or, delete_value, read_value, write_value};

pub const PROJECTS_KEY: &str = "projects";
pub const CURRENT_PROJECT_KEY: &str = "currentProject";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    /// Date string, `YYYY-MM-DD`
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// 0-100
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "completed" => Ok(ProjectStatus::Completed),
            _ => anyhow::bail!("Unknown project status: {}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Campaign,
    ContentSeries,
    BrandAwareness,
    ProductLaunch,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Campaign => "campaign",
            ProjectType::ContentSeries => "content-series",
            ProjectType::BrandAwareness => "brand-awareness",
            ProjectType::ProductLaunch => "product-launch",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "campaign" => Ok(ProjectType::Campaign),
            "content-series" => Ok(ProjectType::ContentSeries),
            "brand-awareness" => Ok(ProjectType::BrandAwareness),
            "product-launch" => Ok(ProjectType::ProductLaunch),
            _ => anyhow::bail!("Unknown project type: {}", s),
        }
    }
}

/// Fields the caller supplies when creating a project; id, creation date and
/// progress are assigned by the store.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub kind: ProjectType,
    pub deadline: Option<String>,
}

/// Partial update; `None` fields are left untouched. The outer `Option` on
/// `deadline` says whether to touch it, the inner one is the new value, so
/// `Some(None)` clears a deadline.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub kind: Option<ProjectType>,
    pub deadline: Option<Option<String>>,
    pub progress: Option<u8>,
}

pub struct ProjectStore {
    db: Database,
    seed_samples: bool,
}

impl ProjectStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            seed_samples: true,
        }
    }

    /// Control whether an empty database is seeded with the built-in sample
    /// projects on first read.
    pub fn with_sample_seeding(mut self, enabled: bool) -> Self {
        self.seed_samples = enabled;
        self
    }

    /// All projects, newest-first (creates prepend).
    pub async fn list(&self) -> Result<Vec<Project>> {
        let conn = self.db.lock().await;
        self.load(&conn)
    }

    /// The currently selected project. When no stored id resolves (fresh
    /// database, cleared selection, or an id that no longer exists) the first
    /// project becomes current; none only when the collection is empty.
    pub async fn get_current(&self) -> Result<Option<Project>> {
        let conn = self.db.lock().await;
        let projects = self.load(&conn)?;
        let current_id = read_value(&conn, CURRENT_PROJECT_KEY)?;
        let idx = current_id
            .and_then(|id| projects.iter().position(|p| p.id == id))
            .unwrap_or(0);
        Ok(projects.into_iter().nth(idx))
    }

    /// Replace the current selection; `None` clears the stored id, after
    /// which reads fall back to the first project.
    pub async fn set_current(&self, project: Option<&Project>) -> Result<()> {
        let conn = self.db.lock().await;
        match project {
            Some(p) => write_value(&conn, CURRENT_PROJECT_KEY, &p.id)?,
            None => delete_value(&conn, CURRENT_PROJECT_KEY)?,
        }
        Ok(())
    }

    /// Create a project from a draft and make it current. The new project is
    /// prepended so the collection stays newest-first.
    pub async fn add(&self, draft: ProjectDraft) -> Result<Project> {
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            kind: draft.kind,
            created_at: Utc::now().format("%Y-%m-%d").to_string(),
            deadline: draft.deadline,
            progress: 0,
        };

        let mut conn = self.db.lock().await;
        let tx = conn.transaction()?;
        let mut projects = self.load(&tx)?;
        projects.insert(0, project.clone());
        write_value(&tx, PROJECTS_KEY, &serde_json::to_string(&projects)?)?;
        write_value(&tx, CURRENT_PROJECT_KEY, &project.id)?;
        tx.commit()?;

        tracing::debug!("Created project: {}", project.id);
        Ok(project)
    }

    /// Merge partial fields into the project matching `id`. Unknown ids are a
    /// silent no-op.
    pub async fn update(&self, id: &str, updates: ProjectUpdate) -> Result<Option<Project>> {
        let conn = self.db.lock().await;
        let mut projects = self.load(&conn)?;

        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("Update for unknown project {} ignored", id);
            return Ok(None);
        };

        if let Some(name) = updates.name {
            project.name = name;
        }
        if let Some(description) = updates.description {
            project.description = description;
        }
        if let Some(status) = updates.status {
            project.status = status;
        }
        if let Some(kind) = updates.kind {
            project.kind = kind;
        }
        if let Some(deadline) = updates.deadline {
            project.deadline = deadline;
        }
        if let Some(progress) = updates.progress {
            project.progress = progress;
        }
        let updated = project.clone();

        write_value(&conn, PROJECTS_KEY, &serde_json::to_string(&projects)?)?;
        Ok(Some(updated))
    }

    /// Delete a project. If it was current, selection falls back to the first
    /// remaining project, or to none.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut conn = self.db.lock().await;
        let tx = conn.transaction()?;

        let mut projects = self.load(&tx)?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            tracing::debug!("Delete for unknown project {} ignored", id);
            // Keep any sample seeding load() just performed
            tx.commit()?;
            return Ok(());
        }
        write_value(&tx, PROJECTS_KEY, &serde_json::to_string(&projects)?)?;

        if read_value(&tx, CURRENT_PROJECT_KEY)?.as_deref() == Some(id) {
            match projects.first() {
                Some(next) => write_value(&tx, CURRENT_PROJECT_KEY, &next.id)?,
                None => delete_value(&tx, CURRENT_PROJECT_KEY)?,
            }
        }

        tx.commit()?;
        tracing::debug!("Deleted project: {}", id);
        Ok(())
    }

    fn load(&self, conn: &rusqlite::Connection) -> Result<Vec<Project>> {
        let raw = read_value(conn, PROJECTS_KEY)?;
        if raw.is_none() && self.seed_samples {
            let samples = sample_projects();
            write_value(conn, PROJECTS_KEY, &serde_json::to_string(&samples)?)?;
            tracing::info!("Seeded {} sample projects", samples.len());
            return Ok(samples);
        }
        Ok(decode_or(PROJECTS_KEY, raw, || {
            if self.seed_samples {
                sample_projects()
            } else {
                Vec::new()
            }
        }))
    }
}

/// Built-in sample projects seeded into an empty database.
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            name: "Q1 Product Launch Campaign".to_string(),
            description: "Comprehensive marketing campaign for our new AI-powered analytics tool"
                .to_string(),
            status: ProjectStatus::Active,
            kind: ProjectType::ProductLaunch,
            created_at: "2024-01-15".to_string(),
            deadline: Some("2024-03-31".to_string()),
            progress: 65,
        },
        Project {
            id: "2".to_string(),
            name: "Weekly Tech Insights Series".to_string(),
            description: "Educational content series covering industry trends and best practices"
                .to_string(),
            status: ProjectStatus::Active,
            kind: ProjectType::ContentSeries,
            created_at: "2024-01-08".to_string(),
            deadline: None,
            progress: 40,
        },
        Project {
            id: "3".to_string(),
            name: "Brand Awareness Campaign".to_string(),
            description:
                "Multi-channel campaign to increase brand recognition in the enterprise market"
                    .to_string(),
            status: ProjectStatus::Paused,
            kind: ProjectType::BrandAwareness,
            created_at: "2023-12-20".to_string(),
            deadline: Some("2024-06-30".to_string()),
            progress: 25,
        },
    ]
}
