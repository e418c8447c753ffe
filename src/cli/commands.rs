//! CLI commands

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::AppState;
use crate::db::Database;
use crate::store::project::{ProjectDraft, ProjectStatus, ProjectType, ProjectUpdate};
use crate::store::settings::{BrandVoiceDraft, WorkspaceSettings, WorkspaceSettingsUpdate};

#[derive(Parser)]
#[command(name = "contentplan")]
#[command(about = "Local-first planning store for marketing campaigns and content strategy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path (default: from config, ~/.contentplan/contentplan.db)
    #[arg(long)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    Projects,

    /// Create a new project and make it current
    CreateProject {
        /// Project name
        name: String,

        /// Project description
        #[arg(long, default_value = "")]
        description: String,

        /// Project type (campaign, content-series, brand-awareness, product-launch)
        #[arg(long, default_value = "campaign")]
        project_type: String,

        /// Optional deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Select the current project
    SwitchProject {
        /// Project ID
        project_id: String,
    },

    /// Update fields of a project
    UpdateProject {
        /// Project ID
        project_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Status (active, paused, completed)
        #[arg(long)]
        status: Option<String>,

        /// Progress, 0-100
        #[arg(long)]
        progress: Option<u8>,
    },

    /// Delete a project
    DeleteProject {
        /// Project ID
        project_id: String,
    },

    /// Show the strategy profile for the current (or given) project
    Strategy {
        /// Project ID (default: current project)
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Print the content-generation context for the current (or given) project
    StrategyContext {
        /// Project ID (default: current project)
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Set the ultimate goal of the strategy profile
    SetGoal {
        /// Goal text
        goal: String,

        /// Project ID (default: current project)
        #[arg(long)]
        project_id: Option<String>,
    },

    /// List global brand voices
    Voices,

    /// Add a global brand voice
    AddVoice {
        /// Voice name
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        tone: String,

        /// Comma-separated adjectives
        #[arg(long)]
        adjectives: Option<String>,
    },

    /// Delete a global brand voice (also disables it in every workspace)
    DeleteVoice {
        /// Voice ID
        voice_id: String,
    },

    /// List global target audiences
    Audiences,

    /// List global writing styles
    Styles,

    /// List global content structures
    Structures,

    /// Show the enabled settings for a workspace
    Workspace {
        /// Workspace (project) ID
        workspace_id: String,
    },

    /// Enable a global entity for a workspace
    Enable {
        /// Workspace (project) ID
        workspace_id: String,

        /// Entity kind (voice, audience, style, structure)
        kind: String,

        /// Entity ID
        id: String,
    },

    /// Disable a global entity for a workspace
    Disable {
        /// Workspace (project) ID
        workspace_id: String,

        /// Entity kind (voice, audience, style, structure)
        kind: String,

        /// Entity ID
        id: String,
    },
}

#[derive(Debug, Clone, Copy)]
enum SettingKind {
    Voice,
    Audience,
    Style,
    Structure,
}

impl SettingKind {
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "voice" => Ok(SettingKind::Voice),
            "audience" => Ok(SettingKind::Audience),
            "style" => Ok(SettingKind::Style),
            "structure" => Ok(SettingKind::Structure),
            _ => anyhow::bail!("Unknown setting kind: {}", s),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(None)?;

    // Use provided path or fall back to the configured location
    let db_path = match cli.database {
        Some(path) => std::path::PathBuf::from(path),
        None => config.resolve_db_path()?,
    };

    let db = Database::new(&db_path)?;
    let state = AppState::new(db, config.seed_sample_projects);

    // Create a multi-threaded runtime for CLI operations
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        match cli.command {
            Commands::Projects => {
                let current = state.projects.get_current().await?;
                let projects = state.projects.list().await?;

                if projects.is_empty() {
                    println!("No projects found");
                } else {
                    for project in projects {
                        let marker = if current.as_ref().map(|c| c.id.as_str())
                            == Some(project.id.as_str())
                        {
                            "*"
                        } else {
                            " "
                        };
                        println!(
                            "{} [{}] {} - {} ({}) - {}%",
                            marker,
                            short_id(&project.id),
                            project.name,
                            project.kind.as_str(),
                            project.status.as_str(),
                            project.progress,
                        );
                    }
                }
                Ok(())
            }

            Commands::CreateProject {
                name,
                description,
                project_type,
                deadline,
            } => {
                anyhow::ensure!(!name.trim().is_empty(), "Project name must not be empty");
                let kind = ProjectType::from_str(&project_type)?;

                let project = state
                    .projects
                    .add(ProjectDraft {
                        name,
                        description,
                        status: ProjectStatus::Active,
                        kind,
                        deadline,
                    })
                    .await?;

                println!("Created project: {}", project.id);
                Ok(())
            }

            Commands::SwitchProject { project_id } => {
                let projects = state.projects.list().await?;
                match projects.iter().find(|p| p.id == project_id) {
                    Some(project) => {
                        state.projects.set_current(Some(project)).await?;
                        println!("Current project: {}", project.name);
                    }
                    None => println!("No project with id {}", project_id),
                }
                Ok(())
            }

            Commands::UpdateProject {
                project_id,
                name,
                description,
                status,
                progress,
            } => {
                let status = status.map(|s| ProjectStatus::from_str(&s)).transpose()?;

                let updated = state
                    .projects
                    .update(
                        &project_id,
                        ProjectUpdate {
                            name,
                            description,
                            status,
                            progress,
                            ..Default::default()
                        },
                    )
                    .await?;

                match updated {
                    Some(project) => println!("Updated project: {}", project.name),
                    None => println!("No project with id {}", project_id),
                }
                Ok(())
            }

            Commands::DeleteProject { project_id } => {
                state.projects.remove(&project_id).await?;
                println!("Deleted project: {}", project_id);
                Ok(())
            }

            Commands::Strategy { project_id } => {
                let scope = resolve_scope(&state, project_id).await?;
                let strategy = state.strategy.get(scope.as_deref()).await?;

                println!("Brand:      {}", strategy.brand_dna_profile.brand_name);
                println!("Tagline:    {}", strategy.brand_dna_profile.tagline);
                println!("Pillars:    {}", strategy.content_pillars.len());
                println!("Audiences:  {}", strategy.target_audiences.len());
                println!("Categories: {}", strategy.content_categories.len());
                println!("Goal:       {}", strategy.ultimate_goal);
                println!(
                    "Complete:   {}",
                    if strategy.is_complete() { "yes" } else { "no" }
                );
                Ok(())
            }

            Commands::StrategyContext { project_id } => {
                let scope = resolve_scope(&state, project_id).await?;
                let strategy = state.strategy.get(scope.as_deref()).await?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&strategy.generation_context())?
                );
                Ok(())
            }

            Commands::SetGoal { goal, project_id } => {
                let scope = resolve_scope(&state, project_id).await?;
                let mut strategy = state.strategy.get(scope.as_deref()).await?;
                strategy.ultimate_goal = goal;
                state.strategy.replace_all(scope.as_deref(), strategy).await?;
                println!("Updated ultimate goal");
                Ok(())
            }

            Commands::Voices => {
                let voices = state.settings.brand_voices().await?;
                if voices.is_empty() {
                    println!("No brand voices found");
                } else {
                    for voice in voices {
                        println!(
                            "[{}] {} - {}",
                            short_id(&voice.id),
                            voice.name,
                            voice.tone
                        );
                    }
                }
                Ok(())
            }

            Commands::AddVoice {
                name,
                description,
                tone,
                adjectives,
            } => {
                let adjectives = adjectives
                    .map(|s| s.split(',').map(|a| a.trim().to_string()).collect())
                    .unwrap_or_default();

                let voice = state
                    .settings
                    .add_brand_voice(BrandVoiceDraft {
                        name,
                        description,
                        tone,
                        adjectives,
                        ..Default::default()
                    })
                    .await?;

                println!("Created brand voice: {}", voice.id);
                Ok(())
            }

            Commands::DeleteVoice { voice_id } => {
                state.settings.delete_brand_voice(&voice_id).await?;
                println!("Deleted brand voice: {}", voice_id);
                Ok(())
            }

            Commands::Audiences => {
                let audiences = state.settings.target_audiences().await?;
                if audiences.is_empty() {
                    println!("No target audiences found");
                } else {
                    for audience in audiences {
                        println!("[{}] {}", short_id(&audience.id), audience.name);
                    }
                }
                Ok(())
            }

            Commands::Styles => {
                let styles = state.settings.writing_styles().await?;
                if styles.is_empty() {
                    println!("No writing styles found");
                } else {
                    for style in styles {
                        println!("[{}] {}", short_id(&style.id), style.name);
                    }
                }
                Ok(())
            }

            Commands::Structures => {
                let structures = state.settings.content_structures().await?;
                if structures.is_empty() {
                    println!("No content structures found");
                } else {
                    for structure in structures {
                        println!(
                            "[{}] {} ({})",
                            short_id(&structure.id),
                            structure.name,
                            structure.kind.as_str()
                        );
                    }
                }
                Ok(())
            }

            Commands::Workspace { workspace_id } => {
                let settings = state.settings.get_workspace_settings(&workspace_id).await?;
                println!("Voices:     {}", settings.brand_voice_ids.join(", "));
                println!("Audiences:  {}", settings.target_audience_ids.join(", "));
                println!("Styles:     {}", settings.writing_style_ids.join(", "));
                println!("Structures: {}", settings.content_structure_ids.join(", "));
                Ok(())
            }

            Commands::Enable {
                workspace_id,
                kind,
                id,
            } => {
                toggle_setting(&state, &workspace_id, &kind, id, true).await?;
                println!("Enabled for workspace {}", workspace_id);
                Ok(())
            }

            Commands::Disable {
                workspace_id,
                kind,
                id,
            } => {
                toggle_setting(&state, &workspace_id, &kind, id, false).await?;
                println!("Disabled for workspace {}", workspace_id);
                Ok(())
            }
        }
    })
}

/// Resolve the strategy scope: an explicit project id wins, otherwise the
/// current project, otherwise the default scope.
async fn resolve_scope(state: &AppState, project_id: Option<String>) -> Result<Option<String>> {
    match project_id {
        Some(id) => Ok(Some(id)),
        None => Ok(state.projects.get_current().await?.map(|p| p.id)),
    }
}

/// Add or remove an entity id in one of a workspace's reference lists.
/// Enabling is idempotent; the id is only pushed when absent.
async fn toggle_setting(
    state: &AppState,
    workspace_id: &str,
    kind: &str,
    id: String,
    enable: bool,
) -> Result<WorkspaceSettings> {
    let kind = SettingKind::from_str(kind)?;
    let settings = state.settings.get_workspace_settings(workspace_id).await?;

    let toggled = |mut ids: Vec<String>| {
        if enable {
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
        } else {
            ids.retain(|entry| *entry != id);
        }
        ids
    };

    let updates = match kind {
        SettingKind::Voice => WorkspaceSettingsUpdate {
            brand_voice_ids: Some(toggled(settings.brand_voice_ids)),
            ..Default::default()
        },
        SettingKind::Audience => WorkspaceSettingsUpdate {
            target_audience_ids: Some(toggled(settings.target_audience_ids)),
            ..Default::default()
        },
        SettingKind::Style => WorkspaceSettingsUpdate {
            writing_style_ids: Some(toggled(settings.writing_style_ids)),
            ..Default::default()
        },
        SettingKind::Structure => WorkspaceSettingsUpdate {
            content_structure_ids: Some(toggled(settings.content_structure_ids)),
            ..Default::default()
        },
    };

    state
        .settings
        .update_workspace_settings(workspace_id, updates)
        .await
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
