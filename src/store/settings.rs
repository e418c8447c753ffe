//! Global settings store
//!
//! Four reusable entity collections (brand voices, target audiences, writing
//! styles, content structures) plus the per-workspace enablement map. Each
//! collection is its own document; deleting an entity also scrubs its id from
//! every workspace's reference list, and both writes commit in one
//! transaction so the collections and the map cannot diverge.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Database;

use super::{decode_or, read_value, write_value};

pub const BRAND_VOICES_KEY: &str = "brandVoices";
pub const TARGET_AUDIENCES_KEY: &str = "targetAudiences";
pub const WRITING_STYLES_KEY: &str = "writingStyles";
pub const CONTENT_STRUCTURES_KEY: &str = "contentStructures";
pub const WORKSPACE_SETTINGS_KEY: &str = "workspaceSettings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoice {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tone: String,
    pub adjectives: Vec<String>,
    pub writing_style: String,
    pub do_and_donts: DoAndDonts,
    pub examples: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoAndDonts {
    #[serde(rename = "do")]
    pub dos: Vec<String>,
    #[serde(rename = "dont")]
    pub donts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub id: String,
    pub name: String,
    pub description: String,
    pub demographics: AudienceDemographics,
    pub psychographics: AudiencePsychographics,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
    pub preferred_channels: Vec<String>,
    pub content_preferences: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceDemographics {
    pub age_range: String,
    pub location: String,
    pub income: String,
    pub education: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudiencePsychographics {
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub lifestyle: String,
    pub personality: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingStyle {
    pub id: String,
    pub name: String,
    pub description: String,
    pub voice_tone: String,
    pub sentence_structure: String,
    pub vocabulary: String,
    pub punctuation: String,
    pub formatting: StyleFormatting,
    pub examples: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFormatting {
    pub headings: String,
    pub paragraphs: String,
    pub lists: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStructure {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StructureType,
    pub sections: Vec<StructureSection>,
    pub guidelines: Vec<String>,
    pub examples: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSection {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StructureType {
    BlogPost,
    SocialMedia,
    Email,
    VideoScript,
    LandingPage,
    Newsletter,
    Custom,
}

impl StructureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::BlogPost => "blog-post",
            StructureType::SocialMedia => "social-media",
            StructureType::Email => "email",
            StructureType::VideoScript => "video-script",
            StructureType::LandingPage => "landing-page",
            StructureType::Newsletter => "newsletter",
            StructureType::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "blog-post" => Ok(StructureType::BlogPost),
            "social-media" => Ok(StructureType::SocialMedia),
            "email" => Ok(StructureType::Email),
            "video-script" => Ok(StructureType::VideoScript),
            "landing-page" => Ok(StructureType::LandingPage),
            "newsletter" => Ok(StructureType::Newsletter),
            "custom" => Ok(StructureType::Custom),
            _ => anyhow::bail!("Unknown structure type: {}", s),
        }
    }
}

/// Which global entities a workspace has enabled, by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettings {
    pub brand_voice_ids: Vec<String>,
    pub target_audience_ids: Vec<String>,
    pub writing_style_ids: Vec<String>,
    pub content_structure_ids: Vec<String>,
}

/// Partial workspace settings; `None` lists are left untouched.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSettingsUpdate {
    pub brand_voice_ids: Option<Vec<String>>,
    pub target_audience_ids: Option<Vec<String>>,
    pub writing_style_ids: Option<Vec<String>>,
    pub content_structure_ids: Option<Vec<String>>,
}

// Drafts carry everything but the store-assigned id and createdAt.

#[derive(Debug, Clone, Default)]
pub struct BrandVoiceDraft {
    pub name: String,
    pub description: String,
    pub tone: String,
    pub adjectives: Vec<String>,
    pub writing_style: String,
    pub do_and_donts: DoAndDonts,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TargetAudienceDraft {
    pub name: String,
    pub description: String,
    pub demographics: AudienceDemographics,
    pub psychographics: AudiencePsychographics,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
    pub preferred_channels: Vec<String>,
    pub content_preferences: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WritingStyleDraft {
    pub name: String,
    pub description: String,
    pub voice_tone: String,
    pub sentence_structure: String,
    pub vocabulary: String,
    pub punctuation: String,
    pub formatting: StyleFormatting,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ContentStructureDraft {
    pub name: String,
    pub description: String,
    pub kind: StructureType,
    pub sections: Vec<StructureSection>,
    pub guidelines: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BrandVoiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub adjectives: Option<Vec<String>>,
    pub writing_style: Option<String>,
    pub do_and_donts: Option<DoAndDonts>,
    pub examples: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct TargetAudienceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub demographics: Option<AudienceDemographics>,
    pub psychographics: Option<AudiencePsychographics>,
    pub pain_points: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
    pub preferred_channels: Option<Vec<String>>,
    pub content_preferences: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct WritingStyleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub voice_tone: Option<String>,
    pub sentence_structure: Option<String>,
    pub vocabulary: Option<String>,
    pub punctuation: Option<String>,
    pub formatting: Option<StyleFormatting>,
    pub examples: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentStructureUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<StructureType>,
    pub sections: Option<Vec<StructureSection>>,
    pub guidelines: Option<Vec<String>>,
    pub examples: Option<Vec<String>>,
}

trait GlobalEntity: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;
}

impl GlobalEntity for BrandVoice {
    fn id(&self) -> &str {
        &self.id
    }
}

impl GlobalEntity for TargetAudience {
    fn id(&self) -> &str {
        &self.id
    }
}

impl GlobalEntity for WritingStyle {
    fn id(&self) -> &str {
        &self.id
    }
}

impl GlobalEntity for ContentStructure {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct GlobalSettingsStore {
    db: Database,
}

impl GlobalSettingsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // Brand voices

    pub async fn brand_voices(&self) -> Result<Vec<BrandVoice>> {
        self.list_entities(BRAND_VOICES_KEY).await
    }

    pub async fn add_brand_voice(&self, draft: BrandVoiceDraft) -> Result<BrandVoice> {
        let voice = BrandVoice {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            tone: draft.tone,
            adjectives: draft.adjectives,
            writing_style: draft.writing_style,
            do_and_donts: draft.do_and_donts,
            examples: draft.examples,
            created_at: Utc::now().to_rfc3339(),
        };
        self.prepend_entity(BRAND_VOICES_KEY, voice).await
    }

    pub async fn update_brand_voice(
        &self,
        id: &str,
        updates: BrandVoiceUpdate,
    ) -> Result<Option<BrandVoice>> {
        self.update_entity(BRAND_VOICES_KEY, id, |voice: &mut BrandVoice| {
            if let Some(name) = updates.name {
                voice.name = name;
            }
            if let Some(description) = updates.description {
                voice.description = description;
            }
            if let Some(tone) = updates.tone {
                voice.tone = tone;
            }
            if let Some(adjectives) = updates.adjectives {
                voice.adjectives = adjectives;
            }
            if let Some(writing_style) = updates.writing_style {
                voice.writing_style = writing_style;
            }
            if let Some(do_and_donts) = updates.do_and_donts {
                voice.do_and_donts = do_and_donts;
            }
            if let Some(examples) = updates.examples {
                voice.examples = examples;
            }
        })
        .await
    }

    pub async fn delete_brand_voice(&self, id: &str) -> Result<()> {
        self.delete_entity::<BrandVoice>(BRAND_VOICES_KEY, id, |ws| &mut ws.brand_voice_ids)
            .await
    }

    // Target audiences

    pub async fn target_audiences(&self) -> Result<Vec<TargetAudience>> {
        self.list_entities(TARGET_AUDIENCES_KEY).await
    }

    pub async fn add_target_audience(&self, draft: TargetAudienceDraft) -> Result<TargetAudience> {
        let audience = TargetAudience {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            demographics: draft.demographics,
            psychographics: draft.psychographics,
            pain_points: draft.pain_points,
            goals: draft.goals,
            preferred_channels: draft.preferred_channels,
            content_preferences: draft.content_preferences,
            created_at: Utc::now().to_rfc3339(),
        };
        self.prepend_entity(TARGET_AUDIENCES_KEY, audience).await
    }

    pub async fn update_target_audience(
        &self,
        id: &str,
        updates: TargetAudienceUpdate,
    ) -> Result<Option<TargetAudience>> {
        self.update_entity(TARGET_AUDIENCES_KEY, id, |audience: &mut TargetAudience| {
            if let Some(name) = updates.name {
                audience.name = name;
            }
            if let Some(description) = updates.description {
                audience.description = description;
            }
            if let Some(demographics) = updates.demographics {
                audience.demographics = demographics;
            }
            if let Some(psychographics) = updates.psychographics {
                audience.psychographics = psychographics;
            }
            if let Some(pain_points) = updates.pain_points {
                audience.pain_points = pain_points;
            }
            if let Some(goals) = updates.goals {
                audience.goals = goals;
            }
            if let Some(preferred_channels) = updates.preferred_channels {
                audience.preferred_channels = preferred_channels;
            }
            if let Some(content_preferences) = updates.content_preferences {
                audience.content_preferences = content_preferences;
            }
        })
        .await
    }

    pub async fn delete_target_audience(&self, id: &str) -> Result<()> {
        self.delete_entity::<TargetAudience>(TARGET_AUDIENCES_KEY, id, |ws| {
            &mut ws.target_audience_ids
        })
        .await
    }

    // Writing styles

    pub async fn writing_styles(&self) -> Result<Vec<WritingStyle>> {
        self.list_entities(WRITING_STYLES_KEY).await
    }

    pub async fn add_writing_style(&self, draft: WritingStyleDraft) -> Result<WritingStyle> {
        let style = WritingStyle {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            voice_tone: draft.voice_tone,
            sentence_structure: draft.sentence_structure,
            vocabulary: draft.vocabulary,
            punctuation: draft.punctuation,
            formatting: draft.formatting,
            examples: draft.examples,
            created_at: Utc::now().to_rfc3339(),
        };
        self.prepend_entity(WRITING_STYLES_KEY, style).await
    }

    pub async fn update_writing_style(
        &self,
        id: &str,
        updates: WritingStyleUpdate,
    ) -> Result<Option<WritingStyle>> {
        self.update_entity(WRITING_STYLES_KEY, id, |style: &mut WritingStyle| {
            if let Some(name) = updates.name {
                style.name = name;
            }
            if let Some(description) = updates.description {
                style.description = description;
            }
            if let Some(voice_tone) = updates.voice_tone {
                style.voice_tone = voice_tone;
            }
            if let Some(sentence_structure) = updates.sentence_structure {
                style.sentence_structure = sentence_structure;
            }
            if let Some(vocabulary) = updates.vocabulary {
                style.vocabulary = vocabulary;
            }
            if let Some(punctuation) = updates.punctuation {
                style.punctuation = punctuation;
            }
            if let Some(formatting) = updates.formatting {
                style.formatting = formatting;
            }
            if let Some(examples) = updates.examples {
                style.examples = examples;
            }
        })
        .await
    }

    pub async fn delete_writing_style(&self, id: &str) -> Result<()> {
        self.delete_entity::<WritingStyle>(WRITING_STYLES_KEY, id, |ws| &mut ws.writing_style_ids)
            .await
    }

    // Content structures

    pub async fn content_structures(&self) -> Result<Vec<ContentStructure>> {
        self.list_entities(CONTENT_STRUCTURES_KEY).await
    }

    pub async fn add_content_structure(
        &self,
        draft: ContentStructureDraft,
    ) -> Result<ContentStructure> {
        let structure = ContentStructure {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            kind: draft.kind,
            sections: draft.sections,
            guidelines: draft.guidelines,
            examples: draft.examples,
            created_at: Utc::now().to_rfc3339(),
        };
        self.prepend_entity(CONTENT_STRUCTURES_KEY, structure).await
    }

    pub async fn update_content_structure(
        &self,
        id: &str,
        updates: ContentStructureUpdate,
    ) -> Result<Option<ContentStructure>> {
        self.update_entity(
            CONTENT_STRUCTURES_KEY,
            id,
            |structure: &mut ContentStructure| {
                if let Some(name) = updates.name {
                    structure.name = name;
                }
                if let Some(description) = updates.description {
                    structure.description = description;
                }
                if let Some(kind) = updates.kind {
                    structure.kind = kind;
                }
                if let Some(sections) = updates.sections {
                    structure.sections = sections;
                }
                if let Some(guidelines) = updates.guidelines {
                    structure.guidelines = guidelines;
                }
                if let Some(examples) = updates.examples {
                    structure.examples = examples;
                }
            },
        )
        .await
    }

    pub async fn delete_content_structure(&self, id: &str) -> Result<()> {
        self.delete_entity::<ContentStructure>(CONTENT_STRUCTURES_KEY, id, |ws| {
            &mut ws.content_structure_ids
        })
        .await
    }

    // Workspace settings

    /// Stored settings for a workspace, or the all-empty default. Reading
    /// never creates a persisted entry.
    pub async fn get_workspace_settings(&self, workspace_id: &str) -> Result<WorkspaceSettings> {
        let conn = self.db.lock().await;
        let map = load_workspace_map(&conn)?;
        Ok(map.get(workspace_id).cloned().unwrap_or_default())
    }

    /// Merge partial fields over the stored (or default) record for the
    /// workspace and persist the whole map.
    pub async fn update_workspace_settings(
        &self,
        workspace_id: &str,
        updates: WorkspaceSettingsUpdate,
    ) -> Result<WorkspaceSettings> {
        let conn = self.db.lock().await;
        let mut map = load_workspace_map(&conn)?;
        let settings = map.entry(workspace_id.to_string()).or_default();

        if let Some(ids) = updates.brand_voice_ids {
            settings.brand_voice_ids = ids;
        }
        if let Some(ids) = updates.target_audience_ids {
            settings.target_audience_ids = ids;
        }
        if let Some(ids) = updates.writing_style_ids {
            settings.writing_style_ids = ids;
        }
        if let Some(ids) = updates.content_structure_ids {
            settings.content_structure_ids = ids;
        }
        let merged = settings.clone();

        write_value(&conn, WORKSPACE_SETTINGS_KEY, &serde_json::to_string(&map)?)?;
        Ok(merged)
    }

    // Shared per-kind plumbing

    async fn list_entities<T: GlobalEntity>(&self, key: &str) -> Result<Vec<T>> {
        let conn = self.db.lock().await;
        load_entities(&conn, key)
    }

    async fn prepend_entity<T: GlobalEntity>(&self, key: &str, entity: T) -> Result<T> {
        let conn = self.db.lock().await;
        let mut entities: Vec<T> = load_entities(&conn, key)?;
        entities.insert(0, entity.clone());
        write_value(&conn, key, &serde_json::to_string(&entities)?)?;
        tracing::debug!("Added {} entry: {}", key, entity.id());
        Ok(entity)
    }

    async fn update_entity<T, F>(&self, key: &str, id: &str, apply: F) -> Result<Option<T>>
    where
        T: GlobalEntity,
        F: FnOnce(&mut T),
    {
        let conn = self.db.lock().await;
        let mut entities: Vec<T> = load_entities(&conn, key)?;

        let Some(entity) = entities.iter_mut().find(|e| e.id() == id) else {
            tracing::debug!("Update for unknown {} entry {} ignored", key, id);
            return Ok(None);
        };
        apply(entity);
        let updated = entity.clone();

        write_value(&conn, key, &serde_json::to_string(&entities)?)?;
        Ok(Some(updated))
    }

    /// Delete the entity and scrub its id from every workspace's reference
    /// list, committing both writes together.
    async fn delete_entity<T>(
        &self,
        key: &str,
        id: &str,
        ids_of: fn(&mut WorkspaceSettings) -> &mut Vec<String>,
    ) -> Result<()>
    where
        T: GlobalEntity,
    {
        let mut conn = self.db.lock().await;
        let tx = conn.transaction()?;

        let mut entities: Vec<T> = load_entities(&tx, key)?;
        entities.retain(|e| e.id() != id);
        write_value(&tx, key, &serde_json::to_string(&entities)?)?;

        let mut map = load_workspace_map(&tx)?;
        for settings in map.values_mut() {
            ids_of(settings).retain(|entry| entry != id);
        }
        write_value(&tx, WORKSPACE_SETTINGS_KEY, &serde_json::to_string(&map)?)?;

        tx.commit()?;
        tracing::debug!("Deleted {} entry: {}", key, id);
        Ok(())
    }
}

fn load_entities<T: GlobalEntity>(conn: &rusqlite::Connection, key: &str) -> Result<Vec<T>> {
    let raw = read_value(conn, key)?;
    Ok(decode_or(key, raw, Vec::new))
}

fn load_workspace_map(
    conn: &rusqlite::Connection,
) -> Result<HashMap<String, WorkspaceSettings>> {
    let raw = read_value(conn, WORKSPACE_SETTINGS_KEY)?;
    Ok(decode_or(WORKSPACE_SETTINGS_KEY, raw, HashMap::new))
}
