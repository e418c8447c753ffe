//! Strategy store
//!
//! One `StrategyProfile` document per project, keyed `strategy_<projectId>`
//! (or `strategy_default` when no project is selected). The scope is an
//! explicit argument on every call; switching projects is entirely the
//! caller's concern and no data moves between scopes.

use anyhow::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::Database;

use super::{decode_or, read_value, write_value};

pub const DEFAULT_SCOPE_KEY: &str = "strategy_default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyProfile {
    pub brand_dna_profile: BrandDnaProfile,
    pub content_pillars: Vec<ContentPillar>,
    pub target_audiences: Vec<TargetAudience>,
    pub content_categories: Vec<ContentCategory>,
    pub ultimate_goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDnaProfile {
    pub brand_name: String,
    pub tagline: String,
    pub voice_and_tone: VoiceAndTone,
    pub visual_style: VisualStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAndTone {
    pub adjectives: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub name: String,
    pub description: String,
    pub key_principles: Vec<String>,
    pub color_palette: ColorPalette,
    pub reference_images: Vec<ReferenceImage>,
}

/// Palette entries are display strings like "Amber Brown #994A00".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub base: Vec<String>,
    pub primary_accents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPillar {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub id: String,
    pub name: String,
    pub demographics: String,
    pub psychographics: String,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    /// References `ContentPillar.id` within the same profile.
    pub pillar_id: String,
    pub content_types: Vec<String>,
}

impl StrategyProfile {
    /// A profile gates content creation once the brand basics are filled in
    /// and at least one pillar and one audience exist.
    pub fn is_complete(&self) -> bool {
        !self.brand_dna_profile.brand_name.is_empty()
            && !self.brand_dna_profile.tagline.is_empty()
            && !self.brand_dna_profile.voice_and_tone.description.is_empty()
            && !self.content_pillars.is_empty()
            && !self.target_audiences.is_empty()
    }

    /// Hex codes pulled out of the palette display strings; entries without
    /// a hex code pass through unchanged.
    pub fn brand_colors(&self) -> Vec<String> {
        let palette = &self.brand_dna_profile.visual_style.color_palette;
        palette
            .base
            .iter()
            .chain(palette.primary_accents.iter())
            .map(|entry| extract_hex(entry).unwrap_or(entry.as_str()).to_string())
            .collect()
    }

    pub fn primary_audience(&self) -> Option<&TargetAudience> {
        self.target_audiences.first()
    }

    /// Context bundle handed to content generation: brand identity, primary
    /// audience, pillars, categories and the ultimate goal.
    pub fn generation_context(&self) -> serde_json::Value {
        let brand = &self.brand_dna_profile;
        json!({
            "brand": {
                "name": brand.brand_name,
                "tagline": brand.tagline,
                "tone": brand.voice_and_tone.description,
                "values": brand.voice_and_tone.adjectives,
                "colors": self.brand_colors(),
                "visualStyle": brand.visual_style,
            },
            "audience": self.primary_audience(),
            "contentPillars": self.content_pillars,
            "contentCategories": self.content_categories,
            "ultimateGoal": self.ultimate_goal,
        })
    }
}

fn extract_hex(entry: &str) -> Option<&str> {
    let start = entry.find('#')?;
    let candidate = entry.get(start..start + 7)?;
    if candidate[1..].chars().all(|c| c.is_ascii_hexdigit()) {
        Some(candidate)
    } else {
        None
    }
}

/// Storage key for a scope; `None` means no project is selected.
pub fn storage_key(project_id: Option<&str>) -> String {
    match project_id {
        Some(id) => format!("strategy_{}", id),
        None => DEFAULT_SCOPE_KEY.to_string(),
    }
}

pub struct StrategyStore {
    db: Database,
}

impl StrategyStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The profile for the given scope; the built-in default if none stored.
    pub async fn get(&self, project_id: Option<&str>) -> Result<StrategyProfile> {
        let conn = self.db.lock().await;
        load(&conn, project_id)
    }

    /// Recompute the completeness flag from the stored profile.
    pub async fn is_complete(&self, project_id: Option<&str>) -> Result<bool> {
        Ok(self.get(project_id).await?.is_complete())
    }

    pub async fn update_brand_profile(
        &self,
        project_id: Option<&str>,
        profile: BrandDnaProfile,
    ) -> Result<StrategyProfile> {
        self.mutate(project_id, |strategy| {
            strategy.brand_dna_profile = profile;
        })
        .await
    }

    /// Replace the pillar list. Content categories whose pillar no longer
    /// exists are dropped in the same write.
    pub async fn update_content_pillars(
        &self,
        project_id: Option<&str>,
        pillars: Vec<ContentPillar>,
    ) -> Result<StrategyProfile> {
        self.mutate(project_id, |strategy| {
            strategy
                .content_categories
                .retain(|c| pillars.iter().any(|p| p.id == c.pillar_id));
            strategy.content_pillars = pillars;
        })
        .await
    }

    pub async fn update_target_audiences(
        &self,
        project_id: Option<&str>,
        audiences: Vec<TargetAudience>,
    ) -> Result<StrategyProfile> {
        self.mutate(project_id, |strategy| {
            strategy.target_audiences = audiences;
        })
        .await
    }

    pub async fn update_content_categories(
        &self,
        project_id: Option<&str>,
        categories: Vec<ContentCategory>,
    ) -> Result<StrategyProfile> {
        self.mutate(project_id, |strategy| {
            strategy.content_categories = categories;
        })
        .await
    }

    /// Overwrite the whole profile for the scope.
    pub async fn replace_all(
        &self,
        project_id: Option<&str>,
        profile: StrategyProfile,
    ) -> Result<()> {
        let conn = self.db.lock().await;
        let key = storage_key(project_id);
        write_value(&conn, &key, &serde_json::to_string(&profile)?)?;
        tracing::debug!("Replaced strategy profile under '{}'", key);
        Ok(())
    }

    async fn mutate<F>(&self, project_id: Option<&str>, apply: F) -> Result<StrategyProfile>
    where
        F: FnOnce(&mut StrategyProfile),
    {
        let conn = self.db.lock().await;
        let mut strategy = load(&conn, project_id)?;
        apply(&mut strategy);
        write_value(
            &conn,
            &storage_key(project_id),
            &serde_json::to_string(&strategy)?,
        )?;
        Ok(strategy)
    }
}

fn load(conn: &Connection, project_id: Option<&str>) -> Result<StrategyProfile> {
    let key = storage_key(project_id);
    let raw = read_value(conn, &key)?;
    Ok(decode_or(&key, raw, default_profile))
}

/// Built-in starter profile used until a project stores its own.
pub fn default_profile() -> StrategyProfile {
    StrategyProfile {
        brand_dna_profile: BrandDnaProfile {
            brand_name: "Healthiera".to_string(),
            tagline: "Clarity in Wellness.".to_string(),
            voice_and_tone: VoiceAndTone {
                adjectives: vec![
                    "Clear".to_string(),
                    "Supportive".to_string(),
                    "Trustworthy".to_string(),
                    "Professional".to_string(),
                    "Refined".to_string(),
                ],
                description: "The brand speaks like a trusted health professional or a \
                              knowledgeable concierge. The tone is calm, clear, and reassuring. \
                              It avoids hype and jargon, focusing on providing straightforward, \
                              helpful information to busy individuals who value efficiency and \
                              expertise. It's supportive and empowering, building confidence \
                              through clarity."
                    .to_string(),
            },
            visual_style: VisualStyle {
                name: "Refined Scientific Minimalism".to_string(),
                description: "A clean, high-end aesthetic that blends scientific precision with \
                              a warm, approachable feel. This style prioritizes clarity, \
                              trustworthiness, and elegance to appeal to discerning, \
                              health-conscious professionals."
                    .to_string(),
                key_principles: vec![
                    "Elegant Typography: A balanced use of classic serif and clean sans-serif \
                     fonts to create a hierarchy that is both beautiful and highly legible."
                        .to_string(),
                    "Meaningful Iconography: Simple, stylized icons are used sparingly to \
                     represent key benefits or ingredients in a refined, symbolic way."
                        .to_string(),
                    "Structured, Uncluttered Layouts: A strong reliance on grids and ample white \
                     space to present information clearly and efficiently."
                        .to_string(),
                    "Warm, Natural Palette: The color scheme is grounded in natural, premium \
                     tones, avoiding overly bright or synthetic colors."
                        .to_string(),
                    "High-Fidelity Photography: Product and lifestyle imagery is bright, clean, \
                     and professionally shot, with a focus on natural light and textures."
                        .to_string(),
                ],
                color_palette: ColorPalette {
                    base: vec![
                        "Parchment Cream #F5F1E9".to_string(),
                        "Clean White #FFFFFF".to_string(),
                    ],
                    primary_accents: vec![
                        "Amber Brown #994A00".to_string(),
                        "Golden Sun #F2C34E".to_string(),
                        "Charcoal Black #2C2C2C".to_string(),
                    ],
                },
                reference_images: Vec::new(),
            },
        },
        content_pillars: vec![
            ContentPillar {
                id: "1".to_string(),
                name: "Thought Leadership".to_string(),
                description: "Establish expertise in health and wellness".to_string(),
                color: "blue".to_string(),
            },
            ContentPillar {
                id: "2".to_string(),
                name: "Product Education".to_string(),
                description: "Showcase features and benefits".to_string(),
                color: "green".to_string(),
            },
            ContentPillar {
                id: "3".to_string(),
                name: "Customer Success".to_string(),
                description: "Highlight real results and testimonials".to_string(),
                color: "purple".to_string(),
            },
        ],
        target_audiences: vec![TargetAudience {
            id: "1".to_string(),
            name: "Health-Conscious Professionals".to_string(),
            demographics: "Ages 28-45, Working professionals with disposable income".to_string(),
            psychographics: "Wellness-focused, efficiency-driven, quality-conscious".to_string(),
            pain_points: vec![
                "Time constraints".to_string(),
                "Information overload".to_string(),
                "Quality concerns".to_string(),
            ],
            goals: vec![
                "Optimize health".to_string(),
                "Save time".to_string(),
                "Trusted recommendations".to_string(),
            ],
        }],
        content_categories: vec![ContentCategory {
            id: "1".to_string(),
            name: "Educational Guides".to_string(),
            description: "In-depth wellness education and how-to content".to_string(),
            pillar_id: "2".to_string(),
            content_types: vec![
                "Blog posts".to_string(),
                "Video tutorials".to_string(),
                "Infographics".to_string(),
            ],
        }],
        ultimate_goal: "Create compelling, brand-aligned content that resonates with target \
                        audiences and supports business objectives"
            .to_string(),
    }
}
