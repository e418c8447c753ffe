// Tests for the global settings store

use contentplan::db::Database;
use contentplan::store::settings::{
    BrandVoiceDraft, BrandVoiceUpdate, ContentStructureDraft, GlobalSettingsStore,
    StructureSection, StructureType, TargetAudienceDraft, WorkspaceSettingsUpdate,
    WritingStyleDraft,
};
use tempfile::TempDir;

fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(db_path).unwrap();
    (db, temp_dir)
}

fn voice_draft(name: &str) -> BrandVoiceDraft {
    BrandVoiceDraft {
        name: name.to_string(),
        tone: "warm".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_add_brand_voice_assigns_id_and_prepends() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let first = store.add_brand_voice(voice_draft("Friendly")).await.unwrap();
    let second = store.add_brand_voice(voice_draft("Formal")).await.unwrap();

    assert!(!first.id.is_empty());
    assert!(!first.created_at.is_empty());
    assert_ne!(first.id, second.id);

    let voices = store.brand_voices().await.unwrap();
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].name, "Formal");
    assert_eq!(voices[1].name, "Friendly");
}

#[tokio::test]
async fn test_update_brand_voice_merges() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let voice = store.add_brand_voice(voice_draft("Friendly")).await.unwrap();

    let updated = store
        .update_brand_voice(
            &voice.id,
            BrandVoiceUpdate {
                tone: Some("playful".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.tone, "playful");
    assert_eq!(updated.name, "Friendly");
}

#[tokio::test]
async fn test_update_unknown_id_is_noop() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let result = store
        .update_brand_voice("nonexistent", BrandVoiceUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_get_workspace_settings_defaults_without_persisting() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db.clone());

    let settings = store.get_workspace_settings("ws1").await.unwrap();
    assert!(settings.brand_voice_ids.is_empty());
    assert!(settings.content_structure_ids.is_empty());

    // Reading must not create a stored entry
    let conn = db.lock().await;
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents WHERE key = 'workspaceSettings'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_update_workspace_settings_merges_partial() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    store
        .update_workspace_settings(
            "ws1",
            WorkspaceSettingsUpdate {
                brand_voice_ids: Some(vec!["v1".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // A later partial update to another list leaves the first one alone
    let merged = store
        .update_workspace_settings(
            "ws1",
            WorkspaceSettingsUpdate {
                writing_style_ids: Some(vec!["s1".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(merged.brand_voice_ids, vec!["v1"]);
    assert_eq!(merged.writing_style_ids, vec!["s1"]);
}

#[tokio::test]
async fn test_delete_brand_voice_cascades_into_every_workspace() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let friendly = store.add_brand_voice(voice_draft("Friendly")).await.unwrap();
    let formal = store.add_brand_voice(voice_draft("Formal")).await.unwrap();

    for ws in ["launch-a", "launch-b"] {
        store
            .update_workspace_settings(
                ws,
                WorkspaceSettingsUpdate {
                    brand_voice_ids: Some(vec![friendly.id.clone(), formal.id.clone()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    store.delete_brand_voice(&friendly.id).await.unwrap();

    assert_eq!(store.brand_voices().await.unwrap().len(), 1);
    for ws in ["launch-a", "launch-b"] {
        let settings = store.get_workspace_settings(ws).await.unwrap();
        assert!(!settings.brand_voice_ids.contains(&friendly.id));
        assert!(settings.brand_voice_ids.contains(&formal.id));
    }
}

#[tokio::test]
async fn test_delete_only_touches_matching_list() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let voice = store.add_brand_voice(voice_draft("Friendly")).await.unwrap();
    let style = store
        .add_writing_style(WritingStyleDraft {
            name: "Concise".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    store
        .update_workspace_settings(
            "ws1",
            WorkspaceSettingsUpdate {
                brand_voice_ids: Some(vec![voice.id.clone()]),
                writing_style_ids: Some(vec![style.id.clone()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    store.delete_writing_style(&style.id).await.unwrap();

    let settings = store.get_workspace_settings("ws1").await.unwrap();
    assert!(settings.writing_style_ids.is_empty());
    assert_eq!(settings.brand_voice_ids, vec![voice.id]);
}

#[tokio::test]
async fn test_target_audience_crud() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let audience = store
        .add_target_audience(TargetAudienceDraft {
            name: "Founders".to_string(),
            pain_points: vec!["No time".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(store.target_audiences().await.unwrap().len(), 1);

    store.delete_target_audience(&audience.id).await.unwrap();
    assert!(store.target_audiences().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_content_structure_crud() {
    let (db, _temp) = create_test_db();
    let store = GlobalSettingsStore::new(db);

    let structure = store
        .add_content_structure(ContentStructureDraft {
            name: "Weekly Digest".to_string(),
            description: String::new(),
            kind: StructureType::Newsletter,
            sections: vec![StructureSection {
                name: "Intro".to_string(),
                description: "Hook the reader".to_string(),
                word_count: Some("50-100".to_string()),
                required: true,
            }],
            guidelines: Vec::new(),
            examples: Vec::new(),
        })
        .await
        .unwrap();

    let structures = store.content_structures().await.unwrap();
    assert_eq!(structures.len(), 1);
    assert_eq!(structures[0].kind, StructureType::Newsletter);
    assert_eq!(structures[0].sections.len(), 1);

    store.delete_content_structure(&structure.id).await.unwrap();
    assert!(store.content_structures().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_collection_falls_back_to_empty() {
    let (db, _temp) = create_test_db();

    {
        let conn = db.lock().await;
        conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES ('brandVoices', '[oops', '')",
            [],
        )
        .unwrap();
    }

    let store = GlobalSettingsStore::new(db);
    assert!(store.brand_voices().await.unwrap().is_empty());
}
