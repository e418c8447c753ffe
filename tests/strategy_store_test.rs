// Tests for the strategy store

use contentplan::db::Database;
use contentplan::store::strategy::{
    default_profile, ContentCategory, ContentPillar, StrategyStore, TargetAudience,
};
use tempfile::TempDir;

fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(db_path).unwrap();
    (db, temp_dir)
}

fn pillar(id: &str, name: &str) -> ContentPillar {
    ContentPillar {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        color: "blue".to_string(),
    }
}

fn audience(id: &str, name: &str) -> TargetAudience {
    TargetAudience {
        id: id.to_string(),
        name: name.to_string(),
        demographics: String::new(),
        psychographics: String::new(),
        pain_points: Vec::new(),
        goals: Vec::new(),
    }
}

fn category(id: &str, pillar_id: &str) -> ContentCategory {
    ContentCategory {
        id: id.to_string(),
        name: format!("Category {}", id),
        description: String::new(),
        pillar_id: pillar_id.to_string(),
        content_types: Vec::new(),
    }
}

#[tokio::test]
async fn test_get_returns_default_when_unset() {
    let (db, _temp) = create_test_db();
    let store = StrategyStore::new(db);

    let profile = store.get(None).await.unwrap();
    assert_eq!(profile, default_profile());
}

#[tokio::test]
async fn test_default_profile_is_complete() {
    // The starter profile ships with brand basics, pillars and an audience
    assert!(default_profile().is_complete());
}

#[tokio::test]
async fn test_completeness_requires_every_field() {
    let base = default_profile();

    let mut p = base.clone();
    p.brand_dna_profile.brand_name.clear();
    assert!(!p.is_complete());

    let mut p = base.clone();
    p.brand_dna_profile.tagline.clear();
    assert!(!p.is_complete());

    let mut p = base.clone();
    p.brand_dna_profile.voice_and_tone.description.clear();
    assert!(!p.is_complete());

    let mut p = base.clone();
    p.content_pillars.clear();
    assert!(!p.is_complete());

    let mut p = base;
    p.target_audiences.clear();
    assert!(!p.is_complete());
}

#[tokio::test]
async fn test_completeness_scenario() {
    let (db, _temp) = create_test_db();
    let store = StrategyStore::new(db);
    let scope = Some("launch-a");

    // Start from an empty slate for the project
    let mut profile = default_profile();
    profile.content_pillars.clear();
    profile.target_audiences.clear();
    profile.content_categories.clear();
    profile.brand_dna_profile.brand_name = "Acme".to_string();
    profile.brand_dna_profile.tagline = "Go".to_string();
    store.replace_all(scope, profile).await.unwrap();

    // Brand fields alone are not enough
    assert!(!store.is_complete(scope).await.unwrap());

    store
        .update_content_pillars(scope, vec![pillar("p1", "Awareness")])
        .await
        .unwrap();
    assert!(!store.is_complete(scope).await.unwrap());

    store
        .update_target_audiences(scope, vec![audience("a1", "Founders")])
        .await
        .unwrap();
    assert!(store.is_complete(scope).await.unwrap());
}

#[tokio::test]
async fn test_scopes_are_independent() {
    let (db, _temp) = create_test_db();
    let store = StrategyStore::new(db);

    let mut profile = default_profile();
    profile.brand_dna_profile.brand_name = "ScopedBrand".to_string();
    store.replace_all(Some("p1"), profile).await.unwrap();

    // The default scope and other projects still see the built-in profile
    let fallback = store.get(None).await.unwrap();
    assert_eq!(fallback.brand_dna_profile.brand_name, "Healthiera");
    let other = store.get(Some("p2")).await.unwrap();
    assert_eq!(other.brand_dna_profile.brand_name, "Healthiera");

    let scoped = store.get(Some("p1")).await.unwrap();
    assert_eq!(scoped.brand_dna_profile.brand_name, "ScopedBrand");
}

#[tokio::test]
async fn test_profile_round_trips_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let mut profile = default_profile();
    profile.brand_dna_profile.brand_name = "Persisted".to_string();
    profile.ultimate_goal = "Ship it".to_string();

    {
        let db = Database::new(&db_path).unwrap();
        let store = StrategyStore::new(db);
        store.replace_all(Some("p1"), profile.clone()).await.unwrap();
    }

    // Reopen the database, simulating a fresh session
    let db = Database::new(&db_path).unwrap();
    let store = StrategyStore::new(db);
    let reloaded = store.get(Some("p1")).await.unwrap();
    assert_eq!(reloaded, profile);
}

#[tokio::test]
async fn test_replacing_pillars_drops_orphaned_categories() {
    let (db, _temp) = create_test_db();
    let store = StrategyStore::new(db);
    let scope = Some("p1");

    store
        .update_content_pillars(scope, vec![pillar("p1", "One"), pillar("p2", "Two")])
        .await
        .unwrap();
    store
        .update_content_categories(scope, vec![category("c1", "p1"), category("c2", "p2")])
        .await
        .unwrap();

    // Dropping pillar p2 takes its category with it
    let profile = store
        .update_content_pillars(scope, vec![pillar("p1", "One")])
        .await
        .unwrap();

    assert_eq!(profile.content_categories.len(), 1);
    assert_eq!(profile.content_categories[0].id, "c1");
}

#[tokio::test]
async fn test_subtree_updates_only_touch_their_subtree() {
    let (db, _temp) = create_test_db();
    let store = StrategyStore::new(db);

    let mut brand = default_profile().brand_dna_profile;
    brand.brand_name = "NewBrand".to_string();
    store.update_brand_profile(None, brand).await.unwrap();

    let profile = store.get(None).await.unwrap();
    assert_eq!(profile.brand_dna_profile.brand_name, "NewBrand");
    // The rest of the default profile is untouched
    assert_eq!(profile.content_pillars, default_profile().content_pillars);
    assert_eq!(profile.ultimate_goal, default_profile().ultimate_goal);
}

#[tokio::test]
async fn test_corrupt_document_falls_back_to_default() {
    let (db, _temp) = create_test_db();

    {
        let conn = db.lock().await;
        conn.execute(
            "INSERT INTO documents (key, value, updated_at)
             VALUES ('strategy_default', 'garbage', '')",
            [],
        )
        .unwrap();
    }

    let store = StrategyStore::new(db);
    assert_eq!(store.get(None).await.unwrap(), default_profile());
}

#[tokio::test]
async fn test_brand_colors_extracts_hex_codes() {
    let profile = default_profile();
    assert_eq!(
        profile.brand_colors(),
        vec!["#F5F1E9", "#FFFFFF", "#994A00", "#F2C34E", "#2C2C2C"]
    );
}

#[tokio::test]
async fn test_generation_context_shape() {
    let profile = default_profile();
    let context = profile.generation_context();

    assert_eq!(context["brand"]["name"], "Healthiera");
    assert_eq!(context["audience"]["name"], "Health-Conscious Professionals");
    assert_eq!(context["contentPillars"].as_array().unwrap().len(), 3);

    let mut empty = profile;
    empty.target_audiences.clear();
    assert!(empty.generation_context()["audience"].is_null());
}
