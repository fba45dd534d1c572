//! Identity provider store integration tests.

use idp_model::{IdentityProvider, IdentityProviderBuilder, LocalAuthenticatorConfig};
use idp_storage::IdentityProviderStore;

use crate::common::TestEnv;

/// Builds a not-yet-persisted provider with the given metadata triple.
fn test_provider(name: &str, label: &str, description: &str) -> IdentityProvider {
    IdentityProviderBuilder::new(IdentityProvider::UNSET_ID, name)
        .dialect_id(1)
        .display_label(label)
        .description(description)
        .build()
        .expect("valid provider")
}

#[tokio::test]
async fn create_returns_nonzero_id_and_extends_listing() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let listing = env.store.list_all().await?;
    assert!(listing.is_empty(), "store starts empty");

    let provider = test_provider("Test Name", "Test Label", "Test Desc");
    let id = env.store.create(&provider).await?;
    assert_ne!(id, 0, "new provider should have non-zero id");

    let listing = env.store.list_all().await?;
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, id);
    assert_eq!(listing[0].name, "Test Name");

    Ok(())
}

#[tokio::test]
async fn listing_filters_on_enabled_flag() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    sqlx::query(
        "INSERT INTO idp (name, display_name, description, is_enabled) VALUES ($1, $1, $1, TRUE)",
    )
    .bind("No Name")
    .execute(&env.pool)
    .await?;
    sqlx::query(
        "INSERT INTO idp (name, display_name, description, is_enabled) VALUES ($1, $1, $1, FALSE)",
    )
    .bind("No Name2")
    .execute(&env.pool)
    .await?;

    let enabled = env.store.list_enabled().await?;
    assert_eq!(enabled.len(), 1, "only one provider is enabled");
    assert_eq!(enabled[0].name, "No Name");

    let all = env.store.list_all().await?;
    assert_eq!(all.len(), 2, "both providers are stored");

    Ok(())
}

#[tokio::test]
async fn rows_without_explicit_flag_default_to_enabled() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    sqlx::query("INSERT INTO idp (name, display_name, description) VALUES ($1, $1, $1)")
        .bind("No Name")
        .execute(&env.pool)
        .await?;

    let enabled = env.store.list_enabled().await?;
    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].name, "No Name");

    Ok(())
}

#[tokio::test]
async fn disabled_providers_are_stored_but_filtered() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.store
        .create(&test_provider("Enabled", "Enabled", "Enabled"))
        .await?;
    let disabled = IdentityProviderBuilder::new(IdentityProvider::UNSET_ID, "Disabled")
        .enabled(false)
        .build()?;
    env.store.create(&disabled).await?;

    let enabled = env.store.list_enabled().await?;
    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].name, "Enabled");

    assert_eq!(env.store.list_all().await?.len(), 2);
    assert_eq!(env.store.count().await?, 2);

    Ok(())
}

#[tokio::test]
async fn get_by_id_round_trips_metadata() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let id = env
        .store
        .create(&test_provider("Test Name", "Test Label", "Test Desc"))
        .await?;

    let found = env
        .store
        .get_by_id(id)
        .await?
        .expect("provider exists after create");

    assert_eq!(found.id(), id, "id should match after query");
    assert_eq!(found.name(), "Test Name");
    assert_eq!(found.display_label(), Some("Test Label"));
    assert_eq!(found.description(), Some("Test Desc"));
    assert_eq!(found.dialect_id(), Some(1));
    assert!(found.is_enabled());
    assert!(found.is_persisted());

    Ok(())
}

#[tokio::test]
async fn get_by_name_finds_existing_and_reports_absence() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.store
        .create(&test_provider("Test Name", "Test Label", "Test Desc"))
        .await?;

    let found = env
        .store
        .get_by_name("Test Name")
        .await?
        .expect("provider exists after create");
    assert_eq!(found.name(), "Test Name", "name should match after query");

    let absent = env.store.get_by_name("Test Name-Not Exists").await?;
    assert!(absent.is_none(), "non-existing record returns absence");

    let absent_id = env.store.get_by_id(9999).await?;
    assert!(absent_id.is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_partial_record() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.store
        .create(&test_provider("Test Name", "First", "First"))
        .await?;

    let err = env
        .store
        .create(&test_provider("Test Name", "Second", "Second"))
        .await
        .expect_err("second create with same name must fail");
    assert!(err.is_duplicate(), "unexpected error: {err}");

    let all = env.store.list_all().await?;
    assert_eq!(all.len(), 1, "losing insert leaves no record behind");

    let found = env.store.get_by_name("Test Name").await?.unwrap();
    assert_eq!(found.display_label(), Some("First"));

    Ok(())
}

#[tokio::test]
async fn authenticator_configs_round_trip() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let provider = IdentityProviderBuilder::new(IdentityProvider::UNSET_ID, "corp-idp")
        .authenticator_config(
            LocalAuthenticatorConfig::new("basic")
                .property("retries", "3")
                .property("timeout", "30"),
        )
        .authenticator_config(LocalAuthenticatorConfig::new("totp").enabled(false))
        .build()?;

    let id = env.store.create(&provider).await?;
    let found = env.store.get_by_id(id).await?.unwrap();

    assert_eq!(found.authenticator_configs().len(), 2);

    let basic = found.authenticator_config("basic").unwrap();
    assert!(basic.is_enabled());
    assert_eq!(basic.property_value("retries"), Some("3"));
    assert_eq!(basic.property_value("timeout"), Some("30"));

    let totp = found.authenticator_config("totp").unwrap();
    assert!(!totp.is_enabled());
    assert!(totp.properties().is_empty());

    Ok(())
}

#[tokio::test]
async fn resident_flag_round_trips() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let resident = IdentityProviderBuilder::resident(IdentityProvider::UNSET_ID, "LOCAL").build()?;
    let id = env.store.create(&resident).await?;

    let found = env.store.get_by_id(id).await?.unwrap();
    assert!(found.is_resident());

    let standard = env
        .store
        .create(&test_provider("Standard", "Standard", "Standard"))
        .await?;
    let found = env.store.get_by_id(standard).await?.unwrap();
    assert!(!found.is_resident());

    Ok(())
}

#[tokio::test]
async fn update_replaces_metadata_and_configs() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let provider = IdentityProviderBuilder::new(IdentityProvider::UNSET_ID, "corp-idp")
        .display_label("Before")
        .authenticator_config(LocalAuthenticatorConfig::new("basic"))
        .build()?;
    let id = env.store.create(&provider).await?;

    let updated = IdentityProviderBuilder::new(id, "corp-idp")
        .display_label("After")
        .description("Now documented")
        .enabled(false)
        .authenticator_config(LocalAuthenticatorConfig::new("totp").property("digits", "6"))
        .build()?;
    env.store.update(&updated).await?;

    let found = env.store.get_by_id(id).await?.unwrap();
    assert_eq!(found.display_label(), Some("After"));
    assert_eq!(found.description(), Some("Now documented"));
    assert!(!found.is_enabled());
    assert_eq!(found.authenticator_configs().len(), 1);
    assert!(found.authenticator_config("basic").is_none());
    assert_eq!(
        found
            .authenticator_config("totp")
            .unwrap()
            .property_value("digits"),
        Some("6")
    );

    Ok(())
}

#[tokio::test]
async fn update_of_missing_provider_reports_not_found() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let ghost = IdentityProviderBuilder::new(4242, "ghost").build()?;
    let err = env
        .store
        .update(&ghost)
        .await
        .expect_err("updating a missing provider must fail");
    assert!(err.is_not_found(), "unexpected error: {err}");

    Ok(())
}

#[tokio::test]
async fn delete_removes_provider_and_configs() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let provider = IdentityProviderBuilder::new(IdentityProvider::UNSET_ID, "corp-idp")
        .authenticator_config(LocalAuthenticatorConfig::new("basic"))
        .build()?;
    let id = env.store.create(&provider).await?;

    env.store.delete(id).await?;

    assert!(env.store.get_by_id(id).await?.is_none());
    let (orphans,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM idp_authenticator WHERE idp_id = $1")
            .bind(id)
            .fetch_one(&env.pool)
            .await?;
    assert_eq!(orphans, 0, "configs are deleted by cascade");

    let err = env
        .store
        .delete(id)
        .await
        .expect_err("second delete must fail");
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn exists_by_name_follows_store_state() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    assert!(!env.store.exists_by_name("corp-idp").await?);

    env.store
        .create(&test_provider("corp-idp", "Corp", "Corp"))
        .await?;
    assert!(env.store.exists_by_name("corp-idp").await?);

    Ok(())
}
