//! Integration tests for elevate-core
//!
//! These run the settings service against a real SQLite database in a
//! temporary directory.

use std::sync::Arc;

use elevate_core::{Error, SqliteUserSettingsDao, UserSettingsService, ZoneSetEditor};
use elevate_types::{EnvTarget, SystemUnits, UserSettings, ZoneModel, ZoneType, fields};

fn open_service(path: &std::path::Path, target: EnvTarget) -> UserSettingsService<SqliteUserSettingsDao> {
    let dao = SqliteUserSettingsDao::open(path, target).unwrap();
    UserSettingsService::new(Arc::new(dao))
}

#[tokio::test]
async fn test_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.db");

    {
        let service = open_service(&path, EnvTarget::Extension);
        let settings = service.fetch().await.unwrap();
        assert_eq!(settings, UserSettings::defaults(EnvTarget::Extension));

        service
            .update_option(fields::SYSTEM_UNITS, "imperial")
            .await
            .unwrap();
        service.clear_local_storage_on_next_load().await.unwrap();
    }

    let service = open_service(&path, EnvTarget::Extension);
    let settings = service.fetch().await.unwrap();
    assert_eq!(settings.system_units(), SystemUnits::Imperial);
    assert!(settings.local_storage_must_be_cleared());
}

#[tokio::test]
async fn test_zone_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir.path().join("settings.db"), EnvTarget::Desktop);

    let current = service.zones(ZoneType::HeartRate).await.unwrap();
    let mut editor = ZoneSetEditor::new(ZoneType::HeartRate.definition(), current);
    editor.add_last_zone().unwrap();
    editor.update_boundary(1, 125.0).unwrap();
    assert!(editor.is_compliant());

    let edited = editor.into_zones();
    let saved = service
        .update_zones(ZoneType::HeartRate.definition(), &edited)
        .await
        .unwrap();
    assert_eq!(saved, edited);
    assert_eq!(saved[0], ZoneModel::new(0.0, 125.0));

    let reset = service.reset_zones().await.unwrap();
    assert_eq!(reset.zones(), UserSettings::defaults(EnvTarget::Desktop).zones());
}

#[tokio::test]
async fn test_invalid_zones_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir.path().join("settings.db"), EnvTarget::Extension);
    let before = service.fetch().await.unwrap();

    let zones = [
        ZoneModel::new(0.0, 100.0),
        ZoneModel::new(100.0, 90.0),
        ZoneModel::new(90.0, 200.0),
    ];
    let err = service
        .update_zones(ZoneType::Power.definition(), &zones)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidZones { zone_type: ZoneType::Power, .. }));

    assert_eq!(service.fetch().await.unwrap(), before);
}

#[tokio::test]
async fn test_reset_replaces_document() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir.path().join("settings.db"), EnvTarget::Desktop);

    service
        .update_option(fields::SYNC_ON_STARTUP, false)
        .await
        .unwrap();
    let reset = service.reset().await.unwrap();
    assert_eq!(reset, UserSettings::defaults(EnvTarget::Desktop));
    assert_eq!(service.fetch().await.unwrap(), reset);
}

#[tokio::test]
async fn test_desktop_rejects_extension_only_flag() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir.path().join("settings.db"), EnvTarget::Desktop);

    let err = service.clear_local_storage_on_next_load().await.unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(
        service.fetch().await.unwrap(),
        UserSettings::defaults(EnvTarget::Desktop)
    );
}
