use super::*;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("nope.toml"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.input.dead_zone, 0.45);
    assert_eq!(settings.input.repeat_interval(), Duration::from_millis(160));
    assert_eq!(settings.player.page, "emulator.html");
    assert_eq!(settings.metadata.provider, ProviderKind::ScreenScraper);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[input]\nrepeat_interval_ms = 200\n\n[metadata]\nprovider = \"offline\"\n",
    )
    .unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.input.repeat_interval_ms, 200);
    assert_eq!(settings.input.dead_zone, 0.45);
    assert_eq!(settings.metadata.provider, ProviderKind::Offline);
    assert_eq!(settings.metadata.timeout_secs, 30);
    assert_eq!(settings.player, PlayerSettings::default());
}

#[test]
fn corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[input\ndead_zone = ").unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let mut settings = Settings::default();
    settings.player.page = "play.html".to_string();
    settings.input.poll_interval_ms = 8;

    save_settings_to(&path, &settings).unwrap();
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_settings_from(&path), settings);
}

#[test]
fn zero_poll_interval_is_clamped() {
    let input = InputSettings {
        poll_interval_ms: 0,
        ..Default::default()
    };
    assert_eq!(input.poll_interval(), Duration::from_millis(1));
}

#[test]
fn rendered_settings_name_every_table() {
    let text = settings_to_string(&Settings::default());
    assert!(text.contains("[input]"));
    assert!(text.contains("[player]"));
    assert!(text.contains("provider = \"screenscraper\""));
}

#[test]
fn gamepad_config_from_input_settings() {
    let input = InputSettings {
        dead_zone: 0.3,
        repeat_interval_ms: 100,
        ..Default::default()
    };
    let config = input.gamepad_config();
    assert_eq!(config.dead_zone, 0.3);
    assert_eq!(config.repeat_interval, Duration::from_millis(100));
    assert_eq!(InputSettings::default().gamepad_config(), GamepadConfig::default());
}
