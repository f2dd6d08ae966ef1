use nvmp_remover::config::Config;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn parse_complete_config_file() {
    let config_content = r#"
[locator]
game_dir = "/games/Fallout New Vegas"
mo2_dir = "/tools/Mod Organizer 2"
vortex_dir = "/vortex/falloutnv/mods"

[remover]
backup_dir = "/backups"
permanent = true
max_matches = 500
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(
        config.locator.game_dir,
        Some(PathBuf::from("/games/Fallout New Vegas"))
    );
    assert_eq!(
        config.locator.mo2_dir,
        Some(PathBuf::from("/tools/Mod Organizer 2"))
    );
    assert_eq!(config.remover.backup_dir, Some(PathBuf::from("/backups")));
    assert!(config.remover.permanent);
    assert_eq!(config.remover.max_matches, 500);
}

#[test]
fn parse_partial_config_uses_defaults() {
    let config_content = r#"
[remover]
permanent = true
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    // Explicit value
    assert!(config.remover.permanent);
    // Default values
    assert_eq!(config.remover.max_matches, 10_000);
    assert!(config.locator.game_dir.is_none());
}

#[test]
fn parse_invalid_toml_returns_error() {
    let config_content = "this is not valid toml [[[";

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = Config::load(Some(file.path()));
    assert!(result.is_err());
}

#[test]
fn parse_zero_cap_returns_error() {
    let config_content = r#"
[remover]
max_matches = 0
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = Config::load(Some(file.path()));
    assert!(result.is_err());
}
