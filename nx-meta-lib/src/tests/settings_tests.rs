use super::*;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings = load_settings_from(&tmp.path().join("settings.toml"));
    assert_eq!(settings, EditorSettings::default());
    assert_eq!(settings.validation.mode, ValidationMode::Strict);
    assert!(settings.export.output_dir.is_none());
}

#[test]
fn test_corrupt_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(&path, "[validation\nmode = 3").unwrap();
    assert_eq!(load_settings_from(&path), EditorSettings::default());
}

#[test]
fn test_partial_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(&path, "[validation]\nmode = \"legacy\"\n").unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.validation.mode, ValidationMode::Legacy);
    assert!(settings.export.output_dir.is_none());
}

#[test]
fn test_save_and_reload() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("settings.toml");

    let mut settings = EditorSettings::default();
    settings.validation.mode = ValidationMode::Legacy;
    settings.export.output_dir = Some(PathBuf::from("/srv/titles"));
    save_settings_to(&settings, &path).unwrap();

    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_settings_from(&path), settings);
}

#[test]
fn test_resolve_output_dir() {
    let mut settings = EditorSettings::default();
    let fallback = Path::new("here");

    assert_eq!(resolve_output_dir(None, &settings, fallback), PathBuf::from("here"));

    settings.export.output_dir = Some(PathBuf::from("saved"));
    assert_eq!(resolve_output_dir(None, &settings, fallback), PathBuf::from("saved"));
    assert_eq!(
        resolve_output_dir(Some(PathBuf::from("flag")), &settings, fallback),
        PathBuf::from("flag")
    );
}
