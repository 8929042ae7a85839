use std::path::{Path, PathBuf};

use mdplot::config::{ConfigError, ViewerConfig, DEFAULT_STAGING_DIR, DEFAULT_TITLE};

#[test]
fn defaults() {
    let cfg = ViewerConfig::default();
    assert_eq!(cfg.title, DEFAULT_TITLE);
    assert_eq!(cfg.export.width_in, 6.0);
    assert_eq!(cfg.export.height_in, 4.0);
    assert_eq!(cfg.export.dpi, 500);
    assert_eq!(cfg.staging_dir, PathBuf::from(DEFAULT_STAGING_DIR));
    assert!(cfg.gmx_path.ends_with("gmx"));
}

#[test]
fn partial_yaml_keeps_defaults() {
    let yaml = "title: Docking run\nexport:\n  dpi: 300\ngmx_path: /opt/gromacs/bin/gmx\n";
    let cfg = ViewerConfig::from_yaml(yaml, Path::new("mdplot.yaml")).unwrap();
    assert_eq!(cfg.title, "Docking run");
    assert_eq!(cfg.export.dpi, 300);
    assert_eq!(cfg.export.width_in, 6.0);
    assert_eq!(cfg.gmx_path, PathBuf::from("/opt/gromacs/bin/gmx"));
    assert_eq!(cfg.window_size, ViewerConfig::default().window_size);
}

#[test]
fn loads_from_file_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mdplot.yaml");
    let cfg = ViewerConfig {
        title: "Comparison".into(),
        ..ViewerConfig::default()
    };
    std::fs::write(&path, cfg.to_yaml().unwrap()).unwrap();
    assert_eq!(ViewerConfig::load(&path).unwrap(), cfg);
    assert_eq!(ViewerConfig::load_or_default(Some(&path)).unwrap(), cfg);
    assert_eq!(
        ViewerConfig::load_or_default(None).unwrap().title,
        DEFAULT_TITLE
    );
}

#[test]
fn errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let err = ViewerConfig::load(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));

    let bad = ViewerConfig::from_yaml("window_size: nope", Path::new("bad.yaml")).unwrap_err();
    assert!(matches!(bad, ConfigError::Yaml { .. }));
}
