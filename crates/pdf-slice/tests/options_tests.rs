use pdf_slice::*;
use std::path::PathBuf;

#[test]
fn test_default_options_are_valid() {
    let options = SliceOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.panoramic_threshold, 4.0);
    assert_eq!(options.background, [255, 255, 255]);
    assert_eq!(options.max_file_size, 20 * 1024 * 1024);
}

#[test]
fn test_validation_rejects_bad_threshold() {
    for threshold in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let options = SliceOptions {
            panoramic_threshold: threshold,
            ..Default::default()
        };
        match options.validate() {
            Err(SliceError::Config(msg)) => assert!(msg.contains("Panoramic threshold")),
            other => panic!("Expected Config error for {}, got {:?}", threshold, other),
        }
    }
}

#[test]
fn test_validation_rejects_zero_size_limit() {
    let options = SliceOptions {
        max_file_size: 0,
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(SliceError::Config(_))));
}

#[tokio::test]
async fn test_invalid_options_abort_batch() {
    let output = tempfile::tempdir().unwrap();
    let options = SliceOptions {
        panoramic_threshold: -2.0,
        ..Default::default()
    };
    let source = SourceImage::new("a.png", image::RgbaImage::new(4, 4));

    let result = BatchRunner::new(options)
        .run(
            vec![source.into()],
            &mut FixedDirectory::new(output.path()),
            &mut AppConfig::default(),
        )
        .await;
    assert!(matches!(result, Err(SliceError::Config(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let mut config = AppConfig::default();
    config.remember_output_dir("/tmp/pdfs");
    config.options.panoramic_threshold = 6.5;
    config.options.background = [10, 20, 30];
    config.options.title_from_name = false;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    config.save(path).await.unwrap();
    let loaded = AppConfig::load(path).await.unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.last_output_dir, Some(PathBuf::from("/tmp/pdfs")));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_or_default(dir.path().join("missing.json"))
        .await
        .unwrap();
    assert_eq!(config, AppConfig::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, r#"{ "last_output_dir": "/out" }"#)
        .await
        .unwrap();

    let config = AppConfig::load(&path).await.unwrap();
    assert_eq!(config.last_output_dir, Some(PathBuf::from("/out")));
    assert_eq!(config.options, SliceOptions::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    match AppConfig::load(&path).await {
        Err(SliceError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
    // A broken file is not silently replaced by defaults
    assert!(AppConfig::load_or_default(&path).await.is_err());
}
