use booklet_impose::*;
use std::path::PathBuf;

#[test]
fn test_default_options() {
    let options = BookletOptions::default();
    assert_eq!(options.sheets_per_block, 5);
    assert_eq!(options.pages_per_block(), 20);
    assert_eq!(options.prefix, "fascicolo");
    assert_eq!(options.front_cover_blanks, 2);
    assert_eq!(options.back_cover_blanks, 2);
    assert_eq!(options.sheet_thickness_mm, 0.1);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_sheets_per_block() {
    let mut options = BookletOptions::default();

    options.sheets_per_block = 1;
    assert!(options.validate().is_ok());

    options.sheets_per_block = 12;
    assert!(options.validate().is_ok());

    options.sheets_per_block = 0;
    match options.validate() {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Sheets per block")),
        _ => panic!("Expected Config error"),
    }

    options.sheets_per_block = usize::MAX;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_prefix() {
    let mut options = BookletOptions::default();

    options.prefix = String::new();
    assert!(options.validate().is_err());

    options.prefix = "   ".to_string();
    assert!(options.validate().is_err());

    options.prefix = "../escape".to_string();
    assert!(options.validate().is_err());

    options.prefix = "sub\\dir".to_string();
    assert!(options.validate().is_err());

    options.prefix = "..".to_string();
    assert!(options.validate().is_err());

    options.prefix = "volume".to_string();
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_sheet_thickness() {
    let mut options = BookletOptions::default();

    options.sheet_thickness_mm = 0.0;
    assert!(options.validate().is_err());

    options.sheet_thickness_mm = -0.1;
    assert!(options.validate().is_err());

    options.sheet_thickness_mm = f32::NAN;
    assert!(options.validate().is_err());

    options.sheet_thickness_mm = 0.12;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_cover_blanks() {
    let mut options = BookletOptions {
        sheets_per_block: 2,
        ..Default::default()
    };

    // One full block of cover blanks is still accepted
    options.front_cover_blanks = 8;
    options.back_cover_blanks = 8;
    assert!(options.validate().is_ok());

    options.front_cover_blanks = 9;
    match options.validate() {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Front cover blanks")),
        _ => panic!("Expected Config error"),
    }

    options.front_cover_blanks = 0;
    options.back_cover_blanks = usize::MAX;
    match options.validate() {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Back cover blanks")),
        _ => panic!("Expected Config error"),
    }

    options.back_cover_blanks = 0;
    options.front_cover_blanks = usize::MAX;
    assert!(options.validate().is_err());
}

#[test]
fn test_output_paths() {
    let options = BookletOptions {
        output_dir: PathBuf::from("out"),
        prefix: "thesis".to_string(),
        ..Default::default()
    };

    assert_eq!(options.block_path(1), PathBuf::from("out").join("thesis_1.pdf"));
    assert_eq!(options.block_path(12), PathBuf::from("out").join("thesis_12.pdf"));
    assert_eq!(options.info_path(), PathBuf::from("out").join("thesis_info.txt"));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let options = BookletOptions {
        output_dir: PathBuf::from("blocks"),
        prefix: "quire".to_string(),
        sheets_per_block: 4,
        front_cover_blanks: 0,
        back_cover_blanks: 1,
        sheet_thickness_mm: 0.12,
    };
    options.save(&path).await.unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    std::fs::write(&path, r#"{ "sheets_per_block": 3 }"#).unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded.sheets_per_block, 3);
    assert_eq!(loaded.prefix, "fascicolo");
    assert_eq!(loaded.front_cover_blanks, 2);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    std::fs::write(&path, "not json").unwrap();

    match BookletOptions::load(&path).await {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected Config error"),
    }
}
