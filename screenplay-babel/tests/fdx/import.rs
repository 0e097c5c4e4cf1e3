//! Import tests for Final Draft (FDX → Script)

use insta::assert_snapshot;
use screenplay_babel::format::Format;
use screenplay_babel::formats::fdx::FdxFormat;
use screenplay_babel::FormatRegistry;

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.fdx");

#[test]
fn test_kitchensink_import() {
    let script = FdxFormat.parse(KITCHENSINK).unwrap();
    assert_snapshot!(script.dump(), @r#"
    HEADING:"EXT. BRICK'S PATIO - DAY" (1)
    ACTION:"A gorgeous day.  The sun is shining."
    CHARACTER:"STEEL" "(O.S.)"
    DIALOGUE:"Beer's ready!"
    CHARACTER:"STEEL"
    PARENTHETICAL:"beer raised"
    DIALOGUE:"To retirement."
    CHARACTER:"BRICK"
    DIALOGUE:"Screw retirement."
    CHARACTER:"STEEL" (Dual)
    DIALOGUE:"Screw retirement."
    TRANSITION:"CUT TO:"
    HEADING:"CLOSE ON BRICK"
    ACTION:"He smiles."
    ACTION:"BRICK, STEEL"
    "#);
}

#[test]
fn test_title_page_is_not_read_as_body() {
    let script = FdxFormat.parse(KITCHENSINK).unwrap();
    assert!(script.title_entries().is_empty());
    assert!(script
        .elements()
        .iter()
        .all(|element| !element.text().contains("Brick & Steel")));
}

#[test]
fn test_truncated_file_is_empty() {
    let truncated = &KITCHENSINK[..KITCHENSINK.len() / 2];
    let script = FdxFormat.parse(truncated).unwrap();
    assert!(script.elements().is_empty());
}

#[test]
fn test_registry_detects_fdx() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.detect_format_from_filename("brick-and-steel.fdx"),
        Some("fdx".to_string())
    );
    let fountain = registry.convert(KITCHENSINK, "fdx", "fountain").unwrap();
    assert!(fountain.contains("EXT. BRICK'S PATIO - DAY #1#"));
    assert!(fountain.contains("STEEL ^"));
}
