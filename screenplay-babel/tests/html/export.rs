//! Export tests for HTML format (Script → HTML)
//!
//! These tests check the page structure and the rendered body blocks.

use insta::assert_snapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use screenplay_babel::format::Format;
use screenplay_babel::formats::fountain::FountainFormat;
use screenplay_babel::formats::html::{HtmlFormat, HtmlTheme};
use screenplay_babel::FormatRegistry;
use std::collections::HashMap;

const KITCHENSINK: &str = include_str!("../fountain/fixtures/kitchensink.fountain");

static BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div class="screenplay-document">\n(.*)</div>\n</body>"#).unwrap()
});

fn fountain_to_html(source: &str, theme: HtmlTheme) -> String {
    let script = FountainFormat::default().parse(source).unwrap();
    HtmlFormat::new(theme).serialize(&script).unwrap()
}

fn body(html: &str) -> String {
    BODY.captures(html)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

// ============================================================================
// DOCUMENT STRUCTURE
// ============================================================================

#[test]
fn test_short_script_body() {
    let source = "Title: Big Fish

INT. HOUSE - DAY #3#

Edward *really*, waits, **again**.

EDWARD
(to himself)
Someday.

## Part Two

===";
    let html = fountain_to_html(source, HtmlTheme::Screenplay);

    assert_snapshot!(body(&html), @r#"
    <div class="screenplay-title-page"><div class="screenplay-title-entry" data-key="Title"><span class="screenplay-title-key">Title</span><span class="screenplay-title-value">Big Fish</span></div></div>
    <h3 class="screenplay-scene-heading">INT. HOUSE - DAY<span class="screenplay-scene-number">3</span></h3>
    <p class="screenplay-action">Edward <i>really</i>, waits, <b>again</b>.</p>
    <p class="screenplay-character">EDWARD</p>
    <p class="screenplay-parenthetical">(to himself)</p>
    <p class="screenplay-dialogue">Someday.</p>
    <h2 class="screenplay-section">Part Two</h2>
    <hr class="screenplay-page-break">
    "#);
}

#[test]
fn test_page_head() {
    let html = fountain_to_html(KITCHENSINK, HtmlTheme::Screenplay);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Brick &amp; Steel</title>"));
    assert!(html.contains("<body class=\"screenplay-theme-screenplay\">"));
    assert!(html.contains(".screenplay-scene-heading"));
    assert!(html.contains("Courier"));
}

#[test]
fn test_untitled_script_uses_default_title() {
    let html = fountain_to_html("INT. HOUSE - DAY", HtmlTheme::Plain);
    assert!(html.contains("<title>Screenplay</title>"));
    assert!(html.contains("<body class=\"screenplay-theme-plain\">"));
    assert!(!html.contains("Courier"));
}

// ============================================================================
// KITCHENSINK
// ============================================================================

#[test]
fn test_kitchensink_blocks() {
    let html = body(&fountain_to_html(KITCHENSINK, HtmlTheme::Screenplay));

    assert!(html.contains("<h1 class=\"screenplay-section\">Act One</h1>"));
    assert!(html.contains("<p class=\"screenplay-synopsis\">Two old partners reunite.</p>"));
    assert!(html.contains("<p class=\"screenplay-character\">STEEL (O.S.)</p>"));
    assert!(html.contains("<p class=\"screenplay-dialogue\">To retirement.<br>Never again.</p>"));
    assert!(html.contains("<p class=\"screenplay-character screenplay-dual\">STEEL</p>"));
    assert!(html.contains("<p class=\"screenplay-transition\">CUT TO:</p>"));
    assert!(html.contains("<p class=\"screenplay-lyric\">Willy the Wonka</p>"));
    assert!(html.contains("<p class=\"screenplay-action screenplay-centered\">THE END</p>"));
    assert!(html.contains("<h3 class=\"screenplay-scene-heading\">FLASHBACK</h3>"));
}

#[test]
fn test_notes_and_boneyards_are_not_rendered() {
    let html = fountain_to_html(KITCHENSINK, HtmlTheme::Screenplay);
    assert!(!html.contains("Check the weather report."));
    assert!(!html.contains("Too slow?"));
    assert!(!html.contains("[[0]]"));
}

#[test]
fn test_every_element_is_one_block() {
    let script = FountainFormat::default().parse(KITCHENSINK).unwrap();
    let html = body(&HtmlFormat::default().serialize(&script).unwrap());
    let title_page = usize::from(!script.title_entries().is_empty());
    assert_eq!(html.lines().count(), script.elements().len() + title_page);
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn test_registry_html_with_options() {
    let registry = FormatRegistry::default();
    let script = registry.parse("INT. HOUSE - DAY", "fountain").unwrap();

    let mut options = HashMap::new();
    options.insert("theme".to_string(), "plain".to_string());
    options.insert("css".to_string(), ".screenplay-action { color: red; }".to_string());
    let html = registry
        .serialize_with_options(&script, "html", &options)
        .unwrap();

    assert!(html.contains("screenplay-theme-plain"));
    assert!(html.contains(".screenplay-action { color: red; }"));
}

#[test]
fn test_unknown_option_is_rejected() {
    let registry = FormatRegistry::default();
    let script = registry.parse("INT. HOUSE - DAY", "fountain").unwrap();

    let mut options = HashMap::new();
    options.insert("landscape".to_string(), "true".to_string());
    let err = registry
        .serialize_with_options(&script, "html", &options)
        .unwrap_err();
    assert!(err.to_string().contains("landscape"));
}
