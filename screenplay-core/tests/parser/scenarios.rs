//! Whole-document parsing scenarios checked through the script dump.

use insta::assert_snapshot;
use screenplay_core::{parse, parse_with_options, Character, Element, ElementKind, ParserOptions, Script};

fn kinds(script: &Script) -> Vec<ElementKind> {
    script.elements().iter().map(Element::kind).collect()
}

fn no_merge() -> ParserOptions {
    ParserOptions {
        merge_actions: false,
        merge_dialogue: false,
        use_tags: false,
    }
}

// ============================================================================
// DISAMBIGUATION
// ============================================================================

#[test]
fn test_transition_followed_by_blank_line() {
    let script = parse("Some action.\n\nCUT TO:\n\nMore action.");
    assert_eq!(
        kinds(&script),
        [ElementKind::Action, ElementKind::Transition, ElementKind::Action]
    );
    assert_eq!(script.elements()[1].text(), "CUT TO:");
}

#[test]
fn test_transition_followed_by_text_is_action() {
    let script = parse_with_options("Some action.\n\nCUT TO:\nMore action.", no_merge());
    assert_eq!(
        kinds(&script),
        [
            ElementKind::Action,
            ElementKind::Action,
            ElementKind::Action,
            ElementKind::Action
        ]
    );
    assert_eq!(script.elements()[2].text(), "CUT TO:");
}

#[test]
fn test_transition_at_end_of_input_is_confirmed() {
    let script = parse("Some action.\n\nSMASH CUT TO:");
    assert_eq!(kinds(&script), [ElementKind::Action, ElementKind::Transition]);
}

#[test]
fn test_character_followed_by_dialogue() {
    let script = parse("\nJOHN\nHello there");
    assert_eq!(kinds(&script), [ElementKind::Character, ElementKind::Dialogue]);
    assert_eq!(script.elements()[1].text(), "Hello there");
}

#[test]
fn test_character_followed_by_blank_is_action() {
    let script = parse("\nJOHN\n");
    assert_eq!(kinds(&script), [ElementKind::Action]);
    assert_eq!(script.elements()[0].text(), "JOHN");
}

#[test]
fn test_forced_scene_heading_with_number() {
    let script = parse(".INT SPACE STATION #14A#");
    let Some(Element::SceneHeading(heading)) = script.elements().first() else {
        panic!("expected a scene heading");
    };
    assert!(heading.forced);
    assert_eq!(heading.content.text(), "INT SPACE STATION");
    assert_eq!(heading.scene_number.as_deref(), Some("14A"));
}

// ============================================================================
// MERGING
// ============================================================================

#[test]
fn test_dialogue_merge_and_split() {
    let text = "\nBOB\nLine one.\nLine two.";

    let merged = parse(text);
    assert_eq!(kinds(&merged), [ElementKind::Character, ElementKind::Dialogue]);
    assert_eq!(merged.elements()[1].text_raw(), "Line one.\nLine two.");

    let split = parse_with_options(text, no_merge());
    assert_eq!(
        kinds(&split),
        [
            ElementKind::Character,
            ElementKind::Dialogue,
            ElementKind::Dialogue
        ]
    );
}

#[test]
fn test_dialogue_break_inside_speech() {
    let text = "\nBOB\nLine one.\n  \nLine two.";

    let merged = parse(text);
    assert_eq!(merged.elements()[1].text_raw(), "Line one.\n\nLine two.");

    let split = parse_with_options(text, no_merge());
    let texts: Vec<_> = split.elements().iter().map(Element::text).collect();
    assert_eq!(texts, ["BOB", "Line one.", "", "Line two."]);
}

#[test]
fn test_action_padding_is_absorbed() {
    let script = parse("One.\n\nTwo.");
    assert_eq!(kinds(&script), [ElementKind::Action]);
    assert_eq!(script.elements()[0].text_raw(), "One.\n\nTwo.");
}

#[test]
fn test_centered_action_is_never_merged() {
    let script = parse("One.\n>Centered<\nTwo.");
    assert_eq!(
        kinds(&script),
        [ElementKind::Action, ElementKind::Action, ElementKind::Action]
    );
}

#[test]
fn test_repeated_character_merge() {
    let mut script = Script::new();
    script.add_element(Character::new("FRED"), false);
    script.add_element(Character::new("FRED"), true);
    assert_eq!(script.elements().len(), 1);
}

// ============================================================================
// FULL DOCUMENTS
// ============================================================================

#[test]
fn test_short_scene() {
    let text = "Title: Brick & Steel
Credit: Written by
Author: Stu Maschwitz

EXT. BRICK'S PATIO - DAY #1#

A gorgeous day.  The sun is shining.

But BRICK BRADDOCK, retired police detective, is sitting quietly.

STEEL (O.S.)
Beer's ready!

BRICK
Are they cold?

STEEL
(beer raised)
To retirement.
Never again.

> FADE OUT.

>THE END<
";
    assert_snapshot!(parse(text).dump(), @r#"
    TITLEENTRY:"Title":"Brick & Steel"
    TITLEENTRY:"Credit":"Written by"
    TITLEENTRY:"Author":"Stu Maschwitz"
    HEADING:"EXT. BRICK'S PATIO - DAY" (1)
    ACTION:"A gorgeous day.  The sun is shining.

    But BRICK BRADDOCK, retired police detective, is sitting quietly."
    CHARACTER:"STEEL" "(O.S.)"
    DIALOGUE:"Beer's ready!"
    CHARACTER:"BRICK"
    DIALOGUE:"Are they cold?"
    CHARACTER:"STEEL"
    PARENTHETICAL:"beer raised"
    DIALOGUE:"To retirement.
    Never again."
    TRANSITION:"FADE OUT."
    ACTION:"THE END" (centered)
    "#);
}

#[test]
fn test_dual_dialogue() {
    let text = "BRICK\nScrew retirement.\n\nSTEEL ^\nScrew retirement.";
    assert_snapshot!(parse(text).dump(), @r#"
    CHARACTER:"BRICK"
    DIALOGUE:"Screw retirement."
    CHARACTER:"STEEL" (Dual)
    DIALOGUE:"Screw retirement."
    "#);
}

#[test]
fn test_outline_and_forced_elements() {
    let text = "# ACT I
## Setup
= Brick meets Steel.
~Willy nilly
===
.OPENING
@McCLANE
Yippee.";
    assert_snapshot!(parse(text).dump(), @r#"
    SECTION:"ACT I" (1)
    SECTION:"Setup" (2)
    SYNOPSIS:"Brick meets Steel."
    LYRIC:"Willy nilly"
    PAGEBREAK:""
    HEADING:"OPENING"
    CHARACTER:"McCLANE"
    DIALOGUE:"Yippee."
    "#);
}

#[test]
fn test_continued_cue_keeps_plain_name() {
    let script = parse("\nBOB (CONT'D)\nStill talking.");
    let Some(Element::Character(character)) = script.elements().first() else {
        panic!("expected a character");
    };
    assert_eq!(character.name, "BOB");
    assert_eq!(character.extension, None);
}

#[test]
fn test_script_serializes_to_json() {
    let script = parse("Title: Big Fish\n\nBOB ^\nHi.\n\nShe waves. [[friendly]]");
    let value = serde_json::to_value(&script).unwrap();

    assert_eq!(value["title_entries"][0]["key"], "Title");
    assert_eq!(value["title_entries"][0]["value"]["text"], "Big Fish");
    assert_eq!(value["elements"][0]["type"], "character");
    assert_eq!(value["elements"][0]["name"], "BOB");
    assert_eq!(value["elements"][0]["dual_dialogue"], true);
    assert_eq!(value["elements"][1]["type"], "dialogue");
    assert_eq!(value["elements"][1]["text"], "Hi.");
    assert_eq!(value["elements"][2]["type"], "action");
    assert_eq!(value["notes"][0]["text"], "friendly");
    assert!(value.get("last_character").is_none());
}
