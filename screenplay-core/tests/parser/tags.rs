//! Trailing `#tag` handling when tags are enabled.

use insta::assert_snapshot;
use screenplay_core::{parse, parse_with_options, ParserOptions};

fn with_tags() -> ParserOptions {
    ParserOptions {
        use_tags: true,
        ..ParserOptions::default()
    }
}

#[test]
fn test_tags_follow_their_elements() {
    let text = "INT. HOUSE - DAY #intro

BOB #hero
Hello there. #greeting

CUT TO: #edit

Action line #one
continues #two";
    assert_snapshot!(parse_with_options(text, with_tags()).dump(), @r#"
    HEADING:"INT. HOUSE - DAY" tags:intro
    CHARACTER:"BOB" tags:hero
    DIALOGUE:"Hello there." tags:greeting
    TRANSITION:"CUT TO:" tags:edit
    ACTION:"Action line
    continues" tags:one,two
    "#);
}

#[test]
fn test_title_entry_tags() {
    let script = parse_with_options("Title: Big Fish #draft\n\nAction.", with_tags());
    assert_eq!(
        script.title_entries()[0].dump(),
        "TITLEENTRY:\"Title\":\"Big Fish\" tags:draft"
    );
}

#[test]
fn test_tags_disabled_by_default() {
    let script = parse("Action line #one");
    assert_eq!(script.elements()[0].text(), "Action line #one");
    assert!(script.elements()[0].tags().is_empty());
}
