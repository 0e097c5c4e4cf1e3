//! Writing a parsed script and parsing it again keeps its elements,
//! notes and boneyards.

use proptest::prelude::*;
use screenplay_babel::formats::fountain::{FountainWriter, WriterOptions};
use screenplay_core::{parse, Element, ElementKind, Script};

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.fountain");

fn outline(script: &Script) -> Vec<(ElementKind, String)> {
    script
        .elements()
        .iter()
        .map(|element| (element.kind(), element.text().to_string()))
        .collect()
}

fn annotations(script: &Script) -> (Vec<String>, Vec<String>) {
    (
        script.notes().iter().map(|n| n.text().to_string()).collect(),
        script.boneyards().iter().map(|b| b.text().to_string()).collect(),
    )
}

fn assert_roundtrip(source: &str, options: WriterOptions) {
    let original = parse(source);
    let written = FountainWriter::new(options).write(&original);
    let reparsed = parse(&written);

    assert_eq!(outline(&reparsed), outline(&original), "written:\n{written}");
    assert_eq!(annotations(&reparsed), annotations(&original));
    assert_eq!(reparsed.title_entries(), original.title_entries());
}

// ============================================================================
// FIXTURES
// ============================================================================

#[test]
fn test_kitchensink_roundtrip_pretty() {
    assert_roundtrip(KITCHENSINK, WriterOptions { pretty_print: true });
}

#[test]
fn test_kitchensink_roundtrip_plain() {
    assert_roundtrip(KITCHENSINK, WriterOptions { pretty_print: false });
}

#[test]
fn test_continued_speaker_roundtrip() {
    let source = "\nBOB\nOne.\n\nBOB\nTwo.";
    let written = FountainWriter::default().write(&parse(source));
    assert!(written.contains("BOB (CONT'D)"));
    assert_roundtrip(source, WriterOptions::default());
}

#[test]
fn test_dialogue_break_roundtrip() {
    let source = "\nBOB\nLine one.\n  \nLine two.";
    let original = parse(source);
    let written = FountainWriter::default().write(&original);
    assert_eq!(written, "\t\t\tBOB\n\tLine one.\n\t \n\tLine two.");
    assert_roundtrip(source, WriterOptions::default());
}

#[test]
fn test_multi_line_boneyard_roundtrip() {
    let source = "The door opens.\n/* Cut:\nthe long version\n*/\nShe walks in.";
    let original = parse(source);
    assert_eq!(original.boneyards().len(), 1);
    assert_roundtrip(source, WriterOptions::default());
}

#[test]
fn test_forced_elements_roundtrip() {
    let source = "!INT. NOT A HEADING\n\n@McCLANE\nYippee.\n\n.FLASHBACK #2#";
    let original = parse(source);
    assert!(matches!(&original.elements()[0], Element::Action(a) if a.forced));
    assert!(matches!(&original.elements()[1], Element::Character(c) if c.forced));
    assert_roundtrip(source, WriterOptions::default());
}

#[test]
fn test_transition_before_outline_elements_roundtrip() {
    for next in ["~La la", "= Later that day.", "==="] {
        let source = format!("Action.\n\nCUT TO:\n\n{next}");
        let original = parse(&source);
        assert_eq!(original.elements()[1].kind(), ElementKind::Transition);
        assert_roundtrip(&source, WriterOptions { pretty_print: true });
        assert_roundtrip(&source, WriterOptions { pretty_print: false });
    }
}

#[test]
fn test_cue_shaped_action_before_lyric_roundtrip() {
    for next in ["~La la", "= Later that day.", "==="] {
        let source = format!("\nBOB\n\n{next}");
        let original = parse(&source);
        assert_eq!(original.elements()[0].kind(), ElementKind::Action);
        assert_roundtrip(&source, WriterOptions::default());
    }
}

#[test]
fn test_transition_shaped_action_roundtrip() {
    let source = "He waits.\n\nCUT TO:\n~La la\n\nSMASH TO:\n# Act Two";
    let original = parse(source);
    assert_eq!(
        outline(&original),
        [
            (ElementKind::Action, "He waits.\n\nCUT TO:".to_string()),
            (ElementKind::Lyric, "La la".to_string()),
            (ElementKind::Action, "SMASH TO:".to_string()),
            (ElementKind::Section, "Act Two".to_string()),
        ]
    );
    assert_roundtrip(source, WriterOptions::default());
}

#[test]
fn test_leading_transition_roundtrip() {
    assert_roundtrip("\nCUT TO:\n\nWater.", WriterOptions::default());
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[derive(Debug, Clone)]
enum Paragraph {
    Action(Vec<String>),
    Speech {
        speaker: &'static str,
        parenthetical: bool,
        lines: Vec<String>,
    },
    Transition(&'static str),
    Lyrics(Vec<String>),
    Synopsis(String),
    PageBreak,
    Section(String),
    Centered,
    ForcedAction(String),
    ForcedHeading,
    /// A lone cue with nothing spoken under it stays action.
    BareCue(&'static str),
}

/// Lowercase sentences that may carry an inline note or boneyard.
fn sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z]{2,8}", 1..5),
        prop_oneof![
            Just(None),
            "[a-z]{1,8}( [a-z]{1,8})?".prop_map(|note| Some(format!(" [[{note}]]"))),
            "[a-z]{1,8}".prop_map(|gone| Some(format!(" /*{gone}*/"))),
        ],
    )
        .prop_map(|(words, annotation)| {
            format!("the {}.{}", words.join(" "), annotation.unwrap_or_default())
        })
}

fn words() -> impl Strategy<Value = String> {
    "[a-z]{2,8}( [a-z]{2,8})?"
}

fn paragraph() -> impl Strategy<Value = Paragraph> {
    prop_oneof![
        3 => prop::collection::vec(sentence(), 1..3).prop_map(Paragraph::Action),
        3 => (
            prop::sample::select(vec!["BOB", "ALICE", "DR. NO"]),
            any::<bool>(),
            prop::collection::vec(sentence(), 1..3),
        )
            .prop_map(|(speaker, parenthetical, lines)| Paragraph::Speech {
                speaker,
                parenthetical,
                lines,
            }),
        1 => prop::sample::select(vec!["CUT TO:", "SMASH CUT TO:"]).prop_map(Paragraph::Transition),
        1 => prop::collection::vec(words(), 1..3).prop_map(Paragraph::Lyrics),
        1 => words().prop_map(Paragraph::Synopsis),
        1 => Just(Paragraph::PageBreak),
        1 => words().prop_map(Paragraph::Section),
        1 => Just(Paragraph::Centered),
        1 => sentence().prop_map(Paragraph::ForcedAction),
        1 => Just(Paragraph::ForcedHeading),
        1 => prop::sample::select(vec!["BOB", "ALICE"]).prop_map(Paragraph::BareCue),
    ]
}

fn render(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|paragraph| match paragraph {
            Paragraph::Action(lines) => lines.join("\n"),
            Paragraph::Speech {
                speaker,
                parenthetical,
                lines,
            } => {
                let mut block = vec![speaker.to_string()];
                if *parenthetical {
                    block.push("(quietly)".to_string());
                }
                block.extend(lines.iter().cloned());
                block.join("\n")
            }
            Paragraph::Transition(text) => text.to_string(),
            Paragraph::Lyrics(lines) => lines
                .iter()
                .map(|line| format!("~{line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Paragraph::Synopsis(text) => format!("= {text}"),
            Paragraph::PageBreak => "===".to_string(),
            Paragraph::Section(text) => format!("## {text}"),
            Paragraph::Centered => ">THE END<".to_string(),
            Paragraph::ForcedAction(text) => format!("!{text}"),
            Paragraph::ForcedHeading => ".FLASHBACK".to_string(),
            Paragraph::BareCue(name) => name.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_written_script_parses_back(paragraphs in prop::collection::vec(paragraph(), 1..8), pretty in any::<bool>()) {
        let source = format!("\n{}", render(&paragraphs));
        let original = parse(&source);
        let written = FountainWriter::new(WriterOptions { pretty_print: pretty }).write(&original);
        let reparsed = parse(&written);

        prop_assert_eq!(outline(&reparsed), outline(&original));
        prop_assert_eq!(annotations(&reparsed), annotations(&original));
    }
}
