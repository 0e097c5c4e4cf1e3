//! Line recognizers.
//!
//! Each rule looks at the current line, with some context about the previous
//! line and the last committed element, and either declines or says what the
//! line is. Rules run in [`RULES`] order and the first one that accepts wins;
//! a line nobody claims is plain action.

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::PendingElement;
use crate::script::{Action, Character, Element, ElementKind, SceneHeading, Section, Transition};

/// Deepest section level; further `#` characters stay in the section text.
pub const MAX_SECTION_DEPTH: usize = 6;

static FORCED_SCENE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.[A-Za-z0-9]").expect("valid forced heading regex"));

static SCENE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:INT\./EXT|INT/EXT|INT|EXT|EST|I/E)(?:\.|\s)|FADE IN:)")
        .expect("valid scene heading regex")
});

static SCENE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)(?:\s*#([A-Za-z0-9.\-]+)#)?$").expect("valid scene number regex")
});

static TRANSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[A-Z\s]+TO:)\s*$").expect("valid transition regex"));

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\((.*)\)\s*$").expect("valid parenthetical regex"));

static CHARACTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][^a-z]*?)\s*(?:\(.*\))?(?:\s*\^\s*)?$").expect("valid character regex")
});

static CHARACTER_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^(\^]+?)\s*(?:\((.*)\))?(?:\s*\^\s*)?$").expect("valid character parts regex")
});

static CONTINUED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(CONT[’']D\)").expect("valid continued regex"));

/// What the parser knows when classifying a line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineContext<'a> {
    /// Working line after annotation and tag extraction.
    pub line: &'a str,
    pub trimmed: &'a str,
    pub last_line: &'a str,
    pub last_line_blank: bool,
    pub in_dialogue: bool,
    pub last_kind: Option<ElementKind>,
}

/// Outcome of a rule that accepted the line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classification {
    Commit(Element),
    /// Decided by the next line.
    Defer(PendingElement),
    /// Continues the previous dialogue, optionally after a blank spacer line.
    ExtendDialogue { text: String, after_break: bool },
}

type Rule = fn(&LineContext<'_>) -> Option<Classification>;

pub(crate) const RULES: [(&str, Rule); 14] = [
    ("section", section),
    ("forced_action", forced_action),
    ("forced_scene_heading", forced_scene_heading),
    ("forced_character", forced_character),
    ("forced_transition", forced_transition),
    ("page_break", page_break),
    ("lyric", lyric),
    ("synopsis", synopsis),
    ("centered", centered),
    ("scene_heading", scene_heading),
    ("transition", transition),
    ("parenthetical", parenthetical),
    ("character", character),
    ("dialogue", dialogue),
];

/// Runs the rules in order, falling back to a plain action of the raw line.
pub(crate) fn classify(ctx: &LineContext<'_>) -> (&'static str, Classification) {
    RULES
        .iter()
        .find_map(|(name, rule)| rule(ctx).map(|classification| (*name, classification)))
        .unwrap_or_else(|| ("action", Classification::Commit(Action::new(ctx.line).into())))
}

fn commit(element: impl Into<Element>) -> Option<Classification> {
    Some(Classification::Commit(element.into()))
}

fn section(ctx: &LineContext<'_>) -> Option<Classification> {
    let depth = ctx
        .trimmed
        .bytes()
        .take(MAX_SECTION_DEPTH)
        .take_while(|b| *b == b'#')
        .count();
    if depth == 0 {
        return None;
    }
    commit(Section::new(ctx.trimmed[depth..].trim(), depth))
}

fn forced_action(ctx: &LineContext<'_>) -> Option<Classification> {
    let rest = ctx.trimmed.strip_prefix('!')?;
    commit(Action::new(rest).forced(true))
}

fn forced_scene_heading(ctx: &LineContext<'_>) -> Option<Classification> {
    if !FORCED_SCENE_HEADING.is_match(ctx.trimmed) {
        return None;
    }
    commit(decode_scene_heading(&ctx.trimmed[1..]).forced(true))
}

fn forced_character(ctx: &LineContext<'_>) -> Option<Classification> {
    let rest = ctx.trimmed.strip_prefix('@')?;
    commit(decode_character(rest.trim())?.forced(true))
}

fn forced_transition(ctx: &LineContext<'_>) -> Option<Classification> {
    let rest = ctx.trimmed.strip_prefix('>')?;
    if ctx.trimmed.ends_with('<') {
        return None;
    }
    commit(Transition::new(rest.trim()).forced(true))
}

fn page_break(ctx: &LineContext<'_>) -> Option<Classification> {
    ctx.trimmed.contains("===").then(|| Classification::Commit(Element::page_break()))
}

fn lyric(ctx: &LineContext<'_>) -> Option<Classification> {
    let rest = ctx.trimmed.strip_prefix('~')?;
    commit(Element::lyric(rest.trim()))
}

fn synopsis(ctx: &LineContext<'_>) -> Option<Classification> {
    let rest = ctx.trimmed.strip_prefix('=')?;
    if rest.starts_with('=') {
        return None;
    }
    commit(Element::synopsis(rest.trim()))
}

fn centered(ctx: &LineContext<'_>) -> Option<Classification> {
    let inner = ctx.trimmed.strip_prefix('>')?.strip_suffix('<')?;
    commit(Action::new(inner).centered(true))
}

fn scene_heading(ctx: &LineContext<'_>) -> Option<Classification> {
    if !SCENE_HEADING.is_match(ctx.trimmed) {
        return None;
    }
    commit(decode_scene_heading(ctx.trimmed))
}

fn transition(ctx: &LineContext<'_>) -> Option<Classification> {
    if !(ctx.last_line_blank && TRANSITION.is_match(ctx.trimmed)) {
        return None;
    }
    Some(Classification::Defer(PendingElement::transition(
        Transition::new(ctx.trimmed),
        Action::new(ctx.trimmed),
    )))
}

fn parenthetical(ctx: &LineContext<'_>) -> Option<Classification> {
    let caps = PARENTHETICAL.captures(ctx.line)?;
    let follows_speech = matches!(
        ctx.last_kind,
        Some(ElementKind::Character | ElementKind::Dialogue)
    );
    if !(ctx.in_dialogue && follows_speech) {
        return None;
    }
    commit(Element::parenthetical(&caps[1]))
}

fn character(ctx: &LineContext<'_>) -> Option<Classification> {
    if !ctx.last_line_blank {
        return None;
    }
    let without_continued = ctx.trimmed.replace("(CONT'D)", "").replace("(CONT’D)", "");
    let candidate = without_continued.trim();
    if !CHARACTER.is_match(candidate) {
        return None;
    }
    let character = decode_character(candidate)?;
    Some(Classification::Defer(PendingElement::character(
        character,
        Action::new(ctx.trimmed),
    )))
}

fn dialogue(ctx: &LineContext<'_>) -> Option<Classification> {
    match ctx.last_kind? {
        ElementKind::Character | ElementKind::Parenthetical if !ctx.line.is_empty() => {
            commit(Element::dialogue(ctx.trimmed))
        }
        ElementKind::Dialogue if ctx.last_line_blank && !ctx.last_line.is_empty() => {
            Some(Classification::ExtendDialogue {
                text: ctx.trimmed.to_string(),
                after_break: true,
            })
        }
        ElementKind::Dialogue if !ctx.last_line_blank && !ctx.trimmed.is_empty() => {
            Some(Classification::ExtendDialogue {
                text: ctx.trimmed.to_string(),
                after_break: false,
            })
        }
        _ => None,
    }
}

/// Whether a line has the shape of a transition (`CUT TO:`). The parser only
/// takes it as one when blank lines surround it.
pub fn is_transition(line: &str) -> bool {
    TRANSITION.is_match(line.trim())
}

/// Splits `TEXT #NUM#` into heading text and optional scene number.
pub fn decode_scene_heading(line: &str) -> SceneHeading {
    match SCENE_NUMBER.captures(line) {
        Some(caps) => {
            let text = caps.get(1).map_or(line, |m| m.as_str());
            let heading = SceneHeading::new(text);
            match caps.get(2) {
                Some(number) => heading.with_scene_number(number.as_str()),
                None => heading,
            }
        }
        None => SceneHeading::new(line),
    }
}

/// Decodes `NAME (EXT) ^` after removing any `(CONT'D)` marker.
pub fn decode_character(line: &str) -> Option<Character> {
    let stripped = CONTINUED.replace_all(line, "");
    let stripped = stripped.trim();
    let caps = CHARACTER_PARTS.captures(stripped)?;
    let mut character = Character::new(&caps[1]).dual(stripped.ends_with('^'));
    if let Some(extension) = caps.get(2) {
        character = character.with_extension(extension.as_str());
    }
    Some(character)
}
