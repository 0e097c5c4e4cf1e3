//! Final Draft (FDX) reader
//!
//! Reads `FinalDraft/Content/Paragraph` elements into a [`Script`]. Input that
//! is not well-formed XML, or not an FDX document, yields an empty script.

use roxmltree::{Node, NodeType};
use screenplay_core::{Action, Character, Element, SceneHeading, Script, Transition};
use tracing::{debug, warn};

/// Reads FDX source into a script, degrading to an empty script when the
/// source cannot be read.
pub fn read_script(source: &str) -> Script {
    let mut script = Script::new();
    if source.trim().is_empty() {
        return script;
    }

    let doc = match roxmltree::Document::parse(source) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "malformed FDX, returning an empty script");
            return script;
        }
    };

    let root = doc.root_element();
    if root.tag_name().name() != "FinalDraft" {
        warn!(
            root = root.tag_name().name(),
            "root element is not <FinalDraft>, returning an empty script"
        );
        return script;
    }

    let Some(content) = child_element(root, "Content") else {
        debug!("FDX document has no <Content>");
        return script;
    };

    for paragraph in elements_named(content, "Paragraph") {
        match child_element(paragraph, "DualDialogue") {
            Some(dual) => read_dual_dialogue(dual, &mut script),
            None => script.add_element(read_paragraph(paragraph), false),
        }
    }

    script
}

/// Every Character after the first in a `DualDialogue` block is the second
/// speaker of the pair.
fn read_dual_dialogue(dual: Node<'_, '_>, script: &mut Script) {
    let mut seen_character = false;
    for paragraph in elements_named(dual, "Paragraph") {
        let element = match read_paragraph(paragraph) {
            Element::Character(character) => {
                let dual = seen_character;
                seen_character = true;
                Element::Character(character.dual(dual))
            }
            other => other,
        };
        script.add_element(element, false);
    }
}

fn read_paragraph(paragraph: Node<'_, '_>) -> Element {
    let kind = paragraph.attribute("Type").unwrap_or("Action");
    let text = paragraph_text(paragraph);

    match kind {
        "Scene Heading" | "Scene Heading (Top of Page)" | "Shot" => {
            let heading = SceneHeading::new(text.trim());
            match paragraph.attribute("Number").filter(|n| !n.is_empty()) {
                Some(number) => heading.with_scene_number(number).into(),
                None => heading.into(),
            }
        }
        "Action" | "General" => Action::new(text).into(),
        "Character" => read_character(&text).into(),
        "Dialogue" => Element::dialogue(text),
        "Parenthetical" => Element::parenthetical(strip_parens(&text)),
        "Transition" => Transition::new(text).into(),
        other => {
            debug!(kind = other, "unknown paragraph type read as action");
            Action::new(text).into()
        }
    }
}

/// Splits `NAME (EXT)` into name and extension.
fn read_character(text: &str) -> Character {
    let text = text.trim();
    if let Some(inner) = text.strip_suffix(')') {
        if let Some(open) = inner.rfind('(').filter(|&open| open > 0) {
            let name = inner[..open].trim_end();
            return Character::new(name).with_extension(&inner[open + 1..]);
        }
    }
    Character::new(text)
}

fn strip_parens(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text)
}

/// Concatenates the text of every `<Text>` run in the paragraph.
fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    elements_named(paragraph, "Text")
        .flat_map(|run| run.descendants())
        .filter(|node| node.node_type() == NodeType::Text)
        .filter_map(|node| node.text())
        .collect()
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.node_type() == NodeType::Element && n.tag_name().name() == name)
}

fn elements_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.node_type() == NodeType::Element && n.tag_name().name() == name)
}
