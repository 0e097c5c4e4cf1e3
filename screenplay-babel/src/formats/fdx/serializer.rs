//! Final Draft (FDX) writer
//!
//! Emits one `<Paragraph>` per scene heading, action, character cue,
//! parenthetical, dialogue and transition. A dual dialogue pair is wrapped in
//! a `<DualDialogue>` paragraph. Other element kinds have no FDX paragraph
//! type and are skipped.

use screenplay_core::{Element, Script};

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"1\">\n  <Content>\n";
const FOOTER: &str = "  </Content>\n</FinalDraft>\n";

struct Paragraph<'a> {
    kind: &'static str,
    text: String,
    number: Option<&'a str>,
}

/// A cue with the parentheticals and dialogue that follow it.
type Speech<'a> = Vec<Paragraph<'a>>;

enum Block<'a> {
    Single(Paragraph<'a>),
    Speech(Speech<'a>),
    Dual(Speech<'a>, Speech<'a>),
}

pub fn write_script(script: &Script) -> String {
    let mut out = String::from(HEADER);
    for block in collect_blocks(script) {
        match block {
            Block::Single(paragraph) => write_paragraph(&mut out, &paragraph, 2),
            Block::Speech(speech) => {
                for paragraph in &speech {
                    write_paragraph(&mut out, paragraph, 2);
                }
            }
            Block::Dual(first, second) => {
                out.push_str("    <Paragraph>\n      <DualDialogue>\n");
                for paragraph in first.iter().chain(second.iter()) {
                    write_paragraph(&mut out, paragraph, 4);
                }
                out.push_str("      </DualDialogue>\n    </Paragraph>\n");
            }
        }
    }
    out.push_str(FOOTER);
    out
}

fn collect_blocks(script: &Script) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    for element in script.elements() {
        let Some(paragraph) = to_paragraph(element) else {
            continue;
        };
        match element {
            Element::Character(character) => {
                let speech = vec![paragraph];
                let block = match blocks.pop() {
                    Some(Block::Speech(previous)) if character.dual_dialogue => {
                        Block::Dual(previous, speech)
                    }
                    Some(previous) => {
                        blocks.push(previous);
                        Block::Speech(speech)
                    }
                    None => Block::Speech(speech),
                };
                blocks.push(block);
            }
            Element::Dialogue(_) | Element::Parenthetical(_) => match blocks.last_mut() {
                Some(Block::Speech(speech)) | Some(Block::Dual(_, speech)) => {
                    speech.push(paragraph)
                }
                _ => blocks.push(Block::Single(paragraph)),
            },
            _ => blocks.push(Block::Single(paragraph)),
        }
    }
    blocks
}

fn to_paragraph(element: &Element) -> Option<Paragraph<'_>> {
    let (kind, text, number) = match element {
        Element::SceneHeading(heading) => (
            "Scene Heading",
            heading.content.text().to_string(),
            heading.scene_number.as_deref(),
        ),
        Element::Action(action) => ("Action", action.content.text().to_string(), None),
        Element::Character(character) => ("Character", character.display_name(), None),
        Element::Dialogue(content) => ("Dialogue", content.text().to_string(), None),
        Element::Parenthetical(content) => {
            ("Parenthetical", format!("({})", content.text()), None)
        }
        Element::Transition(transition) => {
            ("Transition", transition.content.text().to_string(), None)
        }
        Element::Lyric(_) | Element::PageBreak(_) | Element::Section(_) | Element::Synopsis(_) => {
            return None
        }
    };
    Some(Paragraph { kind, text, number })
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str("<Paragraph");
    if let Some(number) = paragraph.number {
        out.push_str(&format!(" Number=\"{}\"", xml_escape(number)));
    }
    out.push_str(&format!(" Type=\"{}\">\n", paragraph.kind));
    out.push_str(&format!(
        "{indent}  <Text>{}</Text>\n",
        xml_escape(&paragraph.text)
    ));
    out.push_str(&indent);
    out.push_str("</Paragraph>\n");
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
