use super::writer_options::WriterOptions;
use screenplay_core::parser::{is_title_entry, rules};
use screenplay_core::text::trim_outer_newlines;
use screenplay_core::{
    Action, Character, Content, Element, SceneHeading, Script, Section, TitleEntry, Transition,
};

const CHARACTER_TABS: usize = 3;
const PARENTHETICAL_TABS: usize = 2;
const DIALOGUE_TABS: usize = 1;
const TRANSITION_TABS: usize = 4;

/// Writes a [`Script`] back to Fountain text.
///
/// Notes and boneyards are written inline where their markers sit, so the
/// output parses back into the same elements.
pub struct FountainWriter {
    options: WriterOptions,
    lines: Vec<String>,
    last_speaker: Option<String>,
}

impl FountainWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            last_speaker: None,
        }
    }

    pub fn write(mut self, script: &Script) -> String {
        if !script.title_entries().is_empty() {
            for entry in script.title_entries() {
                self.lines.push(write_title_entry(entry));
            }
            self.lines.push(String::new());
        }

        let mut previous: Option<&Element> = None;
        for element in script.elements() {
            let glued = previous.is_some_and(ends_transition_shaped) && joins_without_blank(element);
            if !glued && pads_before(element, previous) {
                self.lines.push(String::new());
            }
            let mut line = self.write_element(element);
            if glued {
                if let Some(rest) = line.strip_prefix('\n') {
                    line = rest.to_string();
                }
            }
            self.lines.push(line);
            previous = Some(element);
        }

        let text = script.expand_markers(&self.lines.join("\n"));
        let text = trim_outer_newlines(&text);
        let opens_like_title_page = script.title_entries().is_empty()
            && text.split('\n').next().is_some_and(is_title_entry);
        if opens_like_title_page {
            format!("\n{text}")
        } else {
            text.to_string()
        }
    }

    fn write_element(&mut self, element: &Element) -> String {
        match element {
            Element::SceneHeading(heading) => {
                self.last_speaker = None;
                write_heading(heading)
            }
            Element::Action(action) => write_action(action),
            Element::Character(character) => self.write_character(character),
            Element::Dialogue(content) => self.write_dialogue(content),
            Element::Parenthetical(content) => {
                format!("{}({})", self.pad(PARENTHETICAL_TABS), content.text_raw())
            }
            Element::Lyric(content) => format!("~ {}", content.text_raw()),
            Element::Transition(transition) => self.write_transition(transition),
            Element::PageBreak(_) => "===".to_string(),
            Element::Section(section) => write_section(section),
            Element::Synopsis(content) => format!("= {}", content.text_raw()),
        }
    }

    fn write_character(&mut self, character: &Character) -> String {
        let mut cue = character.display_name();
        let speaker = format!(
            "{}{}",
            character.name,
            character.extension.as_deref().unwrap_or("")
        );
        if self.last_speaker.as_deref() == Some(speaker.as_str()) {
            cue.push_str(" (CONT'D)");
        }
        if character.dual_dialogue {
            cue.push_str(" ^");
        }
        if character.forced {
            cue.insert(0, '@');
        }
        self.last_speaker = Some(speaker);
        format!("{}{}", self.pad(CHARACTER_TABS), cue)
    }

    fn write_dialogue(&self, content: &Content) -> String {
        // An empty line would end the speech on re-parse; a lone space keeps it.
        let pad = self.pad(DIALOGUE_TABS);
        content
            .text_raw()
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    format!("{pad} ")
                } else {
                    format!("{pad}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_transition(&self, transition: &Transition) -> String {
        if transition.forced {
            format!(">{}", transition.content.text_raw())
        } else {
            format!("{}{}", self.pad(TRANSITION_TABS), transition.content.text_raw())
        }
    }

    fn pad(&self, tabs: usize) -> String {
        if self.options.pretty_print {
            "\t".repeat(tabs)
        } else {
            String::new()
        }
    }
}

impl Default for FountainWriter {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

fn pads_before(element: &Element, previous: Option<&Element>) -> bool {
    match element {
        Element::Character(_)
        | Element::Transition(_)
        | Element::SceneHeading(_)
        | Element::Synopsis(_)
        | Element::PageBreak(_) => true,
        Element::Action(_) => !matches!(previous, Some(Element::Action(_))),
        Element::Lyric(_) => !matches!(previous, Some(Element::Lyric(_))),
        _ => false,
    }
}

/// An action whose last line would read as a transition once a blank line
/// follows it. Whatever comes next has to sit directly under it.
fn ends_transition_shaped(element: &Element) -> bool {
    let Element::Action(action) = element else {
        return false;
    };
    if action.centered {
        return false;
    }
    let lines: Vec<&str> = action.content.text_raw().split('\n').collect();
    let Some((last, before)) = lines.split_last() else {
        return false;
    };
    if !rules::is_transition(last) {
        return false;
    }
    match before.last() {
        Some(line) => line.trim().is_empty(),
        None => !action.forced,
    }
}

/// Elements that are still recognized without a blank line above them.
fn joins_without_blank(element: &Element) -> bool {
    match element {
        Element::Character(character) => character.forced,
        Element::Transition(transition) => transition.forced,
        Element::Dialogue(_) | Element::Parenthetical(_) => false,
        _ => true,
    }
}

fn write_title_entry(entry: &TitleEntry) -> String {
    format!("{}: {}", entry.key, entry.value.text_raw())
}

fn write_heading(heading: &SceneHeading) -> String {
    let forced = if heading.forced { "." } else { "" };
    let number = heading
        .scene_number
        .as_ref()
        .map(|number| format!(" #{number}#"))
        .unwrap_or_default();
    format!("\n{forced}{}{number}", heading.content.text_raw())
}

fn write_action(action: &Action) -> String {
    let text = action.content.text_raw();
    if action.forced {
        format!("!{text}")
    } else if action.centered {
        format!(">{text}<")
    } else {
        text.to_string()
    }
}

fn write_section(section: &Section) -> String {
    format!(
        "\n{} {}",
        "#".repeat(section.level),
        section.content.text_raw()
    )
}
