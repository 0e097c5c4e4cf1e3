//! Event-style parsing.
//!
//! [`CallbackParser`] drives a [`Parser`] with merging disabled and replays
//! every newly committed element to a [`ParseHandler`]. Dialogue is reported
//! together with its speaker and any parenthetical that preceded it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::parser::{split_lines, Parser, ParserOptions};
use crate::script::{Character, Element, Script, TitleEntry};
use crate::text::is_whitespace_or_empty;

/// One line of dialogue with its speaker context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueEvent<'a> {
    pub character: &'a str,
    pub extension: Option<&'a str>,
    pub parenthetical: Option<&'a str>,
    pub line: &'a str,
    pub dual: bool,
}

/// Receives parse events. Every method defaults to doing nothing.
pub trait ParseHandler {
    fn on_title_page(&mut self, _entries: &[TitleEntry]) {}
    fn on_scene_heading(&mut self, _text: &str, _scene_number: Option<&str>) {}
    fn on_action(&mut self, _text: &str) {}
    fn on_dialogue(&mut self, _dialogue: &DialogueEvent<'_>) {}
    fn on_lyrics(&mut self, _text: &str) {}
    fn on_transition(&mut self, _text: &str) {}
    fn on_section(&mut self, _text: &str, _level: usize) {}
    fn on_synopsis(&mut self, _text: &str) {}
    fn on_page_break(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackOptions {
    /// Skip blank actions, headings, lyrics, transitions and dialogue lines.
    pub ignore_blanks: bool,
    pub use_tags: bool,
}

impl Default for CallbackOptions {
    fn default() -> Self {
        Self {
            ignore_blanks: true,
            use_tags: false,
        }
    }
}

#[derive(Debug, Default)]
struct Speaker {
    character: Option<Character>,
    parenthetical: Option<String>,
}

impl Speaker {
    fn reset(&mut self) {
        self.character = None;
        self.parenthetical = None;
    }
}

#[derive(Debug)]
pub struct CallbackParser<H> {
    parser: Parser,
    handler: H,
    options: CallbackOptions,
    dispatched: usize,
    title_page_sent: bool,
    speaker: Speaker,
}

impl<H: ParseHandler> CallbackParser<H> {
    pub fn new(handler: H) -> Self {
        Self::with_options(handler, CallbackOptions::default())
    }

    pub fn with_options(handler: H, options: CallbackOptions) -> Self {
        let parser = Parser::with_options(ParserOptions {
            merge_actions: false,
            merge_dialogue: false,
            use_tags: options.use_tags,
        });
        Self {
            parser,
            handler,
            options,
            dispatched: 0,
            title_page_sent: false,
            speaker: Speaker::default(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn script(&self) -> &Script {
        self.parser.script()
    }

    pub fn add_text(&mut self, text: &str) {
        self.add_lines(split_lines(text));
    }

    pub fn add_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref());
        }
        self.finalize_parsing();
    }

    pub fn add_line(&mut self, line: &str) {
        let was_in_title_page = self.parser.in_title_page();
        self.parser.add_line(line);
        if was_in_title_page && !self.parser.in_title_page() {
            self.send_title_page();
        }
        self.dispatch_new_elements();
    }

    /// Flushes pending elements and reports them, along with a title page
    /// that never saw a body line.
    pub fn finalize_parsing(&mut self) {
        self.parser.finalize_parsing();
        self.send_title_page();
        self.dispatch_new_elements();
    }

    fn send_title_page(&mut self) {
        if self.title_page_sent {
            return;
        }
        self.title_page_sent = true;
        self.handler.on_title_page(self.parser.script().title_entries());
    }

    fn dispatch_new_elements(&mut self) {
        let elements = self.parser.script().elements();
        for element in &elements[self.dispatched..] {
            trace!(kind = %element.kind(), "dispatching element");
            dispatch(&mut self.handler, &mut self.speaker, &self.options, element);
        }
        self.dispatched = elements.len();
    }
}

fn dispatch<H: ParseHandler>(
    handler: &mut H,
    speaker: &mut Speaker,
    options: &CallbackOptions,
    element: &Element,
) {
    let skip = |text: &str| options.ignore_blanks && is_whitespace_or_empty(text);

    match element {
        Element::Character(character) => {
            speaker.character = Some(character.clone());
            speaker.parenthetical = None;
        }
        Element::Parenthetical(content) => {
            speaker.parenthetical = Some(content.text_raw().to_string());
        }
        Element::Dialogue(content) => {
            let parenthetical = speaker.parenthetical.take();
            let Some(character) = &speaker.character else {
                return;
            };
            if skip(content.text_raw()) {
                return;
            }
            handler.on_dialogue(&DialogueEvent {
                character: &character.name,
                extension: character.extension.as_deref(),
                parenthetical: parenthetical.as_deref(),
                line: content.text_raw(),
                dual: character.dual_dialogue,
            });
        }
        other => {
            speaker.reset();
            match other {
                Element::Action(action) if !skip(action.content.text_raw()) => {
                    handler.on_action(action.content.text_raw())
                }
                Element::SceneHeading(heading) if !skip(heading.content.text_raw()) => handler
                    .on_scene_heading(heading.content.text_raw(), heading.scene_number.as_deref()),
                Element::Lyric(content) if !skip(content.text_raw()) => {
                    handler.on_lyrics(content.text_raw())
                }
                Element::Transition(transition) if !skip(transition.content.text_raw()) => {
                    handler.on_transition(transition.content.text_raw())
                }
                Element::Section(section) => {
                    handler.on_section(section.content.text_raw(), section.level)
                }
                Element::Synopsis(content) => handler.on_synopsis(content.text_raw()),
                Element::PageBreak(_) => handler.on_page_break(),
                _ => {}
            }
        }
    }
}
