//! Incremental Fountain parser
//!
//! The parser consumes one line at a time and grows a [`Script`]. Each line
//! passes through the same pipeline:
//!
//! 1. boneyard (`/* */`) and note (`[[ ]]`) extraction, which may swallow
//!    the whole line into an open multi-line region,
//! 2. optional trailing `#tag` extraction,
//! 3. resolution of elements deferred by the previous line (a transition
//!    needs a blank line after it, a character cue a non-blank one),
//! 4. title page entries while the title page is still open,
//! 5. the ordered body rules in [`rules`], falling back to action.
//!
//! [`Parser::finalize_parsing`] flushes whatever is still pending once the
//! input ends. [`Parser::add_text`] and [`Parser::add_lines`] finalize for you.

mod annotations;
pub mod rules;
mod state;
mod tags;

use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::script::{Element, Script, TitleEntry};
use crate::text::is_whitespace_or_empty;
use annotations::Extraction;
use rules::{Classification, LineContext};
use state::ParserState;

static TITLE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9 ]+?)\s*:\s*(.*?)\s*$").expect("valid title entry regex")
});

static TITLE_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?: {3,}|\t)").expect("valid title continuation regex"));

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));

/// Merge and tag behaviour of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Append consecutive action lines to one element.
    pub merge_actions: bool,
    /// Append consecutive dialogue lines to one element.
    pub merge_dialogue: bool,
    /// Strip trailing `#tag` tokens into element tags.
    pub use_tags: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            merge_actions: true,
            merge_dialogue: true,
            use_tags: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
    script: Script,
    state: ParserState,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn into_script(self) -> Script {
        self.script
    }

    /// True until the first line that is not a title page entry.
    pub fn in_title_page(&self) -> bool {
        self.state.in_title_page
    }

    /// Parses a block of text split on any line ending, then finalizes.
    pub fn add_text(&mut self, text: &str) {
        self.add_lines(split_lines(text));
    }

    /// Parses every line in order, then finalizes.
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

    /// Feeds one line (without its terminator).
    pub fn add_line(&mut self, input: &str) {
        self.state.last_line = mem::replace(&mut self.state.line, input.to_string());
        self.state.last_line_blank = is_whitespace_or_empty(&self.state.last_line);

        if self
            .state
            .boneyards
            .extract(&mut self.state.line, self.script.boneyards_mut())
            == Extraction::Consumed
        {
            trace!(line = input, "line absorbed by boneyard");
            return;
        }
        if self
            .state
            .notes
            .extract(&mut self.state.line, self.script.notes_mut())
            == Extraction::Consumed
        {
            trace!(line = input, "line absorbed by note");
            return;
        }

        let mut line_tags = Vec::new();
        if self.options.use_tags {
            let (untagged, tags) = tags::extract_tags(&self.state.line);
            self.state.line = untagged;
            line_tags = tags;
        }

        self.state.line_trim = self.state.line.trim().to_string();

        self.state.line_tags.clear();
        self.resolve_pending();
        self.state.line_tags = line_tags;

        if self.state.in_title_page && self.parse_title_page() {
            return;
        }

        let ctx = LineContext {
            line: &self.state.line,
            trimmed: &self.state.line_trim,
            last_line: &self.state.last_line,
            last_line_blank: self.state.last_line_blank,
            in_dialogue: self.state.in_dialogue,
            last_kind: self.script.last_element().map(Element::kind),
        };
        let (rule, classification) = rules::classify(&ctx);
        trace!(rule, line = input, "classified line");
        self.apply(classification);
    }

    /// Resolves deferred elements as if a blank line followed the input.
    pub fn finalize_parsing(&mut self) {
        self.state.line.clear();
        self.state.line_trim.clear();
        self.state.line_tags.clear();
        self.resolve_pending();
        if self.state.notes.is_open() || self.state.boneyards.is_open() {
            debug!("input ended inside an unterminated note or boneyard");
        }
    }

    fn apply(&mut self, classification: Classification) {
        match classification {
            Classification::Commit(element) => self.commit(element),
            Classification::Defer(mut pending) => {
                pending.tags = mem::take(&mut self.state.line_tags);
                self.state.pending.push(pending);
            }
            Classification::ExtendDialogue { text, after_break } => {
                let tags = mem::take(&mut self.state.line_tags);
                if self.options.merge_dialogue {
                    if let Some(Element::Dialogue(last)) = self.script.last_element_mut() {
                        if after_break {
                            last.append_line("");
                        }
                        last.append_line(&text);
                        last.append_tags(tags);
                    }
                } else {
                    if after_break {
                        self.commit(Element::dialogue(""));
                    }
                    self.state.line_tags = tags;
                    self.commit(Element::dialogue(text));
                }
            }
        }
    }

    fn resolve_pending(&mut self) {
        if self.state.pending.is_empty() {
            return;
        }
        let next_line_blank = is_whitespace_or_empty(&self.state.line_trim);
        for pending in mem::take(&mut self.state.pending) {
            let element = pending.resolve(next_line_blank);
            debug!(kind = %element.kind(), text = element.text(), "resolved pending element");
            self.commit(element);
        }
    }

    fn parse_title_page(&mut self) -> bool {
        if let Some(caps) = TITLE_ENTRY.captures(&self.state.line) {
            let value = caps.get(2).map_or("", |m| m.as_str());
            self.state.multi_line_title_entry = value.is_empty();
            let mut entry = TitleEntry::new(&caps[1], value);
            entry.value.append_tags(mem::take(&mut self.state.line_tags));
            self.script.add_title_entry(entry);
            return true;
        }

        if self.state.multi_line_title_entry && TITLE_CONTINUATION.is_match(&self.state.line) {
            let tags = mem::take(&mut self.state.line_tags);
            if let Some(entry) = self.script.last_title_entry_mut() {
                entry.value.append_line(&self.state.line);
                entry.value.append_tags(tags);
            }
            return true;
        }

        debug!(
            entries = self.script.title_entries().len(),
            "title page finished"
        );
        self.state.in_title_page = false;
        false
    }

    fn commit(&mut self, mut element: Element) {
        element
            .content_mut()
            .append_tags(mem::take(&mut self.state.line_tags));

        let element = match element {
            Element::Action(action) if action.is_padding() => {
                self.state.in_dialogue = false;
                if matches!(self.script.last_element(), Some(Element::Action(_))) {
                    self.state.pad_actions.push(action);
                }
                return;
            }
            other => other,
        };

        if matches!(element, Element::Action(_)) && !self.state.pad_actions.is_empty() {
            let pads = mem::take(&mut self.state.pad_actions);
            let merge_into_last = self.options.merge_actions
                && matches!(self.script.last_element(), Some(Element::Action(last)) if !last.centered);
            if merge_into_last {
                if let Some(Element::Action(last)) = self.script.last_element_mut() {
                    for pad in &pads {
                        last.content.append_line(pad.content.text_raw());
                        last.content.append_tags(pad.content.tags());
                    }
                }
            } else {
                for pad in pads {
                    self.script.add_element(pad, false);
                }
            }
        }
        self.state.pad_actions.clear();

        if self.options.merge_actions {
            if let Element::Action(action) = &element {
                if !action.centered {
                    if let Some(Element::Action(last)) = self.script.last_element_mut() {
                        if !last.centered {
                            last.content.append_line(action.content.text_raw());
                            last.content.append_tags(action.content.tags());
                            return;
                        }
                    }
                }
            }
        }

        self.state.in_dialogue = matches!(
            element,
            Element::Character(_) | Element::Parenthetical(_) | Element::Dialogue(_)
        );
        self.script.add_element(element, false);
    }
}

/// Splits text on `\r\n`, `\r` or `\n`. A trailing terminator yields a final
/// empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK.split(text)
}

/// Whether the first lines of a document would read `line` as a
/// `Key: value` title page entry.
pub fn is_title_entry(line: &str) -> bool {
    TITLE_ENTRY.is_match(line)
}

/// Parses a complete document with default options.
pub fn parse(text: &str) -> Script {
    parse_with_options(text, ParserOptions::default())
}

pub fn parse_with_options(text: &str, options: ParserOptions) -> Script {
    let mut parser = Parser::with_options(options);
    parser.add_text(text);
    parser.into_script()
}
