use crate::script::{Action, Character, Element, Transition};

use super::annotations::DelimitedExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingKind {
    /// Confirmed by a blank next line.
    Transition,
    /// Confirmed by a non-blank next line.
    Character,
}

/// A classification that waits for the next line before committing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingElement {
    pub kind: PendingKind,
    pub element: Element,
    pub fallback: Element,
    pub tags: Vec<String>,
}

impl PendingElement {
    pub(crate) fn transition(transition: Transition, fallback: Action) -> Self {
        Self {
            kind: PendingKind::Transition,
            element: transition.into(),
            fallback: fallback.into(),
            tags: Vec::new(),
        }
    }

    pub(crate) fn character(character: Character, fallback: Action) -> Self {
        Self {
            kind: PendingKind::Character,
            element: character.into(),
            fallback: fallback.into(),
            tags: Vec::new(),
        }
    }

    /// Picks the primary or fallback element given whether the following
    /// line is blank.
    pub(crate) fn resolve(self, next_line_blank: bool) -> Element {
        let confirmed = match self.kind {
            PendingKind::Transition => next_line_blank,
            PendingKind::Character => !next_line_blank,
        };
        let mut element = if confirmed { self.element } else { self.fallback };
        element.content_mut().append_tags(self.tags);
        element
    }
}

/// Line-to-line state of the incremental parser.
#[derive(Debug, Clone)]
pub(crate) struct ParserState {
    pub line: String,
    pub line_trim: String,
    pub last_line: String,
    pub last_line_blank: bool,
    pub line_tags: Vec<String>,
    pub in_title_page: bool,
    pub multi_line_title_entry: bool,
    pub in_dialogue: bool,
    pub pending: Vec<PendingElement>,
    pub pad_actions: Vec<Action>,
    pub notes: DelimitedExtractor,
    pub boneyards: DelimitedExtractor,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            line: String::new(),
            line_trim: String::new(),
            last_line: String::new(),
            last_line_blank: true,
            line_tags: Vec::new(),
            in_title_page: true,
            multi_line_title_entry: false,
            in_dialogue: false,
            pending: Vec::new(),
            pad_actions: Vec::new(),
            notes: DelimitedExtractor::notes(),
            boneyards: DelimitedExtractor::boneyards(),
        }
    }
}
