//! Incremental parser and document model for Fountain screenplays
//!
//! Fountain is a plain-text screenplay markup: scene headings, action,
//! character cues, dialogue, parentheticals, transitions and friends are
//! recognised from line shape and context rather than explicit markup.
//!
//! The crate is organised as follows:
//!
//! - [`script`]: the document model. A [`Script`] holds title page entries,
//!   body [`Element`]s and the note and boneyard collections referenced from
//!   element text through numbered markers.
//! - [`parser`]: the line-at-a-time [`Parser`]. Feed it lines with
//!   [`Parser::add_line`] and call [`Parser::finalize_parsing`] at the end,
//!   or hand it a whole document with [`Parser::add_text`].
//! - [`callback`]: an event-driven front end that reports each element to a
//!   [`ParseHandler`] as soon as it is committed.
//! - [`text`]: small string helpers shared by the above.
//!
//! ```rust,ignore
//! use screenplay_core::parse;
//!
//! let script = parse("INT. HOUSE - DAY\n\nBOB\nHello.");
//! println!("{}", script.dump());
//! ```

pub mod callback;
pub mod parser;
pub mod script;
pub mod text;

pub use callback::{CallbackOptions, CallbackParser, DialogueEvent, ParseHandler};
pub use parser::{parse, parse_with_options, Parser, ParserOptions};
pub use script::{
    Action, Character, Content, Element, ElementKind, SceneHeading, Script, Section, TitleEntry,
    Transition,
};
