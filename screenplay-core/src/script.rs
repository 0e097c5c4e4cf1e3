//! Screenplay document model
//!
//! A [`Script`] holds the title page entries, the ordered body elements and
//! the note and boneyard collections that body text references through
//! numbered markers (`[[0]]`, `/*0*/`). Every piece of text is a [`Content`],
//! which keeps the raw text (markers included) alongside a marker-free copy
//! and the tags attached to it.

use std::fmt;

use serde::Serialize;

use crate::text::{
    boneyard_marker, is_whitespace_or_empty, note_marker, strip_markers, BONEYARD_MARKER,
    NOTE_MARKER,
};

/// Kinds of screenplay element, including the title page and annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    TitleEntry,
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Lyric,
    Transition,
    PageBreak,
    Note,
    Boneyard,
    Section,
    Synopsis,
}

impl ElementKind {
    /// Label used by [`Script::dump`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::TitleEntry => "TITLEENTRY",
            ElementKind::SceneHeading => "HEADING",
            ElementKind::Action => "ACTION",
            ElementKind::Character => "CHARACTER",
            ElementKind::Dialogue => "DIALOGUE",
            ElementKind::Parenthetical => "PARENTHETICAL",
            ElementKind::Lyric => "LYRIC",
            ElementKind::Transition => "TRANSITION",
            ElementKind::PageBreak => "PAGEBREAK",
            ElementKind::Note => "NOTE",
            ElementKind::Boneyard => "BONEYARD",
            ElementKind::Section => "SECTION",
            ElementKind::Synopsis => "SYNOPSIS",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text of an element: raw form, marker-free form and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(rename = "text_raw")]
    raw: String,
    #[serde(rename = "text")]
    clean: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let clean = strip_markers(&raw);
        Self {
            raw,
            clean,
            tags: Vec::new(),
        }
    }

    /// Text with note and boneyard markers removed.
    pub fn text(&self) -> &str {
        &self.clean
    }

    /// Text as parsed, markers included.
    pub fn text_raw(&self) -> &str {
        &self.raw
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_blank(&self) -> bool {
        is_whitespace_or_empty(&self.raw)
    }

    /// Appends `line` after a newline and refreshes the clean text.
    pub fn append_line(&mut self, line: &str) {
        self.raw.push('\n');
        self.raw.push_str(line);
        self.clean = strip_markers(&self.raw);
    }

    /// Adds tags not already present, keeping first-seen order.
    pub fn append_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref();
            if !self.tags.iter().any(|existing| existing == tag) {
                self.tags.push(tag.to_string());
            }
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append_tags(tags);
        self
    }

    fn dump_tags(&self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            format!(" tags:{}", self.tags.join(","))
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::new(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::new(text)
    }
}

/// A `Key: Value` pair from the title page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleEntry {
    pub key: String,
    pub value: Content,
}

impl TitleEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Content>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn dump(&self) -> String {
        format!(
            "{}:\"{}\":\"{}\"{}",
            ElementKind::TitleEntry,
            self.key,
            self.value.text_raw(),
            self.value.dump_tags()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneHeading {
    pub content: Content,
    pub scene_number: Option<String>,
    pub forced: bool,
}

impl SceneHeading {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            content: text.into(),
            scene_number: None,
            forced: false,
        }
    }

    pub fn with_scene_number(mut self, number: impl Into<String>) -> Self {
        self.scene_number = Some(number.into());
        self
    }

    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub content: Content,
    pub forced: bool,
    pub centered: bool,
}

impl Action {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            content: text.into(),
            forced: false,
            centered: false,
        }
    }

    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Blank, non-centered actions only exist as spacing between paragraphs.
    pub fn is_padding(&self) -> bool {
        !self.centered && self.content.is_blank()
    }
}

/// A character cue. The content text is the display form `NAME (EXT)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub content: Content,
    pub name: String,
    pub extension: Option<String>,
    pub dual_dialogue: bool,
    pub forced: bool,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            content: Content::new(name.clone()),
            name,
            extension: None,
            dual_dialogue: false,
            forced: false,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        if extension.is_empty() {
            self.extension = None;
        } else {
            self.extension = Some(extension);
        }
        self.content = Content::new(self.display_name()).with_tags(self.content.tags.clone());
        self
    }

    pub fn dual(mut self, dual: bool) -> Self {
        self.dual_dialogue = dual;
        self
    }

    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    /// `NAME` or `NAME (EXT)`.
    pub fn display_name(&self) -> String {
        match &self.extension {
            Some(extension) => format!("{} ({})", self.name, extension),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub content: Content,
    pub forced: bool,
}

impl Transition {
    pub fn new(text: impl Into<Content>) -> Self {
        Self {
            content: text.into(),
            forced: false,
        }
    }

    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }
}

/// An outline section; `level` counts the leading `#` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub content: Content,
    pub level: usize,
}

impl Section {
    pub fn new(text: impl Into<Content>, level: usize) -> Self {
        Self {
            content: text.into(),
            level,
        }
    }
}

/// A body element of the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    SceneHeading(SceneHeading),
    Action(Action),
    Character(Character),
    Dialogue(Content),
    Parenthetical(Content),
    Lyric(Content),
    Transition(Transition),
    PageBreak(Content),
    Section(Section),
    Synopsis(Content),
}

impl Element {
    pub fn dialogue(text: impl Into<Content>) -> Self {
        Element::Dialogue(text.into())
    }

    pub fn parenthetical(text: impl Into<Content>) -> Self {
        Element::Parenthetical(text.into())
    }

    pub fn lyric(text: impl Into<Content>) -> Self {
        Element::Lyric(text.into())
    }

    pub fn synopsis(text: impl Into<Content>) -> Self {
        Element::Synopsis(text.into())
    }

    pub fn page_break() -> Self {
        Element::PageBreak(Content::default())
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::SceneHeading(_) => ElementKind::SceneHeading,
            Element::Action(_) => ElementKind::Action,
            Element::Character(_) => ElementKind::Character,
            Element::Dialogue(_) => ElementKind::Dialogue,
            Element::Parenthetical(_) => ElementKind::Parenthetical,
            Element::Lyric(_) => ElementKind::Lyric,
            Element::Transition(_) => ElementKind::Transition,
            Element::PageBreak(_) => ElementKind::PageBreak,
            Element::Section(_) => ElementKind::Section,
            Element::Synopsis(_) => ElementKind::Synopsis,
        }
    }

    pub fn content(&self) -> &Content {
        match self {
            Element::SceneHeading(heading) => &heading.content,
            Element::Action(action) => &action.content,
            Element::Character(character) => &character.content,
            Element::Transition(transition) => &transition.content,
            Element::Section(section) => &section.content,
            Element::Dialogue(content)
            | Element::Parenthetical(content)
            | Element::Lyric(content)
            | Element::PageBreak(content)
            | Element::Synopsis(content) => content,
        }
    }

    pub fn content_mut(&mut self) -> &mut Content {
        match self {
            Element::SceneHeading(heading) => &mut heading.content,
            Element::Action(action) => &mut action.content,
            Element::Character(character) => &mut character.content,
            Element::Transition(transition) => &mut transition.content,
            Element::Section(section) => &mut section.content,
            Element::Dialogue(content)
            | Element::Parenthetical(content)
            | Element::Lyric(content)
            | Element::PageBreak(content)
            | Element::Synopsis(content) => content,
        }
    }

    pub fn text(&self) -> &str {
        self.content().text()
    }

    pub fn text_raw(&self) -> &str {
        self.content().text_raw()
    }

    pub fn tags(&self) -> &[String] {
        self.content().tags()
    }

    /// One line of the debug dump, e.g. `CHARACTER:"BOB" "(V.O.)" (Dual)`.
    pub fn dump(&self) -> String {
        let kind = self.kind();
        let body = match self {
            Element::SceneHeading(heading) => {
                let mut line = format!("{kind}:\"{}\"", heading.content.text());
                if let Some(number) = &heading.scene_number {
                    line.push_str(&format!(" ({number})"));
                }
                line
            }
            Element::Action(action) => {
                let mut line = format!("{kind}:\"{}\"", action.content.text_raw());
                if action.centered {
                    line.push_str(" (centered)");
                }
                line
            }
            Element::Character(character) => {
                let mut line = format!("{kind}:\"{}\"", character.name);
                if let Some(extension) = &character.extension {
                    line.push_str(&format!(" \"({extension})\""));
                }
                if character.dual_dialogue {
                    line.push_str(" (Dual)");
                }
                line
            }
            Element::Section(section) => {
                format!("{kind}:\"{}\" ({})", section.content.text_raw(), section.level)
            }
            other => format!("{kind}:\"{}\"", other.text_raw()),
        };
        format!("{body}{}", self.content().dump_tags())
    }
}

impl From<SceneHeading> for Element {
    fn from(heading: SceneHeading) -> Self {
        Element::SceneHeading(heading)
    }
}

impl From<Action> for Element {
    fn from(action: Action) -> Self {
        Element::Action(action)
    }
}

impl From<Character> for Element {
    fn from(character: Character) -> Self {
        Element::Character(character)
    }
}

impl From<Transition> for Element {
    fn from(transition: Transition) -> Self {
        Element::Transition(transition)
    }
}

impl From<Section> for Element {
    fn from(section: Section) -> Self {
        Element::Section(section)
    }
}

/// A parsed screenplay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    title_entries: Vec<TitleEntry>,
    elements: Vec<Element>,
    notes: Vec<Content>,
    boneyards: Vec<Content>,
    #[serde(skip)]
    last_character: String,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_entries(&self) -> &[TitleEntry] {
        &self.title_entries
    }

    pub fn add_title_entry(&mut self, entry: TitleEntry) {
        self.title_entries.push(entry);
    }

    pub(crate) fn last_title_entry_mut(&mut self) -> Option<&mut TitleEntry> {
        self.title_entries.last_mut()
    }

    /// Value of the first title entry whose key matches, ignoring case.
    pub fn title_value(&self, key: &str) -> Option<&Content> {
        self.title_entries
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
            .map(|entry| &entry.value)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn last_element(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn last_element_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    pub fn notes(&self) -> &[Content] {
        &self.notes
    }

    pub fn boneyards(&self) -> &[Content] {
        &self.boneyards
    }

    /// Stores a note and returns its marker index.
    pub fn add_note(&mut self, note: impl Into<Content>) -> usize {
        self.notes.push(note.into());
        self.notes.len() - 1
    }

    /// Stores a boneyard and returns its marker index.
    pub fn add_boneyard(&mut self, boneyard: impl Into<Content>) -> usize {
        self.boneyards.push(boneyard.into());
        self.boneyards.len() - 1
    }

    pub(crate) fn notes_mut(&mut self) -> &mut Vec<Content> {
        &mut self.notes
    }

    pub(crate) fn boneyards_mut(&mut self) -> &mut Vec<Content> {
        &mut self.boneyards
    }

    /// Appends an element.
    ///
    /// With `allow_merge`, a Character repeating the previous speaker is
    /// dropped, and a Dialogue or Action following an element of the same
    /// kind is appended to it as a new line. Any element other than
    /// Character, Dialogue or Parenthetical ends the current speaker.
    pub fn add_element(&mut self, element: impl Into<Element>, allow_merge: bool) {
        let element = element.into();

        match &element {
            Element::Character(character) => {
                let speaker = format!(
                    "{}{}",
                    character.name,
                    character.extension.as_deref().unwrap_or("")
                );
                if allow_merge && speaker == self.last_character {
                    return;
                }
                self.last_character = speaker;
            }
            Element::Dialogue(content) => {
                if allow_merge {
                    if let Some(Element::Dialogue(last)) = self.elements.last_mut() {
                        last.append_line(content.text_raw());
                        last.append_tags(content.tags());
                        return;
                    }
                }
            }
            Element::Parenthetical(_) => {}
            _ => self.last_character.clear(),
        }

        if allow_merge {
            if let (Element::Action(action), Some(Element::Action(last))) =
                (&element, self.elements.last_mut())
            {
                last.content.append_line(action.content.text_raw());
                last.content.append_tags(action.content.tags());
                return;
            }
        }

        self.elements.push(element);
    }

    /// Replaces note and boneyard markers in `text` with their delimited
    /// content, e.g. `[[0]]` becomes `[[the note]]`. Unknown indices are kept.
    pub fn expand_markers(&self, text: &str) -> String {
        let with_notes = NOTE_MARKER.replace_all(text, |caps: &regex::Captures<'_>| {
            lookup(&self.notes, &caps[1])
                .map(|note| format!("[[{}]]", note.text_raw()))
                .unwrap_or_else(|| caps[0].to_string())
        });
        BONEYARD_MARKER
            .replace_all(&with_notes, |caps: &regex::Captures<'_>| {
                lookup(&self.boneyards, &caps[1])
                    .map(|boneyard| format!("/*{}*/", boneyard.text_raw()))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Line-per-element textual dump used for diagnostics and tests.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        for entry in &self.title_entries {
            lines.push(entry.dump());
        }
        for element in &self.elements {
            lines.push(element.dump());
        }
        for (index, note) in self.notes.iter().enumerate() {
            lines.push(format!(
                "{}{}:\"{}\"{}",
                note_marker(index),
                ElementKind::Note,
                note.text_raw(),
                note.dump_tags()
            ));
        }
        for (index, boneyard) in self.boneyards.iter().enumerate() {
            lines.push(format!(
                "{}{}:\"{}\"{}",
                boneyard_marker(index),
                ElementKind::Boneyard,
                boneyard.text_raw(),
                boneyard.dump_tags()
            ));
        }
        lines.join("\n")
    }
}

fn lookup<'a>(collection: &'a [Content], index: &str) -> Option<&'a Content> {
    index.parse::<usize>().ok().and_then(|i| collection.get(i))
}
