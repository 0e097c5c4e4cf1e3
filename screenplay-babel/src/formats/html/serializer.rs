//! HTML serialization (Script → HTML export)
//!
//! Pipeline: Script → RcDom → HTML string → standalone page with CSS.

use crate::common::emphasis::fountain_to_html;
use crate::error::FormatError;
use crate::formats::html::HtmlTheme;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use screenplay_core::{Element, Script, TitleEntry};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// CSS theme to use
    pub theme: HtmlTheme,
    /// Optional custom CSS to append after the baseline and theme CSS
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            custom_css: None,
        }
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a script to HTML with the given theme
pub fn serialize_to_html(script: &Script, theme: HtmlTheme) -> Result<String, FormatError> {
    serialize_to_html_with_options(script, HtmlOptions::new(theme))
}

/// Serialize a script to HTML with full options
pub fn serialize_to_html_with_options(
    script: &Script,
    options: HtmlOptions,
) -> Result<String, FormatError> {
    let title = script
        .title_value("Title")
        .map(|value| value.text().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Screenplay".to_string());

    let dom = build_html_dom(script);
    let body_html = serialize_dom(&dom)?;
    Ok(wrap_in_document(&body_html, &title, &options))
}

/// Build the DOM: a container holding the title page and one block per element
fn build_html_dom(script: &Script) -> RcDom {
    let dom = RcDom::default();
    let container = create_element("div", vec![("class", "screenplay-document")]);
    dom.document.children.borrow_mut().push(container.clone());

    if !script.title_entries().is_empty() {
        let title_page = create_element("div", vec![("class", "screenplay-title-page")]);
        for entry in script.title_entries() {
            append(&title_page, build_title_entry(entry));
        }
        append(&container, title_page);
    }

    for element in script.elements() {
        append(&container, build_element(element));
    }

    dom
}

fn build_title_entry(entry: &TitleEntry) -> Handle {
    let block = create_element(
        "div",
        vec![("class", "screenplay-title-entry"), ("data-key", entry.key.as_str())],
    );
    let key = create_element("span", vec![("class", "screenplay-title-key")]);
    append(&key, create_text(&entry.key));
    append(&block, key);

    let value = create_element("span", vec![("class", "screenplay-title-value")]);
    append_inline(&value, entry.value.text().trim());
    append(&block, value);
    block
}

fn build_element(element: &Element) -> Handle {
    match element {
        Element::SceneHeading(heading) => {
            let node = create_element("h3", vec![("class", "screenplay-scene-heading")]);
            append_inline(&node, heading.content.text());
            if let Some(number) = &heading.scene_number {
                let span = create_element("span", vec![("class", "screenplay-scene-number")]);
                append(&span, create_text(number));
                append(&node, span);
            }
            node
        }
        Element::Action(action) => {
            let class = if action.centered {
                "screenplay-action screenplay-centered"
            } else {
                "screenplay-action"
            };
            block("p", class, action.content.text())
        }
        Element::Character(character) => {
            let class = if character.dual_dialogue {
                "screenplay-character screenplay-dual"
            } else {
                "screenplay-character"
            };
            block("p", class, &character.display_name())
        }
        Element::Dialogue(content) => block("p", "screenplay-dialogue", content.text()),
        Element::Parenthetical(content) => block(
            "p",
            "screenplay-parenthetical",
            &format!("({})", content.text()),
        ),
        Element::Lyric(content) => block("p", "screenplay-lyric", content.text()),
        Element::Transition(transition) => {
            block("p", "screenplay-transition", transition.content.text())
        }
        Element::Section(section) => {
            let tag = format!("h{}", section.level.clamp(1, 6));
            block(&tag, "screenplay-section", section.content.text())
        }
        Element::Synopsis(content) => block("p", "screenplay-synopsis", content.text()),
        Element::PageBreak(_) => create_element("hr", vec![("class", "screenplay-page-break")]),
    }
}

fn block(tag: &str, class: &str, text: &str) -> Handle {
    let node = create_element(tag, vec![("class", class)]);
    append_inline(&node, text);
    node
}

/// Appends `text` with emphasis rendered as `<b>`, `<i>` and `<u>` and line
/// breaks as `<br>`.
fn append_inline(parent: &Handle, text: &str) {
    let tagged = fountain_to_html(&html_escape(text));
    let mut stack: Vec<(&str, Handle)> = vec![("", parent.clone())];
    let mut rest = tagged.as_str();

    while !rest.is_empty() {
        let Some(open) = rest.find('<') else {
            append_text(current(&stack), rest);
            break;
        };
        append_text(current(&stack), &rest[..open]);
        rest = &rest[open..];

        let Some(end) = rest.find('>') else {
            append_text(current(&stack), rest);
            break;
        };
        let tag = &rest[1..end];
        rest = &rest[end + 1..];

        match tag.strip_prefix('/') {
            Some(name) => {
                // Emphasis spans may overlap; close everything down to the match.
                let matching = stack.iter().rposition(|(open, _)| *open == name);
                if let Some(index) = matching.filter(|&index| index > 0) {
                    stack.truncate(index);
                }
            }
            None => {
                let node = create_element(tag, vec![]);
                append(current(&stack), node.clone());
                stack.push((tag, node));
            }
        }
    }
}

fn current<'a>(stack: &'a [(&str, Handle)]) -> &'a Handle {
    &stack[stack.len() - 1].1
}

fn append_text(parent: &Handle, escaped: &str) {
    for (index, line) in escaped.split('\n').enumerate() {
        if index > 0 {
            append(parent, create_element("br", vec![]));
        }
        if !line.is_empty() {
            append(parent, create_text(&html_unescape(line)));
        }
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the inner content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        output.push(b'\n');
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the content in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let baseline_css = include_str!("../../../css/baseline.css");
    let theme_css = match options.theme {
        HtmlTheme::Screenplay => include_str!("../../../css/themes/theme-screenplay.css"),
        HtmlTheme::Plain => include_str!("../../../css/themes/theme-plain.css"),
    };
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(title);
    let theme = options.theme;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="screenplay-babel">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{theme_css}
{custom_css}
  </style>
</head>
<body class="screenplay-theme-{theme}">
<div class="screenplay-document">
{body_html}</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html_unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}
