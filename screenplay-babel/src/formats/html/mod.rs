//! HTML format implementation
//!
//! Export only: a [`Script`] becomes a standalone HTML5 page. The page is
//! built as an `html5ever`/`markup5ever_rcdom` DOM and serialized with
//! html5ever's serializer, so escaping is handled in one place.
//!
//! # Element Mapping
//!
//! | Element        | HTML                                                   |
//! |----------------|--------------------------------------------------------|
//! | Title page     | `<div class="screenplay-title-page">` of entries       |
//! | Scene heading  | `<h3 class="screenplay-scene-heading">` + number span  |
//! | Action         | `<p class="screenplay-action">` (`screenplay-centered`) |
//! | Character      | `<p class="screenplay-character">` (`screenplay-dual`) |
//! | Dialogue       | `<p class="screenplay-dialogue">`                      |
//! | Parenthetical  | `<p class="screenplay-parenthetical">`                 |
//! | Lyric          | `<p class="screenplay-lyric">`                         |
//! | Transition     | `<p class="screenplay-transition">`                    |
//! | Section        | `<hN class="screenplay-section">`, N capped at 6       |
//! | Synopsis       | `<p class="screenplay-synopsis">`                      |
//! | Page break     | `<hr class="screenplay-page-break">`                   |
//!
//! Inline `*`/`**`/`_` emphasis becomes `<i>`/`<b>`/`<u>` (see
//! [`crate::common::emphasis`]). Notes and boneyards are not rendered.
//!
//! # CSS and Theming
//!
//! `css/baseline.css` is always embedded; the theme stylesheet from
//! `css/themes/` is layered on top of it.

mod serializer;

use crate::error::FormatError;
use crate::format::{check_known_options, Format};
use screenplay_core::Script;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub use serializer::{serialize_to_html, serialize_to_html_with_options, HtmlOptions};

/// Format implementation for HTML
pub struct HtmlFormat {
    /// CSS theme to use for export
    theme: HtmlTheme,
}

/// Available CSS themes for HTML export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlTheme {
    /// Courier layout with screenplay margins
    #[default]
    Screenplay,
    /// Baseline typography only
    Plain,
}

impl HtmlTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlTheme::Screenplay => "screenplay",
            HtmlTheme::Plain => "plain",
        }
    }
}

impl fmt::Display for HtmlTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HtmlTheme {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "screenplay" | "default" => Ok(HtmlTheme::Screenplay),
            "plain" => Ok(HtmlTheme::Plain),
            other => Err(FormatError::NotSupported(format!(
                "Unknown HTML theme '{other}'"
            ))),
        }
    }
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(HtmlTheme::default())
    }
}

impl HtmlFormat {
    /// Create a new HTML format with the specified theme
    pub fn new(theme: HtmlTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> HtmlTheme {
        self.theme
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 screenplay page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, script: &Script) -> Result<String, FormatError> {
        serialize_to_html(script, self.theme)
    }

    fn serialize_with_options(
        &self,
        script: &Script,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["theme", "css"])?;

        let theme = match options.get("theme") {
            Some(name) => name.parse().unwrap_or_else(|e: FormatError| {
                warn!(error = %e, "falling back to the default HTML theme");
                HtmlTheme::default()
            }),
            None => self.theme,
        };

        let mut html_options = HtmlOptions::new(theme);
        if let Some(css) = options.get("css") {
            html_options = html_options.with_custom_css(css.clone());
        }
        serialize_to_html_with_options(script, html_options)
    }
}
