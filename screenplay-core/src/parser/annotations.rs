//! Extraction of delimited annotations: notes (`[[ ]]`) and boneyards (`/* */`).
//!
//! Both kinds share one extractor. Inline pairs are moved out of the working
//! line into the script's collection and replaced by a numbered marker. An
//! opener without a closer starts a region that swallows following lines
//! until the closer appears; notes also close on an empty line.

use crate::script::Content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extraction {
    /// The line was absorbed into an open region.
    Consumed,
    /// The working line is ready for classification.
    Ready,
}

#[derive(Debug, Clone)]
struct OpenRegion {
    line_before: String,
    content: Content,
}

#[derive(Debug, Clone)]
pub(crate) struct DelimitedExtractor {
    open: &'static str,
    close: &'static str,
    closes_on_empty_line: bool,
    region: Option<OpenRegion>,
}

impl DelimitedExtractor {
    pub(crate) fn notes() -> Self {
        Self {
            open: "[[",
            close: "]]",
            closes_on_empty_line: true,
            region: None,
        }
    }

    pub(crate) fn boneyards() -> Self {
        Self {
            open: "/*",
            close: "*/",
            closes_on_empty_line: false,
            region: None,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.region.is_some()
    }

    fn marker(&self, index: usize) -> String {
        format!("{}{}{}", self.open, index, self.close)
    }

    /// Moves annotations out of `line` into `store`, rewriting `line` in place.
    pub(crate) fn extract(&mut self, line: &mut String, store: &mut Vec<Content>) -> Extraction {
        let mut resume_at = 0;

        if let Some(mut region) = self.region.take() {
            if let Some(close) = line.find(self.close) {
                region.content.append_line(&line[..close]);
                store.push(region.content);
                let marker = self.marker(store.len() - 1);
                let rest = &line[close + self.close.len()..];
                resume_at = region.line_before.len() + marker.len();
                *line = format!("{}{}{}", region.line_before, marker, rest);
            } else if self.closes_on_empty_line && line.is_empty() {
                store.push(region.content);
                let marker = self.marker(store.len() - 1);
                *line = format!("{}{}", region.line_before, marker);
                resume_at = line.len();
            } else {
                region.content.append_line(line);
                self.region = Some(region);
                return Extraction::Consumed;
            }
        }

        while let Some(offset) = line[resume_at..].find(self.open) {
            let open = resume_at + offset;
            let body = open + self.open.len();
            let Some(length) = line[body..].find(self.close) else {
                break;
            };
            let close = body + length;
            store.push(Content::new(&line[body..close]));
            let marker = self.marker(store.len() - 1);
            line.replace_range(open..close + self.close.len(), &marker);
            resume_at = open + marker.len();
        }

        if let Some(offset) = line[resume_at..].find(self.open) {
            let open = resume_at + offset;
            self.region = Some(OpenRegion {
                line_before: line[..open].to_string(),
                content: Content::new(&line[open + self.open.len()..]),
            });
            line.truncate(open);
            return Extraction::Consumed;
        }

        Extraction::Ready
    }
}
