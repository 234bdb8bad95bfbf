//! Splitting a text element into addressable glyph handles.

use serde::{Deserialize, Serialize};

use crate::dom::{CharHandle, Segment, TextElement};

/// How finely an element is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One handle per non-whitespace character
    #[default]
    Chars,
    /// One handle per whitespace-delimited word
    Words,
}

/// Turns an element's text into ordered handles and can undo that.
pub trait TextSplitter {
    /// Split `element`, returning handles in reading order.
    ///
    /// Whitespace never gets a handle; it stays in the element as plain text.
    fn split(&mut self, element: &TextElement, granularity: Granularity) -> Vec<CharHandle>;

    /// Restore the last split element to its unsplit content.
    /// Does nothing if nothing is split.
    fn revert(&mut self);
}

/// The default splitter, working on Unicode scalar values.
#[derive(Debug, Default)]
pub struct CharSplitter {
    split: Option<TextElement>,
}

impl CharSplitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextSplitter for CharSplitter {
    fn split(&mut self, element: &TextElement, granularity: Granularity) -> Vec<CharHandle> {
        self.revert();

        let mut segments = Vec::new();
        let mut handles = Vec::new();
        for run in element.runs() {
            let mut word = String::new();
            for ch in run.text.chars() {
                if ch.is_whitespace() {
                    if !word.is_empty() {
                        let handle = CharHandle::new(std::mem::take(&mut word), run.color);
                        handles.push(handle.clone());
                        segments.push(Segment::Glyph(handle));
                    }
                    push_text(&mut segments, ch);
                    continue;
                }
                match granularity {
                    Granularity::Chars => {
                        let handle = CharHandle::new(ch.to_string(), run.color);
                        handles.push(handle.clone());
                        segments.push(Segment::Glyph(handle));
                    }
                    Granularity::Words => word.push(ch),
                }
            }
            // Words never span runs; a color change ends the word
            if !word.is_empty() {
                let handle = CharHandle::new(word, run.color);
                handles.push(handle.clone());
                segments.push(Segment::Glyph(handle));
            }
        }

        log::debug!(
            "split {:?} into {} {:?} handle(s)",
            element.id(),
            handles.len(),
            granularity
        );
        element.set_segments(segments);
        self.split = Some(element.clone());
        handles
    }

    fn revert(&mut self) {
        if let Some(element) = self.split.take() {
            element.clear_segments();
        }
    }
}

fn push_text(segments: &mut Vec<Segment>, ch: char) {
    if let Some(Segment::Text(text)) = segments.last_mut() {
        text.push(ch);
    } else {
        segments.push(Segment::Text(ch.to_string()));
    }
}
