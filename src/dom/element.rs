use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::{Channel, ChannelMap, CharHandle, Color, TargetId};
use crate::timeline::TweenTarget;

/// A run of text sharing one color.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub color: Color,
}

/// One piece of a split element's content.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Text the splitter left alone (whitespace)
    Text(String),
    /// An addressable glyph
    Glyph(CharHandle),
}

impl Segment {
    fn text(&self) -> String {
        match self {
            Segment::Text(text) => text.clone(),
            Segment::Glyph(handle) => handle.text(),
        }
    }
}

struct ElementNode {
    id: TargetId,
    runs: Vec<TextRun>,
    /// Present while the element is split into glyph handles
    segments: Option<Vec<Segment>>,
    classes: BTreeSet<String>,
    channels: ChannelMap,
}

/// Root text node owned by one animator at a time.
#[derive(Clone)]
pub struct TextElement {
    inner: Rc<RefCell<ElementNode>>,
}

impl TextElement {
    /// Create an element holding a single run of text.
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementNode {
                id: TargetId::next(),
                runs: vec![TextRun {
                    text: text.into(),
                    color,
                }],
                segments: None,
                classes: BTreeSet::new(),
                channels: ChannelMap::default(),
            })),
        }
    }

    /// Append another run, e.g. a differently colored span.
    pub fn with_run(self, text: impl Into<String>, color: Color) -> Self {
        self.inner.borrow_mut().runs.push(TextRun {
            text: text.into(),
            color,
        });
        self
    }

    pub fn id(&self) -> TargetId {
        self.inner.borrow().id
    }

    /// The unsplit source runs.
    pub fn runs(&self) -> Vec<TextRun> {
        self.inner.borrow().runs.clone()
    }

    /// Text as currently displayed, reading through split glyphs.
    pub fn text_content(&self) -> String {
        let node = self.inner.borrow();
        match &node.segments {
            Some(segments) => segments.iter().map(Segment::text).collect(),
            None => node.runs.iter().map(|run| run.text.as_str()).collect(),
        }
    }

    pub fn is_split(&self) -> bool {
        self.inner.borrow().segments.is_some()
    }

    /// Replace the displayed content with split segments.
    pub fn set_segments(&self, segments: Vec<Segment>) {
        self.inner.borrow_mut().segments = Some(segments);
    }

    /// Drop split segments, returning to the original runs.
    pub fn clear_segments(&self) -> Option<Vec<Segment>> {
        self.inner.borrow_mut().segments.take()
    }

    pub fn add_class(&self, class: &str) {
        self.inner.borrow_mut().classes.insert(class.to_string());
    }

    pub fn remove_class(&self, class: &str) -> bool {
        self.inner.borrow_mut().classes.remove(class)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.inner.borrow().classes.iter().cloned().collect()
    }

    pub fn channel(&self, channel: Channel) -> f32 {
        self.inner.borrow().channels.get(channel)
    }

    pub fn set_channel(&self, channel: Channel, value: f32) {
        self.inner.borrow_mut().channels.set(channel, value);
    }

    /// Remove an inline channel value so it reads as its rest value.
    pub fn remove_channel(&self, channel: Channel) {
        self.inner.borrow_mut().channels.remove(channel);
    }

    /// Capture everything observable about the element.
    pub fn snapshot(&self) -> ElementSnapshot {
        let text = self.text_content();
        let node = self.inner.borrow();
        ElementSnapshot {
            text,
            runs: node.runs.clone(),
            split: node.segments.is_some(),
            classes: node.classes.iter().cloned().collect(),
            channels: node.channels.iter().collect(),
        }
    }
}

impl std::fmt::Debug for TextElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.inner.borrow();
        f.debug_struct("TextElement")
            .field("id", &node.id)
            .field("runs", &node.runs)
            .field("split", &node.segments.is_some())
            .field("classes", &node.classes)
            .finish()
    }
}

impl TweenTarget for TextElement {
    fn target_id(&self) -> TargetId {
        self.id()
    }

    fn read(&self, channel: Channel) -> f32 {
        self.channel(channel)
    }

    fn write(&self, channel: Channel, value: f32) {
        self.set_channel(channel, value);
    }
}

/// Point-in-time capture of an element, comparable for equality.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSnapshot {
    pub text: String,
    pub runs: Vec<TextRun>,
    pub split: bool,
    pub classes: Vec<String>,
    pub channels: Vec<(Channel, f32)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_spans_runs() {
        let element = TextElement::new("Hello ", Color::WHITE).with_run("world", Color::BLACK);
        assert_eq!(element.text_content(), "Hello world");
        assert_eq!(element.runs().len(), 2);
        assert!(!element.is_split());
    }

    #[test]
    fn test_text_content_reads_through_segments() {
        let element = TextElement::new("ab", Color::WHITE);
        let a = CharHandle::new("a", Color::WHITE);
        let b = CharHandle::new("b", Color::WHITE);
        element.set_segments(vec![
            Segment::Glyph(a.clone()),
            Segment::Text(" ".into()),
            Segment::Glyph(b),
        ]);
        a.set_text("#");
        assert_eq!(element.text_content(), "# b");

        element.clear_segments();
        assert_eq!(element.text_content(), "ab");
    }

    #[test]
    fn test_classes() {
        let element = TextElement::new("x", Color::WHITE);
        element.add_class("glitch");
        assert!(element.has_class("glitch"));
        assert_eq!(element.classes(), vec!["glitch".to_string()]);
        assert!(element.remove_class("glitch"));
        assert!(!element.remove_class("glitch"));
    }

    #[test]
    fn test_snapshot_tracks_channels() {
        let element = TextElement::new("x", Color::WHITE);
        let before = element.snapshot();

        element.set_channel(Channel::RevealScale, 0.25);
        assert_ne!(element.snapshot(), before);

        element.remove_channel(Channel::RevealScale);
        assert_eq!(element.snapshot(), before);
    }
}
