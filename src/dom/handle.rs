use std::cell::RefCell;
use std::rc::Rc;

use super::{Channel, ChannelMap, Color, TargetId};
use crate::timeline::TweenTarget;

struct CharNode {
    id: TargetId,
    text: String,
    /// Color inherited from the run this glyph was split out of
    run_color: Color,
    /// Inline color override
    color: Option<Color>,
    channels: ChannelMap,
}

/// Handle to one split glyph (or word, for word granularity).
///
/// Clones share the same node.
#[derive(Clone)]
pub struct CharHandle {
    inner: Rc<RefCell<CharNode>>,
}

impl CharHandle {
    /// Create a detached glyph node; splitters call this.
    pub fn new(text: impl Into<String>, run_color: Color) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CharNode {
                id: TargetId::next(),
                text: text.into(),
                run_color,
                color: None,
                channels: ChannelMap::default(),
            })),
        }
    }

    pub fn id(&self) -> TargetId {
        self.inner.borrow().id
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.borrow_mut().text = text.into();
    }

    /// Color the glyph renders with: the inline override, else the run color.
    pub fn computed_color(&self) -> Color {
        let node = self.inner.borrow();
        node.color.unwrap_or(node.run_color)
    }

    pub fn set_color(&self, color: Color) {
        self.inner.borrow_mut().color = Some(color);
    }

    /// Drop the inline color so the glyph inherits its run color again.
    pub fn clear_color(&self) {
        self.inner.borrow_mut().color = None;
    }

    pub fn channel(&self, channel: Channel) -> f32 {
        self.inner.borrow().channels.get(channel)
    }

    pub fn set_channel(&self, channel: Channel, value: f32) {
        self.inner.borrow_mut().channels.set(channel, value);
    }

    pub fn opacity(&self) -> f32 {
        self.channel(Channel::Opacity)
    }

    pub fn cursor_visible(&self) -> bool {
        self.channel(Channel::CursorVisible) > 0.5
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &CharHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for CharHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.inner.borrow();
        f.debug_struct("CharHandle")
            .field("id", &node.id)
            .field("text", &node.text)
            .field("color", &node.color.unwrap_or(node.run_color))
            .finish()
    }
}

impl TweenTarget for CharHandle {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_color_prefers_inline() {
        let handle = CharHandle::new("a", Color::WHITE);
        assert_eq!(handle.computed_color(), Color::WHITE);

        handle.set_color(Color::from_hex(0xff0000));
        assert_eq!(handle.computed_color(), Color::from_hex(0xff0000));

        handle.clear_color();
        assert_eq!(handle.computed_color(), Color::WHITE);
    }

    #[test]
    fn test_clones_share_state() {
        let a = CharHandle::new("x", Color::BLACK);
        let b = a.clone();
        b.set_text("y");
        b.set_channel(Channel::CursorVisible, 1.0);
        assert_eq!(a.text(), "y");
        assert!(a.cursor_visible());
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
    }
}
