use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ParseVariantError;

/// Visual flavor of a scramble run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Caret shown on each glyph during its first flash
    Cursor,
    /// Background sweep revealed behind the text
    Background,
    /// Glyphs take random palette colors while flashing
    Color,
    /// Blur reveal driven by the same scale channel as `Background`
    Blur,
    /// Jittering displacement and skew over the whole element
    Glitch,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Cursor,
        Variant::Background,
        Variant::Color,
        Variant::Blur,
        Variant::Glitch,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Cursor => "cursor",
            Variant::Background => "background",
            Variant::Color => "color",
            Variant::Blur => "blur",
            Variant::Glitch => "glitch",
        }
    }

    /// Marker tags applied to the element for this variant.
    pub const fn markers(self) -> Markers {
        match self {
            Variant::Cursor => Markers::CURSOR,
            Variant::Background => Markers::BACKGROUND,
            Variant::Color => Markers::empty(),
            Variant::Blur => Markers::BLUR,
            Variant::Glitch => Markers::GLITCH,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

bitflags! {
    /// Decoration marker classes the styling layer keys effects off
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Markers: u8 {
        const CURSOR     = 0b0001;
        const BACKGROUND = 0b0010;
        const BLUR       = 0b0100;
        const GLITCH     = 0b1000;
    }
}

impl Markers {
    /// Class names for the set flags, in declaration order.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [
            (Markers::CURSOR, "cursor"),
            (Markers::BACKGROUND, "background"),
            (Markers::BLUR, "blur"),
            (Markers::GLITCH, "glitch"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}
