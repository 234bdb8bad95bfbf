use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dom::Color;

/// Glyphs a flashing character can show.
pub const SYMBOLS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+',
    '-', '=', '[', ']', '{', '}', '|', ';', ':', ',', '.', '<', '>', '?',
];

/// Colors a `Color`-variant glyph cycles through while flashing.
pub const PALETTE: [Color; 6] = [
    Color::from_hex(0xff3366),
    Color::from_hex(0x33ccff),
    Color::from_hex(0xffcc00),
    Color::from_hex(0x66ff99),
    Color::from_hex(0xcc66ff),
    Color::from_hex(0xff9933),
];

/// Random source for glyphs, palette colors and glitch jitter.
pub struct GlyphSource {
    rng: StdRng,
}

impl GlyphSource {
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn glyph(&mut self) -> char {
        SYMBOLS[self.rng.random_range(0..SYMBOLS.len())]
    }

    pub fn color(&mut self) -> Color {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }

    /// Uniform value in `-magnitude..=magnitude`.
    pub fn jitter(&mut self, magnitude: f32) -> f32 {
        self.rng.random_range(-magnitude..=magnitude)
    }
}

impl std::fmt::Debug for GlyphSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GlyphSource")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table() {
        assert_eq!(SYMBOLS.len(), 52);
        assert!(SYMBOLS.iter().all(|c| !c.is_whitespace()));
    }

    #[test]
    fn test_draws_stay_in_tables() {
        let mut source = GlyphSource::seeded(7);
        for _ in 0..200 {
            assert!(SYMBOLS.contains(&source.glyph()));
            assert!(PALETTE.contains(&source.color()));
            let j = source.jitter(2.5);
            assert!((-2.5..=2.5).contains(&j));
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = GlyphSource::seeded(42);
        let mut b = GlyphSource::seeded(42);
        let left: String = (0..16).map(|_| a.glyph()).collect();
        let right: String = (0..16).map(|_| b.glyph()).collect();
        assert_eq!(left, right);
    }
}
