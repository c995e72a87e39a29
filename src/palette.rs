use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

/// One of the eight tile colors. Display yields the human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TileColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Brown,
    Grey,
}

/// The palette in its canonical order. Red comes first and is the default target.
pub const PALETTE: [TileColor; 8] = [
    TileColor::Red,
    TileColor::Green,
    TileColor::Blue,
    TileColor::Yellow,
    TileColor::Purple,
    TileColor::Orange,
    TileColor::Brown,
    TileColor::Grey,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tile color: {0}")]
pub struct ParseColorError(pub String);

impl TileColor {
    pub fn hex(&self) -> &'static str {
        match self {
            TileColor::Red => "#FF5722",
            TileColor::Green => "#4CAF50",
            TileColor::Blue => "#2196F3",
            TileColor::Yellow => "#FFC107",
            TileColor::Purple => "#9C27B0",
            TileColor::Orange => "#FF9800",
            TileColor::Brown => "#795548",
            TileColor::Grey => "#607D8B",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TileColor::Red => (0xFF, 0x57, 0x22),
            TileColor::Green => (0x4C, 0xAF, 0x50),
            TileColor::Blue => (0x21, 0x96, 0xF3),
            TileColor::Yellow => (0xFF, 0xC1, 0x07),
            TileColor::Purple => (0x9C, 0x27, 0xB0),
            TileColor::Orange => (0xFF, 0x98, 0x00),
            TileColor::Brown => (0x79, 0x55, 0x48),
            TileColor::Grey => (0x60, 0x7D, 0x8B),
        }
    }
}

impl FromStr for TileColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PALETTE
            .iter()
            .copied()
            .find(|c| c.hex().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Uniform pick over the whole palette
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> TileColor {
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}

/// Uniform pick over the palette minus `current`. The candidate set always
/// holds seven colors.
pub fn random_color_except<R: Rng + ?Sized>(rng: &mut R, current: TileColor) -> TileColor {
    let candidates: Vec<TileColor> = PALETTE.iter().copied().filter(|c| *c != current).collect();
    *candidates.choose(rng).unwrap_or(&current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_palette_is_distinct() {
        let unique: HashSet<_> = PALETTE.iter().collect();
        assert_eq!(unique.len(), 8);
        let hexes: HashSet<_> = PALETTE.iter().map(|c| c.hex()).collect();
        assert_eq!(hexes.len(), 8);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TileColor::Red.to_string(), "Red");
        assert_eq!(TileColor::Grey.to_string(), "Grey");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#FF5722".parse::<TileColor>(), Ok(TileColor::Red));
        assert_eq!("#4caf50".parse::<TileColor>(), Ok(TileColor::Green));
        assert_eq!(" #607D8B ".parse::<TileColor>(), Ok(TileColor::Grey));
    }

    #[test]
    fn test_parse_unknown() {
        assert_matches!("#000000".parse::<TileColor>(), Err(ParseColorError(s)) if s == "#000000");
        assert!("FF5722".parse::<TileColor>().is_err());
        assert_eq!(
            ParseColorError("bogus".into()).to_string(),
            "unknown tile color: bogus"
        );
    }

    #[test]
    fn test_hex_matches_rgb() {
        for color in PALETTE {
            let (r, g, b) = color.rgb();
            assert_eq!(color.hex(), format!("#{r:02X}{g:02X}{b:02X}"));
        }
    }

    #[test]
    fn test_random_color_zero_source_picks_first() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(random_color(&mut rng), TileColor::Red);
        assert_eq!(random_color_except(&mut rng, TileColor::Red), TileColor::Green);
        assert_eq!(random_color_except(&mut rng, TileColor::Blue), TileColor::Red);
    }

    #[test]
    fn test_random_color_except_never_returns_current() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in PALETTE {
            for _ in 0..200 {
                let next = random_color_except(&mut rng, current);
                assert_ne!(next, current);
                assert!(PALETTE.contains(&next));
            }
        }
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..1000).map(|_| random_color(&mut rng)).collect();
        assert_eq!(seen.len(), PALETTE.len());
    }
}
