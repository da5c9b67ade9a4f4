// Simple color types for the particle field: an RGB triple parsed from the
// "R, G, B" form the stylesheet exposes, and the pair of colors a frame uses

use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// CSS `rgba()` string with the given alpha, used as a stroke style.
    pub fn with_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected an \"R, G, B\" triple, got {0:?}")]
pub struct ParseRgbError(pub String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| ParseRgbError(s.to_owned()))?;
        match channels[..] {
            [r, g, b] => Ok(Rgb::new(r, g, b)),
            _ => Err(ParseRgbError(s.to_owned())),
        }
    }
}

/// Colors for one frame: particle fill and connection base.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorPair {
    pub main: String,
    pub connection: Rgb,
}

impl ColorPair {
    pub fn new(main: impl Into<String>, connection: Rgb) -> ColorPair {
        ColorPair {
            main: main.into(),
            connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spaced_triple() {
        let rgb: Rgb = " 139, 92,246 ".parse().unwrap();
        assert_eq!(rgb, Rgb::new(139, 92, 246));
    }

    #[test]
    fn rejects_malformed_triples() {
        for bad in ["", "1, 2", "1, 2, 3, 4", "red", "1, 2, 300", "1,,3"] {
            assert!(bad.parse::<Rgb>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn formats_stroke_style() {
        let rgb = Rgb::new(99, 102, 241);
        assert_eq!(rgb.with_alpha(0.15), "rgba(99, 102, 241, 0.15)");
        assert_eq!(rgb.to_string(), "99, 102, 241");
    }
}
