//! Theme signal contract and the light/dark preference.
//!
//! The engine only ever reads colors through [`ThemeSignal`]. Where the
//! values come from (computed styles in the browser, constants in tests)
//! is up to the implementor.

use crate::color::{ColorPair, Rgb};
use std::fmt;

/// Storage key of the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub const DEFAULT: ThemeMode = ThemeMode::Dark;

    /// Parses `"light"` or `"dark"`; anything else is `None`.
    pub fn parse(value: &str) -> Option<ThemeMode> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Palette used when the stylesheet does not set explicit colors.
    pub fn fallback_colors(&self) -> ColorPair {
        match self {
            ThemeMode::Dark => ColorPair::new("#8b5cf6", Rgb::new(139, 92, 246)),
            ThemeMode::Light => ColorPair::new("#6366f1", Rgb::new(99, 102, 241)),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the current theme.
pub trait ThemeSignal {
    /// Explicit particle fill color, if the theme sets one.
    fn main_color(&self) -> Option<String>;

    /// Explicit connection base color as an "R, G, B" triple, if set.
    fn connection_rgb(&self) -> Option<String>;

    fn mode(&self) -> ThemeMode;

    /// Resolves the color pair for the next frame. Explicit values win;
    /// blank or unparsable values fall back to the mode's palette.
    fn read_colors(&self) -> ColorPair {
        let fallback = self.mode().fallback_colors();
        let main = non_blank(self.main_color()).unwrap_or(fallback.main);
        let connection = match non_blank(self.connection_rgb()) {
            Some(raw) => raw.parse::<Rgb>().unwrap_or_else(|e| {
                log::warn!("ignoring connection color: {}", e);
                fallback.connection
            }),
            None => fallback.connection,
        };
        ColorPair { main, connection }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Theme signal with fixed values, for hosts without a stylesheet.
#[derive(Debug, Clone, Default)]
pub struct StaticTheme {
    pub main: Option<String>,
    pub connection: Option<String>,
    pub dark: bool,
}

impl ThemeSignal for StaticTheme {
    fn main_color(&self) -> Option<String> {
        self.main.clone()
    }

    fn connection_rgb(&self) -> Option<String> {
        self.connection.clone()
    }

    fn mode(&self) -> ThemeMode {
        if self.dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

/// Single string preference store (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Saved theme, or dark when nothing valid is stored.
pub fn load_theme<S: PreferenceStore + ?Sized>(store: &S) -> ThemeMode {
    store
        .get(THEME_STORAGE_KEY)
        .and_then(|saved| ThemeMode::parse(&saved))
        .unwrap_or(ThemeMode::DEFAULT)
}

pub fn store_theme<S: PreferenceStore + ?Sized>(store: &mut S, mode: ThemeMode) {
    store.set(THEME_STORAGE_KEY, mode.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_owned(), value.to_owned());
        }
    }

    #[test]
    fn explicit_colors_win() {
        let theme = StaticTheme {
            main: Some(" #ff0000 ".into()),
            connection: Some("1, 2, 3".into()),
            dark: true,
        };
        assert_eq!(theme.read_colors(), ColorPair::new("#ff0000", Rgb::new(1, 2, 3)));
    }

    #[test]
    fn blank_colors_fall_back_by_mode() {
        let dark = StaticTheme {
            main: Some("   ".into()),
            connection: None,
            dark: true,
        };
        assert_eq!(dark.read_colors(), ThemeMode::Dark.fallback_colors());

        let light = StaticTheme::default();
        let colors = light.read_colors();
        assert_eq!(colors.main, "#6366f1");
        assert_eq!(colors.connection, Rgb::new(99, 102, 241));
    }

    #[test]
    fn bad_connection_triple_keeps_explicit_main() {
        let theme = StaticTheme {
            main: Some("tomato".into()),
            connection: Some("not a color".into()),
            dark: false,
        };
        let colors = theme.read_colors();
        assert_eq!(colors.main, "tomato");
        assert_eq!(colors.connection, Rgb::new(99, 102, 241));
    }

    #[test]
    fn preference_defaults_to_dark() {
        let mut store = MemoryStore::default();
        assert_eq!(load_theme(&store), ThemeMode::Dark);

        store.set(THEME_STORAGE_KEY, "sepia");
        assert_eq!(load_theme(&store), ThemeMode::Dark);
    }

    #[test]
    fn toggle_round_trips_through_store() {
        let mut store = MemoryStore::default();
        let next = load_theme(&store).toggled();
        store_theme(&mut store, next);
        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("light"));
        assert_eq!(load_theme(&store), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }
}
