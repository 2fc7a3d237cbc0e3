use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

/// Unlockable colour themes. Only unlock requirements live here; palettes
/// belong to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    MexicanFiesta,
    Sunset,
    Ocean,
    Forest,
    Desert,
    Festival,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::MexicanFiesta,
        Theme::Sunset,
        Theme::Ocean,
        Theme::Forest,
        Theme::Desert,
        Theme::Festival,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Theme::MexicanFiesta => "mexican_fiesta",
            Theme::Sunset => "sunset",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Desert => "desert",
            Theme::Festival => "festival",
        }
    }

    #[must_use]
    pub fn unlock_level(self) -> u32 {
        match self {
            Theme::MexicanFiesta => 1,
            Theme::Sunset => 5,
            Theme::Ocean => 10,
            Theme::Forest => 15,
            Theme::Desert => 20,
            Theme::Festival => 25,
        }
    }

    #[must_use]
    pub fn unlock_coins(self) -> u64 {
        match self {
            Theme::MexicanFiesta => 0,
            Theme::Sunset => 100,
            Theme::Ocean => 200,
            Theme::Forest => 300,
            Theme::Desert => 400,
            Theme::Festival => 500,
        }
    }

    /// Both the level and the coin requirement must be met.
    #[must_use]
    pub fn is_unlocked(self, level: u32, coins: u64) -> bool {
        level >= self.unlock_level() && coins >= self.unlock_coins()
    }

    #[must_use]
    pub fn unlocked(level: u32, coins: u64) -> Vec<Theme> {
        Self::ALL
            .into_iter()
            .filter(|theme| theme.is_unlocked(level, coins))
            .collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.id() == s)
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_always_available() {
        assert!(Theme::MexicanFiesta.is_unlocked(1, 0));
        assert_eq!(Theme::unlocked(1, 0), vec![Theme::MexicanFiesta]);
    }

    #[test]
    fn both_requirements_must_hold() {
        assert!(!Theme::Sunset.is_unlocked(5, 99));
        assert!(!Theme::Sunset.is_unlocked(4, 5_000));
        assert!(Theme::Sunset.is_unlocked(5, 100));
        assert_eq!(Theme::unlocked(12, 250).len(), 3);
    }

    #[test]
    fn ids_parse_back() {
        for theme in Theme::ALL {
            assert_eq!(theme.id().parse::<Theme>().unwrap(), theme);
        }
        assert_eq!(
            "neon".parse::<Theme>().unwrap_err(),
            UnknownTheme("neon".into())
        );
    }
}
