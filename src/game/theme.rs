use std::fmt;
use std::str::FromStr;

use crate::error::DeckError;

/// Smallest board the game will deal.
pub const MIN_PAIRS: usize = 2;

/// Identity of a matchable symbol. Two slots match iff their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenKind(pub u8);

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub display: &'static str,
}

const fn token(kind: u8, display: &'static str) -> Token {
    Token {
        kind: TokenKind(kind),
        display,
    }
}

const FRUITS: [Token; 8] = [
    token(1, "🍎"),
    token(2, "🍊"),
    token(3, "🍇"),
    token(4, "🍓"),
    token(5, "🍍"),
    token(6, "🍉"),
    token(7, "🍌"),
    token(8, "🍒"),
];

const MONSTERS: [Token; 8] = [
    token(1, "👹"),
    token(2, "👺"),
    token(3, "👻"),
    token(4, "👾"),
    token(5, "💀"),
    token(6, "😈"),
    token(7, "🤡"),
    token(8, "👽"),
];

const ANIMALS: [Token; 8] = [
    token(1, "🐶"),
    token(2, "🐱"),
    token(3, "🐭"),
    token(4, "🐹"),
    token(5, "🐰"),
    token(6, "🦊"),
    token(7, "🐻"),
    token(8, "🐼"),
];

/// A named, ordered token catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Fruits,
    Monsters,
    Animals,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Fruits, Theme::Monsters, Theme::Animals];

    /// Get theme name for display and config files
    pub fn name(self) -> &'static str {
        match self {
            Theme::Fruits => "fruits",
            Theme::Monsters => "monsters",
            Theme::Animals => "animals",
        }
    }

    pub fn tokens(self) -> &'static [Token] {
        match self {
            Theme::Fruits => &FRUITS,
            Theme::Monsters => &MONSTERS,
            Theme::Animals => &ANIMALS,
        }
    }

    /// Number of distinct tokens, i.e. the largest pair count this theme supports
    pub fn len(self) -> usize {
        self.tokens().len()
    }

    pub fn token(self, kind: TokenKind) -> Option<&'static Token> {
        self.tokens().iter().find(|t| t.kind == kind)
    }

    /// Next theme in catalog order, wrapping around
    pub fn next(self) -> Theme {
        let idx = Theme::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Theme::ALL[(idx + 1) % Theme::ALL.len()]
    }

    /// Clamp a requested pair count into what this theme can deal.
    pub fn clamp_pairs(self, pair_count: usize) -> usize {
        pair_count.clamp(MIN_PAIRS, self.len())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeckError::UnknownTheme(s.to_string()))
    }
}
