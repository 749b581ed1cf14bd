use std::path::PathBuf;

/// Errors that can occur when building or describing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("unknown theme '{0}' (expected one of: fruits, monsters, animals)")]
    UnknownTheme(String),

    #[error("kind {kind} appears {count} time(s) on the board (expected exactly 2)")]
    UnpairedKind { kind: u8, count: usize },

    #[error("board holds {pairs} pair(s), at least {min} required")]
    TooFewPairs { pairs: usize, min: usize },

    #[error("kind {kind} is not part of theme '{theme}'")]
    UnknownKind { kind: u8, theme: &'static str },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_error_display() {
        let err = DeckError::UnknownTheme("plants".to_string());
        assert_eq!(
            err.to_string(),
            "unknown theme 'plants' (expected one of: fruits, monsters, animals)"
        );

        let err = DeckError::UnpairedKind { kind: 3, count: 1 };
        assert_eq!(
            err.to_string(),
            "kind 3 appears 1 time(s) on the board (expected exactly 2)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.reveal_delay_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.reveal_delay_ms must be > 0"
        );
    }
}
