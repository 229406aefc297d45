//! Theme token resolution for rendered cards.

use navquiz_core::ThemeToken;

/// Concrete visuals for a theme token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub glyph: &'static str,
    /// CSS colour for the card's accent panel.
    pub color: &'static str,
}

const NEUTRAL: Theme = Theme {
    glyph: "◆",
    color: "#475569",
};

/// Map a token to visuals. Unknown tokens get a neutral theme.
pub fn resolve(token: &ThemeToken) -> Theme {
    match token.as_str().trim().to_lowercase().as_str() {
        "wind" => Theme {
            glyph: "🌬",
            color: "#14b8a6",
        },
        "anchor" => Theme {
            glyph: "⚓",
            color: "#2563eb",
        },
        "compass" => Theme {
            glyph: "🧭",
            color: "#4f46e5",
        },
        "zap" => Theme {
            glyph: "⚡",
            color: "#f97316",
        },
        _ => NEUTRAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_resolve() {
        assert_eq!(resolve(&ThemeToken::new("anchor")).glyph, "⚓");
        assert_eq!(resolve(&ThemeToken::new(" Zap ")).color, "#f97316");
    }

    #[test]
    fn unknown_token_is_neutral() {
        assert_eq!(resolve(&ThemeToken::new("lighthouse")), NEUTRAL);
        assert_eq!(resolve(&ThemeToken::new("")), NEUTRAL);
    }
}
