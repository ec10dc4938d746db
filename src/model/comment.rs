//! Comment value type

use std::fmt;

/// A comment: the delimiter character that introduced it plus its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    symbol: char,
    text: String,
}

impl Comment {
    /// Create a comment from a delimiter character and its text.
    pub fn new(symbol: char, text: impl Into<String>) -> Self {
        Self {
            symbol,
            text: text.into(),
        }
    }

    /// The delimiter character that introduced the comment.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// The comment text, without the delimiter.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_symbol() {
        let comment = Comment::new(';', "subscription key");
        assert_eq!(comment.to_string(), "; subscription key");
        assert_eq!(comment.symbol(), ';');
        assert_eq!(comment.text(), "subscription key");
    }
}
