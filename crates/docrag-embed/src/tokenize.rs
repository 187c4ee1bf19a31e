//! Word tokenizer feeding the hashing embedder.
//!
//! A token is a maximal run of ASCII letters, digits or `_`, lower-cased.
//! Everything else separates tokens, including non-ASCII letters: `"café"`
//! yields `"caf"`. That loss is accepted for a bag-of-words hash.

/// Lazily yield the lower-cased tokens of `text`, left to right.
///
/// The whole text is lower-cased first (Unicode rules), so characters such as
/// the Kelvin sign fold into ASCII and become part of a token.
pub fn tokenize(text: &str) -> Tokens {
    Tokens { text: text.to_lowercase(), pos: 0 }
}

/// Iterator returned by [`tokenize`].
pub struct Tokens {
    text: String,
    pos: usize,
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = &self.text[self.pos..];
        let start = rest.find(is_token_char)?;
        let len = rest[start..].find(|c: char| !is_token_char(c)).unwrap_or(rest.len() - start);
        let token = rest[start..start + len].to_string();
        self.pos += start + len;
        Some(token)
    }
}

fn is_token_char(c: char) -> bool { c.is_ascii_alphanumeric() || c == '_' }
