//! Identity keys for both graph layers.
//!
//! A language is identified by a single whitespace-free token ([`LangKey`]).
//! A root is identified by the triple `(language, text, gloss)` ([`RootKey`]),
//! rendered canonically as the three tokens joined by single spaces. Because
//! the canonical string is split on whitespace to recover the triple, no
//! component may itself contain whitespace; this is checked at construction
//! time so that every key in the store parses back to itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Checks that `token` is non-empty and contains no whitespace.
fn validate_token(input: &str, token: &str, what: &str) -> Result<(), CoreError> {
    if token.is_empty() {
        return Err(CoreError::MalformedKey {
            input: input.to_string(),
            reason: format!("{what} is empty"),
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(CoreError::MalformedKey {
            input: input.to_string(),
            reason: format!("{what} contains whitespace"),
        });
    }
    Ok(())
}

/// Language identity: the language code or name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LangKey(String);

impl LangKey {
    /// Creates a language key, rejecting empty or whitespace-bearing names.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        validate_token(&name, &name, "language")?;
        Ok(LangKey(name))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LangKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LangKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LangKey::new(s)
    }
}

impl TryFrom<String> for LangKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LangKey::new(value)
    }
}

impl From<LangKey> for String {
    fn from(key: LangKey) -> Self {
        key.0
    }
}

impl AsRef<str> for LangKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Root identity: a word or affix of one language with its gloss.
///
/// Ordering is by language, then text, then gloss.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootKey {
    lang: LangKey,
    text: String,
    gloss: String,
}

impl RootKey {
    /// Creates a root key from its three components.
    pub fn new(
        lang: LangKey,
        text: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let text = text.into();
        let gloss = gloss.into();
        let rendered = format!("{lang} {text} {gloss}");
        validate_token(&rendered, &text, "text")?;
        validate_token(&rendered, &gloss, "gloss")?;
        Ok(RootKey { lang, text, gloss })
    }

    /// Parses the canonical `"lang text gloss"` form.
    ///
    /// Any run of whitespace separates tokens; exactly three are required.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [lang, text, gloss] => {
                let lang = LangKey::new(*lang).map_err(|_| CoreError::MalformedKey {
                    input: input.to_string(),
                    reason: "invalid language token".into(),
                })?;
                RootKey::new(lang, *text, *gloss)
            }
            _ => Err(CoreError::MalformedKey {
                input: input.to_string(),
                reason: format!("expected 3 whitespace-separated tokens, found {}", tokens.len()),
            }),
        }
    }

    /// The language this root belongs to.
    pub fn lang(&self) -> &LangKey {
        &self.lang
    }

    /// The written form of the root.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The gloss (meaning) of the root.
    pub fn gloss(&self) -> &str {
        &self.gloss
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lang, self.text, self.gloss)
    }
}

impl FromStr for RootKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RootKey::parse(s)
    }
}

impl TryFrom<String> for RootKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RootKey::parse(&value)
    }
}

impl From<RootKey> for String {
    fn from(key: RootKey) -> Self {
        key.to_string()
    }
}
