//! URL validation for links and images.
//!
//! Anything that ends up in an `href` or `src` attribute passes through
//! [`SafeUrl`], so the serialized markup never carries script-capable URLs.

use std::fmt;
use std::str::FromStr;

use smol_str::{SmolStr, ToSmolStr};

use crate::error::UrlError;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// A trimmed, non-empty URL whose scheme (if any) is on the allowlist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SafeUrl(SmolStr);

impl SafeUrl {
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }
        if let Some(scheme) = scheme_of(trimmed) {
            let scheme = scheme.to_ascii_lowercase();
            if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                return Err(UrlError::UnsupportedScheme(scheme.to_smolstr()));
            }
        }
        Ok(Self(trimmed.to_smolstr()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SafeUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the scheme of an absolute URL, ignoring embedded control chars and
/// whitespace the way browsers do (`java\tscript:` is still `javascript:`).
fn scheme_of(url: &str) -> Option<String> {
    let mut scheme = String::new();
    for c in url.chars() {
        match c {
            ':' => return (!scheme.is_empty()).then_some(scheme),
            '/' | '?' | '#' => return None,
            c if c.is_ascii_control() || c.is_whitespace() => continue,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => scheme.push(c),
            // Not a scheme character: treat the whole thing as a relative reference.
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_web_and_relative_urls() {
        for url in [
            "https://example.com/a.png",
            "http://example.com",
            "mailto:someone@example.com",
            "/images/cat.png",
            "#section",
            "photo.jpg",
            "HTTPS://EXAMPLE.COM",
        ] {
            assert!(SafeUrl::parse(url).is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn test_trims_input() {
        let url = SafeUrl::parse("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SafeUrl::parse("   "), Err(UrlError::Empty));
    }

    #[test]
    fn test_rejects_script_schemes() {
        assert_eq!(
            SafeUrl::parse("javascript:alert(1)"),
            Err(UrlError::UnsupportedScheme("javascript".into()))
        );
        assert_eq!(
            SafeUrl::parse("java\tscript:alert(1)"),
            Err(UrlError::UnsupportedScheme("javascript".into()))
        );
        assert!(SafeUrl::parse("data:text/html;base64,AAAA").is_err());
        assert!(SafeUrl::parse("VBScript:msgbox").is_err());
    }
}
