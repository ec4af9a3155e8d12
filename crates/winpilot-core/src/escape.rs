//! Safe interpolation of caller-supplied values into AppleScript.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Escape a string for use inside an AppleScript double-quoted literal.
pub fn applescript_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            _ => out.push(c),
        }
    }
    out
}

/// Application name that is safe to splice into a script.
///
/// Construction trims surrounding whitespace and rejects empty names and
/// names containing control characters (a newline would end the string
/// literal's line and let the remainder run as script). Quotes and
/// backslashes are allowed and escaped by [`AppName::escaped`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyAppName);
        }
        if name.chars().any(char::is_control) {
            return Err(ValidationError::InvalidAppName {
                name: name.escape_debug().to_string(),
                reason: "control characters are not allowed".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name escaped for an AppleScript string literal.
    pub fn escaped(&self) -> String {
        applescript_escape(&self.0)
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AppName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AppName::new(&value)
    }
}

impl From<AppName> for String {
    fn from(value: AppName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applescript_escape_quotes_and_backslashes() {
        assert_eq!(applescript_escape("plain"), "plain");
        assert_eq!(applescript_escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_app_name_trims() {
        let name = AppName::new("  Google Chrome ").unwrap();
        assert_eq!(name.as_str(), "Google Chrome");
        assert_eq!(name.to_string(), "Google Chrome");
    }

    #[test]
    fn test_app_name_rejects_blank() {
        assert_eq!(AppName::new(""), Err(ValidationError::EmptyAppName));
        assert_eq!(AppName::new("   "), Err(ValidationError::EmptyAppName));
    }

    #[test]
    fn test_app_name_rejects_newlines() {
        let result = AppName::new("Safari\ndo shell script \"rm -rf ~\"");
        assert!(matches!(
            result,
            Err(ValidationError::InvalidAppName { .. })
        ));
    }

    #[test]
    fn test_app_name_escapes_breakout_attempt() {
        let name = AppName::new(r#"Evil" & (do shell script "id") & ""#).unwrap();
        let escaped = name.escaped();
        assert_eq!(escaped, r#"Evil\" & (do shell script \"id\") & \""#);
        // Every quote in the escaped form is preceded by a backslash.
        let bytes = escaped.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'"' {
                assert_eq!(bytes[i - 1], b'\\');
            }
        }
    }

    #[test]
    fn test_app_name_deserialize_validates() {
        let ok: AppName = serde_json::from_str("\"Safari\"").unwrap();
        assert_eq!(ok.as_str(), "Safari");
        assert!(serde_json::from_str::<AppName>("\"\"").is_err());
    }
}
