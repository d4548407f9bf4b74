use std::fmt;

use crate::error::ValidationError;

/// Two-character target language, cut from the `lang` query parameter.
///
/// Not checked against the translator's supported set; `"ko-KR"` becomes
/// `"ko"` and anything the service rejects degrades to the fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    pub fn from_query(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = raw.ok_or(ValidationError::MissingLanguage)?;
        let code: String = raw.chars().take(2).collect();
        if code.chars().count() < 2 {
            return Err(ValidationError::LanguageTooShort(raw.to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
