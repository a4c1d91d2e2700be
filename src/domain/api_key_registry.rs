use std::collections::HashSet;

/// Keys accepted in the `API-Key` header. An empty registry disables auth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyRegistry {
    keys: HashSet<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiKeyParseError {
    #[error("api keys are not a valid JSON string array: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ApiKeyRegistry {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Parses either a JSON array (`["a","b"]`) or a comma separated list.
    pub fn parse(raw: &str) -> Result<Self, ApiKeyParseError> {
        let raw = raw.trim();
        if raw.starts_with('[') {
            let keys: Vec<String> = serde_json::from_str(raw)?;
            return Ok(Self::new(keys));
        }
        Ok(Self::new(raw.split(',')))
    }

    pub fn is_enabled(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
