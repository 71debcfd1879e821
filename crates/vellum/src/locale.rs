//! Locale tables.
//!
//! Lookup-with-fallback text resolution: a locale is a flat key/value
//! table, optionally chained to a fallback locale. Missing keys resolve to
//! the key itself so labels never silently disappear.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Locale {
    #[serde(flatten)]
    strings: HashMap<String, String>,
    #[serde(skip)]
    fallback: Option<Box<Locale>>,
}

impl Locale {
    pub fn new(strings: HashMap<String, String>) -> Self {
        Self {
            strings,
            fallback: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Chains another locale to consult when a key is missing here.
    pub fn with_fallback(mut self, fallback: Locale) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Exact lookup through the fallback chain.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.strings.get(key) {
            Some(value) => Some(value),
            None => self.fallback.as_deref().and_then(|f| f.get(key)),
        }
    }

    /// Resolution that never fails: missing keys echo back the key.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }
}
