//! Region name canonicalization.
//!
//! Exports spell region names freely ("dar es salaam", "DAR-ES-SALAAM",
//! "dar_es_saalam"). Names are first brought into title case with hyphen
//! separators, then looked up in an embedded alias table that fixes known
//! misspellings.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Error types for region alias loading.
#[derive(Error, Debug)]
pub enum RegionAliasError {
    #[error("Failed to parse region alias YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate 'from' region in alias file: {0}")]
    DuplicateFrom(String),
}

impl From<RegionAliasError> for crate::Error {
    fn from(e: RegionAliasError) -> Self {
        crate::Error::ParseFailed(e.to_string())
    }
}

#[derive(Deserialize, Debug)]
struct RegionAliasFile {
    aliases: Vec<RegionAlias>,
}

#[derive(Deserialize, Debug)]
struct RegionAlias {
    from: String,
    to: String,
}

/// Title-cases every word of `raw` and joins the words with hyphens.
///
/// Whitespace, `-` and `_` all count as word separators.
pub fn canonicalize_region(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonical-name corrections, keyed by canonicalized spelling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionAliases {
    map: HashMap<String, String>,
}

impl RegionAliases {
    /// Parse aliases from YAML content. Both sides are canonicalized on load.
    pub fn parse(yaml_content: &str) -> Result<Self, RegionAliasError> {
        let file: RegionAliasFile = serde_yml::from_str(yaml_content)?;

        let mut map = HashMap::new();
        for alias in file.aliases {
            let from = canonicalize_region(&alias.from);
            if map.contains_key(&from) {
                return Err(RegionAliasError::DuplicateFrom(alias.from));
            }
            map.insert(from, canonicalize_region(&alias.to));
        }

        Ok(Self { map })
    }

    /// Load the alias table embedded at compile time.
    pub fn embedded() -> Result<Self, RegionAliasError> {
        Self::parse(include_str!("../../seed_data/region_aliases.yml"))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Canonical form of `raw`, with known misspellings corrected.
    pub fn resolve(&self, raw: &str) -> String {
        let canonical = canonicalize_region(raw);
        match self.map.get(&canonical) {
            Some(corrected) => corrected.clone(),
            None => canonical,
        }
    }
}
