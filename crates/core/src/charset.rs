//! Character set resolution.
//!
//! Three inputs decide what a font keeps: custom text (`--words`), a
//! collection name, and whether that name was given explicitly. Custom text
//! is tracked as `Option<&str>` so that an empty string stays a deliberate
//! "keep nothing custom" request rather than collapsing into "absent".

use indexmap::IndexSet;
use log::info;

use crate::{collections::CollectionRegistry, error::Result};

/// Which inputs drove the resolved subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsetMode {
    /// No custom text: keep the named collection verbatim.
    CollectionOnly { collection: String },
    /// Custom text without an explicit collection: keep only the text.
    SpecifiedOnly { text: String },
    /// Custom text plus an explicit collection: keep their union.
    Append { collection: String, text: String },
}

impl SubsetMode {
    /// Picks the mode from the presence of custom text and collection intent.
    pub fn select(words: Option<&str>, collection: &str, collection_explicit: bool) -> Self {
        match (words, collection_explicit) {
            (Some(text), false) => SubsetMode::SpecifiedOnly { text: text.to_string() },
            (Some(text), true) => {
                SubsetMode::Append { collection: collection.to_string(), text: text.to_string() }
            }
            (None, _) => SubsetMode::CollectionOnly { collection: collection.to_string() },
        }
    }
}

/// Final set of unique characters to retain, with the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubset {
    chars: Vec<char>,
    mode: SubsetMode,
    description: String,
}

impl ResolvedSubset {
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn mode(&self) -> &SubsetMode {
        &self.mode
    }

    /// Human-readable summary, e.g. `"12 unique chars"`.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Turns subset inputs into a [`ResolvedSubset`] using an injected registry.
#[derive(Debug, Clone, Copy)]
pub struct CharsetResolver<'a> {
    registry: &'a CollectionRegistry,
}

impl<'a> CharsetResolver<'a> {
    pub fn new(registry: &'a CollectionRegistry) -> Self {
        Self { registry }
    }

    /// Resolves the subset.
    ///
    /// The collection name is validated first, whatever the mode: an
    /// unknown name fails with [`Error::UnknownCollection`](crate::Error::UnknownCollection)
    /// even when only custom text would be used.
    pub fn resolve(
        &self,
        words: Option<&str>,
        collection: &str,
        collection_explicit: bool,
    ) -> Result<ResolvedSubset> {
        let named = self.registry.lookup(collection)?;
        let mode = SubsetMode::select(words, collection, collection_explicit);

        let (chars, description) = match &mode {
            SubsetMode::SpecifiedOnly { text } => {
                let chars = unique_chars(text.chars());
                let description = format!("{} unique chars", chars.len());
                (chars, description)
            }
            SubsetMode::Append { text, .. } => {
                let chars = unique_chars(named.chars().iter().copied().chain(text.chars()));
                let description = format!(
                    "collection '{}' ({} chars) + custom text, {} unique chars",
                    named.name(),
                    named.len(),
                    chars.len()
                );
                (chars, description)
            }
            SubsetMode::CollectionOnly { .. } => {
                let description = format!("collection '{}' ({} chars)", named.name(), named.len());
                (named.chars().to_vec(), description)
            }
        };

        info!("Subset: {description}");
        Ok(ResolvedSubset { chars, mode, description })
    }
}

fn unique_chars(chars: impl IntoIterator<Item = char>) -> Vec<char> {
    chars.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
