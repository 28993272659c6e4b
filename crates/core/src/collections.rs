//! Named character collections.
//!
//! A [`CollectionRegistry`] is passed explicitly to the resolver so callers
//! (and tests) can supply their own collections instead of the built-ins.

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};

const TOP500: &str = include_str!("../data/top500.txt");

/// An immutable, named sequence of unique characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCollection {
    name: String,
    chars: Vec<char>,
}

impl CharacterCollection {
    /// Creates a collection, dropping repeated characters but keeping
    /// first-occurrence order.
    pub fn new(name: impl Into<String>, chars: impl IntoIterator<Item = char>) -> Self {
        let unique: IndexSet<char> = chars.into_iter().collect();
        Self { name: name.into(), chars: unique.into_iter().collect() }
    }

    /// Creates a collection from text, ignoring whitespace used for layout.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.chars().filter(|c| !c.is_whitespace()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Insertion-ordered lookup table of collections by name.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: IndexMap<String, CharacterCollection>,
}

impl CollectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the collections shipped with fontslim:
    ///
    /// - `top500`: the 500 most frequently used Chinese characters
    /// - `ascii`: printable ASCII
    /// - `digits`: `0`-`9`
    /// - `latin1`: printable ASCII plus the Latin-1 supplement
    pub fn builtin() -> Self {
        let printable_ascii = || (0x20u8..=0x7E).map(char::from);
        let latin1_supplement = (0xA0u8..=0xFF).map(char::from);

        let mut registry = Self::new();
        registry
            .register(CharacterCollection::from_text("top500", TOP500))
            .register(CharacterCollection::new("ascii", printable_ascii()))
            .register(CharacterCollection::new("digits", '0'..='9'))
            .register(CharacterCollection::new("latin1", printable_ascii().chain(latin1_supplement)));
        registry
    }

    /// Adds a collection, replacing any existing one with the same name.
    pub fn register(&mut self, collection: CharacterCollection) -> &mut Self {
        self.collections.insert(collection.name.clone(), collection);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CharacterCollection> {
        self.collections.get(name)
    }

    /// Looks up a collection, failing with the list of valid names.
    pub fn lookup(&self, name: &str) -> Result<&CharacterCollection> {
        self.get(name).ok_or_else(|| Error::UnknownCollection {
            name: name.to_string(),
            valid: self.names().map(str::to_string).collect(),
        })
    }

    /// Collection names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = CollectionRegistry::builtin();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["top500", "ascii", "digits", "latin1"]);
    }

    #[test]
    fn test_top500_size() {
        let registry = CollectionRegistry::builtin();
        let top500 = registry.get("top500").unwrap();
        assert_eq!(top500.len(), 500);
        assert_eq!(top500.chars()[0], '的');
        assert!(top500.chars().iter().all(|c| !c.is_whitespace()));
    }

    #[test]
    fn test_builtin_sizes() {
        let registry = CollectionRegistry::builtin();
        assert_eq!(registry.get("ascii").unwrap().len(), 95);
        assert_eq!(registry.get("digits").unwrap().len(), 10);
        assert_eq!(registry.get("latin1").unwrap().len(), 95 + 96);
    }

    #[test]
    fn test_new_deduplicates() {
        let collection = CharacterCollection::new("abc", "abcabca".chars());
        assert_eq!(collection.chars(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_lookup_unknown_lists_valid_names() {
        let registry = CollectionRegistry::builtin();
        let err = registry.lookup("top9000").unwrap_err();
        match &err {
            Error::UnknownCollection { name, valid } => {
                assert_eq!(name, "top9000");
                assert_eq!(valid.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("top500, ascii, digits, latin1"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CollectionRegistry::new();
        registry
            .register(CharacterCollection::new("x", ['a']))
            .register(CharacterCollection::new("x", ['b', 'c']));
        assert_eq!(registry.lookup("x").unwrap().chars(), &['b', 'c']);
    }
}
