/// Keyword dictionary types
use crate::{Result, SorterError};
use serde::{Deserialize, Serialize};

/// Keywords for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    /// Category name, unique and case-sensitive
    pub name: String,

    /// Built-in keywords, restored by "restore defaults"
    #[serde(default)]
    pub default: Vec<String>,

    /// User-added keywords
    #[serde(default)]
    pub custom: Vec<String>,
}

impl CategoryKeywords {
    /// Create a category with its default keyword list
    pub fn new(name: impl Into<String>, default: &[&str]) -> Self {
        Self {
            name: name.into(),
            default: default.iter().map(|s| (*s).to_string()).collect(),
            custom: Vec::new(),
        }
    }

    /// Default and custom keywords combined, in order
    pub fn all_words(&self) -> impl Iterator<Item = &str> {
        self.default
            .iter()
            .chain(self.custom.iter())
            .map(String::as_str)
    }
}

/// Dictionary-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryMeta {
    /// Category names that cannot be deleted
    #[serde(default)]
    pub protected: Vec<String>,
}

/// Mapping from category name to its keyword lists.
///
/// Categories are stored in insertion order; that order is the classifier's
/// tie-break order, so it must stay deterministic across load/save cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDictionary {
    /// Ordered category entries
    pub categories: Vec<CategoryKeywords>,

    /// Dictionary-level settings, never a sortable category
    #[serde(default)]
    pub meta: DictionaryMeta,
}

impl KeywordDictionary {
    /// Category names in dictionary order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a category by exact name
    pub fn get(&self, name: &str) -> Option<&CategoryKeywords> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up a category by exact name, mutable
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CategoryKeywords> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Add an empty category at the end of the iteration order
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(SorterError::invalid_dictionary(format!(
                "category already exists: {name}"
            )));
        }
        self.categories.push(CategoryKeywords {
            name,
            default: Vec::new(),
            custom: Vec::new(),
        });
        Ok(())
    }

    /// Remove a category; protected categories are refused
    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        if self.meta.protected.iter().any(|p| p == name) {
            return Err(SorterError::invalid_dictionary(format!(
                "category is protected: {name}"
            )));
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        if self.categories.len() == before {
            return Err(SorterError::invalid_dictionary(format!(
                "no such category: {name}"
            )));
        }
        Ok(())
    }

    /// Add a custom keyword to a category, ignoring case-insensitive repeats
    pub fn add_custom_keyword(&mut self, category: &str, word: impl Into<String>) -> Result<()> {
        let word = word.into();
        let entry = self
            .get_mut(category)
            .ok_or_else(|| SorterError::invalid_dictionary(format!("no such category: {category}")))?;
        let lower = word.to_lowercase();
        if entry.all_words().any(|w| w.to_lowercase() == lower) {
            return Ok(());
        }
        entry.custom.push(word);
        Ok(())
    }

    /// Remove a custom keyword from a category
    pub fn remove_custom_keyword(&mut self, category: &str, word: &str) -> Result<()> {
        let entry = self
            .get_mut(category)
            .ok_or_else(|| SorterError::invalid_dictionary(format!("no such category: {category}")))?;
        entry.custom.retain(|w| w != word);
        Ok(())
    }

    /// Drop every category's custom keyword list
    pub fn clear_custom(&mut self) {
        for category in &mut self.categories {
            category.custom.clear();
        }
    }

    /// Check the unique-name invariant; run before persisting
    pub fn validate(&self) -> Result<()> {
        for (i, category) in self.categories.iter().enumerate() {
            if category.name.is_empty() {
                return Err(SorterError::invalid_dictionary(
                    "empty category name".to_string(),
                ));
            }
            if self.categories[..i].iter().any(|c| c.name == category.name) {
                return Err(SorterError::invalid_dictionary(format!(
                    "duplicate category name: {}",
                    category.name
                )));
            }
        }
        Ok(())
    }
}
