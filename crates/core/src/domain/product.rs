use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Product as submitted for classification. Attributes are kept in a sorted map
/// so that the serialized text, and therefore the result, does not depend on
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub category_path: String,
}

impl ProductInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_category_path(mut self, category_path: impl Into<String>) -> Self {
        self.category_path = category_path.into();
        self
    }

    pub fn ensure_classifiable(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() && self.description.trim().is_empty() {
            return Err(DomainError::EmptyProduct);
        }
        Ok(())
    }

    pub fn has_marketplace_data(&self) -> bool {
        !self.attributes.is_empty() || !self.category_path.trim().is_empty()
    }

    /// Case-insensitive attribute lookup; blank values count as absent.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| candidate.trim().eq_ignore_ascii_case(key))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Attributes rendered as `key value` pairs separated by single spaces.
    pub fn attribute_text(&self) -> String {
        self.attributes
            .iter()
            .map(|(key, value)| format!("{key} {value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Everything the detectors look at, with `name` substituted for the
    /// product name so callers can pass an enriched variant.
    pub fn combined_text(&self, name: &str) -> String {
        [name, self.description.as_str(), self.category_path.as_str(), &self.attribute_text()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Text fetched for a product reference by an external provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductText {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub category_path: String,
    /// Populated when the provider could not produce structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductText {
    /// A provider error only discards the structured fields; the free text is
    /// still classified.
    pub fn into_input(self) -> Result<ProductInput, DomainError> {
        let failed = self.error.as_deref().is_some_and(|error| !error.trim().is_empty());
        let input = ProductInput {
            name: self.title,
            description: self.description,
            attributes: if failed { BTreeMap::new() } else { self.attributes },
            category_path: if failed { String::new() } else { self.category_path },
        };
        input.ensure_classifiable()?;
        Ok(input)
    }
}
