//! Custom Elements
//!
//! Name-keyed registry of custom element definitions. A document owns one
//! registry, the equivalent of `window.customElements`.

use std::collections::HashMap;

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, CustomElementDefinition>,
}

/// Custom element definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomElementDefinition {
    pub name: String,
    pub observed_attributes: Vec<String>,
}

impl CustomElementDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            observed_attributes: Vec::new(),
        }
    }

    /// Set the attributes whose changes reach `attributeChangedCallback`
    pub fn observe<S: AsRef<str>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
        self.observed_attributes = attributes
            .into_iter()
            .map(|a| a.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether changes to `attribute` are observed
    pub fn observes(&self, attribute: &str) -> bool {
        self.observed_attributes.iter().any(|a| a == attribute)
    }
}

/// Custom element errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomElementError {
    #[error("Invalid custom element name: {0}")]
    InvalidName(String),

    #[error("Element already defined: {0}")]
    AlreadyDefined(String),
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element, failing on invalid or duplicate names
    pub fn define(&mut self, definition: CustomElementDefinition) -> Result<(), CustomElementError> {
        if !Self::is_valid_name(&definition.name) {
            return Err(CustomElementError::InvalidName(definition.name));
        }
        if self.definitions.contains_key(&definition.name) {
            return Err(CustomElementError::AlreadyDefined(definition.name));
        }
        tracing::debug!(name = %definition.name, "defined custom element");
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Define a custom element unless the name is already taken.
    ///
    /// Returns `true` when this call registered the definition. Repeat calls
    /// leave the first definition in place.
    pub fn define_once(&mut self, definition: CustomElementDefinition) -> bool {
        if self.is_defined(&definition.name) {
            return false;
        }
        match self.define(definition) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "custom element not registered");
                false
            }
        }
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if no element is defined
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Validate custom element name
    fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter, no uppercase anywhere
        if !name.starts_with(|c: char| c.is_ascii_lowercase())
            || name.chars().any(|c| c.is_ascii_uppercase())
        {
            return false;
        }

        let reserved = [
            "annotation-xml",
            "color-profile",
            "font-face",
            "font-face-src",
            "font-face-uri",
            "font-face-format",
            "font-face-name",
            "missing-glyph",
        ];
        !reserved.contains(&name)
    }
}
