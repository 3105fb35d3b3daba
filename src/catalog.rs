//! Pet type catalogue
//!
//! A read-only table built once at startup and handed to the query service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleFit {
    Active,
    Quiet,
    Social,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetType {
    pub key: String,
    pub name: String,
    pub traits: String,
    pub lifestyle_fit: LifestyleFit,
}

impl PetType {
    pub fn new(key: &str, name: &str, traits: &str, lifestyle_fit: LifestyleFit) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            traits: traits.to_string(),
            lifestyle_fit,
        }
    }
}

/// Immutable pet type table, iterated in definition order
#[derive(Debug, Clone)]
pub struct PetCatalog {
    entries: Vec<PetType>,
    index: HashMap<String, usize>,
}

impl PetCatalog {
    pub fn from_entries(
        entries: impl IntoIterator<Item = PetType>,
    ) -> Result<Self, ConfigurationError> {
        let mut catalog = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            if catalog.index.contains_key(&entry.key) {
                return Err(ConfigurationError::DuplicatePetType(entry.key));
            }
            catalog.index.insert(entry.key.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        Ok(catalog)
    }

    /// The standard adoption catalogue
    pub fn builtin() -> Self {
        let entries = vec![
            PetType::new(
                "dog",
                "Dog",
                "Loyal, energetic, needs space and exercise.",
                LifestyleFit::Active,
            ),
            PetType::new(
                "cat",
                "Cat",
                "Independent, cuddly, low-maintenance.",
                LifestyleFit::Quiet,
            ),
            PetType::new(
                "rabbit",
                "Rabbit",
                "Gentle, small, requires calm environment.",
                LifestyleFit::Quiet,
            ),
            PetType::new(
                "parrot",
                "Parrot",
                "Social, intelligent, needs stimulation.",
                LifestyleFit::Social,
            ),
        ];
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, key: &str) -> Option<&PetType> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[PetType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
