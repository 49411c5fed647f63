//! Harvest-source declarations
//!
//! Each harvested entity type names the collection its records are imported
//! into, the template the harvester renders to fetch them, and property
//! overrides applied to that template. Declarations come from the
//! `[harvest.sources.<entity type>]` configuration tables.

use crate::config::HarvestConfig;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use validator::Validate;

/// Template override applied when harvesting a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Property {
    #[validate(length(min = 1))]
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Where one entity type's records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CollectionSource {
    #[validate(length(min = 1))]
    pub template: String,

    /// Collection the records are stored under
    #[validate(length(min = 1))]
    pub key: String,

    #[serde(default)]
    #[validate(nested)]
    pub properties: Vec<Property>,
}

impl CollectionSource {
    pub fn new(template: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            key: key.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Value of the named property override
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn properties_map(&self) -> HashMap<&str, &str> {
        self.properties
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect()
    }

    /// Field checks plus unique property names
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate property '{}' for collection '{}'",
                    property.name, self.key
                )));
            }
        }
        Ok(())
    }
}

/// Validated harvest sources keyed by entity type
#[derive(Debug, Clone, Default)]
pub struct HarvestRegistry {
    sources: BTreeMap<String, CollectionSource>,
}

impl HarvestRegistry {
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        let mut keys = HashSet::new();

        for (entity_type, source) in &config.sources {
            source.check().map_err(|e| {
                AppError::Configuration(format!("harvest source '{}': {}", entity_type, e))
            })?;

            if !keys.insert(source.key.as_str()) {
                return Err(AppError::Configuration(format!(
                    "collection '{}' is declared by more than one harvest source",
                    source.key
                )));
            }
        }

        tracing::info!(count = config.sources.len(), "Harvest sources registered");

        Ok(Self {
            sources: config.sources.clone(),
        })
    }

    /// Source declared for an entity type
    pub fn get(&self, entity_type: &str) -> Option<&CollectionSource> {
        self.sources.get(entity_type)
    }

    /// Entity type and source storing into the collection `key`
    pub fn find_by_key(&self, key: &str) -> Option<(&str, &CollectionSource)> {
        self.sources
            .iter()
            .find(|(_, source)| source.key == key)
            .map(|(entity_type, source)| (entity_type.as_str(), source))
    }

    /// Sources in entity type order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionSource)> {
        self.sources
            .iter()
            .map(|(entity_type, source)| (entity_type.as_str(), source))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sources: Vec<(&str, CollectionSource)>) -> HarvestConfig {
        HarvestConfig {
            sources: sources
                .into_iter()
                .map(|(entity_type, source)| (entity_type.to_string(), source))
                .collect(),
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = HarvestRegistry::from_config(&config(vec![
            (
                "person",
                CollectionSource::new("person", "persons").with_property("limit", "1000"),
            ),
            ("organization", CollectionSource::new("organization", "organizations")),
        ]))
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("person").unwrap().property("limit"), Some("1000"));
        assert_eq!(registry.get("person").unwrap().property("type"), None);

        let (entity_type, source) = registry.find_by_key("organizations").unwrap();
        assert_eq!(entity_type, "organization");
        assert_eq!(source.template, "organization");

        let order: Vec<&str> = registry.iter().map(|(entity_type, _)| entity_type).collect();
        assert_eq!(order, vec!["organization", "person"]);
    }

    #[test]
    fn test_properties_are_optional() {
        let source: CollectionSource =
            toml_source("template = \"person\"\nkey = \"persons\"\n");
        assert!(source.properties.is_empty());
        assert!(source.check().is_ok());
    }

    #[test]
    fn test_blank_template_rejected() {
        let result = HarvestRegistry::from_config(&config(vec![(
            "person",
            CollectionSource::new("", "persons"),
        )]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let source = CollectionSource::new("person", "persons")
            .with_property("limit", "10")
            .with_property("limit", "20");

        assert!(matches!(source.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_collection_key_rejected() {
        let result = HarvestRegistry::from_config(&config(vec![
            ("person", CollectionSource::new("person", "persons")),
            ("faculty", CollectionSource::new("faculty", "persons")),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_properties_map() {
        let source = CollectionSource::new("person", "persons")
            .with_property("type", "foaf:Person")
            .with_property("limit", "1000");

        let map = source.properties_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["type"], "foaf:Person");
    }

    fn toml_source(toml: &str) -> CollectionSource {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
