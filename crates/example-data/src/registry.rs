//! JSON seed registry: named, reproducible generation recipes.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One named generation recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDefinition {
    /// Registry-unique seed name.
    pub name: String,
    /// RNG seed driving deterministic generation.
    pub seed: u64,
    /// Number of applications to generate.
    pub application_count: usize,
}

/// Registry of named seeds loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRegistry {
    /// Registry format version.
    pub version: u32,
    /// Named generation recipes.
    pub seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parse a registry from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed JSON and
    /// [`RegistryError::UnsupportedVersion`] for unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let registry: Self =
            serde_json::from_str(json).map_err(|err| RegistryError::Parse {
                message: err.to_string(),
            })?;
        if registry.version != 1 {
            return Err(RegistryError::UnsupportedVersion {
                version: registry.version,
            });
        }
        Ok(registry)
    }

    /// Look up a seed definition by name.
    #[must_use]
    pub fn find_seed(&self, name: &str) -> Option<&SeedDefinition> {
        self.seeds.iter().find(|seed| seed.name == name)
    }
}

#[cfg(test)]
mod tests {
    //! Registry parsing coverage.

    use super::*;
    use rstest::rstest;

    const REGISTRY: &str = r#"{
        "version": 1,
        "seeds": [
            {"name": "mossy-owl", "seed": 7, "applicationCount": 5},
            {"name": "rainbow-fox", "seed": 11, "applicationCount": 2}
        ]
    }"#;

    #[rstest]
    fn parses_and_finds_named_seeds() {
        let registry = SeedRegistry::from_json(REGISTRY).expect("valid registry");
        let seed = registry.find_seed("rainbow-fox").expect("seed exists");
        assert_eq!(seed.seed, 11);
        assert_eq!(seed.application_count, 2);
        assert!(registry.find_seed("absent").is_none());
    }

    #[rstest]
    fn rejects_unknown_version() {
        let err = SeedRegistry::from_json(r#"{"version": 2, "seeds": []}"#)
            .expect_err("version rejected");
        assert_eq!(err, RegistryError::UnsupportedVersion { version: 2 });
    }

    #[rstest]
    fn rejects_malformed_json() {
        let err = SeedRegistry::from_json("{").expect_err("parse error");
        assert!(matches!(err, RegistryError::Parse { .. }));
    }
}
