//! Deterministic example catalog generation for demonstration purposes.
//!
//! This crate generates a believable, reproducible application catalog from
//! a JSON seed registry. It is independent of backend domain types to avoid
//! circular dependencies; the backend maps the seed structs onto its own
//! entities when seeding the database.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_catalog};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{"name": "test-seed", "seed": 42, "applicationCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let catalog = generate_example_catalog(seed_def);
//!
//! assert_eq!(catalog.applications.len(), 3);
//! ```

mod catalog;
mod error;
mod generator;
mod registry;
mod validation;

pub use catalog::{
    ApplicationSeed, ExampleCatalog, LocalizedSeed, PlatformSupportSeed, ScreenshotSeed, TagSeed,
};
pub use error::RegistryError;
pub use generator::generate_example_catalog;
pub use registry::{SeedDefinition, SeedRegistry};
pub use validation::is_valid_slug;
