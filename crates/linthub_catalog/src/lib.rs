//! Linthub catalog and workspace management.
//!
//! Everything around the external cli that is not a validation pass:
//! locating and probing the cli installation, listing the available
//! linters, and activating/deactivating linters for a workspace.

mod catalog;
mod error;
mod locator;
mod workspace;

pub use catalog::{LinterCatalog, LinterInfo, fetch_catalog};
pub use error::CatalogError;
pub use locator::{CLI_BINARY, CliLocator};
pub use workspace::{activate_linter, create_config, deactivate_linter};
