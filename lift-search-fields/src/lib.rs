//! Field descriptors and the field registry for the Lift search form
//!
//! `lift-search-fields` is a standalone, schema-only crate. It knows nothing
//! about query contexts or HTML; it describes form controls and keeps them in
//! an ordered registry that consumers populate and then freeze.
//!
//! # Architecture
//!
//! - **Descriptors**: `FieldDescriptor` = key + label + `Control` (select, hidden, text)
//! - **Selections**: scalar and multi-valued selections share one `Selection` type
//! - **Registry**: `FieldRegistry::freeze()` validates, de-duplicates and locks the order

pub mod error;
pub mod registry;
pub mod types;

pub use error::{FieldsError, Result};
pub use registry::FieldRegistry;
pub use types::{Control, FieldDescriptor, FieldKind, SelectOption, Selection};
