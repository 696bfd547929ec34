//! Typed options for managed ETL jobs.
//!
//! Job runners such as AWS Glue hand a job its arguments as a flat mapping of
//! upper-cased names to strings (`{"JOB_NAME": "etl-1", "LIMIT": "10"}`).
//! This crate converts that mapping into an immutable record whose fields are
//! declared once, statically, with one of six kinds: string, integer, float,
//! boolean, JSON object or JSON array.
//!
//! - [`resolved_options!`] declares a record and its field table.
//! - [`ResolvedOptions::from_resolved_options`] resolves a record from any
//!   [`OptionsSource`] (`HashMap`, `BTreeMap` or `IndexMap` of strings).
//! - [`OptionsError`] reports the first field that could not be resolved.

mod error;
pub mod field;
mod macros;
pub mod resolve;
pub mod source;
pub mod value;

pub use error::OptionsError;
pub use field::{FieldDeclaration, FieldKind, JsonShape};
pub use resolve::{BASE_FIELDS, BaseOptions, ResolvedOptions, resolve};
pub use source::OptionsSource;
pub use value::{FieldValue, FromFieldValue, ResolvedValues};

// Used by `resolved_options!` expansions.
#[doc(hidden)]
pub use serde_json;
