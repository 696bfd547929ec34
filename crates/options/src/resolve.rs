//! # Options Resolution
//!
//! Turns a job runner's resolved options (a flat mapping of upper-cased names
//! to raw strings) into a typed record.
//!
//! Resolution walks the declarations strictly left to right: the base
//! `job_name` field first, then the schema's own fields in declaration order.
//! The first field that is missing or fails to convert aborts the walk and is
//! the one reported, so a given input always produces the same error.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use glue_options::{resolved_options, ResolvedOptions};
//!
//! resolved_options! {
//!     pub struct CopyOptions {
//!         source_table: string,
//!         batch_size: integer,
//!     }
//! }
//!
//! let resolved = HashMap::from([
//!     ("JOB_NAME", "copy-orders"),
//!     ("SOURCE_TABLE", "orders"),
//!     ("BATCH_SIZE", "500"),
//! ]);
//!
//! let options = CopyOptions::from_resolved_options(&resolved)?;
//! assert_eq!(options.job_name(), "copy-orders");
//! assert_eq!(options.source_table(), "orders");
//! assert_eq!(options.batch_size(), 500);
//! # Ok::<(), glue_options::OptionsError>(())
//! ```

use tracing::debug;

use crate::error::OptionsError;
use crate::field::{FieldDeclaration, FieldKind};
use crate::source::OptionsSource;
use crate::value::ResolvedValues;

/// Fields every schema carries, resolved ahead of the schema's own fields.
pub const BASE_FIELDS: &[FieldDeclaration] = &[FieldDeclaration::new("job_name", FieldKind::String)];

/// Resolve each declaration against `source`, stopping at the first failure.
pub fn resolve<'a, I, S>(declarations: I, source: &S) -> Result<ResolvedValues, OptionsError>
where
    I: IntoIterator<Item = &'a FieldDeclaration>,
    S: OptionsSource + ?Sized,
{
    let mut values = ResolvedValues::new();
    for declaration in declarations {
        let key = declaration.argument_name();
        let Some(raw) = source.resolved_option(&key) else {
            debug!(field = declaration.name, key = %key, "resolved option missing");
            return Err(OptionsError::MissingField {
                field: declaration.name.to_string(),
                key,
            });
        };
        let value = declaration.convert(raw).inspect_err(|error| {
            // The error message may quote the raw value, so only its label is logged.
            debug!(
                field = declaration.name,
                kind = %declaration.kind,
                error_kind = error.label(),
                "resolved option rejected"
            );
        })?;
        debug!(field = declaration.name, kind = %declaration.kind, "resolved option");
        values.insert(declaration.name, value);
    }
    Ok(values)
}

/// Fields shared by every options record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseOptions {
    job_name: String,
}

impl BaseOptions {
    /// Name the job runner assigned to this run.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }
}

/// Contract implemented by every options record.
///
/// Implementors declare their own fields in [`ResolvedOptions::FIELDS`] and
/// embed a [`BaseOptions`]; the `job_name` field is never redeclared. The
/// [`resolved_options!`](crate::resolved_options) macro writes this impl.
pub trait ResolvedOptions: Sized {
    /// Schema-specific declarations, excluding the base fields.
    const FIELDS: &'static [FieldDeclaration];

    /// The embedded base fields.
    fn base(&self) -> &BaseOptions;

    /// Builds the record from the base fields and the schema's converted values.
    fn from_values(base: BaseOptions, values: ResolvedValues) -> Result<Self, OptionsError>;

    fn job_name(&self) -> &str {
        self.base().job_name()
    }

    /// Base declarations followed by the schema's own, in resolution order.
    fn declarations() -> impl Iterator<Item = &'static FieldDeclaration> {
        BASE_FIELDS.iter().chain(Self::FIELDS)
    }

    /// Every key this schema reads from the resolved options.
    ///
    /// Job runners that resolve arguments by name (for example Glue's
    /// `getResolvedOptions`) take this list as the set of options to extract.
    fn argument_names() -> Vec<String> {
        Self::declarations().map(FieldDeclaration::argument_name).collect()
    }

    /// Resolve a record from the job runner's resolved options.
    fn from_resolved_options<S: OptionsSource + ?Sized>(source: &S) -> Result<Self, OptionsError> {
        let mut values = resolve(Self::declarations(), source)?;
        let base = BaseOptions {
            job_name: values.take("job_name")?,
        };
        Self::from_values(base, values)
    }
}

impl ResolvedOptions for BaseOptions {
    const FIELDS: &'static [FieldDeclaration] = &[];

    fn base(&self) -> &BaseOptions {
        self
    }

    fn from_values(base: BaseOptions, _: ResolvedValues) -> Result<Self, OptionsError> {
        Ok(base)
    }
}
