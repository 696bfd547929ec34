/// Declares an options record and its static field table.
///
/// Each field is written as `name: kind`, where `kind` is one of `string`,
/// `integer`, `float`, `boolean`, `object` or `array`. The generated struct
/// embeds [`BaseOptions`](crate::BaseOptions) (so `job_name` is always
/// present and must not be redeclared), keeps its fields private, exposes one
/// accessor per field and implements [`ResolvedOptions`](crate::ResolvedOptions).
///
/// ```rust
/// use glue_options::{resolved_options, ResolvedOptions};
///
/// resolved_options! {
///     /// Options for the nightly orders export.
///     pub struct ExportOptions {
///         target_bucket: string,
///         /// Rows per output file.
///         rows_per_file: integer,
///         compress: boolean,
///         partition_keys: array,
///     }
/// }
///
/// assert_eq!(
///     ExportOptions::argument_names(),
///     ["JOB_NAME", "TARGET_BUCKET", "ROWS_PER_FILE", "COMPRESS", "PARTITION_KEYS"]
/// );
/// ```
///
/// The field name `base` is reserved for the embedded base fields.
#[macro_export]
macro_rules! resolved_options {
    (@type string) => { ::std::string::String };
    (@type integer) => { i64 };
    (@type float) => { f64 };
    (@type boolean) => { bool };
    (@type object) => { $crate::serde_json::Map<::std::string::String, $crate::serde_json::Value> };
    (@type array) => { ::std::vec::Vec<$crate::serde_json::Value> };
    (@type $other:ident) => {
        compile_error!(concat!(
            "unsupported option kind `",
            stringify!($other),
            "`; expected string, integer, float, boolean, object or array"
        ))
    };

    (@kind string) => { $crate::FieldKind::String };
    (@kind integer) => { $crate::FieldKind::Integer };
    (@kind float) => { $crate::FieldKind::Float };
    (@kind boolean) => { $crate::FieldKind::Boolean };
    (@kind object) => { $crate::FieldKind::JsonObject };
    (@kind array) => { $crate::FieldKind::JsonArray };

    (@accessor $(#[$meta:meta])* $field:ident : string) => {
        $(#[$meta])*
        pub fn $field(&self) -> &str {
            &self.$field
        }
    };
    (@accessor $(#[$meta:meta])* $field:ident : integer) => {
        $(#[$meta])*
        pub fn $field(&self) -> i64 {
            self.$field
        }
    };
    (@accessor $(#[$meta:meta])* $field:ident : float) => {
        $(#[$meta])*
        pub fn $field(&self) -> f64 {
            self.$field
        }
    };
    (@accessor $(#[$meta:meta])* $field:ident : boolean) => {
        $(#[$meta])*
        pub fn $field(&self) -> bool {
            self.$field
        }
    };
    (@accessor $(#[$meta:meta])* $field:ident : object) => {
        $(#[$meta])*
        pub fn $field(&self) -> &$crate::serde_json::Map<::std::string::String, $crate::serde_json::Value> {
            &self.$field
        }
    };
    (@accessor $(#[$meta:meta])* $field:ident : array) => {
        $(#[$meta])*
        pub fn $field(&self) -> &[$crate::serde_json::Value] {
            &self.$field
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $kind:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            base: $crate::BaseOptions,
            $(
                $(#[$field_meta])*
                $field: $crate::resolved_options!(@type $kind),
            )*
        }

        impl $name {
            /// Name the job runner assigned to this run.
            pub fn job_name(&self) -> &str {
                self.base.job_name()
            }

            $(
                $crate::resolved_options!(@accessor $(#[$field_meta])* $field : $kind);
            )*
        }

        impl $crate::ResolvedOptions for $name {
            const FIELDS: &'static [$crate::FieldDeclaration] = &[
                $(
                    $crate::FieldDeclaration::new(
                        ::std::stringify!($field),
                        $crate::resolved_options!(@kind $kind),
                    ),
                )*
            ];

            fn base(&self) -> &$crate::BaseOptions {
                &self.base
            }

            #[allow(unused_mut, unused_variables)]
            fn from_values(
                base: $crate::BaseOptions,
                mut values: $crate::ResolvedValues,
            ) -> ::std::result::Result<Self, $crate::OptionsError> {
                ::std::result::Result::Ok(Self {
                    base,
                    $(
                        $field: values.take(::std::stringify!($field))?,
                    )*
                })
            }
        }
    };
}
