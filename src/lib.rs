//! # crd-swagger
//!
//! Turn the structural schemas of Kubernetes custom resource types into the
//! `definitions` section of a [Swagger 2.0](https://swagger.io/specification/v2/)
//! document.
//!
//! ## Features
//!
//! - Closes over the reference graph starting from the declared kinds,
//!   loading referenced types on demand and emitting each one exactly once
//! - Embeds simple referenced types (scalars, arrays, maps) inline and points
//!   at object types with `$ref`
//! - Flattens `allOf` composition into a single object; approximates `anyOf`
//!   (`integer`|`string` becomes `int-or-string`)
//! - Names definitions per API group the way the platform document does
//!   (`example.io` types under `org/proj/api/v1` become `io.example.v1.*`)
//! - Leaves types under the reserved `io.k8s` prefix to the base document
//! - CLI tool `crd2swagger` for bundle files
//!
//! ## Example (Programmatic Usage)
//!
//! ```
//! use crd_swagger::common::QualifiedTypeName;
//! use crd_swagger::config::GeneratorConfig;
//! use crd_swagger::converter::generate_definitions;
//! use crd_swagger::schema::StructuralSchema;
//! use crd_swagger::source::SchemaBundle;
//! use crd_swagger::swagger::GroupVersionKind;
//!
//! let mut bundle = SchemaBundle::new();
//! bundle.add_kind(
//!     QualifiedTypeName::new("org/proj/api/v1", "Widget"),
//!     GroupVersionKind::new("example.io", "v1", "Widget"),
//!     StructuralSchema::object([("size", StructuralSchema::primitive("integer", None))]),
//! );
//!
//! let generation = generate_definitions(&mut bundle, &GeneratorConfig::default()).unwrap();
//! let keys: Vec<_> = generation.document.definitions.keys().map(|k| k.as_str()).collect();
//! assert_eq!(keys, ["io.example.Widget"]);
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! crd2swagger bundle.json swagger.json --root-namespace github.com/org/proj
//! ```
//!
//! ## Crate Layout
//!
//! - [`schema`]: Input structural schema model
//! - [`swagger`]: Output document and schema objects
//! - [`source`]: The schema source interface and the bundled implementation
//! - [`converter`]: Naming, translation and the closure driver
//! - [`common`]: Type names, definition keys, text helpers
//!
//! The CLI binary is enabled with the `cli` feature.
pub mod common;
pub mod config;
pub mod converter;
pub mod error;
pub mod schema;
pub mod source;
pub mod swagger;

pub use config::{GeneratorConfig, NamingMode};
pub use converter::{convert_bundle_to_swagger, generate_definitions, Diagnostic, Generation};
pub use error::{Error, Result, SourceError};
