//! # Autobind
//!
//! Schema resolution and grouping for generated dependency-injection modules.
//!
//! Declarations marked with a binding marker (`@AutoBind`, `@AutoFactory` and
//! their test variants) are resolved into binding schemas, grouped by the
//! container they belong to, and emitted as structured container descriptions
//! for a host code writer to render.
//!
//! ## Features
//!
//! - **Type bindings**: bind a concrete class to its first meaningful supertype,
//!   an explicit override, or itself
//! - **Factory bindings**: expose a function's return value, called through an
//!   owner instance, a singleton, or directly
//! - **Multibindings**: set, map, set-values and multibinding-container shapes
//! - **Qualifier disambiguation**: qualified bindings land in their own
//!   containers, named with a stable content hash
//! - **Test overrides**: test markers produce containers that replace their
//!   production counterpart
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autobind::prelude::*;
//!
//! let sources = SourceSet::from_json_str(r#"{ "declarations": [] }"#).unwrap();
//! let output = AutobindProcessor::new(GeneratorConfig::default()).process(&sources);
//!
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! for container in &output.containers {
//!     println!("{} ({} members)", container.name, container.members.len());
//! }
//! ```

pub mod annotation;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod grouping;
pub mod model;
pub mod processor;
pub mod resolver;
pub mod scanner;

// Re-export core types
pub use config::GeneratorConfig;
pub use diagnostics::Diagnostic;
pub use emitter::{ContainerDecl, ContainerWriter};
pub use error::{AutobindError, Result};
pub use model::SourceSet;
pub use processor::{AutobindProcessor, ProcessOutput};

/// Prelude module for convenient imports
///
/// ```
/// use autobind::prelude::*;
/// ```
pub mod prelude {
    pub use crate::annotation::{Marker, MarkerFamily, Multiplicity};
    pub use crate::config::GeneratorConfig;
    pub use crate::diagnostics::Diagnostic;
    pub use crate::emitter::{
        ContainerDecl, ContainerWriter, InstallDirective, JsonLinesWriter, MemberBody, MemberDecl,
    };
    pub use crate::error::{AutobindError, Result};
    pub use crate::model::{ClassName, Declaration, SourceSet, TypeName};
    pub use crate::processor::{AutobindProcessor, ProcessOutput};
    pub use crate::resolver::{ContainerKind, ResolvedSchema};
}
