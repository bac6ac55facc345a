//! Class introspection for templates
//!
//! Exposes the declared structure of a class (fields, methods,
//! constructors and their modifiers) to a template renderer, without any
//! way to invoke or mutate what is inspected.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use stencil_introspect::{ClassRegistry, ClassTool, InspectContext, InspectorConfig, Member};
//!
//! let ctx = InspectContext::new(Arc::new(ClassRegistry::new()), InspectorConfig::default());
//! let tool = ClassTool::from_config(ctx)?;          // java.lang.Object
//! for method in tool.methods() {
//!     println!("{}", method.unique_name());          // equals_Object, getClass, ...
//! }
//! let string = tool.inspect_name("java.lang.String").unwrap();
//! assert!(string.supports_new_instance());
//! ```
//!
//! Class metadata comes from a [`ClassProvider`]. [`ClassRegistry`] is the
//! bundled in-memory provider, loadable from JSON or TOML catalogs.

mod class_metadata;
mod config;
mod diagnostics;
mod error;
mod members;
mod modifiers;
mod registry;
mod tool;
mod types;

pub use class_metadata::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo, OBJECT_CLASS};
pub use config::{InspectContext, InspectorConfig};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use error::{IntrospectError, IntrospectResult};
pub use members::{
    unique_name, Callable, ConstructorDescriptor, FieldDescriptor, Member, MethodDescriptor,
    UNIQUE_NAME_SEPARATOR,
};
pub use modifiers::Modifiers;
pub use registry::{Catalog, ClassProvider, ClassRegistry, Factory};
pub use tool::{ClassTool, Reflected};
pub use types::{package_name, simple_class_name, PrimitiveKind, TypeRef};
