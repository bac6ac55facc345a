//! Class Providers
//!
//! [`ClassProvider`] is the seam between the class tool and whatever knows
//! about classes on the host side. [`ClassRegistry`] is the in-memory
//! provider shipped with the crate: it is seeded with the root
//! `java.lang.*` types and extended from JSON or TOML catalogs.
//!
//! ## Catalog format
//!
//! ```toml
//! [[classes]]
//! name = "com.acme.Widget"
//! modifiers = "public"
//!
//! [[classes.fields]]
//! name = "DEFAULT_SIZE"
//! type = "int"
//! modifiers = "public static final"
//! value = 16
//!
//! [[classes.methods]]
//! name = "resize"
//! modifiers = ["public"]
//! parameters = ["int", "int"]
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::class_metadata::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo, OBJECT_CLASS};
use crate::error::{IntrospectError, IntrospectResult};
use crate::modifiers::Modifiers;
use crate::types::{PrimitiveKind, TypeRef};

/// Source of class metadata and of the two runtime probes the class tool
/// needs (no-argument construction and static field reads).
pub trait ClassProvider: Send + Sync {
    /// Resolve a class by qualified name
    fn class_for_name(&self, name: &str) -> IntrospectResult<Arc<ClassInfo>>;

    /// Attempt a no-argument construction of `class`
    fn instantiate(&self, class: &ClassInfo) -> IntrospectResult<()>;

    /// Read a static field of `class`
    fn read_static(&self, class: &ClassInfo, field: &FieldInfo) -> IntrospectResult<Option<Value>>;
}

/// Constructor hook a host can register to make construction fail
pub type Factory = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// Serialized list of classes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
}

impl Catalog {
    /// Parse a JSON catalog
    pub fn from_json(content: &str) -> IntrospectResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML catalog
    pub fn from_toml(content: &str) -> IntrospectResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a catalog file; `.toml` files are parsed as TOML, anything
    /// else as JSON
    pub fn from_file(path: &Path) -> IntrospectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }
}

/// In-memory class provider
#[derive(Default)]
pub struct ClassRegistry {
    /// Metadata indexed by qualified name
    classes: FxHashMap<String, Arc<ClassInfo>>,
    /// Construction hooks indexed by qualified name
    factories: FxHashMap<String, Factory>,
}

impl ClassRegistry {
    /// Create an empty registry (not even `java.lang.Object`)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the root `java.lang` types
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for class in builtin_classes() {
            registry.register(class);
        }
        registry
    }

    /// Create a seeded registry extended with the classes of `catalog`
    pub fn with_catalog(catalog: Catalog) -> IntrospectResult<Self> {
        let mut registry = Self::new();
        registry.load(catalog)?;
        Ok(registry)
    }

    /// Register every class of a catalog
    ///
    /// Fails without registering anything if a class has a blank name or
    /// appears twice in the same catalog.
    pub fn load(&mut self, catalog: Catalog) -> IntrospectResult<usize> {
        let mut seen = rustc_hash::FxHashSet::default();
        for class in &catalog.classes {
            if class.name.trim().is_empty() {
                return Err(IntrospectError::Catalog("class with blank name".to_string()));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(IntrospectError::Catalog(format!(
                    "class {} declared twice",
                    class.name
                )));
            }
        }
        let count = catalog.classes.len();
        for class in catalog.classes {
            self.register(class);
        }
        Ok(count)
    }

    /// Register metadata for a class, replacing any earlier entry
    ///
    /// Interfaces never have a superclass; other classes default to
    /// extending `java.lang.Object`.
    pub fn register(&mut self, mut class: ClassInfo) -> Arc<ClassInfo> {
        class.superclass = class.superclass_name().map(str::to_string);
        let class = Arc::new(class);
        self.classes.insert(class.name.clone(), Arc::clone(&class));
        class
    }

    /// Register a construction hook for a class
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<(), String> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Get metadata for a class
    pub fn get(&self, name: &str) -> Option<&Arc<ClassInfo>> {
        self.classes.get(name)
    }

    /// Check if a class is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.class_names())
            .field("factories", &self.factories.len())
            .finish()
    }
}

impl ClassProvider for ClassRegistry {
    fn class_for_name(&self, name: &str) -> IntrospectResult<Arc<ClassInfo>> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| IntrospectError::ClassNotFound(name.to_string()))
    }

    fn instantiate(&self, class: &ClassInfo) -> IntrospectResult<()> {
        let fail = |reason: &str| {
            Err(IntrospectError::NotInstantiable {
                class: class.name.clone(),
                reason: reason.to_string(),
            })
        };

        if class.is_interface() {
            return fail("interface");
        }
        if class.modifiers.is_abstract() {
            return fail("abstract class");
        }
        if !class.modifiers.is_public() {
            return fail("class is not public");
        }
        // No declared constructors means an implicit one with the
        // class's own visibility.
        if !class.constructors.is_empty() && class.default_constructor().is_none() {
            return fail("no public no-argument constructor");
        }
        if let Some(factory) = self.factories.get(&class.name) {
            if let Err(reason) = factory() {
                return fail(&reason);
            }
        }
        Ok(())
    }

    fn read_static(&self, class: &ClassInfo, field: &FieldInfo) -> IntrospectResult<Option<Value>> {
        if !field.modifiers.is_static() || !field.modifiers.is_public() {
            return Err(IntrospectError::AccessDenied {
                class: class.name.clone(),
                field: field.name.clone(),
            });
        }
        Ok(field.value.clone())
    }
}

fn class_ref(name: &str) -> TypeRef {
    TypeRef::class(name)
}

fn method(
    name: &str,
    modifiers: Modifiers,
    parameters: Vec<TypeRef>,
    returns: TypeRef,
) -> MethodInfo {
    MethodInfo::new(name, modifiers)
        .with_parameters(parameters)
        .with_returns(returns)
}

fn constant(name: &str, ty: TypeRef, value: Value) -> FieldInfo {
    let modifiers = Modifiers::PUBLIC
        .union(Modifiers::STATIC)
        .union(Modifiers::FINAL);
    FieldInfo::new(name, ty, modifiers).with_value(value)
}

fn builtin_classes() -> Vec<ClassInfo> {
    let public = Modifiers::PUBLIC;
    let public_final = Modifiers::PUBLIC.union(Modifiers::FINAL);
    let public_native = Modifiers::PUBLIC.union(Modifiers::NATIVE);
    let public_final_native = public_final.union(Modifiers::NATIVE);
    let public_static = Modifiers::PUBLIC.union(Modifiers::STATIC);
    let public_static_final = public_static.union(Modifiers::FINAL);
    let public_abstract = Modifiers::PUBLIC.union(Modifiers::ABSTRACT);
    let private_final = Modifiers::PRIVATE.union(Modifiers::FINAL);
    let protected_native = Modifiers::PROTECTED.union(Modifiers::NATIVE);
    let private_static_native = Modifiers::PRIVATE
        .union(Modifiers::STATIC)
        .union(Modifiers::NATIVE);

    let void = TypeRef::void;
    let boolean = || TypeRef::primitive(PrimitiveKind::Boolean);
    let int = || TypeRef::primitive(PrimitiveKind::Int);
    let long = || TypeRef::primitive(PrimitiveKind::Long);
    let double = || TypeRef::primitive(PrimitiveKind::Double);
    let character = || TypeRef::primitive(PrimitiveKind::Char);
    let chars = || TypeRef::array(character());
    let bytes = || TypeRef::array(TypeRef::primitive(PrimitiveKind::Byte));
    let object_ref = || class_ref(OBJECT_CLASS);
    let objects = || TypeRef::array(object_ref());
    let class_type = || class_ref("java.lang.Class");
    let string = || class_ref("java.lang.String");

    let object = ClassInfo::new(OBJECT_CLASS, public)
        .with_constructor(ConstructorInfo::new(public))
        .with_method(method("equals", public, vec![object_ref()], boolean()))
        .with_method(method("hashCode", public_native, vec![], int()))
        .with_method(method("toString", public, vec![], string()))
        .with_method(method("getClass", public_final_native, vec![], class_type()))
        .with_method(method("notify", public_final_native, vec![], void()))
        .with_method(method("notifyAll", public_final_native, vec![], void()))
        .with_method(method("wait", public_final, vec![], void()))
        .with_method(method("wait", public_final_native, vec![long()], void()))
        .with_method(method("wait", public_final, vec![long(), int()], void()))
        .with_method(method("clone", protected_native, vec![], object_ref()))
        .with_method(method("finalize", Modifiers::PROTECTED, vec![], void()))
        .with_method(method("registerNatives", private_static_native, vec![], void()));

    let class = ClassInfo::new("java.lang.Class", public_final)
        .with_constructor(ConstructorInfo::new(Modifiers::PRIVATE))
        .with_method(method("getName", public, vec![], string()))
        .with_method(method("getSimpleName", public, vec![], string()))
        .with_method(method("isArray", public_native, vec![], boolean()))
        .with_method(method("isPrimitive", public_native, vec![], boolean()))
        .with_method(method("forName", public_static, vec![string()], class_type()));

    let comparator = class_ref("java.util.Comparator");
    let string_class = ClassInfo::new("java.lang.String", public_final)
        .with_field(FieldInfo::new("CASE_INSENSITIVE_ORDER", comparator, public_static_final))
        .with_field(FieldInfo::new("value", chars(), private_final))
        .with_field(FieldInfo::new("hash", int(), Modifiers::PRIVATE))
        .with_constructor(ConstructorInfo::new(public))
        .with_constructor(ConstructorInfo::new(public).with_parameters(vec![string()]))
        .with_constructor(ConstructorInfo::new(public).with_parameters(vec![chars()]))
        .with_constructor(ConstructorInfo::new(public).with_parameters(vec![bytes()]))
        .with_method(method("length", public, vec![], int()))
        .with_method(method("isEmpty", public, vec![], boolean()))
        .with_method(method("charAt", public, vec![int()], character()))
        .with_method(method("substring", public, vec![int()], string()))
        .with_method(method("substring", public, vec![int(), int()], string()))
        .with_method(
            method("format", public_static, vec![string(), objects()], string()).with_varargs(),
        )
        .with_method(method("valueOf", public_static, vec![int()], string()))
        .with_method(method("valueOf", public_static, vec![object_ref()], string()))
        .with_method(method("toCharArray", public, vec![], chars()))
        .with_method(method("getBytes", public, vec![], bytes()));

    let number = ClassInfo::new("java.lang.Number", public_abstract)
        .with_constructor(ConstructorInfo::new(public))
        .with_method(method("intValue", public_abstract, vec![], int()))
        .with_method(method("longValue", public_abstract, vec![], long()))
        .with_method(method("doubleValue", public_abstract, vec![], double()));

    let integer_ref = || class_ref("java.lang.Integer");
    let integer = ClassInfo::new("java.lang.Integer", public_final)
        .with_superclass("java.lang.Number")
        .with_field(constant("MAX_VALUE", int(), Value::from(i32::MAX)))
        .with_field(constant("MIN_VALUE", int(), Value::from(i32::MIN)))
        .with_field(constant("SIZE", int(), Value::from(32)))
        .with_field(FieldInfo::new("value", int(), private_final))
        .with_constructor(ConstructorInfo::new(public).with_parameters(vec![int()]))
        .with_constructor(ConstructorInfo::new(public).with_parameters(vec![string()]))
        .with_method(method("intValue", public, vec![], int()))
        .with_method(method("longValue", public, vec![], long()))
        .with_method(method("doubleValue", public, vec![], double()))
        .with_method(method("parseInt", public_static, vec![string()], int()))
        .with_method(method("parseInt", public_static, vec![string(), int()], int()))
        .with_method(method("valueOf", public_static, vec![int()], integer_ref()));

    let runnable = ClassInfo::new("java.lang.Runnable", public_abstract.union(Modifiers::INTERFACE))
        .with_method(method("run", public_abstract, vec![], void()));

    vec![object, class, string_class, number, integer, runnable]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = ClassRegistry::new();
        assert!(registry.contains(OBJECT_CLASS));
        assert!(registry.contains("java.lang.String"));
        assert!(!registry.is_empty());
        assert!(ClassRegistry::empty().is_empty());
    }

    #[test]
    fn test_superclass_normalization() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.get(OBJECT_CLASS).unwrap().superclass, None);
        assert_eq!(
            registry.get("java.lang.String").unwrap().superclass.as_deref(),
            Some(OBJECT_CLASS)
        );
        assert_eq!(
            registry.get("java.lang.Integer").unwrap().superclass.as_deref(),
            Some("java.lang.Number")
        );
        assert_eq!(registry.get("java.lang.Runnable").unwrap().superclass, None);
    }

    #[test]
    fn test_class_for_name() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.class_for_name("java.lang.Integer").unwrap().simple_name(), "Integer");
        assert!(matches!(
            registry.class_for_name("com.example.Missing"),
            Err(IntrospectError::ClassNotFound(name)) if name == "com.example.Missing"
        ));
    }

    #[test]
    fn test_instantiate_rules() {
        let registry = ClassRegistry::new();
        let probe = |name: &str| registry.instantiate(registry.get(name).unwrap()).is_ok();

        assert!(probe(OBJECT_CLASS));
        assert!(probe("java.lang.String"));
        assert!(!probe("java.lang.Integer")); // no no-arg constructor
        assert!(!probe("java.lang.Number")); // abstract
        assert!(!probe("java.lang.Runnable")); // interface
        assert!(!probe("java.lang.Class")); // private constructor
    }

    #[test]
    fn test_implicit_constructor_follows_class_visibility() {
        let mut registry = ClassRegistry::new();
        let public = registry.register(ClassInfo::new("demo.Open", Modifiers::PUBLIC));
        let hidden = registry.register(ClassInfo::new("demo.Hidden", Modifiers::NONE));

        assert!(registry.instantiate(&public).is_ok());
        assert!(registry.instantiate(&hidden).is_err());
    }

    #[test]
    fn test_factory_failure() {
        let mut registry = ClassRegistry::new();
        let class = registry.register(ClassInfo::new("demo.Flaky", Modifiers::PUBLIC));
        registry.register_factory("demo.Flaky", || Err("boom".to_string()));

        let err = registry.instantiate(&class).unwrap_err();
        assert_eq!(err.to_string(), "cannot instantiate demo.Flaky: boom");
    }

    #[test]
    fn test_read_static() {
        let registry = ClassRegistry::new();
        let integer = registry.get("java.lang.Integer").unwrap();

        let max = integer.field("MAX_VALUE").unwrap();
        assert_eq!(registry.read_static(integer, max).unwrap(), Some(Value::from(i32::MAX)));

        let value = integer.field("value").unwrap();
        assert!(matches!(
            registry.read_static(integer, value),
            Err(IntrospectError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let mut registry = ClassRegistry::new();
        let catalog = Catalog {
            classes: vec![
                ClassInfo::new("demo.A", Modifiers::PUBLIC),
                ClassInfo::new("demo.A", Modifiers::PUBLIC),
            ],
        };
        assert!(matches!(registry.load(catalog), Err(IntrospectError::Catalog(_))));
        assert!(!registry.contains("demo.A"));
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = Catalog::from_toml(
            r#"
[[classes]]
name = "com.acme.Widget"
modifiers = "public"

[[classes.fields]]
name = "DEFAULT_SIZE"
type = "int"
modifiers = "public static final"
value = 16

[[classes.methods]]
name = "resize"
modifiers = ["public"]
parameters = ["int", "int"]
"#,
        )
        .unwrap();

        let registry = ClassRegistry::with_catalog(catalog).unwrap();
        let widget = registry.get("com.acme.Widget").unwrap();
        assert_eq!(widget.superclass.as_deref(), Some(OBJECT_CLASS));
        assert_eq!(widget.fields[0].value, Some(Value::from(16)));
        assert_eq!(widget.methods[0].parameters.len(), 2);
    }
}
