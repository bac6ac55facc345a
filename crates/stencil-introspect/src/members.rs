//! Member Descriptors
//!
//! Read-only views of one field, method or constructor of an inspected
//! class. Descriptors expose names, signatures and modifiers; they never
//! expose a way to invoke a callable or write a field.
//!
//! Descriptors compare, order and hash by their *unique name*:
//!
//! | member                | unique name                      |
//! |-----------------------|----------------------------------|
//! | field `count`         | `count`                          |
//! | method `foo()`        | `foo`                            |
//! | method `foo(int)`     | `foo_int`                        |
//! | method `sum(int[],A)` | `sum_intArrayA`                  |
//! | ctor `Point(int,int)` | `Point_intint`                   |
//!
//! Parameter types contribute their *simple* names, so overloads that differ
//! only in the package of a parameter type get the same unique name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::class_metadata::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo};
use crate::modifiers::Modifiers;
use crate::registry::ClassProvider;
use crate::types::TypeRef;

/// Separator between a callable's base name and its parameter type names
pub const UNIQUE_NAME_SEPARATOR: char = '_';

/// Build the unique name of a callable from its base name and parameters
pub fn unique_name(base: &str, parameters: &[TypeRef]) -> String {
    if parameters.is_empty() {
        return base.to_string();
    }
    let mut out = String::with_capacity(30);
    out.push_str(base);
    out.push(UNIQUE_NAME_SEPARATOR);
    for param in parameters {
        match param.element() {
            Some(element) => {
                out.push_str(&element.simple_name());
                out.push_str("Array");
            }
            None => out.push_str(&param.simple_name()),
        }
    }
    out
}

/// Common shape of field, method and constructor descriptors
pub trait Member {
    /// Declared name (constructors use the class's simple name)
    fn name(&self) -> &str;

    /// Name that tells overloads apart
    fn unique_name(&self) -> &str;

    fn modifiers(&self) -> Modifiers;

    /// Qualified name of the declaring class
    fn declaring_class(&self) -> &str;

    fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    fn is_protected(&self) -> bool {
        self.modifiers().is_protected()
    }

    fn is_private(&self) -> bool {
        self.modifiers().is_private()
    }

    fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    fn is_final(&self) -> bool {
        self.modifiers().is_final()
    }

    fn is_interface(&self) -> bool {
        self.modifiers().is_interface()
    }

    fn is_native(&self) -> bool {
        self.modifiers().is_native()
    }

    fn is_strict(&self) -> bool {
        self.modifiers().is_strict()
    }

    fn is_synchronized(&self) -> bool {
        self.modifiers().is_synchronized()
    }

    fn is_transient(&self) -> bool {
        self.modifiers().is_transient()
    }

    fn is_volatile(&self) -> bool {
        self.modifiers().is_volatile()
    }

    fn is_abstract(&self) -> bool {
        self.modifiers().is_abstract()
    }
}

/// Methods and constructors
pub trait Callable: Member {
    /// Parameter types in declaration order
    fn parameters(&self) -> &[TypeRef];

    /// Whether the final parameter is variadic
    fn is_varargs(&self) -> bool;

    /// Number of declared parameters; a vararg counts as one
    fn parameter_count(&self) -> usize {
        self.parameters().len()
    }
}

macro_rules! impl_unique_name_ordering {
    ($($ty:ty),*) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.unique_name() == other.unique_name()
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.unique_name().cmp(other.unique_name())
            }
        }

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.unique_name().hash(state);
            }
        }
    )*};
}

impl_unique_name_ordering!(FieldDescriptor, MethodDescriptor, ConstructorDescriptor);

// ============================================================================
// Fields
// ============================================================================

/// Descriptor of a declared field
#[derive(Clone)]
pub struct FieldDescriptor {
    field: FieldInfo,
    declaring: Arc<ClassInfo>,
    provider: Arc<dyn ClassProvider>,
}

impl FieldDescriptor {
    pub fn new(
        field: FieldInfo,
        declaring: Arc<ClassInfo>,
        provider: Arc<dyn ClassProvider>,
    ) -> Self {
        Self {
            field,
            declaring,
            provider,
        }
    }

    /// Declared type
    pub fn ty(&self) -> &TypeRef {
        &self.field.ty
    }

    /// Value of a static field
    ///
    /// `None` for instance fields and whenever the provider refuses the
    /// read.
    pub fn static_value(&self) -> Option<Value> {
        if !self.is_static() {
            return None;
        }
        self.provider
            .read_static(&self.declaring, &self.field)
            .ok()
            .flatten()
    }

    pub fn info(&self) -> &FieldInfo {
        &self.field
    }
}

impl Member for FieldDescriptor {
    fn name(&self) -> &str {
        &self.field.name
    }

    /// Field names cannot be overloaded
    fn unique_name(&self) -> &str {
        &self.field.name
    }

    fn modifiers(&self) -> Modifiers {
        self.field.modifiers
    }

    fn declaring_class(&self) -> &str {
        &self.declaring.name
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("declaring", &self.declaring.name)
            .field("field", &self.field)
            .finish()
    }
}

// ============================================================================
// Methods
// ============================================================================

/// Descriptor of a declared method
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    method: MethodInfo,
    declaring: Arc<ClassInfo>,
    unique_name: OnceCell<String>,
}

impl MethodDescriptor {
    pub fn new(method: MethodInfo, declaring: Arc<ClassInfo>) -> Self {
        Self {
            method,
            declaring,
            unique_name: OnceCell::new(),
        }
    }

    /// Return type
    pub fn returns(&self) -> &TypeRef {
        &self.method.returns
    }

    /// True if the method returns `void`
    pub fn is_void(&self) -> bool {
        self.method.returns.is_void()
    }

    pub fn info(&self) -> &MethodInfo {
        &self.method
    }
}

impl Member for MethodDescriptor {
    fn name(&self) -> &str {
        &self.method.name
    }

    fn unique_name(&self) -> &str {
        self.unique_name
            .get_or_init(|| unique_name(&self.method.name, &self.method.parameters))
    }

    fn modifiers(&self) -> Modifiers {
        self.method.modifiers
    }

    fn declaring_class(&self) -> &str {
        &self.declaring.name
    }
}

impl Callable for MethodDescriptor {
    fn parameters(&self) -> &[TypeRef] {
        &self.method.parameters
    }

    fn is_varargs(&self) -> bool {
        self.method.varargs
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Descriptor of a declared constructor
#[derive(Debug, Clone)]
pub struct ConstructorDescriptor {
    constructor: ConstructorInfo,
    declaring: Arc<ClassInfo>,
    unique_name: OnceCell<String>,
}

impl ConstructorDescriptor {
    pub fn new(constructor: ConstructorInfo, declaring: Arc<ClassInfo>) -> Self {
        Self {
            constructor,
            declaring,
            unique_name: OnceCell::new(),
        }
    }

    pub fn info(&self) -> &ConstructorInfo {
        &self.constructor
    }
}

impl Member for ConstructorDescriptor {
    fn name(&self) -> &str {
        self.declaring.simple_name()
    }

    fn unique_name(&self) -> &str {
        self.unique_name
            .get_or_init(|| unique_name(self.name(), &self.constructor.parameters))
    }

    fn modifiers(&self) -> Modifiers {
        self.constructor.modifiers
    }

    fn declaring_class(&self) -> &str {
        &self.declaring.name
    }
}

impl Callable for ConstructorDescriptor {
    fn parameters(&self) -> &[TypeRef] {
        &self.constructor.parameters
    }

    fn is_varargs(&self) -> bool {
        self.constructor.varargs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassRegistry;
    use crate::types::PrimitiveKind;

    fn int() -> TypeRef {
        TypeRef::primitive(PrimitiveKind::Int)
    }

    fn owner() -> Arc<ClassInfo> {
        Arc::new(ClassInfo::new("geo.Point", Modifiers::PUBLIC))
    }

    #[test]
    fn test_unique_name_without_parameters() {
        assert_eq!(unique_name("size", &[]), "size");
    }

    #[test]
    fn test_unique_name_concatenates_simple_names() {
        let params = vec![int(), TypeRef::class("java.lang.String")];
        assert_eq!(unique_name("put", &params), "put_intString");
    }

    #[test]
    fn test_unique_name_arrays() {
        let params = vec![
            TypeRef::array(int()),
            TypeRef::array(TypeRef::class("java.util.Map$Entry")),
        ];
        assert_eq!(unique_name("sum", &params), "sum_intArrayEntryArray");

        // only the outer array level becomes "Array"
        let grid = vec![TypeRef::array(TypeRef::array(int()))];
        assert_eq!(unique_name("fill", &grid), "fill_int[]Array");
    }

    #[test]
    fn test_unique_name_ignores_packages() {
        let a = unique_name("parse", &[TypeRef::class("java.util.Date")]);
        let b = unique_name("parse", &[TypeRef::class("java.sql.Date")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_method_descriptor() {
        let method = MethodDescriptor::new(
            MethodInfo::new("translate", Modifiers::PUBLIC.union(Modifiers::FINAL))
                .with_parameters(vec![int(), int()])
                .with_returns(TypeRef::class("geo.Point")),
            owner(),
        );
        assert_eq!(method.name(), "translate");
        assert_eq!(method.unique_name(), "translate_intint");
        assert_eq!(method.parameter_count(), 2);
        assert_eq!(method.declaring_class(), "geo.Point");
        assert!(!method.is_void());
        assert!(method.is_public());
        assert!(method.is_final());
        assert!(!method.is_varargs());
    }

    #[test]
    fn test_unique_name_is_memoized() {
        let method = MethodDescriptor::new(
            MethodInfo::new("scale", Modifiers::PUBLIC).with_parameters(vec![int()]),
            owner(),
        );
        let first = method.unique_name() as *const str;
        let second = method.unique_name() as *const str;
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_constructor_uses_simple_class_name() {
        let ctor = ConstructorDescriptor::new(
            ConstructorInfo::new(Modifiers::PUBLIC)
                .with_parameters(vec![TypeRef::array(int())])
                .with_varargs(),
            Arc::new(ClassInfo::new("geo.Shape$Polygon", Modifiers::PUBLIC)),
        );
        assert_eq!(ctor.name(), "Polygon");
        assert_eq!(ctor.unique_name(), "Polygon_intArray");
        assert!(ctor.is_varargs());
        assert_eq!(ctor.parameter_count(), 1);
    }

    #[test]
    fn test_equality_and_order_by_unique_name() {
        let a = MethodDescriptor::new(MethodInfo::new("foo", Modifiers::PUBLIC), owner());
        let b = MethodDescriptor::new(
            MethodInfo::new("foo", Modifiers::PRIVATE).with_returns(int()),
            owner(),
        );
        let c = MethodDescriptor::new(
            MethodInfo::new("foo", Modifiers::PUBLIC).with_parameters(vec![int()]),
            owner(),
        );
        assert_eq!(a, b);
        assert!(a < c);
    }

    #[test]
    fn test_field_static_value() {
        let provider: Arc<dyn ClassProvider> = Arc::new(ClassRegistry::new());
        let class = provider.class_for_name("java.lang.Integer").unwrap();

        let max = FieldDescriptor::new(
            class.field("MAX_VALUE").unwrap().clone(),
            Arc::clone(&class),
            Arc::clone(&provider),
        );
        assert_eq!(max.unique_name(), "MAX_VALUE");
        assert_eq!(max.static_value(), Some(Value::from(i32::MAX)));

        let instance = FieldDescriptor::new(
            class.field("value").unwrap().clone(),
            Arc::clone(&class),
            Arc::clone(&provider),
        );
        assert_eq!(instance.static_value(), None);
        assert!(instance.is_private());
    }

    #[test]
    fn test_private_static_value_is_swallowed() {
        let provider: Arc<dyn ClassProvider> = Arc::new(ClassRegistry::new());
        let class = Arc::new(ClassInfo::new("demo.Secrets", Modifiers::PUBLIC));
        let field = FieldInfo::new(
            "KEY",
            TypeRef::class("java.lang.String"),
            Modifiers::PRIVATE.union(Modifiers::STATIC),
        )
        .with_value(Value::from("hunter2"));

        let descriptor = FieldDescriptor::new(field, class, provider);
        assert!(descriptor.is_static());
        assert_eq!(descriptor.static_value(), None);
    }
}
