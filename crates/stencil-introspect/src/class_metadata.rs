//! Class Metadata
//!
//! Declared structure of a single class: its fields, methods and
//! constructors together with their modifiers and signatures. This is the
//! data a [`ClassProvider`](crate::ClassProvider) hands to the class tool in
//! place of runtime reflection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modifiers::Modifiers;
use crate::types::{package_name, simple_class_name, TypeRef};

/// Qualified name of the root class
pub const OBJECT_CLASS: &str = "java.lang.Object";

/// Declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Field modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Value of a static field, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers,
            value: None,
        }
    }

    /// Attach a static value
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Declared method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Method modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Parameter types in declaration order
    #[serde(default)]
    pub parameters: Vec<TypeRef>,
    /// Return type (`void` if omitted)
    #[serde(default = "TypeRef::void")]
    pub returns: TypeRef,
    /// Whether the final parameter is variadic
    #[serde(default)]
    pub varargs: bool,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            parameters: Vec::new(),
            returns: TypeRef::void(),
            varargs: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<TypeRef>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_returns(mut self, returns: TypeRef) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}

/// Declared constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    /// Constructor modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Parameter types in declaration order
    #[serde(default)]
    pub parameters: Vec<TypeRef>,
    /// Whether the final parameter is variadic
    #[serde(default)]
    pub varargs: bool,
}

impl ConstructorInfo {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            parameters: Vec::new(),
            varargs: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<TypeRef>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}

/// Reflection metadata for a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Qualified name (`com.acme.Outer$Inner`)
    pub name: String,
    /// Class modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Qualified name of the superclass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    /// Declared methods, in declaration order
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
    /// Declared constructors, in declaration order
    #[serde(default)]
    pub constructors: Vec<ConstructorInfo>,
}

impl ClassInfo {
    /// Create metadata with no members
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            superclass: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Name without package or enclosing classes
    pub fn simple_name(&self) -> &str {
        simple_class_name(&self.name)
    }

    /// Package name (empty for the default package)
    pub fn package_name(&self) -> &str {
        package_name(&self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.is_interface()
    }

    /// Qualified name of the superclass
    ///
    /// Interfaces and `java.lang.Object` have none; any other class without
    /// a declared superclass extends `java.lang.Object`.
    pub fn superclass_name(&self) -> Option<&str> {
        if self.is_interface() {
            return None;
        }
        match self.superclass.as_deref() {
            Some(name) => Some(name),
            None if self.name == OBJECT_CLASS => None,
            None => Some(OBJECT_CLASS),
        }
    }

    /// Get a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All declared overloads of a method
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods_named(name).next().is_some()
    }

    /// Public constructor taking no arguments, if declared
    pub fn default_constructor(&self) -> Option<&ConstructorInfo> {
        self.constructors
            .iter()
            .find(|c| c.parameters.is_empty() && c.modifiers.is_public())
    }
}
