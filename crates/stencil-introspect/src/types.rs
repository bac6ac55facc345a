//! Type References
//!
//! Types that appear in member signatures. Catalogs write them in source
//! form: `int`, `java.lang.String`, `byte[]`, `java.util.Map$Entry[][]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntrospectError;

/// Primitive kinds, including `void` for method return types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    /// Source keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            "boolean" => PrimitiveKind::Boolean,
            "byte" => PrimitiveKind::Byte,
            "char" => PrimitiveKind::Char,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "void" => PrimitiveKind::Void,
            _ => return None,
        })
    }
}

/// A type as referenced from a field, parameter or return position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// Primitive or `void`
    Primitive(PrimitiveKind),
    /// Array of the element type
    Array(Box<TypeRef>),
    /// Class or interface, by qualified name
    Class(String),
}

impl TypeRef {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive(kind)
    }

    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Class(name.into())
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn void() -> Self {
        TypeRef::Primitive(PrimitiveKind::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveKind::Void))
    }

    /// Component type, one level down (`int[][]` -> `int[]`)
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Fully unwrapped element type (`int[][]` -> `int`)
    pub fn innermost(&self) -> &TypeRef {
        let mut current = self;
        while let TypeRef::Array(element) = current {
            current = element;
        }
        current
    }

    /// Qualified name in source form
    pub fn name(&self) -> String {
        match self {
            TypeRef::Primitive(kind) => kind.keyword().to_string(),
            TypeRef::Array(element) => format!("{}[]", element.name()),
            TypeRef::Class(name) => name.clone(),
        }
    }

    /// Name without the package or enclosing classes
    pub fn simple_name(&self) -> String {
        match self {
            TypeRef::Primitive(kind) => kind.keyword().to_string(),
            TypeRef::Array(element) => format!("{}[]", element.simple_name()),
            TypeRef::Class(name) => simple_class_name(name).to_string(),
        }
    }
}

/// Strip the package and any enclosing classes from a qualified name
pub fn simple_class_name(qualified: &str) -> &str {
    let after_package = qualified.rsplit('.').next().unwrap_or(qualified);
    after_package.rsplit('$').next().unwrap_or(after_package)
}

/// Package part of a qualified name (empty for the default package)
pub fn package_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

impl FromStr for TypeRef {
    type Err = IntrospectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_suffix("[]") {
            return Ok(TypeRef::array(element.parse()?));
        }
        if s.is_empty() || s.contains(|c: char| c.is_whitespace() || c == '[' || c == ']') {
            return Err(IntrospectError::InvalidTypeName(s.to_string()));
        }
        Ok(match PrimitiveKind::from_keyword(s) {
            Some(kind) => TypeRef::Primitive(kind),
            None => TypeRef::Class(s.to_string()),
        })
    }
}

impl TryFrom<String> for TypeRef {
    type Error = IntrospectError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> String {
        ty.name()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive_class_array() {
        assert_eq!("int".parse::<TypeRef>().unwrap(), TypeRef::primitive(PrimitiveKind::Int));
        assert_eq!(
            "java.lang.String".parse::<TypeRef>().unwrap(),
            TypeRef::class("java.lang.String")
        );
        assert_eq!(
            "byte[][]".parse::<TypeRef>().unwrap(),
            TypeRef::array(TypeRef::array(TypeRef::primitive(PrimitiveKind::Byte)))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<TypeRef>().is_err());
        assert!("[]".parse::<TypeRef>().is_err());
        assert!("java.lang.String [".parse::<TypeRef>().is_err());
        assert!("int[3]".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(TypeRef::class("java.util.Map$Entry").simple_name(), "Entry");
        assert_eq!(TypeRef::class("Local").simple_name(), "Local");
        assert_eq!(
            TypeRef::array(TypeRef::class("java.lang.String")).simple_name(),
            "String[]"
        );
        assert_eq!(TypeRef::void().simple_name(), "void");
    }

    #[test]
    fn test_element_and_innermost() {
        let grid = TypeRef::array(TypeRef::array(TypeRef::primitive(PrimitiveKind::Int)));
        assert_eq!(grid.element().unwrap().name(), "int[]");
        assert_eq!(grid.innermost(), &TypeRef::primitive(PrimitiveKind::Int));
        assert!(TypeRef::class("a.B").element().is_none());
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("java.util.Map$Entry"), "java.util");
        assert_eq!(package_name("Local"), "");
    }

    #[test]
    fn test_serde_as_string() {
        let ty: TypeRef = serde_json::from_str(r#""java.lang.Object[]""#).unwrap();
        assert_eq!(ty, TypeRef::array(TypeRef::class("java.lang.Object")));
        assert_eq!(serde_json::to_string(&ty).unwrap(), r#""java.lang.Object[]""#);
    }
}
