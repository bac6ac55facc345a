//! Access Modifiers
//!
//! JVM access-flag bitmask shared by classes, fields, methods and
//! constructors. Catalogs spell modifiers as keywords (`"public"`,
//! `"static"`), as a `|`-separated list, or as a raw hex/decimal mask.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Modifier flags (bitflags, JVM layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers (package-private)
    pub const NONE: Self = Self(0x000);
    pub const PUBLIC: Self = Self(0x001);
    pub const PRIVATE: Self = Self(0x002);
    pub const PROTECTED: Self = Self(0x004);
    pub const STATIC: Self = Self(0x008);
    pub const FINAL: Self = Self(0x010);
    pub const SYNCHRONIZED: Self = Self(0x020);
    pub const VOLATILE: Self = Self(0x040);
    pub const TRANSIENT: Self = Self(0x080);
    pub const NATIVE: Self = Self(0x100);
    pub const INTERFACE: Self = Self(0x200);
    pub const ABSTRACT: Self = Self(0x400);
    /// `strictfp`
    pub const STRICT: Self = Self(0x800);

    const KEYWORDS: [(Self, &'static str); 12] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::ABSTRACT, "abstract"),
        (Self::STATIC, "static"),
        (Self::FINAL, "final"),
        (Self::TRANSIENT, "transient"),
        (Self::VOLATILE, "volatile"),
        (Self::SYNCHRONIZED, "synchronized"),
        (Self::NATIVE, "native"),
        (Self::STRICT, "strictfp"),
        (Self::INTERFACE, "interface"),
    ];

    /// Create from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if all flags of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of flags
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_public(&self) -> bool {
        self.contains(Self::PUBLIC)
    }

    pub const fn is_protected(&self) -> bool {
        self.contains(Self::PROTECTED)
    }

    pub const fn is_private(&self) -> bool {
        self.contains(Self::PRIVATE)
    }

    pub const fn is_static(&self) -> bool {
        self.contains(Self::STATIC)
    }

    pub const fn is_final(&self) -> bool {
        self.contains(Self::FINAL)
    }

    pub const fn is_synchronized(&self) -> bool {
        self.contains(Self::SYNCHRONIZED)
    }

    pub const fn is_volatile(&self) -> bool {
        self.contains(Self::VOLATILE)
    }

    pub const fn is_transient(&self) -> bool {
        self.contains(Self::TRANSIENT)
    }

    pub const fn is_native(&self) -> bool {
        self.contains(Self::NATIVE)
    }

    pub const fn is_interface(&self) -> bool {
        self.contains(Self::INTERFACE)
    }

    pub const fn is_abstract(&self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    pub const fn is_strict(&self) -> bool {
        self.contains(Self::STRICT)
    }

    /// Parse a single keyword, or a hex (`0x..`) / decimal mask
    pub fn from_keyword(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "strict" {
            return Some(Self::STRICT);
        }
        if let Some((flag, _)) = Self::KEYWORDS.iter().find(|(_, kw)| *kw == lower) {
            return Some(*flag);
        }
        if let Some(hex) = lower.strip_prefix("0x") {
            u16::from_str_radix(hex, 16).ok().map(Self::from_bits)
        } else {
            lower.parse::<u16>().ok().map(Self::from_bits)
        }
    }

    /// Parse combined flags from a `|`- or whitespace-separated string
    /// (e.g. `"public|static"`, `"public static final"`)
    pub fn from_combined_str(s: &str) -> Option<Self> {
        let mut result = Self::NONE;
        for part in s.split(|c: char| c == '|' || c.is_whitespace()) {
            if part.is_empty() {
                continue;
            }
            result = result.union(Self::from_keyword(part)?);
        }
        Some(result)
    }

    /// Keywords for the set flags, in source declaration order
    pub fn keywords(&self) -> Vec<&'static str> {
        Self::KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
            .collect()
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keywords().join(" "))
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.keywords().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModifierRepr {
    Bits(u16),
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let invalid = |s: &str| serde::de::Error::custom(format!("unknown modifier: {}", s));
        match ModifierRepr::deserialize(deserializer)? {
            ModifierRepr::Bits(bits) => Ok(Self::from_bits(bits)),
            ModifierRepr::Text(text) => {
                Self::from_combined_str(&text).ok_or_else(|| invalid(&text))
            }
            ModifierRepr::List(items) => items.iter().try_fold(Self::NONE, |acc, item| {
                Self::from_keyword(item)
                    .map(|flag| acc.union(flag))
                    .ok_or_else(|| invalid(item))
            }),
        }
    }
}
