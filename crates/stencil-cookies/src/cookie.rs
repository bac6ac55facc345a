//! Cookie values

use std::fmt;

use serde::Serialize;

use crate::error::CookieError;

/// A cookie: name, value and optional max age in seconds
///
/// No max age means a session cookie. A negative max age behaves the
/// same way when sent; zero asks the client to delete the cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cookie {
    name: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_age: Option<i32>,
}

impl Cookie {
    /// Session cookie with a checked name and value
    ///
    /// The name must be an HTTP token. The value may not contain
    /// whitespace, control characters, `;` or `,`, so neither can add
    /// attributes to a rendered `Set-Cookie` header.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, CookieError> {
        let name = name.into();
        if !is_token(&name) {
            return Err(CookieError::InvalidName(name));
        }
        let value = value.into();
        if !is_cookie_value(&value) {
            return Err(CookieError::InvalidValue(value));
        }
        Ok(Self {
            name,
            value,
            max_age: None,
        })
    }

    pub fn with_max_age(mut self, seconds: i32) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_age(&self) -> Option<i32> {
        self.max_age
    }

    /// Value for a `Set-Cookie` response header
    pub fn to_header_value(&self) -> String {
        match self.max_age {
            Some(age) if age >= 0 => format!("{}={}; Max-Age={}", self.name, self.value, age),
            _ => format!("{}={}", self.name, self.value),
        }
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\'
                        | b'"' | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}

fn is_cookie_value(value: &str) -> bool {
    !value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == ';' || c == ',')
}

/// Max age as handed over by a template: a number or a string
#[derive(Debug, Clone, PartialEq)]
pub enum MaxAge {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MaxAge {
    /// Seconds as `i32`
    ///
    /// Numbers are narrowed the way a JVM `Number.intValue()` does
    /// (integers wrap, floats truncate and saturate). Text must be a
    /// decimal integer with an optional sign.
    pub fn to_seconds(&self) -> Result<i32, CookieError> {
        match self {
            MaxAge::Integer(n) => Ok(*n as i32),
            MaxAge::Float(f) => Ok(*f as i32),
            MaxAge::Text(text) => text
                .parse::<i32>()
                .map_err(|_| CookieError::InvalidMaxAge(text.clone())),
        }
    }
}

impl From<i32> for MaxAge {
    fn from(n: i32) -> Self {
        MaxAge::Integer(n.into())
    }
}

impl From<i64> for MaxAge {
    fn from(n: i64) -> Self {
        MaxAge::Integer(n)
    }
}

impl From<u32> for MaxAge {
    fn from(n: u32) -> Self {
        MaxAge::Integer(n.into())
    }
}

impl From<f64> for MaxAge {
    fn from(f: f64) -> Self {
        MaxAge::Float(f)
    }
}

impl From<&str> for MaxAge {
    fn from(s: &str) -> Self {
        MaxAge::Text(s.to_string())
    }
}

impl From<String> for MaxAge {
    fn from(s: String) -> Self {
        MaxAge::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(name: &str, value: &str) -> Cookie {
        Cookie::new(name, value).unwrap()
    }

    #[test]
    fn test_header_value() {
        assert_eq!(cookie("id", "42").to_header_value(), "id=42");
        assert_eq!(
            cookie("id", "42").with_max_age(3600).to_header_value(),
            "id=42; Max-Age=3600"
        );
        assert_eq!(
            cookie("gone", "").with_max_age(0).to_header_value(),
            "gone=; Max-Age=0"
        );
        assert_eq!(cookie("s", "x").with_max_age(-1).to_header_value(), "s=x");
    }

    #[test]
    fn test_name_must_be_token() {
        assert!(Cookie::new("session_id", "1").is_ok());
        assert!(Cookie::new("__Host-sid", "1").is_ok());
        for name in ["", "a b", "sid; Domain=evil.example", "a=b", "x,y", "k\tv", "caf\u{e9}"] {
            assert_eq!(
                Cookie::new(name, "1"),
                Err(CookieError::InvalidName(name.to_string())),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_value_cannot_add_attributes() {
        assert!(Cookie::new("token", "a=b").is_ok());
        assert!(Cookie::new("quoted", "\"abc\"").is_ok());
        for value in ["x; Max-Age=999999", "a,b", "a b", "line\r\nbreak"] {
            assert_eq!(
                Cookie::new("sid", value),
                Err(CookieError::InvalidValue(value.to_string())),
                "{:?}",
                value
            );
        }
    }

    #[test]
    fn test_max_age_numbers() {
        assert_eq!(MaxAge::from(3600).to_seconds(), Ok(3600));
        assert_eq!(MaxAge::from(90.9).to_seconds(), Ok(90));
        assert_eq!(MaxAge::from(-2.5).to_seconds(), Ok(-2));
        assert_eq!(MaxAge::from(f64::NAN).to_seconds(), Ok(0));
        assert_eq!(MaxAge::from(4_294_967_297_i64).to_seconds(), Ok(1));
    }

    #[test]
    fn test_max_age_text() {
        assert_eq!(MaxAge::from("60").to_seconds(), Ok(60));
        assert_eq!(MaxAge::from("-1").to_seconds(), Ok(-1));
        assert_eq!(MaxAge::from("+5").to_seconds(), Ok(5));
        assert_eq!(
            MaxAge::from("not-a-number").to_seconds(),
            Err(CookieError::InvalidMaxAge("not-a-number".to_string()))
        );
        assert!(MaxAge::from(" 60").to_seconds().is_err());
        assert!(MaxAge::from("1.5").to_seconds().is_err());
        assert!(MaxAge::from("99999999999").to_seconds().is_err());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&cookie("a", "b")).unwrap();
        assert_eq!(json, r#"{"name":"a","value":"b"}"#);
    }
}
