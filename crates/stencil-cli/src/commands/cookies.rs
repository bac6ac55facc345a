//! `stencil cookies` — Read a `Cookie` header or build a `Set-Cookie` header.

use stencil_cookies::{Cookie, CookieTool, MaxAge, Request, Response};

/// List the cookies of a header, or print the value of one of them.
pub fn get(header: &str, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let request = Request::from_header(header);
    let mut response = Response::new();
    let tool = CookieTool::new(&request, &mut response);

    match name {
        Some(name) => match tool.get(name) {
            Some(cookie) if json => println!("{}", serde_json::to_string_pretty(cookie)?),
            Some(cookie) => println!("{}", cookie.value()),
            None => anyhow::bail!("no cookie named {:?}", name),
        },
        None => {
            let all = tool.all().unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(all)?);
            } else {
                for cookie in all {
                    println!("{}", cookie);
                }
            }
        }
    }
    Ok(())
}

/// Build the `Set-Cookie` header values for one cookie.
///
/// Invalid input is an error here, where the tool itself would silently
/// skip the cookie.
pub fn set_headers(name: &str, value: &str, max_age: Option<&str>) -> anyhow::Result<Vec<String>> {
    Cookie::new(name, value)?;
    let request = Request::without_cookies();
    let mut response = Response::new();
    {
        let mut tool = CookieTool::new(&request, &mut response);
        match max_age {
            Some(max_age) => {
                MaxAge::from(max_age).to_seconds()?;
                tool.add_with_max_age(name, value, max_age);
            }
            None => tool.add(name, value),
        }
    }
    Ok(response.set_cookie_headers())
}

pub fn set(name: &str, value: &str, max_age: Option<&str>) -> anyhow::Result<()> {
    for header in set_headers(name, value, max_age)? {
        println!("Set-Cookie: {}", header);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_headers() {
        assert_eq!(set_headers("id", "42", None).unwrap(), vec!["id=42"]);
        assert_eq!(
            set_headers("id", "42", Some("3600")).unwrap(),
            vec!["id=42; Max-Age=3600"]
        );
    }

    #[test]
    fn test_set_headers_rejects_bad_max_age() {
        let err = set_headers("session", "abc", Some("not-a-number")).unwrap_err();
        assert_eq!(err.to_string(), "invalid max age: \"not-a-number\"");
    }

    #[test]
    fn test_set_headers_rejects_injected_attributes() {
        let err = set_headers("sid; Domain=evil.example", "x", None).unwrap_err();
        assert_eq!(err.to_string(), "invalid cookie name: \"sid; Domain=evil.example\"");
        let err = set_headers("sid", "x; Max-Age=999999", Some("60")).unwrap_err();
        assert_eq!(err.to_string(), "invalid cookie value: \"x; Max-Age=999999\"");
    }

    #[test]
    fn test_get_missing_cookie_fails() {
        assert!(get("a=1", Some("b"), false).is_err());
        assert!(get("a=1", Some("a"), false).is_ok());
        assert!(get("", None, true).is_ok());
    }
}
