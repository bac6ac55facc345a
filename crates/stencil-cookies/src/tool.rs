//! Cookie Tool
//!
//! Request-scoped helper for reading the current request's cookies and
//! adding cookies to the response from a template:
//!
//! ```text
//! $cookies.get("foo").value
//! $cookies.add("bar", "woogie")
//! $cookies.add("remember", "yes", "3600")
//! ```

use crate::cookie::{Cookie, MaxAge};
use crate::error::CookieError;
use crate::http::{CookieSink, CookieSource};

/// Cookie access bound to one request/response pair
#[derive(Debug)]
pub struct CookieTool<'a, Req: ?Sized, Resp: ?Sized> {
    request: &'a Req,
    response: &'a mut Resp,
}

impl<'a, Req, Resp> CookieTool<'a, Req, Resp>
where
    Req: CookieSource + ?Sized,
    Resp: CookieSink + ?Sized,
{
    pub fn new(request: &'a Req, response: &'a mut Resp) -> Self {
        Self { request, response }
    }

    /// All cookies of the current request
    pub fn all(&self) -> Option<&[Cookie]> {
        self.request.cookies()
    }

    /// First request cookie with exactly this name
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.all()?.iter().find(|cookie| cookie.name() == name)
    }

    /// New session cookie; not attached to the response
    ///
    /// Returns `None` if the name or value is rejected by [`Cookie::new`].
    pub fn create(&self, name: &str, value: &str) -> Option<Cookie> {
        build(name, value, None).ok()
    }

    /// New cookie with a max age; not attached to the response
    ///
    /// Returns `None` if `max_age` is text that does not parse, or if the
    /// name or value is rejected.
    pub fn create_with_max_age(
        &self,
        name: &str,
        value: &str,
        max_age: impl Into<MaxAge>,
    ) -> Option<Cookie> {
        build(name, value, Some(max_age.into())).ok()
    }

    /// Add a session cookie to the response (not to the current request)
    ///
    /// Leaves the response untouched if the name or value is rejected.
    pub fn add(&mut self, name: &str, value: &str) {
        self.attach(name, build(name, value, None));
    }

    /// Add a cookie with a max age to the response
    ///
    /// Leaves the response untouched if `max_age` does not parse or the
    /// name or value is rejected.
    pub fn add_with_max_age(&mut self, name: &str, value: &str, max_age: impl Into<MaxAge>) {
        self.attach(name, build(name, value, Some(max_age.into())));
    }

    fn attach(&mut self, name: &str, cookie: Result<Cookie, CookieError>) {
        match cookie {
            Ok(cookie) => {
                tracing::debug!(name, max_age = ?cookie.max_age(), "adding cookie to response");
                self.response.add_cookie(cookie);
            }
            Err(err) => tracing::debug!(name, %err, "cookie not added"),
        }
    }
}

fn build(name: &str, value: &str, max_age: Option<MaxAge>) -> Result<Cookie, CookieError> {
    let seconds = max_age.map(|max_age| max_age.to_seconds()).transpose()?;
    let cookie = Cookie::new(name, value)?;
    Ok(match seconds {
        Some(seconds) => cookie.with_max_age(seconds),
        None => cookie,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response};

    fn request() -> Request {
        Request::from_header("id=1; theme=dark; id=2")
    }

    #[test]
    fn test_get_first_match() {
        let request = request();
        let mut response = Response::new();
        let tool = CookieTool::new(&request, &mut response);

        assert_eq!(tool.all().map(<[Cookie]>::len), Some(3));
        assert_eq!(tool.get("id").map(Cookie::value), Some("1"));
        assert_eq!(tool.get("theme").map(Cookie::value), Some("dark"));
        assert!(tool.get("ID").is_none());
        assert!(tool.get("missing").is_none());
    }

    #[test]
    fn test_get_without_cookies() {
        let request = Request::without_cookies();
        let mut response = Response::new();
        let tool = CookieTool::new(&request, &mut response);
        assert!(tool.all().is_none());
        assert!(tool.get("id").is_none());
    }

    #[test]
    fn test_create_does_not_touch_response() {
        let request = request();
        let mut response = Response::new();
        {
            let tool = CookieTool::new(&request, &mut response);
            let cookie = tool.create("a", "b").unwrap();
            assert_eq!(cookie.max_age(), None);

            let cookie = tool.create_with_max_age("id", "42", 3600).unwrap();
            assert_eq!(cookie.name(), "id");
            assert_eq!(cookie.value(), "42");
            assert_eq!(cookie.max_age(), Some(3600));

            assert_eq!(tool.create_with_max_age("id", "42", "120").unwrap().max_age(), Some(120));
            assert!(tool.create_with_max_age("session", "abc", "not-a-number").is_none());
        }
        assert!(response.cookies().is_empty());
    }

    #[test]
    fn test_add() {
        let request = request();
        let mut response = Response::new();
        {
            let mut tool = CookieTool::new(&request, &mut response);
            tool.add("bar", "woogie");
            tool.add_with_max_age("remember", "yes", 60.7);
        }
        assert_eq!(response.set_cookie_headers(), vec!["bar=woogie", "remember=yes; Max-Age=60"]);
    }

    #[test]
    fn test_add_with_bad_max_age_is_noop() {
        let request = request();
        let mut response = Response::new();
        response.add_cookie(Cookie::new("existing", "1").unwrap());
        let before = response.clone();
        {
            let mut tool = CookieTool::new(&request, &mut response);
            tool.add_with_max_age("session", "abc", "not-a-number");
        }
        assert_eq!(response, before);
    }

    #[test]
    fn test_create_rejects_header_injection() {
        let request = request();
        let mut response = Response::new();
        let tool = CookieTool::new(&request, &mut response);
        assert!(tool.create("sid; Domain=evil.example", "x").is_none());
        assert!(tool.create("sid", "x; Max-Age=999999").is_none());
        assert!(tool.create_with_max_age("a b", "c", 60).is_none());
    }

    #[test]
    fn test_add_with_invalid_name_or_value_is_noop() {
        let request = request();
        let mut response = Response::new();
        {
            let mut tool = CookieTool::new(&request, &mut response);
            tool.add("sid; Domain=evil.example", "x; Max-Age=999999");
            tool.add("a b", "c");
            tool.add_with_max_age("sid", "x,y", 60);
            tool.add("sid", "ok");
        }
        assert_eq!(response.set_cookie_headers(), vec!["sid=ok"]);

        let reparsed = Request::from_header(&response.set_cookie_headers()[0]);
        assert_eq!(reparsed.cookies().map(<[Cookie]>::len), Some(1));
    }

    #[test]
    fn test_add_does_not_change_request() {
        let request = request();
        let mut response = Response::new();
        let mut tool = CookieTool::new(&request, &mut response);
        tool.add("fresh", "1");
        assert!(tool.get("fresh").is_none());
    }
}
