//! Request and response seams
//!
//! The cookie tool only needs two things from the HTTP layer: the cookies
//! sent with the current request and a place to put cookies for the
//! response. [`Request`] and [`Response`] are minimal owned
//! implementations; hosts with their own request types implement the
//! traits directly.

use crate::cookie::Cookie;

/// Cookies sent with the current request
pub trait CookieSource {
    /// `None` if the request carried no cookies at all
    fn cookies(&self) -> Option<&[Cookie]>;
}

/// Outgoing response that accepts cookies
pub trait CookieSink {
    fn add_cookie(&mut self, cookie: Cookie);
}

/// Owned request cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    cookies: Option<Vec<Cookie>>,
}

impl Request {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self {
            cookies: Some(cookies),
        }
    }

    /// Request without a `Cookie` header
    pub fn without_cookies() -> Self {
        Self::default()
    }

    /// Parse the value of a `Cookie` request header (`a=1; b=2`)
    ///
    /// Names and values are trimmed; entries without `=` and entries that
    /// do not make a valid [`Cookie`] are skipped. A header with no usable
    /// entries yields a request without cookies.
    pub fn from_header(header: &str) -> Self {
        let cookies: Vec<Cookie> = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                Cookie::new(name.trim(), value.trim()).ok()
            })
            .collect();

        if cookies.is_empty() {
            Self::without_cookies()
        } else {
            Self::new(cookies)
        }
    }
}

impl CookieSource for Request {
    fn cookies(&self) -> Option<&[Cookie]> {
        self.cookies.as_deref()
    }
}

/// Owned response cookies, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    cookies: Vec<Cookie>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// One `Set-Cookie` header value per added cookie
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies.iter().map(Cookie::to_header_value).collect()
    }
}

impl CookieSink for Response {
    fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }
}
