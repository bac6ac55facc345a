//! Cookie access for templates
//!
//! [`CookieTool`] reads cookies from the current request and creates or
//! adds cookies for the response. The HTTP layer is reached only through
//! the [`CookieSource`] and [`CookieSink`] traits.

mod cookie;
mod error;
mod http;
mod tool;

pub use cookie::{Cookie, MaxAge};
pub use error::CookieError;
pub use http::{CookieSink, CookieSource, Request, Response};
pub use tool::CookieTool;
