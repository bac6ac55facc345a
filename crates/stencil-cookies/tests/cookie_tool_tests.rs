//! Integration tests for the cookie tool against host-provided
//! request/response types.

use stencil_cookies::{Cookie, CookieSink, CookieSource, CookieTool, MaxAge};

/// Request type owned by a host framework
struct HostRequest {
    jar: Vec<Cookie>,
}

impl CookieSource for HostRequest {
    fn cookies(&self) -> Option<&[Cookie]> {
        if self.jar.is_empty() {
            None
        } else {
            Some(&self.jar)
        }
    }
}

/// Response type that renders headers immediately
#[derive(Default)]
struct HostResponse {
    headers: Vec<(String, String)>,
}

impl CookieSink for HostResponse {
    fn add_cookie(&mut self, cookie: Cookie) {
        self.headers.push(("Set-Cookie".to_string(), cookie.to_header_value()));
    }
}

#[test]
fn test_host_types() {
    let request = HostRequest {
        jar: vec![
            Cookie::new("session", "s1").unwrap(),
            Cookie::new("cart", "3").unwrap(),
        ],
    };
    let mut response = HostResponse::default();
    {
        let mut tool = CookieTool::new(&request, &mut response);
        assert_eq!(tool.get("cart").map(Cookie::value), Some("3"));
        tool.add_with_max_age("cart", "4", MaxAge::Text("86400".to_string()));
        tool.add_with_max_age("broken", "x", "soon");
        tool.add("cart; Path", "/");
    }
    assert_eq!(
        response.headers,
        vec![("Set-Cookie".to_string(), "cart=4; Max-Age=86400".to_string())]
    );
}

#[test]
fn test_trait_objects() {
    let request = HostRequest { jar: Vec::new() };
    let mut response = HostResponse::default();
    let source: &dyn CookieSource = &request;
    let sink: &mut dyn CookieSink = &mut response;

    let mut tool = CookieTool::new(source, sink);
    assert!(tool.all().is_none());
    assert!(tool.get("session").is_none());
    tool.add("session", "new");
    drop(tool);

    assert_eq!(response.headers.len(), 1);
}
