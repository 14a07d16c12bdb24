//! Transport-neutral request/response values.
//!
//! The application layer only sees these types, so feature tests can drive
//! it without opening sockets.

/// HTTP methods the application distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Delete,
    Other,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        }
    }
}

/// Incoming request with a fully buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Request target as received, query string included.
    pub target: String,
    pub body: String,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: body.into(),
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::Get, target, "")
    }

    /// Form submission as produced by an HTML `<form method="post">`.
    pub fn post_form(target: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, target, body)
    }

    /// Path component of the target, without query string.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    /// Value of one `application/x-www-form-urlencoded` body field.
    pub fn form_value(&self, name: &str) -> Option<String> {
        self.body.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if decode_form_component(key)? != name {
                return None;
            }
            decode_form_component(value)
        })
    }
}

fn decode_form_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|value| value.into_owned())
}

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Response {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", CONTENT_TYPE_HTML.to_string())],
            body,
        }
    }

    /// `303 See Other`, so browsers follow up with `GET` whatever the
    /// original method was.
    pub fn see_other(location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            status: 303,
            headers: vec![
                ("Location", location.clone()),
                ("Content-Type", CONTENT_TYPE_HTML.to_string()),
            ],
            body: format!("<a href=\"{location}\">Redirecting</a>"),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
