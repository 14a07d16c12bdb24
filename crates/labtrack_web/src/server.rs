//! Blocking HTTP front backed by `tiny_http`.
//!
//! # Invariants
//! - One request is received, handled and answered before the next is read.
//! - Transport failures on one request are logged and never stop the loop.

use crate::app::App;
use crate::http::{Method, Request, Response};
use labtrack_core::log_field;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

/// Errors from server setup.
#[derive(Debug)]
pub enum ServerError {
    /// Listener could not bind to the requested address.
    Bind { addr: String, message: String },
    /// Listener failed while waiting for a request.
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind { addr, message } => write!(f, "failed to bind `{addr}`: {message}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Bound HTTP listener.
pub struct HttpServer {
    server: tiny_http::Server,
}

impl HttpServer {
    /// Binds a listener; use port `0` for an ephemeral port.
    pub fn bind(addr: &str) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(addr).map_err(|err| ServerError::Bind {
            addr: addr.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { server })
    }

    /// Actual listening address, if bound to IP.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests until the listener shuts down.
    pub fn serve(&self, app: &App<'_>) {
        info!(
            "event=server_start module=web status=ok addr={}",
            self.local_addr()
                .map_or_else(|| "unknown".to_string(), |addr| addr.to_string())
        );
        for request in self.server.incoming_requests() {
            dispatch(app, request);
        }
        info!("event=server_stop module=web status=ok");
    }

    /// Serves at most one request, waiting up to `timeout`.
    ///
    /// Returns `false` when no request arrived in time.
    pub fn serve_one(&self, app: &App<'_>, timeout: Duration) -> Result<bool, ServerError> {
        match self.server.recv_timeout(timeout)? {
            Some(request) => {
                dispatch(app, request);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn dispatch(app: &App<'_>, mut raw: tiny_http::Request) {
    let mut body = String::new();
    let read = raw.as_reader().read_to_string(&mut body);
    let response = match read {
        Ok(_) => {
            let request = Request::new(map_method(raw.method()), raw.url(), body);
            app.handle(&request)
        }
        Err(err) => {
            warn!(
                "event=http_request module=web status=error path={} error_code=body_read_failed error={}",
                log_field(raw.url()),
                err
            );
            Response::html(400, "<h1>Bad Request</h1>\n".to_string())
        }
    };

    let url = raw.url().to_string();
    if let Err(err) = raw.respond(to_tiny_response(response)) {
        error!(
            "event=http_respond module=web status=error path={} error={}",
            log_field(&url),
            err
        );
    }
}

fn map_method(method: &tiny_http::Method) -> Method {
    match method {
        tiny_http::Method::Get => Method::Get,
        tiny_http::Method::Head => Method::Head,
        tiny_http::Method::Post => Method::Post,
        tiny_http::Method::Delete => Method::Delete,
        _ => Method::Other,
    }
}

fn to_tiny_response(response: Response) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    // `from_data` adds no default Content-Type; headers come from `response`.
    let mut out =
        tiny_http::Response::from_data(response.body.into_bytes()).with_status_code(response.status);
    for (name, value) in &response.headers {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(()) => warn!(
                "event=http_respond module=web status=error error_code=invalid_header header={}",
                name
            ),
        }
    }
    out
}
