use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, X_CONTENT_TYPE_OPTIONS};
use http::{Response, StatusCode};

/// Sink an error response is written to
///
/// Mirrors the parts of an HTTP response writer the translator needs. The
/// status is written once, before the body.
pub trait ResponseWriter {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    fn write_status(&mut self, status: StatusCode);

    fn write_body(&mut self, body: &[u8]);
}

/// In-memory response, convertible to an [`http::Response`]
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    /// Written status, `200 OK` if none was written
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_default()
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response<Vec<u8>> {
        let status = self.status();
        let mut response = Response::new(self.body);
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseWriter for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        if let Some(written) = self.status {
            tracing::warn!(
                written = written.as_u16(),
                ignored = status.as_u16(),
                "response status already written"
            );
            return;
        }
        self.status = Some(status);
    }

    fn write_body(&mut self, body: &[u8]) {
        self.body.extend_from_slice(body);
    }
}

/// Write an error response
///
/// `X-Content-Type-Options: nosniff` is always set. A non-empty `body` is
/// sent as JSON followed by a newline; an empty one sends the status alone.
pub fn send_error<W: ResponseWriter + ?Sized>(w: &mut W, body: &str, status: StatusCode) {
    if !body.is_empty() {
        w.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    w.set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    w.write_status(status);

    if !body.is_empty() {
        let mut line = String::with_capacity(body.len() + 1);
        line.push_str(body);
        line.push('\n');
        w.write_body(line.as_bytes());
    }
}
