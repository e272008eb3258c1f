use http::StatusCode;

use crate::{Error, HttpErr, Kind};

/// Errors that know how to present themselves in an HTTP response
///
/// The translator in `errs-http` works against this trait; anything that does
/// not implement it is answered with a generic 500.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    fn error_kind(&self) -> Kind;

    /// Machine-readable code, empty when unset
    fn error_code(&self) -> &str;

    /// Offending parameter, empty when unset
    fn error_param(&self) -> &str;

    /// Whether the response must be sent without a body
    fn status_only(&self) -> bool;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

impl HttpError for Error {
    fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn error_kind(&self) -> Kind {
        self.kind
    }

    fn error_code(&self) -> &str {
        self.code.as_str()
    }

    fn error_param(&self) -> &str {
        self.param.as_str()
    }

    // auth failures never leak detail to the client
    fn status_only(&self) -> bool {
        self.kind.is_auth_failure() || (self.code.is_empty() && self.param.is_empty() && self.cause.is_none())
    }

    fn client_message(&self) -> String {
        if self.cause.is_none() {
            return String::new();
        }
        self.stripped_message()
    }
}

impl HttpError for HttpErr {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_kind(&self) -> Kind {
        self.kind
    }

    fn error_code(&self) -> &str {
        self.code.as_str()
    }

    fn error_param(&self) -> &str {
        self.param.as_str()
    }

    fn status_only(&self) -> bool {
        Self::status_only(self)
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
