use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use crate::{Cause, Code, Kind, Parameter};

/// Error that names its HTTP status explicitly
///
/// Unlike [`Error`](crate::Error) it holds a single cause rather than a
/// chain, so it can be filled in directly by handler code. When `status` is
/// unset the status mapped from `kind` is used.
#[derive(Debug, Clone, Default)]
pub struct HttpErr {
    pub status: Option<StatusCode>,
    pub kind: Kind,
    pub code: Code,
    pub param: Parameter,
    pub err: Option<Cause>,
}

impl HttpErr {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Status the response is sent with
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_else(|| self.kind.status_code())
    }

    /// Whether no field besides the status is populated
    ///
    /// Such errors are sent without a response body.
    pub fn status_only(&self) -> bool {
        self.kind.is_other() && self.param.is_empty() && self.code.is_empty() && self.err.is_none()
    }

    /// Attach a plain message as the cause
    pub fn set_err(&mut self, message: impl Into<String>) {
        self.err = Some(Cause::message(message));
    }
}

impl fmt::Display for HttpErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.err {
            Some(err) => write!(f, "{err}"),
            None => Ok(()),
        }
    }
}

impl StdError for HttpErr {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.err.as_ref()? {
            Cause::Error(err) => Some(err.as_ref()),
            Cause::Opaque(err) => Some(&**err),
            Cause::Message(_) => None,
        }
    }
}
