use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::capability::HttpError;
use crate::{BoxError, Error as ChainError, HttpErr};

/// Any error that may reach the response boundary
///
/// The first two variants know how to describe themselves to a client; an
/// `Opaque` failure is always answered with a generic 500.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    /// Link of an error chain
    #[error(transparent)]
    Error(Box<ChainError>),
    /// Error with an explicit HTTP status
    #[error(transparent)]
    Http(Box<HttpErr>),
    /// Error produced outside this crate
    #[error(transparent)]
    Opaque(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Failure {
    pub fn opaque(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Opaque(Arc::new(err))
    }

    pub fn as_error(&self) -> Option<&ChainError> {
        match self {
            Self::Error(err) => Some(err.as_ref()),
            Self::Http(_) | Self::Opaque(_) => None,
        }
    }

    pub fn as_http(&self) -> Option<&HttpErr> {
        match self {
            Self::Http(err) => Some(err.as_ref()),
            Self::Error(_) | Self::Opaque(_) => None,
        }
    }

    /// The failure seen through its HTTP capabilities, if it has them
    pub fn as_http_error(&self) -> Option<&dyn HttpError> {
        match self {
            Self::Error(err) => Some(err.as_ref()),
            Self::Http(err) => Some(err.as_ref()),
            Self::Opaque(_) => None,
        }
    }
}

impl From<ChainError> for Failure {
    fn from(err: ChainError) -> Self {
        Self::Error(Box::new(err))
    }
}

impl From<HttpErr> for Failure {
    fn from(err: HttpErr) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Self::opaque(err)
    }
}

/// Boxed errors keep their capabilities when they hold one of ours
impl From<BoxError> for Failure {
    fn from(err: BoxError) -> Self {
        let err = match err.downcast::<ChainError>() {
            Ok(err) => return Self::Error(err),
            Err(err) => err,
        };
        match err.downcast::<HttpErr>() {
            Ok(err) => Self::Http(err),
            Err(err) => Self::Opaque(Arc::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::Kind;

    #[test]
    fn boxed_errors_are_recognised() {
        let boxed: BoxError = Box::new(ChainError::new(Kind::Exist));
        assert!(Failure::from(boxed).as_error().is_some());

        let boxed: BoxError = Box::new(HttpErr::new(StatusCode::GONE));
        assert!(Failure::from(boxed).as_http().is_some());

        let boxed: BoxError = "plain".into();
        let failure = Failure::from(boxed);
        assert!(failure.as_http_error().is_none());
        assert_eq!(failure.to_string(), "plain");
    }

    #[test]
    fn display_is_transparent() {
        let mut err = HttpErr::new(StatusCode::BAD_REQUEST);
        err.set_err("bad input");
        assert_eq!(Failure::from(err).to_string(), "bad input");
    }
}
