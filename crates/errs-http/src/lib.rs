//! HTTP translation of structured errors
//!
//! [`Translator`] turns an [`errs_core::Failure`] into a status code, one
//! error-level log event and an optional JSON body, and writes the result to
//! a [`ResponseWriter`]. Chain links are answered with the status mapped from
//! their kind and a message stripped of the outer location; auth failures and
//! bare links get the status alone; anything unrecognised becomes a generic
//! 500.

#![allow(clippy::must_use_candidate)]

mod body;
#[cfg(feature = "axum")]
mod response;
mod translate;
mod writer;

pub use body::{ErrorResponse, ServiceError};
#[cfg(feature = "axum")]
pub use response::{ApiError, ApiResult};
pub use translate::{LogRecord, MISSING_ERROR_STATUS, Translation, Translator, http_error};
pub use writer::{BufferedResponse, ResponseWriter, send_error};
