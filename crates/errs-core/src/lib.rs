//! Structured errors for HTTP services
//!
//! An [`Error`] is one link of a causal chain: a [`Kind`], an optional
//! [`Code`], [`Parameter`] and [`Op`], the wrapped [`Cause`] and the location
//! it was created at. [`HttpErr`] is a flatter alternative that names its
//! HTTP status directly. Both are usually assembled with the [`e!`] and
//! [`re!`] builders and travel up the stack as a [`Failure`] until the
//! response boundary translates them.

#![allow(clippy::must_use_candidate)]

mod arg;
pub mod build;
mod capability;
mod error;
mod failure;
mod fields;
mod http_err;
mod kind;

pub use arg::Arg;
pub use build::UnknownArgument;
pub use capability::HttpError;
pub use error::{BoxError, Cause, Error, strip_stack};
pub use failure::Failure;
pub use fields::{Code, Op, Parameter};
pub use http_err::HttpErr;
pub use kind::Kind;

/// Build a chain link ([`Error`]) from a list of arguments
///
/// Each argument is converted with [`Arg::from`]: a [`Kind`], a code (`&str`,
/// `String` or [`Code`]), a [`Parameter`], an [`Op`], a chain link to wrap,
/// or any other supported error as the cause. The last argument of each kind
/// wins.
///
/// ```
/// use errs_core::{Kind, Parameter, e};
///
/// let err = e!(Kind::Validation, "too_short", Parameter::new("password"));
/// assert_eq!(err.as_error().unwrap().kind(), Kind::Validation);
/// ```
///
/// # Panics
///
/// Panics when invoked without arguments.
#[macro_export]
macro_rules! e {
    ($($arg:expr),* $(,)?) => {
        $crate::build::e(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Build a response error ([`HttpErr`]) from a list of arguments
///
/// Accepts the same arguments as [`e!`] plus an HTTP status (`u16`, `i32`
/// or [`http::StatusCode`]), but no [`Op`].
///
/// ```
/// use errs_core::{Kind, re};
///
/// let err = re!(409, Kind::Exist, "duplicate_email");
/// assert_eq!(err.as_http().unwrap().status(), http::StatusCode::CONFLICT);
/// ```
///
/// # Panics
///
/// Panics when invoked without arguments.
#[macro_export]
macro_rules! re {
    ($($arg:expr),* $(,)?) => {
        $crate::build::re(::std::vec![$($crate::Arg::from($arg)),*])
    };
}
