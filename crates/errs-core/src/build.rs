//! Variadic error builders
//!
//! [`e`] assembles a chain link ([`Error`]) and [`re`] a response error
//! ([`HttpErr`]) from a list of [`Arg`]s. Both are normally reached through
//! the [`e!`](crate::e) and [`re!`](crate::re) macros, which convert each
//! argument and capture the caller's location.
//!
//! When the wrapped cause is itself a chain link, kind, code and parameter
//! are deduplicated across the two links: a value repeated on the inner link
//! is cleared there, and a value set only on the inner link is moved up to
//! the new one.

use std::panic::Location;

use http::StatusCode;
use thiserror::Error;

use crate::{Arg, Cause, Code, Error, Failure, HttpErr, Kind, Op, Parameter};

/// Returned in place of an error when a builder receives an argument it
/// cannot place
#[derive(Debug, Error)]
#[error("unknown type {type_name}, value {value} in error call")]
pub struct UnknownArgument {
    pub type_name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Error,
    Http,
}

#[derive(Debug, Default)]
struct Fields {
    status: Option<StatusCode>,
    kind: Kind,
    code: Code,
    param: Parameter,
    op: Option<Op>,
    cause: Option<Cause>,
}

/// Build a chain link from its arguments
///
/// Status codes are not accepted: a link's status always follows its kind.
/// Returns an opaque [`UnknownArgument`] failure when an argument cannot be
/// placed.
///
/// # Panics
///
/// Panics when called without arguments.
#[track_caller]
pub fn e(args: Vec<Arg>) -> Failure {
    assert!(!args.is_empty(), "call to e! with no arguments");
    let location = Location::caller();

    let mut fields = match collect(args, Target::Error, location) {
        Ok(fields) => fields,
        Err(err) => return Failure::opaque(err),
    };
    dedup(&mut fields);

    let mut err = Error::from_parts(fields.kind, fields.code, fields.param, fields.cause, location);
    err.op = fields.op;
    err.into()
}

/// Build a response error from its arguments
///
/// A wrapped chain link is logged in full, then stripped of its location
/// preamble before it is attached. Operation names are not accepted.
///
/// # Panics
///
/// Panics when called without arguments.
#[track_caller]
pub fn re(args: Vec<Arg>) -> Failure {
    assert!(!args.is_empty(), "call to re! with no arguments");
    let location = Location::caller();

    let mut fields = match collect(args, Target::Http, location) {
        Ok(fields) => fields,
        Err(err) => return Failure::opaque(err),
    };
    dedup(&mut fields);

    HttpErr {
        status: fields.status,
        kind: fields.kind,
        code: fields.code,
        param: fields.param,
        err: fields.cause,
    }
    .into()
}

fn collect(args: Vec<Arg>, target: Target, location: &'static Location<'static>) -> Result<Fields, UnknownArgument> {
    let mut fields = Fields::default();

    for arg in args {
        match arg {
            Arg::Status(status) if target == Target::Http => fields.status = Some(status),
            Arg::Op(op) if target == Target::Error => fields.op = Some(op),
            Arg::Kind(kind) => fields.kind = kind,
            Arg::Code(code) => fields.code = code,
            Arg::Param(param) => fields.param = param,
            Arg::Error(mut err) => {
                if target == Target::Http {
                    log_and_strip(&mut err, fields.status);
                }
                fields.cause = Some(err.into());
            }
            Arg::Cause(cause) => fields.cause = Some(cause),
            other => return Err(bad_call(other, location)),
        }
    }

    Ok(fields)
}

/// Log the full chain before it is cut down for the client
fn log_and_strip(err: &mut Error, status: Option<StatusCode>) {
    tracing::error!(
        error = %err,
        http_status_code = status.map_or(0, |status| status.as_u16()),
        kind = %err.kind,
        parameter = %err.param,
        code = %err.code,
        "response error"
    );
    err.strip();
}

fn bad_call(arg: Arg, location: &'static Location<'static>) -> UnknownArgument {
    let err = match arg {
        Arg::Unsupported { type_name, value } => UnknownArgument { type_name, value },
        Arg::Status(status) => UnknownArgument {
            type_name: "StatusCode",
            value: status.to_string(),
        },
        Arg::Op(op) => UnknownArgument {
            type_name: "Op",
            value: op.to_string(),
        },
        other => UnknownArgument {
            type_name: "Arg",
            value: format!("{other:?}"),
        },
    };

    tracing::error!(
        file = location.file(),
        line = location.line(),
        type_name = err.type_name,
        value = %err.value,
        "bad call to error builder"
    );

    err
}

fn dedup(fields: &mut Fields) {
    let mut cause = fields.cause.take();
    if let Some(Cause::Error(prev)) = cause.as_mut() {
        merge(fields, prev);
    }
    fields.cause = cause;
}

/// Collapse kind, code and parameter repeated across two adjacent links
fn merge(cur: &mut Fields, prev: &mut Error) {
    if prev.kind == cur.kind {
        prev.kind = Kind::Other;
    }
    if cur.kind.is_other() {
        cur.kind = std::mem::take(&mut prev.kind);
    }

    if prev.code == cur.code {
        prev.code = Code::default();
    }
    if cur.code.is_empty() {
        cur.code = prev.code.take();
    }

    if prev.param == cur.param {
        prev.param = Parameter::default();
    }
    if cur.param.is_empty() {
        cur.param = prev.param.take();
    }
}
