use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use crate::{BoxError, Cause, Code, Error, Failure, HttpErr, Kind, Op, Parameter};

/// One argument to the [`e!`](crate::e) and [`re!`](crate::re) builders
///
/// Each variant names the field it fills. Conversions exist for every type
/// the builders understand, so arguments are usually passed as plain values.
#[derive(Debug)]
pub enum Arg {
    Status(StatusCode),
    Kind(Kind),
    Code(Code),
    Param(Parameter),
    Op(Op),
    /// Chain link to wrap, subject to deduplication
    Error(Error),
    /// Any other cause
    Cause(Cause),
    /// Value of a type the builders do not accept
    Unsupported { type_name: &'static str, value: String },
}

impl Arg {
    /// Wrap an error produced outside this crate
    pub fn cause(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Cause(Cause::opaque(err))
    }

    pub fn unsupported<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
            value: format!("{value:?}"),
        }
    }
}

impl From<StatusCode> for Arg {
    fn from(status: StatusCode) -> Self {
        Self::Status(status)
    }
}

impl From<u16> for Arg {
    fn from(status: u16) -> Self {
        StatusCode::from_u16(status).map_or_else(|_| Self::unsupported(&status), Self::Status)
    }
}

impl From<i32> for Arg {
    fn from(status: i32) -> Self {
        u16::try_from(status)
            .ok()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .map_or_else(|| Self::unsupported(&status), Self::Status)
    }
}

impl From<Kind> for Arg {
    fn from(kind: Kind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Code> for Arg {
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for Arg {
    fn from(code: &str) -> Self {
        Self::Code(code.into())
    }
}

impl From<String> for Arg {
    fn from(code: String) -> Self {
        Self::Code(code.into())
    }
}

impl From<Parameter> for Arg {
    fn from(param: Parameter) -> Self {
        Self::Param(param)
    }
}

impl From<Op> for Arg {
    fn from(op: Op) -> Self {
        Self::Op(op)
    }
}

impl From<Error> for Arg {
    fn from(err: Error) -> Self {
        Self::Error(err)
    }
}

impl From<HttpErr> for Arg {
    fn from(err: HttpErr) -> Self {
        Self::cause(err)
    }
}

impl From<Cause> for Arg {
    fn from(cause: Cause) -> Self {
        match cause {
            Cause::Error(err) => Self::Error(*err),
            other => Self::Cause(other),
        }
    }
}

impl From<Failure> for Arg {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Error(err) => Self::Error(*err),
            Failure::Http(err) => Self::cause(*err),
            Failure::Opaque(err) => Self::Cause(Cause::Opaque(err)),
        }
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Self::cause(err)
    }
}

impl From<BoxError> for Arg {
    fn from(err: BoxError) -> Self {
        Failure::from(err).into()
    }
}
