use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::{Code, Kind, Op, Parameter};

/// Marker that separates a link's own info from its cause when rendered
pub(crate) const DELIMITER: &str = "|:";

/// Boxed error accepted anywhere an opaque cause is expected
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// What an [`Error`] wraps
#[derive(Debug, Clone)]
pub enum Cause {
    /// Another link of the chain
    Error(Box<Error>),
    /// Error produced outside this crate
    Opaque(Arc<dyn StdError + Send + Sync + 'static>),
    /// Plain message, e.g. a chain with its location preamble stripped
    Message(String),
}

impl Cause {
    pub fn opaque(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Opaque(Arc::new(err))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// The wrapped chain link, if this cause is one
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Self::Error(err) => Some(err.as_ref()),
            Self::Opaque(_) | Self::Message(_) => None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "{err}"),
            Self::Opaque(err) => write!(f, "{err}"),
            Self::Message(message) => f.write_str(message),
        }
    }
}

impl From<Error> for Cause {
    fn from(err: Error) -> Self {
        Self::Error(Box::new(err))
    }
}

impl From<BoxError> for Cause {
    fn from(err: BoxError) -> Self {
        Self::Opaque(Arc::from(err))
    }
}

/// One link of an error chain
///
/// Carries a classification, optional code, parameter and operation, the
/// wrapped cause and the source location it was created at. The rendered
/// form is `location[|op][|kind][|code][|param]` followed by `|: <cause>`
/// when a cause is present; [`Error::stripped_message`] removes everything up
/// to the first delimiter so clients only see the cause chain.
#[derive(Debug, Clone)]
pub struct Error {
    pub(crate) kind: Kind,
    pub(crate) code: Code,
    pub(crate) param: Parameter,
    pub(crate) op: Option<Op>,
    pub(crate) cause: Option<Cause>,
    pub(crate) location: &'static Location<'static>,
    pub(crate) stripped: bool,
}

impl Error {
    /// Create an error of the given kind located at the caller
    #[track_caller]
    pub fn new(kind: Kind) -> Self {
        Self::from_parts(kind, Code::default(), Parameter::default(), None, Location::caller())
    }

    pub fn from_parts(
        kind: Kind,
        code: Code,
        param: Parameter,
        cause: Option<Cause>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            kind,
            code,
            param,
            op: None,
            cause,
            location,
            stripped: false,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<Code>) -> Self {
        self.code = code.into();
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: impl Into<Parameter>) -> Self {
        self.param = param.into();
        self
    }

    #[must_use]
    pub fn with_op(mut self, op: Op) -> Self {
        self.op = Some(op);
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Wrap an error produced outside this crate
    #[must_use]
    pub fn with_source(self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.with_cause(Cause::opaque(source))
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    pub const fn code(&self) -> &Code {
        &self.code
    }

    pub const fn param(&self) -> &Parameter {
        &self.param
    }

    pub const fn op(&self) -> Option<Op> {
        self.op
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Whether the location preamble was already removed from the chain
    pub const fn is_stripped(&self) -> bool {
        self.stripped
    }

    /// Rendered chain without this link's location preamble
    ///
    /// Returns the full rendering when there is nothing to strip.
    pub fn stripped_message(&self) -> String {
        let rendered = self.to_string();
        rendered
            .find(DELIMITER)
            .and_then(|idx| rendered.get(idx + DELIMITER.len() + 1..))
            .map_or_else(|| rendered.clone(), str::to_owned)
    }

    /// Replace the cause with the stripped chain and mark the link stripped
    ///
    /// A link without a cause keeps none and renders empty once stripped.
    pub(crate) fn strip(&mut self) {
        if self.stripped {
            return;
        }
        if self.cause.is_some() {
            self.cause = Some(Cause::Message(self.stripped_message()));
        }
        self.stripped = true;
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stripped {
            return match &self.cause {
                Some(cause) => write!(f, "{cause}"),
                None => Ok(()),
            };
        }

        write!(f, "{}:{}", self.location.file(), self.location.line())?;
        if let Some(op) = self.op {
            write!(f, "|{op}")?;
        }
        if !self.kind.is_other() {
            write!(f, "|{}", self.kind)?;
        }
        if !self.code.is_empty() {
            write!(f, "|{}", self.code)?;
        }
        if !self.param.is_empty() {
            write!(f, "|{}", self.param)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "{DELIMITER} {cause}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.cause.as_ref()? {
            Cause::Error(err) => Some(err.as_ref()),
            Cause::Opaque(err) => Some(&**err),
            Cause::Message(_) => None,
        }
    }
}

/// Remove the location preamble from a chain link
///
/// Links of the chain become a plain [`Cause::Message`]; any other cause is
/// returned as is.
pub fn strip_stack(cause: &Cause) -> Cause {
    match cause {
        Cause::Error(err) => Cause::Message(err.stripped_message()),
        Cause::Opaque(_) | Cause::Message(_) => cause.clone(),
    }
}
