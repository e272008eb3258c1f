use http::StatusCode;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Class of failure carried by an [`Error`](crate::Error)
///
/// Drives the HTTP status chosen at the response boundary. `Other` is the
/// zero value and means "unclassified": it is never shown to clients.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Kind {
    /// Unclassified error
    #[default]
    Other,
    /// Invalid operation for this type of item
    Invalid,
    /// Permission denied
    Permission,
    /// External I/O error such as a network failure
    #[strum(serialize = "IO")]
    Io,
    /// Item already exists
    Exist,
    /// Item does not exist
    NotExist,
    /// Information withheld
    Private,
    /// Internal error or inconsistency
    Internal,
    /// Link target does not exist
    BrokenLink,
    /// Error from the database layer
    Database,
    /// Input validation error
    Validation,
    /// Error that was not expected to happen
    Unanticipated,
    /// Malformed or otherwise unacceptable request
    InvalidRequest,
    /// Request lacks valid authentication credentials
    Unauthenticated,
    /// Caller is authenticated but not allowed to perform the request
    Unauthorized,
}

impl Kind {
    /// HTTP status a response for this kind is sent with
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized | Self::Permission => StatusCode::FORBIDDEN,
            Self::Other
            | Self::Invalid
            | Self::Exist
            | Self::NotExist
            | Self::Private
            | Self::BrokenLink
            | Self::Validation
            | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Io | Self::Internal | Self::Database | Self::Unanticipated => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Name shown to API consumers, empty for [`Kind::Other`]
    pub fn client_name(self) -> &'static str {
        if self.is_other() { "" } else { self.into() }
    }

    pub const fn is_other(self) -> bool {
        matches!(self, Self::Other)
    }

    /// Whether responses for this kind must not carry a body
    pub const fn is_auth_failure(self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }
}
