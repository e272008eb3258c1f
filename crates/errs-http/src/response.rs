use axum::body::Body;
use axum::response::{IntoResponse, Response};
use errs_core::{Error, Failure, HttpErr};

use crate::{BufferedResponse, http_error};

/// Handler error that renders itself through the process-wide translator
///
/// ```ignore
/// async fn get_user(Path(id): Path<u64>) -> ApiResult<Json<User>> {
///     let user = store.find(id).map_err(|err| e!(Kind::NotExist, Parameter::new("id"), err))?;
///     Ok(Json(user))
/// }
/// ```
#[derive(Debug)]
pub struct ApiError(pub Failure);

/// Result returned by handlers that fail with an [`ApiError`]
pub type ApiResult<T> = Result<T, ApiError>;

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self(failure)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err.into())
    }
}

impl From<HttpErr> for ApiError {
    fn from(err: HttpErr) -> Self {
        Self(err.into())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut w = BufferedResponse::default();
        http_error(&mut w, Some(&self.0));
        w.into_response().map(Body::from)
    }
}
