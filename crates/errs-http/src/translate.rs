use std::sync::OnceLock;

use errs_config::ResponseConfig;
use errs_config::response::DEFAULT_FALLBACK_MESSAGE;
use errs_core::{Failure, HttpError, Kind};
use http::StatusCode;

use crate::body::{ErrorResponse, ServiceError};
use crate::writer::{ResponseWriter, send_error};

/// Status sent when the translator is handed no error at all
pub const MISSING_ERROR_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

const UNANTICIPATED_CODE: &str = "Unanticipated";

static GLOBAL: OnceLock<Translator> = OnceLock::new();

/// Turns errors into HTTP responses
///
/// Translation never fails: errors without HTTP capabilities are answered
/// with a generic 500 and only the log sees their text.
#[derive(Debug, Clone)]
pub struct Translator {
    fallback_message: String,
}

/// Outcome of translating one error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub status: StatusCode,
    /// What the server log records
    pub log: LogRecord,
    /// What the client sees, `None` for a status-only response
    pub body: Option<ErrorResponse>,
}

/// Log event emitted for a translated error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub status: StatusCode,
    pub kind: Kind,
    pub code: String,
    pub param: String,
    /// Full rendering of the error, including locations
    pub error: String,
    pub message: &'static str,
}

impl LogRecord {
    /// Emit the record at error level
    pub fn emit(&self) {
        tracing::error!(
            http_status_code = self.status.as_u16(),
            kind = %self.kind,
            code = %self.code,
            parameter = %self.param,
            error = %self.error,
            "{}",
            self.message
        );
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MESSAGE)
    }
}

impl From<&ResponseConfig> for Translator {
    fn from(config: &ResponseConfig) -> Self {
        Self::new(config.fallback_message.clone())
    }
}

impl Translator {
    pub fn new(fallback_message: impl Into<String>) -> Self {
        Self {
            fallback_message: fallback_message.into(),
        }
    }

    /// Make this the process-wide translator used by [`http_error`]
    ///
    /// Only the first call has an effect; the translator is handed back
    /// when one is already installed.
    ///
    /// # Errors
    ///
    /// Returns `self` if a translator was installed before
    pub fn install(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }

    /// The installed translator, or the default one
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::default)
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Work out status, log record and body for an error
    ///
    /// Borrows the error; the stripped client message is computed without
    /// touching the caller's value.
    pub fn translate(&self, err: Option<&Failure>) -> Translation {
        let Some(failure) = err else {
            return Translation {
                status: MISSING_ERROR_STATUS,
                log: LogRecord {
                    status: MISSING_ERROR_STATUS,
                    kind: Kind::Other,
                    code: String::new(),
                    param: String::new(),
                    error: String::new(),
                    message: "no error to translate, response sent without body",
                },
                body: None,
            };
        };

        match failure.as_http_error() {
            Some(err) => Self::translate_known(err),
            None => self.translate_unknown(failure),
        }
    }

    /// Log `err` and write its response
    pub fn write<W: ResponseWriter + ?Sized>(&self, w: &mut W, err: Option<&Failure>) {
        let translation = self.translate(err);
        translation.log.emit();

        let body = translation.body.as_ref().map_or_else(String::new, encode);
        send_error(w, &body, translation.status);
    }

    fn translate_known(err: &dyn HttpError) -> Translation {
        let status = err.status_code();
        let kind = err.error_kind();
        let status_only = err.status_only();

        let log = LogRecord {
            status,
            kind,
            code: err.error_code().to_owned(),
            param: err.error_param().to_owned(),
            error: err.to_string(),
            message: if status_only { "status only error response" } else { "error response" },
        };

        let body = (!status_only).then(|| {
            ErrorResponse::from(ServiceError {
                kind: kind.client_name().to_owned(),
                code: log.code.clone(),
                param: log.param.clone(),
                message: err.client_message(),
            })
        });

        Translation { status, log, body }
    }

    fn translate_unknown(&self, failure: &Failure) -> Translation {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        Translation {
            status,
            log: LogRecord {
                status,
                kind: Kind::Unanticipated,
                code: UNANTICIPATED_CODE.to_owned(),
                param: String::new(),
                error: failure.to_string(),
                message: "unknown error",
            },
            body: Some(ErrorResponse::from(ServiceError {
                kind: Kind::Unanticipated.client_name().to_owned(),
                code: UNANTICIPATED_CODE.to_owned(),
                param: String::new(),
                message: self.fallback_message.clone(),
            })),
        }
    }
}

/// Log `err` and write its response with the process-wide translator
pub fn http_error<W: ResponseWriter + ?Sized>(w: &mut W, err: Option<&Failure>) {
    Translator::global().write(w, err);
}

fn encode(body: &ErrorResponse) -> String {
    serde_json::to_string(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to encode error response");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use errs_core::{Cause, Code, Error, HttpErr, Parameter, e, re};
    use strum::IntoEnumIterator;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::BufferedResponse;

    fn translate(failure: &Failure) -> Translation {
        Translator::default().translate(Some(failure))
    }

    fn json(translation: &Translation) -> String {
        serde_json::to_string(translation.body.as_ref().expect("body")).unwrap()
    }

    #[test]
    fn bare_kind_is_status_only_with_mapped_status() {
        for kind in Kind::iter() {
            let translation = translate(&Error::new(kind).into());
            assert_eq!(translation.status, kind.status_code(), "{kind}");
            assert!(translation.body.is_none(), "{kind}");
        }
    }

    #[test]
    fn body_carries_exactly_the_set_fields() {
        let kinds = [Kind::Other, Kind::Validation, Kind::Database];
        let codes = ["", "bad_format"];
        let params = ["", "email"];

        for kind in kinds {
            for code in codes {
                for param in params {
                    let err = Error::new(kind)
                        .with_code(code)
                        .with_param(param)
                        .with_cause(Cause::message("rejected"));
                    let body = translate(&err.into()).body.expect("body").error;

                    assert_eq!(body.kind, kind.client_name());
                    assert_eq!(body.code, code);
                    assert_eq!(body.param, param);
                    assert_eq!(body.message, "rejected");

                    let encoded = serde_json::to_value(&body).unwrap();
                    let object = encoded.as_object().unwrap();
                    assert_eq!(object.contains_key("kind"), !kind.is_other());
                    assert_eq!(object.contains_key("code"), !code.is_empty());
                    assert_eq!(object.contains_key("param"), !param.is_empty());
                }
            }
        }
    }

    #[test]
    fn chain_body_hides_outer_location() {
        let inner = e!(Kind::Database, io::Error::other("connection reset"));
        let failure = e!(Kind::Internal, "db_unavailable", inner);
        let translation = translate(&failure);

        assert_eq!(translation.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = translation.body.expect("body").error;
        assert_eq!(body.kind, "Internal");
        assert_eq!(body.code, "db_unavailable");
        assert!(body.message.ends_with("|Database|: connection reset"), "{}", body.message);

        let outer = failure.as_error().unwrap();
        let outer_at = format!("{}:{}", outer.location().file(), outer.location().line());
        assert!(translation.log.error.starts_with(&outer_at));
        assert!(!body.message.starts_with(&outer_at));
    }

    #[test]
    fn auth_failures_never_carry_a_body() {
        for kind in [Kind::Unauthenticated, Kind::Unauthorized] {
            let err = Error::new(kind)
                .with_code("token_revoked")
                .with_param("authorization")
                .with_cause(Cause::message("token 1234 was revoked"));
            let translation = translate(&err.into());

            assert_eq!(translation.status, kind.status_code());
            assert!(translation.body.is_none());
            assert!(translation.log.error.contains("token 1234 was revoked"));
        }
    }

    #[test]
    fn translation_leaves_the_error_untouched() {
        let failure = e!(Kind::Validation, Cause::message("too short"));
        let before = failure.to_string();

        let _ = translate(&failure);

        assert_eq!(failure.to_string(), before);
        assert!(!failure.as_error().unwrap().is_stripped());
    }

    #[test]
    fn http_err_uses_its_own_status() {
        let failure = re!(422, Kind::Validation, "weak_password", Parameter::new("password"));
        let translation = translate(&failure);

        assert_eq!(translation.status, StatusCode::UNPROCESSABLE_ENTITY);
        insta::assert_snapshot!(json(&translation), @r#"{"error":{"kind":"Validation","code":"weak_password","param":"password"}}"#);
    }

    #[test]
    fn http_err_status_only() {
        let translation = translate(&HttpErr::new(StatusCode::NOT_FOUND).into());
        assert_eq!(translation.status, StatusCode::NOT_FOUND);
        assert!(translation.body.is_none());
    }

    #[test]
    fn http_err_wrapping_a_chain() {
        let inner = e!(Kind::NotExist, Code::new("no_order"), Cause::message("order 17 not found"));
        let translation = translate(&re!(404, inner));

        insta::assert_snapshot!(json(&translation), @r#"{"error":{"kind":"NotExist","code":"no_order","message":"order 17 not found"}}"#);
    }

    #[test]
    fn http_err_wrapping_a_link_without_cause_omits_message() {
        let inner = e!(Kind::NotExist, Code::new("no_user"));
        let translation = translate(&re!(404, inner));

        assert_eq!(translation.status, StatusCode::NOT_FOUND);
        insta::assert_snapshot!(json(&translation), @r#"{"error":{"kind":"NotExist","code":"no_user"}}"#);
    }

    #[test]
    fn empty_http_err_sends_no_body() {
        let mut w = BufferedResponse::default();
        Translator::default().write(&mut w, Some(&HttpErr::default().into()));

        assert_eq!(w.status(), StatusCode::BAD_REQUEST);
        assert!(w.headers().get(http::header::CONTENT_TYPE).is_none());
        assert!(w.body().is_empty());
    }

    #[test]
    fn unknown_errors_become_unanticipated() {
        for failure in [
            Failure::opaque(io::Error::other("secret connection string leaked")),
            Failure::opaque(io::Error::other("")),
        ] {
            let translation = translate(&failure);

            assert_eq!(translation.status, StatusCode::INTERNAL_SERVER_ERROR);
            insta::allow_duplicates! {
                insta::assert_snapshot!(json(&translation), @r#"{"error":{"kind":"Unanticipated","code":"Unanticipated","message":"Unexpected error - contact support"}}"#);
            }
            assert_eq!(translation.log.error, failure.to_string());
        }
    }

    #[test]
    fn unknown_argument_failures_become_unanticipated() {
        let failure = e!(Kind::Invalid, errs_core::Arg::unsupported(&[1, 2]));
        let translation = translate(&failure);

        assert_eq!(translation.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(translation.body.unwrap().error.kind, "Unanticipated");
    }

    #[test]
    fn fallback_message_is_configurable() {
        let translator = Translator::new("please retry");
        let translation = translator.translate(Some(&Failure::opaque(io::Error::other("boom"))));
        assert_eq!(translation.body.unwrap().error.message, "please retry");
    }

    #[test]
    fn missing_error_is_status_only() {
        let translation = Translator::default().translate(None);
        assert_eq!(translation.status, MISSING_ERROR_STATUS);
        assert!(translation.body.is_none());
    }

    #[test]
    fn write_sends_translated_response() {
        let mut w = BufferedResponse::default();
        let failure = e!(Kind::Exist, "duplicate", Parameter::new("email"), Cause::message("already registered"));
        Translator::default().write(&mut w, Some(&failure));

        assert_eq!(w.status(), StatusCode::BAD_REQUEST);
        assert_eq!(w.headers()[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(
            std::str::from_utf8(w.body()).unwrap(),
            "{\"error\":{\"kind\":\"Exist\",\"code\":\"duplicate\",\"param\":\"email\",\"message\":\"already registered\"}}\n"
        );
    }

    #[test]
    fn write_status_only_sends_no_body() {
        let mut w = BufferedResponse::default();
        Translator::default().write(&mut w, None);

        assert_eq!(w.status(), MISSING_ERROR_STATUS);
        assert!(w.headers().get(http::header::CONTENT_TYPE).is_none());
        assert!(w.body().is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn write_logs_one_error_event_with_full_chain() {
        let failure = e!(Kind::Database, "deadlock", Cause::message("tx 9 aborted"));
        let full = failure.to_string();

        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            Translator::default().write(&mut BufferedResponse::default(), Some(&failure));
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.lines().count(), 1, "{logs}");
        assert!(logs.contains("ERROR"));
        assert!(logs.contains(&full));
        assert!(logs.contains("http_status_code=500"));
    }
}
