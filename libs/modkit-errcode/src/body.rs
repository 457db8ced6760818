//! Response body representation of an error value.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ErrorValue;
use crate::registry::ErrorCode;
use crate::status::HttpStatus;

/// The four keys an API response exposes for an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub status_code: HttpStatus,
    pub message: String,
    /// `Display` output of the error, i.e. the message without its causes.
    pub error: String,
}

impl From<&ErrorValue> for ErrorBody {
    fn from(err: &ErrorValue) -> Self {
        Self {
            code: err.code(),
            status_code: err.status(),
            message: err.message().to_owned(),
            error: err.to_string(),
        }
    }
}

impl ErrorValue {
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody::from(self)
    }
}

impl Serialize for ErrorValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_body().serialize(serializer)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::registry::register;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct Reset;

    #[test]
    fn serializes_exactly_four_keys() {
        let code = register(92_000, 400, "param error");
        let err = code
            .error_with_cause("", Reset)
            .with_field("ignored", "in body");

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "code": 92_000,
                "status_code": 400,
                "message": "param error",
                "error": "param error",
            })
        );
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn unregistered_code_body_uses_fallback_status() {
        let err = ErrorCode::from_raw(92_999).error("boom");
        let body = err.to_body();
        assert_eq!(body.status_code.as_u16(), 500);
        assert_eq!(body.message, "boom");
    }

    #[test]
    fn body_round_trips_through_json() {
        let code = register(92_010, 404, "not found");
        let body = code.error("").to_body();
        let json = serde_json::to_string(&body).unwrap();
        let back: ErrorBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
