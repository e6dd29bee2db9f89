//! Failed envelope classification

use super::envelope::{Envelope, EnvelopeBody};
use crate::error::{ApiError, Error, Result};
use crate::types::AuthFailurePolicy;
use serde_json::Value;

/// Turn a failed envelope into an [`ApiError`].
///
/// A 401 fails the call with [`Error::Authentication`] under
/// [`AuthFailurePolicy::Raise`]; every other status is returned as a value.
/// Binary bodies carry no detail, so they produce an error with the status
/// alone.
pub fn classify(envelope: &Envelope, policy: AuthFailurePolicy) -> Result<ApiError> {
    let error = match envelope.body() {
        EnvelopeBody::Json(body) => ApiError::from_body(envelope.http_status(), body),
        EnvelopeBody::Binary(_) => ApiError::from_body(envelope.http_status(), &Value::Null),
    };

    if error.is_unauthorized() && policy == AuthFailurePolicy::Raise {
        let message = if error.message.is_empty() {
            "invalid or missing API token".to_string()
        } else {
            error.message
        };
        return Err(Error::authentication(message));
    }

    Ok(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_returns_api_error_as_value() {
        let envelope = Envelope::json(
            404,
            json!({"code": "NOT_FOUND", "message": "Não encontrado", "processo": "x"}),
        );
        let err = classify(&envelope, AuthFailurePolicy::Raise).unwrap();

        assert_eq!(err, 404u16);
        assert_eq!(err, "not_found");
        assert_eq!(err.detail("processo"), Some(&json!("x")));
    }

    #[test]
    fn test_classify_raises_on_unauthorized() {
        let envelope = Envelope::json(401, json!({"error": "Unauthenticated."}));
        let err = classify(&envelope, AuthFailurePolicy::Raise).unwrap_err();

        assert!(matches!(err, Error::Authentication { ref message } if message == "Unauthenticated."));
    }

    #[test]
    fn test_classify_unauthorized_as_value_when_configured() {
        let envelope = Envelope::json(401, json!({"error": "Unauthenticated."}));
        let err = classify(&envelope, AuthFailurePolicy::ReturnValue).unwrap();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_classify_binary_body() {
        let envelope = Envelope::binary(403, b"%PDF".to_vec());
        let err = classify(&envelope, AuthFailurePolicy::Raise).unwrap();
        assert_eq!(err, 403u16);
        assert!(err.message.is_empty());
    }
}
