use vercel_runtime::{Body, Response, StatusCode};

use crate::{error::AppError, models::analysis::ErrorBody};

pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to generate analysis. Please try again.";

pub fn error_response(err: &AppError) -> (StatusCode, ErrorBody) {
    match err {
        AppError::MethodNotAllowed => {
            (StatusCode::METHOD_NOT_ALLOWED, ErrorBody::new("Method not allowed"))
        }
        AppError::MissingFields => {
            (StatusCode::BAD_REQUEST, ErrorBody::new("Missing required fields"))
        }
        AppError::InvalidField(detail) => {
            (StatusCode::BAD_REQUEST, ErrorBody::new(format!("Invalid request body: {detail}")))
        }
        AppError::MissingApiKey => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("OpenAI API key not configured"))
        }
        AppError::Upstream { status, message, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            ErrorBody::new(format!(
                "OpenAI API error: {}",
                message.as_deref().unwrap_or("Unknown error")
            )),
        ),
        AppError::MalformedBody(_)
        | AppError::Transport(_)
        | AppError::UpstreamParse(_)
        | AppError::Other(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(INTERNAL_ERROR_MESSAGE))
        }
    }
}

pub fn json_response<T: serde::Serialize>(
    status: StatusCode,
    value: &T,
) -> anyhow::Result<Response<Body>> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(value)?.into())?)
}

pub fn empty_response(status: StatusCode) -> anyhow::Result<Response<Body>> {
    Ok(Response::builder().status(status).body(Body::Empty)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_forwarded() {
        let err = AppError::Upstream {
            status: 429,
            message: Some("rate limited".into()),
            body: String::new(),
        };
        let (status, body) = error_response(&err);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.error, "OpenAI API error: rate limited");
    }

    #[test]
    fn upstream_without_message() {
        let err = AppError::Upstream { status: 503, message: None, body: "<html>".into() };
        let (status, body) = error_response(&err);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "OpenAI API error: Unknown error");
    }

    #[test]
    fn internal_details_are_hidden() {
        for err in [
            AppError::MalformedBody("expected value at line 1".into()),
            AppError::Transport("connection refused".into()),
            AppError::UpstreamParse("no choices".into()),
            AppError::Other(anyhow::anyhow!("boom")),
        ] {
            let (status, body) = error_response(&err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
        }
    }

    #[test]
    fn client_errors() {
        assert_eq!(error_response(&AppError::MethodNotAllowed).0, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_response(&AppError::MissingFields).1.error, "Missing required fields");
        let (status, body) = error_response(&AppError::InvalidField("expected a sequence".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid request body: expected a sequence");
    }
}
