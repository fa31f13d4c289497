//! The endpoint: CORS preamble, method gate, analysis, response shaping.
//!
//! Every failure becomes a JSON error body here; only response-builder
//! failures escape to the runtime.

use tracing::{error, warn};
use vercel_runtime::{Body, Request, Response, StatusCode};

use crate::{
    clients::openai::ChatCompleter,
    config::AppConfig,
    error::AppError,
    http::{
        cors::add_cors,
        response::{empty_response, error_response, json_response},
    },
    services::analysis::create_analysis,
};

pub async fn handle(
    req: &Request,
    config: &AppConfig,
    completer: &dyn ChatCompleter,
) -> anyhow::Result<Response<Body>> {
    let resp = match req.method().as_str() {
        "OPTIONS" => empty_response(StatusCode::OK)?,
        "POST" => match create_analysis(req.body(), config, completer).await {
            Ok(analysis) => json_response(StatusCode::OK, &analysis)?,
            Err(err) => failure(&err)?,
        },
        _ => failure(&AppError::MethodNotAllowed)?,
    };
    Ok(add_cors(resp))
}

fn failure(err: &AppError) -> anyhow::Result<Response<Body>> {
    match err {
        AppError::Upstream { status, body, .. } => {
            error!(status, payload = %body, "OpenAI API error");
        }
        AppError::MissingApiKey => error!("OPENAI_API_KEY is not set"),
        e if e.is_client_error() => warn!(error = %e, "rejected request"),
        e => error!(error = %e, "error generating analysis"),
    }
    let (status, body) = error_response(err);
    json_response(status, &body)
}
