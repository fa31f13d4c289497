use chrono::Utc;
use tracing::{debug, info};

use crate::{
    clients::openai::{ChatCompleter, ChatCompletionRequest},
    config::AppConfig,
    error::{AppError, Result},
    models::{
        analysis::{AnalysisRequest, AnalysisResponse},
        prompt::{SYSTEM_PROMPT, build_research_prompt},
    },
};

/// Validate the body, check the credential, make one completion call.
/// The credential is checked after validation so a bad request is reported as such
/// even on a misconfigured deployment.
pub async fn create_analysis(
    body: &[u8],
    config: &AppConfig,
    completer: &dyn ChatCompleter,
) -> Result<AnalysisResponse> {
    let brief = AnalysisRequest::from_slice(body)?.validate()?;
    let api_key = config.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

    let prompt = build_research_prompt(&brief);
    info!(
        topic_len = brief.story_topic.len(),
        sources = brief.sources.len(),
        has_deadline = brief.deadline.is_some(),
        "analysis: request accepted"
    );
    debug!(
        model = %config.openai.model,
        prompt_len = prompt.len(),
        preview = %prompt.chars().take(80).collect::<String>(),
        "analysis: prompt built"
    );

    let request = ChatCompletionRequest::new(&config.openai.model, SYSTEM_PROMPT, prompt);
    let analysis = completer.complete(api_key, &request).await?;
    info!(analysis_len = analysis.len(), "analysis: completion received");

    Ok(AnalysisResponse::new(analysis, brief, Utc::now()))
}
