use crate::models::analysis::ResearchBrief;

pub const SYSTEM_PROMPT: &str = "You are a data research assistant specializing in providing \
                                 journalists with accurate, well-sourced data and analysis. \
                                 Always cite specific, verifiable sources.";

pub const ANY_SOURCES: &str = "Any authoritative sources";
pub const NO_DEADLINE: &str = "Not specified";

pub fn build_research_prompt(brief: &ResearchBrief) -> String {
    let sources =
        if brief.sources.is_empty() { ANY_SOURCES.to_string() } else { brief.sources.join(", ") };
    let deadline = brief.deadline.as_deref().unwrap_or(NO_DEADLINE);

    format!(
        "You are a data research assistant for journalists. Your task is to provide comprehensive \
         data analysis with verifiable sources.

Story Topic: {topic}
Data Needed: {data}
Timeframe: {timeframe}
Preferred Sources: {sources}
Deadline: {deadline}

Please provide:
1. Key statistical findings relevant to the story topic
2. Historical context and benchmarks
3. Expert analysis and insights
4. For EACH data point, provide specific, verifiable sources with:
   - Organization name (e.g., Bureau of Labor Statistics)
   - Report/document title
   - Publication date
   - Relevant URL if available

Format your response clearly with:
- Main findings organized by topic
- Each finding followed by its sources in brackets
- Statistical data with proper context
- Any important caveats or limitations

Focus on accuracy and verifiability. Only cite real, existing sources.",
        topic = brief.story_topic,
        data = brief.data_needed,
        timeframe = brief.timeframe,
    )
}
