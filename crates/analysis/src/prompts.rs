//! Prompts and the structured-output schema sent to the model.

use serde_json::{json, Value};

pub const SYSTEM_PROMPT: &str = "\
You are a world-class financial analyst working for institutional investors.
You must analyze the following news article and extract structured, investor-focused insights.

Your output should identify sentiment, impacted companies/sectors, likely direction and magnitude of financial impact, key performance indicators, risks, opportunities, time horizon relevance, and a concise summary.

Be precise, fact-based, and avoid speculation that is not grounded in the article text.";

/// Formats the user prompt with the news article content.
pub fn user_prompt(content: &str) -> String {
    format!(
        "Analyze the following news article for investors:\n\n\
         Article:\n{content}\n\n\
         Please return your analysis strictly in the JSON schema format provided."
    )
}

/// JSON schema constraining the model's response to the `NewsAnalysis` shape.
pub fn response_schema() -> Value {
    let sentiment = json!({ "type": "string", "enum": ["Bullish", "Bearish", "Neutral"] });

    json!({
        "type": "object",
        "properties": {
            "sentiment": sentiment,
            "confidence": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
            "affected_entities": { "type": "array", "items": { "type": "string" } },
            "impact_direction": {
                "type": "object",
                "additionalProperties": {
                    "type": "string",
                    "enum": ["Positive", "Negative", "Neutral"]
                }
            },
            "magnitude": {
                "type": "object",
                "additionalProperties": { "type": "string", "enum": ["Low", "Medium", "High"] }
            },
            "key_indicators": { "type": "array", "items": { "type": "string" } },
            "risks": { "type": "array", "items": { "type": "string" } },
            "opportunities": { "type": "array", "items": { "type": "string" } },
            "time_horizon": {
                "type": "string",
                "enum": ["Short-term", "Medium-term", "Long-term"]
            },
            "sector_context": { "type": "object", "additionalProperties": sentiment },
            "summary_explanation": { "type": "string" }
        },
        "required": [
            "sentiment", "confidence", "affected_entities", "impact_direction",
            "magnitude", "key_indicators", "risks", "opportunities",
            "time_horizon", "sector_context", "summary_explanation"
        ]
    })
}
