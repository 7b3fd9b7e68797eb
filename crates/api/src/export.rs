//! CSV export of the result log.
//!
//! Nested analysis fields are flattened into `analysis_*` columns; list
//! fields join with `; ` and map fields as sorted `key: value` pairs, so the
//! file opens cleanly in a spreadsheet.

use std::collections::HashMap;
use std::sync::Arc;

use newswire_core::AnalyzedArticle;

const HEADER: &[&str] = &[
    "task_id",
    "title",
    "link",
    "summary",
    "published",
    "analysis_sentiment",
    "analysis_confidence",
    "analysis_affected_entities",
    "analysis_impact_direction",
    "analysis_magnitude",
    "analysis_key_indicators",
    "analysis_risks",
    "analysis_opportunities",
    "analysis_time_horizon",
    "analysis_sector_context",
    "analysis_summary_explanation",
    "processing_time",
    "tokens_per_second",
];

/// Renders all records as a CSV document with a header row.
pub fn to_csv(records: &[Arc<AnalyzedArticle>]) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');

    for record in records {
        let analysis = &record.analysis;
        let row = [
            record.task_id.clone(),
            record.title.clone(),
            record.link.clone(),
            record.summary.clone(),
            record.published.clone(),
            enum_str(&analysis.sentiment),
            analysis.confidence.to_string(),
            join_list(&analysis.affected_entities),
            join_map(&analysis.impact_direction),
            join_map(&analysis.magnitude),
            join_list(&analysis.key_indicators),
            join_list(&analysis.risks),
            join_list(&analysis.opportunities),
            enum_str(&analysis.time_horizon),
            join_map(&analysis.sector_context),
            analysis.summary_explanation.clone(),
            record.processing_time.to_string(),
            record
                .tokens_per_second
                .map(|t| t.to_string())
                .unwrap_or_default(),
        ];

        let escaped: Vec<String> = row.iter().map(|field| escape(field)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }

    out
}

/// Serde wire name of a unit enum variant (`"Bullish"`, `"Short-term"`).
fn enum_str<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn join_list(items: &[String]) -> String {
    items.join("; ")
}

fn join_map<V: serde::Serialize>(map: &HashMap<String, V>) -> String {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| format!("{k}: {}", enum_str(&map[*k])))
        .collect::<Vec<_>>()
        .join("; ")
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
