use axum::response::sse::Event;
use serde::Serialize;

use crate::models::report::{AggregateReport, SectionReport};

/// Progress messages pushed to a streaming client, one per attempted section
/// followed by exactly one `complete_analysis`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    SectionAnalysis {
        /// Running rounded total over the included sections so far.
        score: i64,
        sections: Vec<SectionReport>,
    },
    Error(SectionErrorEvent),
    CompleteAnalysis(AggregateReport),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionErrorEvent {
    pub section_name: String,
    pub display_name: String,
    pub error: String,
    pub total_score: i64,
    /// Sections completed successfully before this one failed.
    pub progress: usize,
    pub total_sections: usize,
    pub message: String,
}

impl AnalysisEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisEvent::CompleteAnalysis(_))
    }

    /// One SSE `data:` frame carrying the event as JSON.
    pub fn to_sse_event(&self) -> Event {
        match serde_json::to_string(self) {
            Ok(json) => Event::default().data(json),
            Err(e) => Event::default().comment(format!("unserializable event: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_event_carries_discriminator() {
        let event = AnalysisEvent::SectionAnalysis {
            score: 12,
            sections: vec![],
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({"message_type": "section_analysis", "score": 12, "sections": []}));
    }

    #[test]
    fn test_error_event_flattens_fields() {
        let event = AnalysisEvent::Error(SectionErrorEvent {
            section_name: "headline".to_string(),
            display_name: "Headline".to_string(),
            error: "generation service failed".to_string(),
            total_score: 5,
            progress: 3,
            total_sections: 16,
            message: "Analysis failed".to_string(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["message_type"], "error");
        assert_eq!(value["section_name"], "headline");
        assert_eq!(value["total_sections"], 16);
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_complete_event_is_terminal_and_omits_empty_failures() {
        let event = AnalysisEvent::CompleteAnalysis(AggregateReport {
            score: 40,
            sections: vec![],
            failed_sections: vec![],
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["message_type"], "complete_analysis");
        assert_eq!(value["score"], 40);
        assert!(value.get("failed_sections").is_none());
        assert!(event.is_terminal());
    }
}
