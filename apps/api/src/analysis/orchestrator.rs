use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::analysis::events::{AnalysisEvent, SectionErrorEvent};
use crate::llm_client::GenerationGateway;
use crate::models::profile::ProfileDocument;
use crate::models::report::{AggregateReport, SectionFailure};
use crate::report::{GuidanceCatalog, ResultFormatter};
use crate::scoring::{standard_evaluators, Evaluator, ScoringConfig, SectionKey};

/// Sections whose raw score counts toward the aggregate. The rest are
/// evaluated and shown but never added to the total.
pub const INCLUDED_IN_TOTAL: [SectionKey; 8] = [
    SectionKey::ProfilePic,
    SectionKey::ProfileContent,
    SectionKey::Headline,
    SectionKey::About,
    SectionKey::Experience,
    SectionKey::Education,
    SectionKey::Skills,
    SectionKey::LinkedinUrl,
];

// ────────────────────────────────────────────────────────────────────────────
// Event sinks
// ────────────────────────────────────────────────────────────────────────────

/// Receives analysis events as they are produced.
#[async_trait]
pub trait EventSink: Send {
    /// Returns false once the receiving side is gone.
    async fn emit(&mut self, event: AnalysisEvent) -> bool;
}

#[async_trait]
impl EventSink for mpsc::Sender<AnalysisEvent> {
    async fn emit(&mut self, event: AnalysisEvent) -> bool {
        self.send(event).await.is_ok()
    }
}

#[async_trait]
impl EventSink for Vec<AnalysisEvent> {
    async fn emit(&mut self, event: AnalysisEvent) -> bool {
        self.push(event);
        true
    }
}

/// For callers that only want the final report.
pub struct DiscardEvents;

#[async_trait]
impl EventSink for DiscardEvents {
    async fn emit(&mut self, _: AnalysisEvent) -> bool {
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Runs every evaluator in order and folds the results into one report.
pub struct ProfileChecker {
    evaluators: Vec<Arc<dyn Evaluator>>,
    formatter: ResultFormatter,
    inclusion: HashSet<SectionKey>,
}

impl ProfileChecker {
    pub fn new(evaluators: Vec<Arc<dyn Evaluator>>, formatter: ResultFormatter) -> Self {
        Self {
            evaluators,
            formatter,
            inclusion: INCLUDED_IN_TOTAL.into_iter().collect(),
        }
    }

    /// The full sixteen-section battery with the default guidance catalog.
    pub fn standard(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        let formatter = ResultFormatter::new(config.clone(), Arc::new(GuidanceCatalog::default()));
        Self::new(standard_evaluators(config, gateway), formatter)
    }

    pub fn section_count(&self) -> usize {
        self.evaluators.len()
    }

    /// Evaluates `document` section by section, emitting one event per
    /// section and a final `complete_analysis`. A failing section becomes an
    /// error event and a `failed_sections` entry; the remaining sections
    /// still run. A closed sink does not stop evaluation.
    pub async fn run(&self, document: &ProfileDocument, sink: &mut dyn EventSink) -> AggregateReport {
        let mut total = 0.0_f64;
        let mut sections = Vec::with_capacity(self.evaluators.len());
        let mut failed_sections = Vec::new();
        let mut sink_open = true;

        for evaluator in &self.evaluators {
            let section = evaluator.section();
            debug!(%section, "Evaluating section");

            let event = match evaluator.evaluate(document).await {
                Ok(result) => {
                    if self.inclusion.contains(&section) {
                        total += result.score;
                    }
                    let report = self.formatter.format(section, result);
                    sections.push(report.clone());
                    AnalysisEvent::SectionAnalysis {
                        score: total.round() as i64,
                        sections: vec![report],
                    }
                }
                Err(e) => {
                    error!(%section, "Section evaluation failed: {e}");
                    failed_sections.push(SectionFailure {
                        section_name: section.as_str().to_string(),
                        display_name: section.display_name().to_string(),
                        error: e.to_string(),
                    });
                    AnalysisEvent::Error(SectionErrorEvent {
                        section_name: section.as_str().to_string(),
                        display_name: section.display_name().to_string(),
                        error: e.to_string(),
                        total_score: total.round() as i64,
                        progress: sections.len(),
                        total_sections: self.evaluators.len(),
                        message: "Analysis failed".to_string(),
                    })
                }
            };

            if sink_open && !sink.emit(event).await {
                debug!("Event sink closed; continuing without a listener");
                sink_open = false;
            }
        }

        let report = AggregateReport {
            score: total.round() as i64,
            sections,
            failed_sections,
        };

        if sink_open {
            sink.emit(AnalysisEvent::CompleteAnalysis(report.clone())).await;
        }
        report
    }
}
