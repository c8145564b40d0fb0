use crate::error::PipelineError;
use crate::planner::{Planner, Section, SectionPlan};
use crate::prompts::Instructions;
use crate::provider::ChatModel;
use crate::telemetry::{LangSmithTracer, RunHandle, RunType};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::worker::write_section;
use super::{synthesize, CompletedSection, Report, Topic};

/// How long a one-shot command waits for queued runs to reach LangSmith
const TRACE_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Plans sections for a topic, writes them in parallel and joins the results
pub struct Pipeline {
    model: Arc<dyn ChatModel>,
    planner: Planner,
    worker_instruction: String,
    max_concurrency: Option<usize>,
    tracer: Option<Arc<LangSmithTracer>>,
}

impl Pipeline {
    pub fn new(model: Arc<dyn ChatModel>, instructions: Instructions) -> Self {
        Self {
            planner: Planner::new(model.clone(), instructions.planner),
            model,
            worker_instruction: instructions.worker,
            max_concurrency: None,
            tracer: None,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: Option<usize>) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_tracer(mut self, tracer: Option<LangSmithTracer>) -> Self {
        self.tracer = tracer.map(Arc::new);
        self
    }

    /// Run only the planning stage
    pub async fn plan(&self, topic: &Topic) -> Result<SectionPlan, PipelineError> {
        Ok(self.planner.plan_for(topic.as_str()).await?)
    }

    /// Plan, write every section concurrently, then synthesize the report
    pub async fn run(&self, topic: &Topic) -> Result<Report, PipelineError> {
        let root = self.trace_start(
            "orchestrator_worker",
            RunType::Chain,
            json!({ "topic": topic.as_str() }),
            None,
        );

        let result = self.execute(topic, root.as_ref()).await;

        self.trace_end(
            root.as_ref(),
            result
                .as_ref()
                .map(|r| json!({ "final_report": r.text }))
                .map_err(|e| e.to_string()),
        );

        result
    }

    /// Give queued trace runs a bounded chance to be sent before the process exits
    pub async fn flush_traces(&self) {
        if let Some(t) = &self.tracer {
            t.flush(TRACE_FLUSH_TIMEOUT).await;
        }
    }

    async fn execute(&self, topic: &Topic, root: Option<&RunHandle>) -> Result<Report, PipelineError> {
        let start = std::time::Instant::now();
        info!("Generating report for topic '{}'", topic);

        // Plan. A plan that fails to parse stops the run before any worker starts.
        let plan_run =
            self.trace_start("orchestrator", RunType::Llm, json!({ "topic": topic.as_str() }), root);
        let plan = self.planner.plan_for(topic.as_str()).await;
        self.trace_end(
            plan_run.as_ref(),
            plan.as_ref()
                .map(|p| json!({ "sections": p.sections }))
                .map_err(|e| e.to_string()),
        );
        let plan = plan?;

        let completed = self.fan_out(&plan, root).await?;

        let synth_run = self.trace_start(
            "synthesizer",
            RunType::Chain,
            json!({ "completed_sections": completed.len() }),
            root,
        );
        let contents: Vec<&str> = completed.iter().map(|c| c.content.as_str()).collect();
        let text = synthesize(&contents);
        self.trace_end(synth_run.as_ref(), Ok(json!({ "final_report": text })));

        info!(
            "Report ready: {} sections, {} chars in {:.1}s",
            completed.len(),
            text.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(Report {
            topic: topic.clone(),
            plan,
            sections: completed,
            text,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// One writer per section; results collected in completion order.
    /// The first failure returns immediately and drops the writers still in flight.
    async fn fan_out(
        &self,
        plan: &SectionPlan,
        root: Option<&RunHandle>,
    ) -> Result<Vec<CompletedSection>, PipelineError> {
        let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        match self.max_concurrency {
            Some(n) => info!("Writing {} sections with concurrency {}", plan.len(), n),
            None => info!("Writing {} sections in parallel", plan.len()),
        }

        let mut futures = FuturesUnordered::new();
        for section in plan.iter() {
            let semaphore = semaphore.clone();
            futures.push(async move {
                let _permit = match semaphore {
                    Some(s) => Some(s.acquire_owned().await?),
                    None => None,
                };
                self.write_traced(section, root).await
            });
        }

        let mut completed = Vec::with_capacity(plan.len());
        while let Some(result) = futures.next().await {
            let section = result?;
            debug!(
                "Completed section '{}' ({}/{})",
                section.section,
                completed.len() + 1,
                plan.len()
            );
            completed.push(section);
        }

        Ok(completed)
    }

    async fn write_traced(
        &self,
        section: &Section,
        root: Option<&RunHandle>,
    ) -> Result<CompletedSection, PipelineError> {
        let run = self.trace_start("llm_call", RunType::Llm, json!({ "section": section }), root);
        let result = write_section(self.model.as_ref(), &self.worker_instruction, section).await;
        self.trace_end(
            run.as_ref(),
            result
                .as_ref()
                .map(|c| json!({ "completed_sections": [c.content] }))
                .map_err(|e| e.to_string()),
        );
        Ok(result?)
    }

    fn trace_start(
        &self,
        name: &str,
        run_type: RunType,
        inputs: serde_json::Value,
        parent: Option<&RunHandle>,
    ) -> Option<RunHandle> {
        match &self.tracer {
            Some(t) => Some(t.start(name, run_type, inputs, parent)),
            None => None,
        }
    }

    fn trace_end(&self, run: Option<&RunHandle>, outcome: Result<serde_json::Value, String>) {
        if let (Some(t), Some(run)) = (&self.tracer, run) {
            t.end(run, outcome);
        }
    }
}
