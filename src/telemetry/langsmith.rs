use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_ENDPOINT: &str = "https://api.smith.langchain.com";
pub const DEFAULT_PROJECT: &str = "default";

/// Upper bound on a single `POST /runs` or `PATCH /runs/{id}`
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// LangSmith settings as read from the environment at startup
#[derive(Debug, Clone, Default)]
pub struct LangSmithSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub project: Option<String>,
    pub endpoint: Option<String>,
}

impl LangSmithSettings {
    pub fn new(
        tracing: Option<&str>,
        api_key: Option<String>,
        project: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            enabled: tracing.map(is_truthy).unwrap_or(false),
            api_key,
            project,
            endpoint,
        }
    }

    /// A tracer when tracing is switched on and a key is present.
    /// Spawns the exporter task, so it must be called inside a tokio runtime.
    pub fn tracer(&self) -> Option<LangSmithTracer> {
        if !self.enabled {
            return None;
        }

        let Some(api_key) = self.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            warn!("LANGSMITH_TRACING is on but LANGSMITH_API_KEY is not set; runs will not be traced");
            return None;
        };

        let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build LangSmith client: {}; runs will not be traced", e);
                return None;
            }
        };

        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let (events, rx) = mpsc::unbounded_channel();
        let exporter = RunExporter {
            client,
            endpoint: endpoint.clone(),
            api_key,
        };
        tokio::spawn(exporter.run(rx));

        Some(LangSmithTracer {
            endpoint,
            project: self
                .project
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            events,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunType {
    Chain,
    Llm,
}

impl std::fmt::Display for RunType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunType::Chain => write!(f, "chain"),
            RunType::Llm => write!(f, "llm"),
        }
    }
}

/// Identity of a started run, used to close it and to parent child runs
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub id: Uuid,
    pub trace_id: Uuid,
    pub dotted_order: String,
}

impl RunHandle {
    fn new(parent: Option<&RunHandle>, start: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4();
        let segment = format!("{}{}", start.format("%Y%m%dT%H%M%S%6fZ"), id);
        match parent {
            Some(p) => Self {
                id,
                trace_id: p.trace_id,
                dotted_order: format!("{}.{}", p.dotted_order, segment),
            },
            None => Self {
                id,
                trace_id: id,
                dotted_order: segment,
            },
        }
    }
}

enum RunEvent {
    Create { name: String, id: Uuid, body: Value },
    Close { id: Uuid, body: Value },
    Flush(oneshot::Sender<()>),
}

/// Reports runs to LangSmith. Calls only queue the run; a background
/// exporter sends them in order. Export failures are logged and dropped.
pub struct LangSmithTracer {
    endpoint: String,
    project: String,
    events: mpsc::UnboundedSender<RunEvent>,
}

impl LangSmithTracer {
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn start(
        &self,
        name: &str,
        run_type: RunType,
        inputs: Value,
        parent: Option<&RunHandle>,
    ) -> RunHandle {
        let start_time = Utc::now();
        let handle = RunHandle::new(parent, start_time);
        let body = create_body(
            &handle,
            name,
            run_type,
            inputs,
            parent,
            &self.project,
            start_time,
        );

        self.queue(RunEvent::Create {
            name: name.to_string(),
            id: handle.id,
            body,
        });
        handle
    }

    pub fn end(&self, handle: &RunHandle, outcome: Result<Value, String>) {
        let body = end_body(handle, outcome, Utc::now());
        self.queue(RunEvent::Close {
            id: handle.id,
            body,
        });
    }

    /// Wait until every run queued so far has been sent, or `within` elapses
    pub async fn flush(&self, within: Duration) {
        let (tx, rx) = oneshot::channel();
        self.queue(RunEvent::Flush(tx));
        if tokio::time::timeout(within, rx).await.is_err() {
            warn!(
                "LangSmith runs still pending after {:.1}s; giving up on them",
                within.as_secs_f64()
            );
        }
    }

    fn queue(&self, event: RunEvent) {
        if self.events.send(event).is_err() {
            debug!("LangSmith exporter has stopped; dropping run event");
        }
    }
}

struct RunExporter {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RunExporter {
    async fn run(self, mut events: mpsc::UnboundedReceiver<RunEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                RunEvent::Create { name, id, body } => {
                    let url = format!("{}/runs", self.endpoint);
                    match self.send(self.client.post(&url), &body).await {
                        Ok(()) => debug!("Started LangSmith run {} ({})", name, id),
                        Err(e) => warn!("Failed to start LangSmith run {}: {}", name, e),
                    }
                }
                RunEvent::Close { id, body } => {
                    let url = format!("{}/runs/{}", self.endpoint, id);
                    if let Err(e) = self.send(self.client.patch(&url), &body).await {
                        warn!("Failed to close LangSmith run {}: {}", id, e);
                    }
                }
                RunEvent::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, body: &Value) -> reqwest::Result<()> {
        request
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn create_body(
    handle: &RunHandle,
    name: &str,
    run_type: RunType,
    inputs: Value,
    parent: Option<&RunHandle>,
    project: &str,
    start_time: DateTime<Utc>,
) -> Value {
    let mut body = json!({
        "id": handle.id,
        "trace_id": handle.trace_id,
        "dotted_order": handle.dotted_order,
        "name": name,
        "run_type": run_type.to_string(),
        "inputs": inputs,
        "start_time": start_time.to_rfc3339(),
        "session_name": project,
    });
    if let Some(parent) = parent {
        body["parent_run_id"] = json!(parent.id);
    }
    body
}

fn end_body(handle: &RunHandle, outcome: Result<Value, String>, end_time: DateTime<Utc>) -> Value {
    let mut body = json!({
        "trace_id": handle.trace_id,
        "dotted_order": handle.dotted_order,
        "end_time": end_time.to_rfc3339(),
    });
    match outcome {
        Ok(outputs) => body["outputs"] = outputs,
        Err(error) => body["error"] = json!(error),
    }
    body
}
