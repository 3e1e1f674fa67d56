use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::recorder::{CounterSnapshot, Counters, TimeRecorder};
use crate::stats::Stats;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request, StatusCode, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::warn;

/// Everything a worker task needs to issue one request
#[derive(Debug)]
struct RequestSpec {
    url: Url,
    method: Method,
    body: Option<String>,
    content_type: Option<String>,
    user_agent: String,
}

/// Benchmark engine: dispatches N request attempts with at most C in
/// flight, recording per-request latency and outcome.
///
/// Counters and recorder are owned by the instance, so independent
/// runners can execute concurrently without interference. The HTTP
/// client is shared read-only across all workers.
#[derive(Debug)]
pub struct Runner {
    client: Client,
    spec: Arc<RequestSpec>,
    requests: u64,
    concurrency: u64,
    counters: Arc<Counters>,
    recorder: Arc<TimeRecorder>,
    elapsed: Option<Duration>,
}

impl Runner {
    /// Validates the configuration and builds the shared HTTP client.
    /// Fails fast on an invalid URL, method, or non-positive counts,
    /// before any network activity.
    pub fn new(config: BenchConfig) -> Result<Self, BenchError> {
        let url = Url::parse(&config.url).map_err(|e| BenchError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(BenchError::InvalidUrl {
                url: config.url.clone(),
                reason: "missing host".to_string(),
            });
        }
        if config.requests < 1 {
            return Err(BenchError::InvalidRequests(config.requests));
        }
        if config.concurrency < 1 {
            return Err(BenchError::InvalidConcurrency(config.concurrency));
        }
        let method = Method::from_bytes(config.method.to_uppercase().as_bytes())
            .map_err(|_| BenchError::InvalidMethod(config.method.clone()))?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            spec: Arc::new(RequestSpec {
                url,
                method,
                body: config.body,
                content_type: config.content_type,
                user_agent: config.user_agent,
            }),
            requests: config.requests,
            concurrency: config.concurrency,
            counters: Arc::new(Counters::default()),
            recorder: Arc::new(TimeRecorder::default()),
            elapsed: None,
        })
    }

    /// Runs the benchmark to completion: every attempt reaches a
    /// terminal outcome before this returns. There is no mid-run
    /// cancellation and no retry of failed attempts.
    pub async fn run(&mut self) -> Result<Stats, BenchError> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency as usize));
        let mut handles = Vec::with_capacity(self.requests as usize);
        let started = Instant::now();

        for _ in 0..self.requests {
            // Permit acquired before spawn caps the number in flight
            let permit = Arc::clone(&semaphore).acquire_owned().await?;
            let client = self.client.clone();
            let spec = Arc::clone(&self.spec);
            let counters = Arc::clone(&self.counters);
            let recorder = Arc::clone(&self.recorder);
            handles.push(tokio::spawn(async move {
                execute_one(&client, &spec, &counters, &recorder).await;
                drop(permit);
            }));
        }

        // Join barrier: wait for every attempt to finish
        for handle in handles {
            handle.await?;
        }
        self.elapsed = Some(started.elapsed());

        Stats::from_samples(
            self.spec.url.as_str(),
            self.counters.snapshot(),
            &self.recorder.snapshot(),
        )
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Raw latency samples in milliseconds, for external renderers
    pub fn execution_times(&self) -> Vec<f64> {
        self.recorder.snapshot()
    }

    /// Wall-clock time of the whole run, once it has completed
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }
}

fn build_request(client: &Client, spec: &RequestSpec) -> reqwest::Result<Request> {
    let mut builder = client
        .request(spec.method.clone(), spec.url.clone())
        .header(USER_AGENT, &spec.user_agent)
        .header(ACCEPT, "*/*");
    if let Some(content_type) = &spec.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(body) = &spec.body {
        builder = builder.body(body.clone());
    }
    builder.build()
}

/// Executes exactly one request attempt and records its outcome.
/// Every failure is recovered locally; nothing here aborts the run.
async fn execute_one(
    client: &Client,
    spec: &RequestSpec,
    counters: &Counters,
    recorder: &TimeRecorder,
) {
    counters.record_request();
    let request = match build_request(client, spec) {
        Ok(request) => request,
        Err(err) => {
            // Construction failed before any network activity, so
            // there is no latency sample for this attempt.
            warn!("failed to build request: {err}");
            counters.record_failure();
            return;
        }
    };
    let started = Instant::now();
    let outcome = client.execute(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    // Recorded whether the call succeeded or failed: a refused
    // connection still yields a timed sample.
    recorder.record(elapsed_ms);
    match outcome {
        Err(err) => {
            warn!("request error: {err}");
            counters.record_failure();
        }
        Ok(response) if response.status() != StatusCode::OK => {
            warn!("unexpected status code {}", response.status());
            counters.record_failure();
        }
        Ok(_) => counters.record_success(),
    }
}
