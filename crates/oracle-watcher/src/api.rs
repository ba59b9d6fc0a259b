//! HTTP endpoint that starts and stops watching for oracle requests.
//!
//! `GET /` starts polling for the configured job unless a polling loop is
//! already running and `POST /stop` ends it. Only one loop runs at a time.

use {
    crate::{
        envelope::{Id, RequestEnvelope},
        errors::EncodingError,
        filter::FilterQueryBuilder,
        poller::{Poller, StopHandle, stop_channel},
        transport::Transport,
    },
    alloy_eips::BlockNumberOrTag,
    axum::{extract::State as AxumState, http::StatusCode, routing},
    std::{
        future::Future,
        sync::{Arc, Mutex},
        time::Duration,
    },
    tokio::net::TcpListener,
};

/// What to watch and how.
pub struct Watch {
    pub builder: FilterQueryBuilder,
    pub job_id: String,
    pub addresses: Vec<String>,
    pub from_block: Option<BlockNumberOrTag>,
    pub to_block: Option<BlockNumberOrTag>,
    pub request_id: Id,
    pub interval: Duration,
    pub transport: Arc<dyn Transport>,
}

impl Watch {
    /// Builds the `eth_getLogs` request polled by every cycle.
    pub fn request(&self) -> Result<RequestEnvelope, EncodingError> {
        let filter = self
            .builder
            .build(&self.job_id, &self.addresses)?
            .with_block_range(self.from_block, self.to_block);
        tracing::debug!(
            job_id = %self.job_id,
            from_block = ?filter.from_block,
            to_block = ?filter.to_block,
            addresses = ?filter.addresses,
            topics = ?filter.topics,
            "built log filter"
        );
        RequestEnvelope::get_logs(self.request_id.clone(), &filter)
    }
}

#[derive(Clone)]
struct State(Arc<Inner>);

struct Inner {
    watch: Watch,
    running: Mutex<Option<StopHandle>>,
}

impl State {
    fn start(&self) -> Result<bool, EncodingError> {
        let mut running = self.0.running.lock().unwrap();
        if running.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Ok(false);
        }

        let watch = &self.0.watch;
        let request = watch.request()?;
        let poller = Poller::new(watch.transport.clone(), &request, watch.interval)?;
        let (handle, signal) = stop_channel();
        tokio::spawn(poller.run(signal));
        tracing::info!(job_id = %watch.job_id, "started polling");
        *running = Some(handle);
        Ok(true)
    }

    fn stop(&self) -> bool {
        match self.0.running.lock().unwrap().take() {
            Some(handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }
}

fn router(state: State) -> axum::Router {
    axum::Router::new()
        .route("/", routing::get(start))
        .route("/stop", routing::post(stop))
        .with_state(state)
}

async fn start(AxumState(state): AxumState<State>) -> (StatusCode, String) {
    let job_id = &state.0.watch.job_id;
    match state.start() {
        Ok(true) => (
            StatusCode::OK,
            format!("Welcome to the server! Watching oracle requests for job {job_id}"),
        ),
        Ok(false) => (StatusCode::OK, format!("Already watching job {job_id}")),
        Err(err) => {
            tracing::warn!(?err, "failed to build log filter");
            (StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

async fn stop(AxumState(state): AxumState<State>) -> (StatusCode, &'static str) {
    if state.stop() {
        tracing::info!("stopped polling on request");
        (StatusCode::OK, "stopped")
    } else {
        (StatusCode::OK, "not watching")
    }
}

/// Serves the trigger endpoint until `shutdown` resolves, then stops any
/// running polling loop.
pub async fn serve(
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
    watch: Watch,
) -> std::io::Result<()> {
    let state = State(Arc::new(Inner {
        watch,
        running: Mutex::new(None),
    }));
    tracing::info!(address = ?listener.local_addr()?, "serving oracle watcher");
    let result = axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown)
        .await;
    state.stop();
    result
}
