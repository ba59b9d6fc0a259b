use {
    crate::{
        envelope::{ProtocolError, RequestEnvelope, ResponseEnvelope},
        errors::EncodingError,
        transport::{Transport, TransportError},
    },
    serde_json::Value,
    std::time::Duration,
    tokio::sync::watch,
};

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Creates a connected stop handle and signal.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (sender, receiver) = watch::channel(false);
    (StopHandle(sender), StopSignal(receiver))
}

/// Ends the polling loop owning the paired [`StopSignal`].
#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.send_replace(true);
    }

    /// Whether the loop has exited (its signal was dropped).
    pub fn is_finished(&self) -> bool {
        self.0.is_closed()
    }
}

#[derive(Clone, Debug)]
pub struct StopSignal(watch::Receiver<bool>);

impl StopSignal {
    /// A dropped handle counts as a stop request since nobody could end the
    /// loop otherwise.
    pub fn is_stopped(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Resolves once a stop was requested or the handle was dropped.
    pub async fn stopped(&mut self) {
        let _ = self.0.wait_for(|stopped| *stopped).await;
    }
}

/// Periodically submits the same `eth_getLogs` request and reports the result.
pub struct Poller<T> {
    transport: T,
    body: Vec<u8>,
    interval: Duration,
}

impl<T: Transport> Poller<T> {
    pub fn new(
        transport: T,
        request: &RequestEnvelope,
        interval: Duration,
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            transport,
            body: request.to_bytes()?,
            interval,
        })
    }

    /// Runs a single cycle: submit the request and extract the `result`.
    pub async fn poll_once(&self) -> Result<Value, PollError> {
        let response = self.transport.submit(self.body.clone()).await?;
        let result = ResponseEnvelope::from_slice(&response)?.into_result()?;
        Ok(result)
    }

    /// Polls until `stop` fires. Failed cycles are logged and retried on the
    /// next interval.
    pub async fn run(self, mut stop: StopSignal) {
        let mut cycle = 0u64;
        let mut errors_in_a_row = 0u32;
        while !stop.is_stopped() {
            cycle += 1;
            let result = observe::request_id::set_task_local_storage(
                format!("poll-{cycle}"),
                self.poll_once(),
            )
            .await;
            match result {
                Ok(result) => {
                    errors_in_a_row = 0;
                    let logs = result.as_array().map(Vec::len);
                    tracing::info!(cycle, ?logs, %result, "received result");
                }
                Err(err) => {
                    errors_in_a_row += 1;
                    tracing::warn!(cycle, errors_in_a_row, ?err, "polling cycle failed");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = stop.stopped() => {}
            }
        }
        tracing::info!(cycles = cycle, "stopped polling");
    }
}
