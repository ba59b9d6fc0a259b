use {
    reqwest::{Client, StatusCode, Url, header},
    std::{
        fmt::{Debug, Formatter},
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    },
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to send request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(StatusCode),
}

/// Point to point request/response channel to the node.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends a serialized request and returns the raw response body.
    async fn submit(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn submit(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        (**self).submit(body).await
    }
}

/// Sends requests as JSON `POST`s to a node's HTTP endpoint.
pub struct HttpTransport {
    client: Client,
    url: Url,
    /// Name of the transport used in logs to distinguish different transports.
    name: String,
    /// Only used for logging.
    id: AtomicUsize,
}

impl HttpTransport {
    pub fn new(client: Client, url: Url, name: String) -> Self {
        Self {
            client,
            url,
            name,
            id: AtomicUsize::new(0),
        }
    }
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish()
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let id = self.id.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(
            name = %self.name,
            %id,
            body = %String::from_utf8_lossy(&body),
            "executing request"
        );
        let mut request = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-RPC-REQUEST-ID", id.to_string())
            .body(body);
        if let Some(request_id) = observe::request_id::get_task_local_storage() {
            request = request.header("X-REQUEST-ID", request_id);
        }

        let response = request.send().await.inspect_err(|err| {
            tracing::warn!(name = %self.name, %id, %err, "failed to send request");
        })?;
        let status = response.status();
        let bytes = response.bytes().await.inspect_err(|err| {
            tracing::warn!(name = %self.name, %id, %err, "failed to get response body");
        })?;
        // Log the raw text before decoding to get more information on responses that
        // aren't valid json.
        tracing::trace!(
            name = %self.name,
            %id,
            body = %String::from_utf8_lossy(&bytes).trim(),
            "received response"
        );
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }
        Ok(bytes.to_vec())
    }
}
