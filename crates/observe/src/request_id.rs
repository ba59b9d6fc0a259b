//! Task local identifier for correlating log lines and outgoing requests.
//!
//! A polling task sets an id for the duration of one cycle; HTTP clients read
//! it back and forward it as the `X-REQUEST-ID` header so the node's logs can
//! be matched with ours.
use std::future::Future;

tokio::task_local! {
    pub static REQUEST_ID: String;
}

/// Tries to read the `request_id` from this task's storage.
/// Returns `None` outside of a [`set_task_local_storage`] scope.
pub fn get_task_local_storage() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok()
}

/// Sets the task's local id to the passed in value for the given scope.
pub async fn set_task_local_storage<F, R>(id: String, scope: F) -> R
where
    F: Future<Output = R>,
{
    REQUEST_ID.scope(id, scope).await
}
