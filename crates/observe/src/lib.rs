//! Logging setup shared by the binaries of this workspace: subscriber
//! initialization, a panic hook that reports through `tracing` and a task
//! local request id that ties related log lines together.
pub mod config;
pub mod panic_hook;
pub mod request_id;
pub mod tracing;

pub use config::Config;
