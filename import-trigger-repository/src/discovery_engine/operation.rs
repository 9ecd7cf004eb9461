//! Long-running operation tracking.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::transport::Transport;
use crate::config::MIN_POLL_INTERVAL;
use crate::errors::ImportError;
use crate::interfaces::OperationHandle;
use crate::types::OperationOutcome;

/// A `google.longrunning.Operation` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<OperationStatus>,
}

/// The `google.rpc.Status` of a failed operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// An operation returned by the service that has not been waited on yet.
pub struct PendingOperation {
    transport: Transport,
    initial: Operation,
    poll_interval: Duration,
    max_poll_interval: Duration,
}

impl PendingOperation {
    pub(crate) fn new(
        transport: Transport,
        initial: Operation,
        poll_interval: Duration,
        max_poll_interval: Duration,
    ) -> Self {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        Self {
            transport,
            initial,
            poll_interval,
            max_poll_interval: max_poll_interval.max(poll_interval),
        }
    }

    fn finish(operation: Operation, metadata: Option<Value>) -> Result<OperationOutcome, ImportError> {
        if let Some(status) = operation.error {
            return Err(ImportError::operation_failed(
                operation.name,
                status.code,
                status.message,
            ));
        }

        Ok(OperationOutcome {
            response: operation.response.unwrap_or(Value::Null),
            metadata: metadata.unwrap_or(Value::Null),
        })
    }
}

#[async_trait]
impl OperationHandle for PendingOperation {
    fn name(&self) -> &str {
        &self.initial.name
    }

    #[instrument(skip(self), fields(operation = %self.initial.name))]
    async fn await_result(&self) -> Result<OperationOutcome, ImportError> {
        let mut operation = self.initial.clone();
        let mut metadata = None;
        let mut delay = self.poll_interval;
        let mut polls: u32 = 0;

        loop {
            // Later polls may omit metadata; keep the most recent one seen.
            if operation.metadata.is_some() {
                metadata = operation.metadata.take();
            }

            if operation.done {
                debug!(polls = polls, "Operation done");
                return Self::finish(operation, metadata);
            }

            tokio::time::sleep(delay).await;
            delay = std::cmp::min(delay * 2, self.max_poll_interval);
            polls += 1;

            operation = self.transport.get(&self.initial.name).await?;
            debug!(polls = polls, done = operation.done, "Polled operation");
        }
    }
}
