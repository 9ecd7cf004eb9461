//! Indexing service trait definitions.

use async_trait::async_trait;

use crate::errors::ImportError;
use crate::types::OperationOutcome;
use import_trigger_shared::ImportRequest;

/// Abstract interface for submitting document imports.
///
/// Implementations can be swapped for different backends (Discovery Engine,
/// mock, etc.) so the trigger logic can be tested without a network.
///
/// All implementations must be `Send + Sync` so one client can serve
/// concurrent invocations.
#[async_trait]
pub trait IndexingService: Send + Sync {
    /// Submit an import request.
    ///
    /// Returns as soon as the service has accepted the request; the import
    /// itself runs asynchronously behind the returned handle.
    ///
    /// # Arguments
    ///
    /// * `request` - The import request to submit
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn OperationHandle>)` - Handle to the started operation
    /// * `Err(ImportError)` - If the service could not be reached or rejected the request
    async fn submit_import(
        &self,
        request: &ImportRequest,
    ) -> Result<Box<dyn OperationHandle>, ImportError>;
}

/// Handle to a long-running operation started by [`IndexingService::submit_import`].
#[async_trait]
pub trait OperationHandle: Send + Sync {
    /// Server-assigned operation name.
    fn name(&self) -> &str;

    /// Wait until the operation completes.
    ///
    /// There is no timeout: this resolves only once the service reports the
    /// operation as done, or an error occurs while checking on it.
    ///
    /// # Returns
    ///
    /// * `Ok(OperationOutcome)` - The operation's response and metadata
    /// * `Err(ImportError::OperationFailed)` - If the operation finished with an error
    /// * `Err(ImportError)` - If checking the operation's status failed
    async fn await_result(&self) -> Result<OperationOutcome, ImportError>;
}
