//! Trigger handler.
//!
//! Maps one storage event to one incremental import and blocks until the
//! import operation finishes, so the hosting runtime sees the import's
//! success or failure as the invocation's own.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::errors::TriggerError;
use crate::event::StorageEvent;
use import_trigger_repository::{ImportError, IndexingService, OperationHandle, OperationOutcome};
use import_trigger_shared::{BranchPath, ChangeNotification, ImportRequest, MissingFields};

/// Handles storage events by importing the changed object into a datastore.
///
/// The handler holds no per-event state and can serve concurrent invocations.
/// It never retries: a failed import is returned to the caller, whose
/// delivery mechanism decides whether to redeliver the event.
pub struct TriggerHandler {
    service: Arc<dyn IndexingService>,
    branch: BranchPath,
}

impl TriggerHandler {
    /// Create a handler importing into `branch` through `service`.
    pub fn new(service: Arc<dyn IndexingService>, branch: BranchPath) -> Self {
        Self { service, branch }
    }

    /// Pull the bucket and object name out of an event.
    pub fn extract(&self, event: &StorageEvent) -> Result<ChangeNotification, MissingFields> {
        ChangeNotification::from_object_data(event.event_type.clone(), &event.data)
    }

    /// Build the import request for one object locator.
    pub fn build_request(&self, locator: &str) -> ImportRequest {
        ImportRequest::incremental(&self.branch, locator)
    }

    /// Block until `operation` completes and report its outcome.
    pub async fn await_completion(
        &self,
        operation: &dyn OperationHandle,
    ) -> Result<OperationOutcome, ImportError> {
        info!(operation = %operation.name(), "Waiting for import operation to complete");

        let outcome = operation.await_result().await?;

        info!(response = %outcome.response, "Import operation response");
        info!(metadata = %outcome.metadata, "Import operation metadata");

        Ok(outcome)
    }

    /// Handle one storage event.
    ///
    /// Returns `Ok(())` both when the object was imported and when the event
    /// did not name an object. Any failure while submitting or waiting is
    /// logged with the object's locator and returned.
    #[instrument(skip(self, event), fields(event_id = event.id.as_deref().unwrap_or_default()))]
    pub async fn handle(&self, event: &StorageEvent) -> Result<(), TriggerError> {
        let bucket = event.data.bucket.as_deref().unwrap_or_default();
        let file = event.data.name.as_deref().unwrap_or_default();

        // A skipped event logs exactly one line.
        let notification = match self.extract(event) {
            Ok(notification) => notification,
            Err(missing) => {
                warn!(
                    event_type = %event.event_type,
                    bucket = bucket,
                    file = file,
                    missing = %missing,
                    "No file name or bucket name found in the event data, skipping"
                );
                return Ok(());
            }
        };

        info!(
            event_type = %notification.event_kind,
            bucket = bucket,
            file = file,
            content_type = event.data.content_type.as_deref().unwrap_or_default(),
            "Received storage event"
        );

        let locator = notification.locator();
        info!(locator = %locator, "Constructed GCS URI");

        match self.import(&locator).await {
            Ok(_) => {
                info!(
                    locator = %locator,
                    data_store = %self.branch.data_store_id,
                    "Successfully imported document"
                );
                Ok(())
            }
            Err(e) => {
                error!(locator = %locator, error = %e, "Error importing document");
                Err(e.into())
            }
        }
    }

    async fn import(&self, locator: &str) -> Result<OperationOutcome, ImportError> {
        let request = self.build_request(locator);

        info!(locator = %locator, parent = %request.parent, "Starting document import");
        let operation = self.service.submit_import(&request).await?;

        self.await_completion(operation.as_ref()).await
    }
}
