//! Datastore resource paths.

use std::fmt;

/// Collection every datastore created without an explicit collection lives in.
pub const DEFAULT_COLLECTION: &str = "default_collection";

/// Branch documents are imported into.
pub const DEFAULT_BRANCH: &str = "default_branch";

/// Identifies the branch of a datastore that imports target.
///
/// Renders as
/// `projects/{project}/locations/{location}/collections/default_collection/dataStores/{datastore}/branches/default_branch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPath {
    pub project_id: String,
    pub location: String,
    pub data_store_id: String,
}

impl BranchPath {
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        data_store_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            data_store_id: data_store_id.into(),
        }
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/collections/{}/dataStores/{}/branches/{}",
            self.project_id, self.location, DEFAULT_COLLECTION, self.data_store_id, DEFAULT_BRANCH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_path_format() {
        let path = BranchPath::new("proj1", "global", "ds1");
        assert_eq!(
            path.to_string(),
            "projects/proj1/locations/global/collections/default_collection/dataStores/ds1/branches/default_branch"
        );
    }
}
