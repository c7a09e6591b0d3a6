//! Interface of the remote repository host.
//!
//! glfast performs no network I/O itself; a host client implements this
//! trait and maps its failures to [`Error::HostError`](crate::error::Error).

use crate::error::Result;
use crate::manifest::CommitRequest;
use std::collections::BTreeMap;

/// Operations the scaffold workflow needs from a repository host.
///
/// Projects are addressed by their full path, `group/name`.
pub trait RepositoryHost {
    /// Project name to description for every project directly in `group`.
    fn list_projects_in_group(&self, group: &str) -> Result<BTreeMap<String, String>>;

    fn project_exists(&self, project: &str) -> Result<bool>;

    fn create_project(&self, name: &str, group: &str, description: &str) -> Result<()>;

    fn delete_project(&self, project: &str) -> Result<()>;

    /// Copies CI/CD variables, including protected ones.
    fn copy_project_variables(&self, from: &str, to: &str) -> Result<()>;

    /// Enables on `to` the CI runners enabled on `from`.
    fn enable_runners(&self, from: &str, to: &str) -> Result<()>;

    /// Gzip-compressed tar archive of the default branch.
    fn project_archive(&self, project: &str) -> Result<Vec<u8>>;

    fn create_commit(&self, project: &str, commit: CommitRequest) -> Result<()>;

    fn create_branch(&self, project: &str, branch: &str, from: &str) -> Result<()>;

    fn set_default_branch(&self, project: &str, branch: &str) -> Result<()>;
}
