//! Project creation from a template hosted on a [`RepositoryHost`].

use crate::archive::extract;
use crate::config::Config;
use crate::constants::{DEV_BRANCH, INITIAL_COMMIT_MESSAGE, MAIN_BRANCH};
use crate::error::{Error, Result};
use crate::host::RepositoryHost;
use crate::manifest::Manifest;
use crate::processor::{materialize, TemplateParameters};
use log::{debug, error, info};
use std::collections::BTreeMap;

/// Everything needed to create one project from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Template project name inside the template group
    pub template: String,
    /// Group receiving the new project
    pub group: String,
    /// Defaults to the project name when empty
    pub description: String,
    pub parameters: TemplateParameters,
}

impl ScaffoldRequest {
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.group, self.parameters.name)
    }

    pub fn template_path(&self, config: &Config) -> String {
        format!("{}/{}", config.template.namespace, self.template)
    }
}

/// Lists the available templates with their descriptions.
pub fn list_templates(
    host: &dyn RepositoryHost,
    config: &Config,
) -> Result<BTreeMap<String, String>> {
    host.list_projects_in_group(&config.template.namespace)
}

/// Downloads, unpacks and materializes a template project.
pub fn materialize_template(
    host: &dyn RepositoryHost,
    config: &Config,
    template_path: &str,
    parameters: &TemplateParameters,
) -> Result<Manifest> {
    let data = host.project_archive(template_path)?;
    let temp_dir = tempfile::Builder::new().prefix("template").tempdir()?;
    let root = extract(&data, temp_dir.path())?;
    debug!("Unpacked '{}' to {}", template_path, root.display());
    materialize(&root, parameters, &config.template)
}

/// Creates a new project from a template.
///
/// The project is created and configured first; if the template cannot be
/// materialized afterwards the project is deleted again and the original
/// error is returned.
pub fn create_project(
    host: &dyn RepositoryHost,
    config: &Config,
    request: &ScaffoldRequest,
) -> Result<()> {
    let project = request.project_path();
    let template = request.template_path(config);

    if host.project_exists(&project)? {
        return Err(Error::ProjectExists { project });
    }

    let description = if request.description.is_empty() {
        request.parameters.name.as_str()
    } else {
        request.description.as_str()
    };
    host.create_project(&request.parameters.name, &request.group, description)?;
    host.copy_project_variables(&template, &project)?;
    host.enable_runners(&template, &project)?;

    let manifest = match materialize_template(host, config, &template, &request.parameters) {
        Ok(manifest) => manifest,
        Err(err) => {
            error!("Failed to materialize '{template}': {err}");
            match host.delete_project(&project) {
                Ok(()) => info!("Deleted '{project}' after failed materialization"),
                Err(delete_err) => error!("Failed to delete '{project}': {delete_err}"),
            }
            return Err(err);
        }
    };
    debug!("Committing {} files to '{project}'", manifest.len());

    host.create_commit(
        &project,
        manifest.into_commit_request(MAIN_BRANCH, INITIAL_COMMIT_MESSAGE),
    )?;
    host.create_branch(&project, DEV_BRANCH, MAIN_BRANCH)?;
    host.set_default_branch(&project, DEV_BRANCH)?;
    Ok(())
}
