pub mod captions;
pub mod export;
pub mod info;
pub mod init;
pub mod motion;
pub mod segment;
pub mod template;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use reelcut_project_model::Project;

pub(crate) fn load_project(path: &Path) -> anyhow::Result<Project> {
    Project::load(path).with_context(|| format!("Failed to load project {}", path.display()))
}

pub(crate) fn save_project(project: &Project, path: &Path) -> anyhow::Result<()> {
    project
        .save(path)
        .with_context(|| format!("Failed to save project {}", path.display()))
}
