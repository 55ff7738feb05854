//! Base resource controller creation
//!
//! The compiler only needs *a* controller file to patch. Producing it sits
//! behind [`ControllerScaffolder`] so a project can delegate to its own
//! generator, and tests can simulate a generator that produced nothing.

use std::path::PathBuf;

use super::directive::ControllerTarget;
use crate::error::Result;
use crate::output::GeneratedFile;
use crate::scaffold::{TemplateKind, TemplateRegistry};

/// What a scaffolder did for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// A new controller was written
    Created,
    /// A controller already existed and was kept
    AlreadyExists,
    /// Nothing was produced
    NotProduced,
}

/// Produces the base resource controller for a target
pub trait ControllerScaffolder {
    /// Make sure a resource controller exists for `target`
    ///
    /// `api` selects the API variant without `create` and `edit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller cannot be rendered or written.
    fn scaffold(&self, target: &ControllerTarget, api: bool) -> Result<ScaffoldOutcome>;
}

/// Writes controllers from the built-in template
pub struct TemplateScaffolder {
    templates: TemplateRegistry,
    project_root: PathBuf,
}

impl TemplateScaffolder {
    /// Scaffolder writing under `project_root`
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(project_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            templates: TemplateRegistry::new()?,
            project_root: project_root.into(),
        })
    }

    /// Render the controller for `target` without writing it
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self, target: &ControllerTarget, api: bool) -> Result<GeneratedFile> {
        let content = self.templates.render(
            TemplateKind::Controller,
            &serde_json::json!({
                "namespace": target.namespace,
                "needs_base_import": target.is_nested(),
                "base_namespace": target.base_namespace,
                "model_fqcn": target.model_fqcn,
                "class_name": target.class_name,
                "model_name": target.model,
                "model_var": target.model_var(),
                "api": api,
            }),
        )?;

        Ok(GeneratedFile {
            path: target.path.clone(),
            content,
            description: format!(
                "{} resource controller {}",
                if api { "API" } else { "Web" },
                target.class_name
            ),
        })
    }
}

impl ControllerScaffolder for TemplateScaffolder {
    fn scaffold(&self, target: &ControllerTarget, api: bool) -> Result<ScaffoldOutcome> {
        if self.project_root.join(&target.path).exists() {
            return Ok(ScaffoldOutcome::AlreadyExists);
        }
        self.render(target, api)?.write_under(&self.project_root)?;
        Ok(ScaffoldOutcome::Created)
    }
}
