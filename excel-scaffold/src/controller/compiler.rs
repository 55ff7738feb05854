//! Controller compiler orchestrator
//!
//! For each directive row: scaffold the controller, emit form requests,
//! patch the controller's imports and store/update regions, then register
//! the resource route. A failing row becomes a warning and the run goes on.

use std::path::Path;

use super::directive::{ControllerDirective, ControllerTarget};
use super::inject::{ensure_imports, replace_region, PatchResult};
use super::routes::{self, RouteRegistration};
use super::scaffolder::{ControllerScaffolder, ScaffoldOutcome, TemplateScaffolder};
use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::output::{read_file, write_file, GeneratedFile};
use crate::report::{ActionKind, RunReport};
use crate::scaffold::{TemplateKind, TemplateRegistry};
use crate::sheet;

/// Compiles directive rows into controllers, requests and routes
pub struct ControllerCompiler<'a> {
    config: &'a ScaffoldConfig,
    templates: TemplateRegistry,
    scaffolder: Box<dyn ControllerScaffolder + 'a>,
}

impl<'a> ControllerCompiler<'a> {
    /// Compiler using the built-in controller template
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(config: &'a ScaffoldConfig) -> Result<Self> {
        let scaffolder = TemplateScaffolder::new(config.project_root.clone())?;
        Self::with_scaffolder(config, Box::new(scaffolder))
    }

    /// Compiler delegating controller creation to `scaffolder`
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn with_scaffolder(
        config: &'a ScaffoldConfig,
        scaffolder: Box<dyn ControllerScaffolder + 'a>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            templates: TemplateRegistry::new()?,
            scaffolder,
        })
    }

    /// Run the whole pipeline for `input`
    ///
    /// # Errors
    ///
    /// Returns an error only if the directive sheet is missing or
    /// unreadable. Row failures are recorded as warnings.
    pub fn run(&self, input: &Path) -> Result<RunReport> {
        let rows = sheet::read_rows(input, ControllerDirective::WIDTH)?;
        let mut report = RunReport::new();

        for row in &rows {
            let Some(directive) = ControllerDirective::from_sheet(row) else {
                tracing::debug!(row = row.number, "skipping directive row without model");
                continue;
            };

            if !directive.generate_controller {
                report.record(
                    ActionKind::Skipped,
                    &directive.model,
                    "controller not requested",
                );
                continue;
            }

            if let Err(error) = self.process(&directive, &mut report) {
                report.record(
                    ActionKind::Warning,
                    &directive.model,
                    format!("row {} failed: {error}", row.number),
                );
            }
        }

        Ok(report)
    }

    /// Handle one directive whose controller flag is set
    ///
    /// # Errors
    ///
    /// Returns an error if any artifact of the row cannot be rendered, read
    /// or written.
    pub fn process(&self, directive: &ControllerDirective, report: &mut RunReport) -> Result<()> {
        let target = ControllerTarget::new(directive, self.config);
        let controller = target.path.display().to_string();

        match self.scaffolder.scaffold(&target, directive.api)? {
            ScaffoldOutcome::Created => {
                report.record(ActionKind::Created, &controller, "resource controller");
            }
            ScaffoldOutcome::AlreadyExists => {
                report.record(ActionKind::AlreadyExists, &controller, "controller kept");
            }
            ScaffoldOutcome::NotProduced => {}
        }

        if directive.generate_requests {
            for class_name in [directive.store_request(), directive.update_request()] {
                let file = self.render_request(&class_name, &directive.model)?;
                self.emit_request(&file, report)?;
            }
        }

        let controller_path = self.config.resolve(&target.path);
        if !controller_path.exists() {
            report.record(
                ActionKind::Warning,
                &controller,
                format!("controller not found: {}", target.fqcn),
            );
            return Ok(());
        }

        self.patch_controller(&controller_path, directive, &target, report)?;

        let route = RouteRegistration::new(directive, &target);
        let route_file = if directive.api {
            &self.config.paths.api_routes
        } else {
            &self.config.paths.web_routes
        };
        if routes::register(&self.config.resolve(route_file), &route)? {
            report.record(
                ActionKind::Patched,
                route_file.display().to_string(),
                route.line(),
            );
        } else {
            report.record(
                ActionKind::AlreadyExists,
                route_file.display().to_string(),
                route.line(),
            );
        }

        Ok(())
    }

    /// Render a form request
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_request(&self, class_name: &str, model: &str) -> Result<GeneratedFile> {
        let content = self.templates.render(
            TemplateKind::Request,
            &serde_json::json!({
                "namespace": self.config.namespaces.requests,
                "class_name": class_name,
                "model_name": model,
            }),
        )?;

        Ok(GeneratedFile {
            path: self.config.paths.requests_dir.join(format!("{class_name}.php")),
            content,
            description: format!("Form request {class_name}"),
        })
    }

    fn emit_request(&self, file: &GeneratedFile, report: &mut RunReport) -> Result<()> {
        let subject = file.path.display().to_string();
        let existed = self.config.resolve(&file.path).exists();

        if existed && !self.config.generation.overwrite_requests {
            report.record(ActionKind::AlreadyExists, subject, "form request kept");
            return Ok(());
        }

        file.write_under(&self.config.project_root)?;
        report.record(
            if existed {
                ActionKind::Overwritten
            } else {
                ActionKind::Created
            },
            subject,
            &file.description,
        );
        Ok(())
    }

    fn patch_controller(
        &self,
        path: &Path,
        directive: &ControllerDirective,
        target: &ControllerTarget,
        report: &mut RunReport,
    ) -> Result<()> {
        let subject = target.path.display().to_string();
        let store = directive.store_request();
        let update = directive.update_request();
        let requests = &self.config.namespaces.requests;

        let original = read_file(path)?;
        let mut content = original.clone();

        let imports = [format!("{requests}\\{store}"), format!("{requests}\\{update}")];
        match ensure_imports(&content, &imports) {
            PatchResult::Changed(patched) => content = patched,
            PatchResult::Unchanged => {}
            PatchResult::NoAnchor => report.record(
                ActionKind::Skipped,
                &subject,
                "no namespace declaration; imports not added",
            ),
        }

        let store_body = self.templates.render(
            TemplateKind::StoreMethod,
            &serde_json::json!({ "request_class": store }),
        )?;
        let update_body = self.templates.render(
            TemplateKind::UpdateMethod,
            &serde_json::json!({
                "request_class": update,
                "model_name": target.model,
                "model_var": target.model_var(),
            }),
        )?;

        for (region, body) in [("store", store_body), ("update", update_body)] {
            match replace_region(&content, region, &body) {
                PatchResult::Changed(patched) => content = patched,
                PatchResult::Unchanged => {}
                PatchResult::NoAnchor => report.record(
                    ActionKind::Skipped,
                    &subject,
                    format!("no {region} region; method left unchanged"),
                ),
            }
        }

        if content == original {
            report.record(ActionKind::AlreadyExists, subject, "requests already injected");
        } else {
            write_file(path, &content)?;
            report.record(ActionKind::Patched, subject, "form requests injected");
        }
        Ok(())
    }
}
