//! Resource route registration
//!
//! Appends `Route::resource` / `Route::apiResource` lines to a route file and
//! imports the controller class at the top of it. Both edits are skipped when
//! already present.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::directive::{ControllerDirective, ControllerTarget};
use super::inject::{PatchResult, USE_LINE};
use crate::error::Result;
use crate::output::{read_file, write_file};
use crate::scaffold::TemplateHelpers;

const OPEN_TAG: &str = "<?php";

/// Opening tag plus an optional leading `declare(...)` statement
static FILE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<\?php\s*(?:declare\s*\([^)]*\)\s*;\s*)?").expect("Invalid regex")
});

/// A resource route for one controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    /// Resource URI
    pub uri: String,
    /// Route name prefix (`admin.employees`)
    pub name_prefix: String,
    /// Fully qualified controller class
    pub controller_fqcn: String,
    /// Controller class name
    pub controller: String,
    /// Register with `apiResource`
    pub api: bool,
}

impl RouteRegistration {
    /// Route for a directive's controller
    ///
    /// The URI is the route prefix without surrounding slashes, or the
    /// kebab-case plural of the model.
    #[must_use]
    pub fn new(directive: &ControllerDirective, target: &ControllerTarget) -> Self {
        let uri = directive
            .route_prefix
            .as_deref()
            .map(|prefix| prefix.trim_matches('/'))
            .filter(|prefix| !prefix.is_empty())
            .map_or_else(
                || TemplateHelpers::to_route_uri(&directive.model),
                ToString::to_string,
            );

        Self {
            name_prefix: uri.replace('/', "."),
            uri,
            controller_fqcn: target.fqcn.clone(),
            controller: target.class_name.clone(),
            api: directive.api,
        }
    }

    /// Registration statement
    #[must_use]
    pub fn line(&self) -> String {
        let method = if self.api { "apiResource" } else { "resource" };
        format!(
            "Route::{method}('{}', {}::class)->names('{}');",
            self.uri, self.controller, self.name_prefix
        )
    }

    /// Import statement for the controller
    #[must_use]
    pub fn import(&self) -> String {
        format!("use {};", self.controller_fqcn)
    }

    /// Apply the import and the route line to route-file content
    #[must_use]
    pub fn apply(&self, content: &str) -> PatchResult {
        let import = self.import();
        let line = self.line();
        let mut patched = content.to_string();

        if !patched.contains(&import) {
            patched = insert_import(&patched, &import);
        }

        if !patched.contains(&line) {
            if !patched.ends_with('\n') {
                patched.push('\n');
            }
            patched.push('\n');
            patched.push_str(&line);
            patched.push('\n');
        }

        if patched == content {
            PatchResult::Unchanged
        } else {
            PatchResult::Changed(patched)
        }
    }
}

/// Put `import` ahead of the first `use` line, else right after the header
///
/// The header is the opening tag and a leading `declare(...)`, which PHP
/// requires to stay the first statement.
fn insert_import(content: &str, import: &str) -> String {
    let Some(header) = FILE_HEADER.find(content) else {
        return if content.trim().is_empty() {
            format!("{OPEN_TAG}\n\n{import}\n")
        } else {
            format!("{OPEN_TAG}\n\n{import}\n\n{content}")
        };
    };

    if let Some(first_use) = USE_LINE.find_at(content, header.end()) {
        let at = first_use.start();
        return format!("{}{import}\n{}", &content[..at], &content[at..]);
    }

    let rest = &content[header.end()..];
    let gap = if rest.is_empty() { "" } else { "\n" };
    format!("{}\n\n{import}\n{gap}{rest}", header.as_str().trim_end())
}

/// Register `route` in `route_file`, creating the file when missing
///
/// Returns `true` when the file was written.
///
/// # Errors
///
/// Returns an error if the route file cannot be read or written.
pub fn register(route_file: &Path, route: &RouteRegistration) -> Result<bool> {
    let content = if route_file.exists() {
        read_file(route_file)?
    } else {
        format!("{OPEN_TAG}\n")
    };

    match route.apply(&content) {
        PatchResult::Changed(patched) => {
            write_file(route_file, &patched)?;
            tracing::debug!(file = %route_file.display(), route = %route.line(), "route registered");
            Ok(true)
        }
        PatchResult::Unchanged | PatchResult::NoAnchor => Ok(false),
    }
}
