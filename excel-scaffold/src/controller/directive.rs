//! Controller directives and the class locations they resolve to

use std::path::PathBuf;

use crate::config::ScaffoldConfig;
use crate::scaffold::TemplateHelpers;
use crate::sheet::SheetRow;

/// One row of the directive sheet, columns A–F
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerDirective {
    /// Model class name
    pub model: String,
    /// Scaffold a controller for this model
    pub generate_controller: bool,
    /// Emit store/update form requests
    pub generate_requests: bool,
    /// Controller sub-namespace (`Admin\Hr` or `Admin/Hr`)
    pub namespace: Option<String>,
    /// Route URI prefix
    pub route_prefix: Option<String>,
    /// API resource instead of web resource
    pub api: bool,
}

impl ControllerDirective {
    /// Number of columns in the directive sheet
    pub const WIDTH: usize = 6;

    /// Map a sheet row by column position
    ///
    /// Returns `None` when the model cell is blank.
    #[must_use]
    pub fn from_sheet(row: &SheetRow) -> Option<Self> {
        let model = row.optional(0)?;
        Some(Self {
            model,
            generate_controller: row.flag(1),
            generate_requests: row.flag(2),
            namespace: row.optional(3),
            route_prefix: row.optional(4),
            api: row.flag(5),
        })
    }

    /// Store request class name
    #[must_use]
    pub fn store_request(&self) -> String {
        format!("Store{}Request", self.model)
    }

    /// Update request class name
    #[must_use]
    pub fn update_request(&self) -> String {
        format!("Update{}Request", self.model)
    }
}

/// Where a directive's controller lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerTarget {
    /// Model class name
    pub model: String,
    /// Fully qualified model class
    pub model_fqcn: String,
    /// Controller class name (`EmployeeController`)
    pub class_name: String,
    /// Base controllers namespace
    pub base_namespace: String,
    /// Namespace segments below the base
    pub sub_namespace: Vec<String>,
    /// PHP namespace of the controller
    pub namespace: String,
    /// Fully qualified controller class
    pub fqcn: String,
    /// Controller file, relative to the project root
    pub path: PathBuf,
}

impl ControllerTarget {
    /// Resolve a directive against the configured layout
    #[must_use]
    pub fn new(directive: &ControllerDirective, config: &ScaffoldConfig) -> Self {
        let class_name = format!("{}Controller", directive.model);
        let sub_namespace: Vec<String> = directive
            .namespace
            .as_deref()
            .unwrap_or_default()
            .split(['\\', '/'])
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect();

        let base_namespace = config.namespaces.controllers.clone();
        let namespace = std::iter::once(base_namespace.as_str())
            .chain(sub_namespace.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\\");

        let mut path = config.paths.controllers_dir.clone();
        path.extend(&sub_namespace);
        path.push(format!("{class_name}.php"));

        Self {
            model: directive.model.clone(),
            model_fqcn: format!("{}\\{}", config.namespaces.models, directive.model),
            fqcn: format!("{namespace}\\{class_name}"),
            class_name,
            base_namespace,
            sub_namespace,
            namespace,
            path,
        }
    }

    /// Route-model binding variable, without the `$`
    #[must_use]
    pub fn model_var(&self) -> String {
        TemplateHelpers::to_variable_name(&self.model)
    }

    /// Whether the controller sits below the base namespace
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.sub_namespace.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(model: &str, namespace: Option<&str>) -> ControllerDirective {
        ControllerDirective {
            model: model.to_string(),
            generate_controller: true,
            namespace: namespace.map(ToString::to_string),
            ..ControllerDirective::default()
        }
    }

    #[test]
    fn test_from_sheet() {
        let cells = ["Employee", "Y", "yes", "Admin/Hr", "admin/employees", "n"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let row = SheetRow::new(2, cells, ControllerDirective::WIDTH);

        let parsed = ControllerDirective::from_sheet(&row).unwrap();
        assert_eq!(parsed.model, "Employee");
        assert!(parsed.generate_controller);
        assert!(parsed.generate_requests);
        assert_eq!(parsed.namespace.as_deref(), Some("Admin/Hr"));
        assert_eq!(parsed.route_prefix.as_deref(), Some("admin/employees"));
        assert!(!parsed.api);
    }

    #[test]
    fn test_from_sheet_requires_model() {
        let row = SheetRow::new(2, vec![String::new(), "y".to_string()], ControllerDirective::WIDTH);
        assert!(ControllerDirective::from_sheet(&row).is_none());
    }

    #[test]
    fn test_request_names() {
        let directive = directive("Employee", None);
        assert_eq!(directive.store_request(), "StoreEmployeeRequest");
        assert_eq!(directive.update_request(), "UpdateEmployeeRequest");
    }

    #[test]
    fn test_target_without_namespace() {
        let config = ScaffoldConfig::for_root("/project");
        let target = ControllerTarget::new(&directive("Employee", None), &config);

        assert_eq!(target.class_name, "EmployeeController");
        assert_eq!(target.namespace, "App\\Http\\Controllers");
        assert_eq!(target.fqcn, "App\\Http\\Controllers\\EmployeeController");
        assert_eq!(target.model_fqcn, "App\\Models\\Employee");
        assert_eq!(
            target.path,
            PathBuf::from("app/Http/Controllers/EmployeeController.php")
        );
        assert!(!target.is_nested());
        assert_eq!(target.model_var(), "employee");
    }

    #[test]
    fn test_target_accepts_either_separator() {
        let config = ScaffoldConfig::for_root("/project");
        for namespace in ["Admin\\Hr", "Admin/Hr", "/Admin/Hr/"] {
            let target = ControllerTarget::new(&directive("Employee", Some(namespace)), &config);
            assert_eq!(target.namespace, "App\\Http\\Controllers\\Admin\\Hr");
            assert_eq!(
                target.fqcn,
                "App\\Http\\Controllers\\Admin\\Hr\\EmployeeController"
            );
            assert_eq!(
                target.path,
                PathBuf::from("app/Http/Controllers/Admin/Hr/EmployeeController.php")
            );
            assert!(target.is_nested());
        }
    }
}
