//! In-place patching of generated PHP classes
//!
//! Patches are pure text transforms: they take the current file content and
//! report whether anything changed, so applying one twice is a no-op.

use regex::Regex;
use std::sync::LazyLock;

use crate::scaffold::templates::{REGION_BEGIN, REGION_END};

static NAMESPACE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^namespace\s+[^;]+;").expect("Invalid regex"));

pub(crate) static USE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^use\s").expect("Invalid regex"));

/// Outcome of a text patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    /// New content
    Changed(String),
    /// The content already has the patch applied
    Unchanged,
    /// The anchor the patch needs is missing
    NoAnchor,
}

/// Import every class in `fqcns` that is not imported yet
///
/// Missing imports go, in order, ahead of the first `use` line after the
/// namespace declaration, or on their own right after it.
#[must_use]
pub fn ensure_imports(content: &str, fqcns: &[String]) -> PatchResult {
    let missing: Vec<&String> = fqcns
        .iter()
        .filter(|fqcn| !content.contains(&format!("use {fqcn};")))
        .collect();
    if missing.is_empty() {
        return PatchResult::Unchanged;
    }

    let Some(namespace) = NAMESPACE_DECL.find(content) else {
        return PatchResult::NoAnchor;
    };

    let block: String = missing
        .iter()
        .map(|fqcn| format!("use {fqcn};\n"))
        .collect();

    let after_namespace = namespace.end();
    let patched = match USE_LINE.find_at(content, after_namespace) {
        Some(first_use) => {
            let at = first_use.start();
            format!("{}{block}{}", &content[..at], &content[at..])
        }
        None => format!(
            "{}\n\n{}{}",
            &content[..after_namespace],
            block.trim_end(),
            &content[after_namespace..]
        ),
    };

    PatchResult::Changed(patched)
}

/// Replace the body of the sentinel region `name` with `body`
///
/// The sentinel lines themselves are kept. `body` should end with a newline.
#[must_use]
pub fn replace_region(content: &str, name: &str, body: &str) -> PatchResult {
    let begin_marker = format!("{REGION_BEGIN} {name}");
    let end_marker = format!("{REGION_END} {name}");

    let Some(begin) = content.find(&begin_marker) else {
        return PatchResult::NoAnchor;
    };
    let Some(body_start) = content[begin..].find('\n').map(|i| begin + i + 1) else {
        return PatchResult::NoAnchor;
    };
    let Some(end) = content[body_start..].find(&end_marker).map(|i| body_start + i) else {
        return PatchResult::NoAnchor;
    };
    // Keep the indentation in front of the closing sentinel
    let body_end = content[..end].rfind('\n').map_or(body_start, |i| i + 1).max(body_start);

    if &content[body_start..body_end] == body {
        return PatchResult::Unchanged;
    }

    PatchResult::Changed(format!(
        "{}{body}{}",
        &content[..body_start],
        &content[body_end..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTROLLER: &str = "<?php

namespace App\\Http\\Controllers;

use App\\Models\\Employee;
use Illuminate\\Http\\Request;

class EmployeeController extends Controller
{
    // @scaffold-begin store
    public function store(Request $request)
    {
        //
    }
    // @scaffold-end store
}
";

    fn imports() -> Vec<String> {
        vec![
            "App\\Http\\Requests\\StoreEmployeeRequest".to_string(),
            "App\\Http\\Requests\\UpdateEmployeeRequest".to_string(),
        ]
    }

    #[test]
    fn test_imports_go_before_first_use() {
        let PatchResult::Changed(patched) = ensure_imports(CONTROLLER, &imports()) else {
            panic!("expected imports to be added");
        };

        assert!(patched.contains(
            "namespace App\\Http\\Controllers;\n\nuse App\\Http\\Requests\\StoreEmployeeRequest;\nuse App\\Http\\Requests\\UpdateEmployeeRequest;\nuse App\\Models\\Employee;\n"
        ));
        assert_eq!(ensure_imports(&patched, &imports()), PatchResult::Unchanged);
    }

    #[test]
    fn test_imports_without_existing_use() {
        let content = "<?php\n\nnamespace App\\Http\\Controllers;\n\nclass A {}\n";
        let PatchResult::Changed(patched) = ensure_imports(content, &imports()[..1]) else {
            panic!("expected import to be added");
        };
        assert_eq!(
            patched,
            "<?php\n\nnamespace App\\Http\\Controllers;\n\nuse App\\Http\\Requests\\StoreEmployeeRequest;\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_only_missing_imports_are_added() {
        let content = CONTROLLER.replace(
            "use App\\Models\\Employee;",
            "use App\\Http\\Requests\\StoreEmployeeRequest;\nuse App\\Models\\Employee;",
        );
        let PatchResult::Changed(patched) = ensure_imports(&content, &imports()) else {
            panic!("expected one import to be added");
        };
        assert_eq!(patched.matches("StoreEmployeeRequest;").count(), 1);
        assert_eq!(patched.matches("UpdateEmployeeRequest;").count(), 1);
    }

    #[test]
    fn test_imports_need_namespace() {
        assert_eq!(
            ensure_imports("<?php\n\nclass A {}\n", &imports()),
            PatchResult::NoAnchor
        );
    }

    #[test]
    fn test_replace_region() {
        let body = "    public function store(StoreEmployeeRequest $request)\n    {\n        $validated = $request->validated();\n    }\n";
        let PatchResult::Changed(patched) = replace_region(CONTROLLER, "store", body) else {
            panic!("expected region to be replaced");
        };

        assert!(patched.contains(&format!(
            "    // @scaffold-begin store\n{body}    // @scaffold-end store\n"
        )));
        assert!(!patched.contains("store(Request $request)"));
        assert_eq!(replace_region(&patched, "store", body), PatchResult::Unchanged);
    }

    #[test]
    fn test_missing_region_is_left_alone() {
        assert_eq!(
            replace_region(CONTROLLER, "update", "x\n"),
            PatchResult::NoAnchor
        );
    }
}
