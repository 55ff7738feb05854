//! Controller compiler
//!
//! Directive rows become resource controllers, form requests and route
//! registrations. Previously generated controllers are patched in place
//! between sentinel comments, so re-running is safe.

pub mod compiler;
pub mod directive;
pub mod inject;
pub mod routes;
pub mod scaffolder;

pub use compiler::ControllerCompiler;
pub use directive::{ControllerDirective, ControllerTarget};
pub use inject::PatchResult;
pub use routes::RouteRegistration;
pub use scaffolder::{ControllerScaffolder, ScaffoldOutcome, TemplateScaffolder};
