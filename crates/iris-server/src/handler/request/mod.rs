//! Request bodies.

mod analyze_form;

pub use analyze_form::AnalyzeForm;
