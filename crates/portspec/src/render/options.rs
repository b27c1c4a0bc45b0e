//! Rendering configuration.

use super::RenderError;

/// Controls how a record is rendered to JSON.
///
/// Defaults match the debug-inspection use case: two-space indent, enums as
/// integer codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix repeated once per nesting level. Empty means compact output.
    pub indent: String,
    /// Render enum fields as their integer code instead of the symbolic name.
    pub enums_as_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_owned(),
            enums_as_numbers: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_enums_as_numbers(mut self, enums_as_numbers: bool) -> Self {
        self.enums_as_numbers = enums_as_numbers;
        self
    }

    /// Indent may only hold spaces and tabs.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.indent.chars().all(|c| c == ' ' || c == '\t') {
            Ok(())
        } else {
            Err(RenderError::InvalidOptions(format!(
                "indent {:?} may only contain spaces and tabs",
                self.indent
            )))
        }
    }
}
