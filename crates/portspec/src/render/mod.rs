//! Structured renderer: typed record to canonical JSON text.
//!
//! Field order comes from the record (schema declaration order, see
//! [`crate::record::StructuredRecord::to_json`]); whitespace comes from
//! [`RenderOptions::indent`]. The output never ends with a newline.

mod object;
mod options;

pub use object::JsonObject;
pub use options::RenderOptions;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::record::StructuredRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("unsupported value in field `{field}`: {reason}")]
    UnsupportedValue { field: String, reason: String },
    #[error("invalid render options: {0}")]
    InvalidOptions(String),
}

impl RenderError {
    pub fn unsupported(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::UnsupportedValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefixes the field path of an unsupported value with `parent`.
    pub fn within(self, parent: &str) -> Self {
        match self {
            RenderError::UnsupportedValue { field, reason } => RenderError::UnsupportedValue {
                field: format!("{parent}.{field}"),
                reason,
            },
            other => other,
        }
    }
}

/// Renders `record` as JSON text.
pub fn render<R>(record: &R, options: &RenderOptions) -> Result<String, RenderError>
where
    R: StructuredRecord + ?Sized,
{
    options.validate()?;
    let value = record.to_json(options)?;
    let text = to_text(&value, &options.indent)?;
    debug!(
        record = record.type_name(),
        bytes = text.len(),
        "rendered record"
    );
    Ok(text)
}

fn to_text(value: &Value, indent: &str) -> Result<String, RenderError> {
    let mut out = Vec::with_capacity(128);
    let written = if indent.is_empty() {
        serde_json::to_writer(&mut out, value)
    } else {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut ser)
    };
    written.map_err(|err| RenderError::unsupported("$", err.to_string()))?;
    String::from_utf8(out).map_err(|err| RenderError::unsupported("$", err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    impl StructuredRecord for Fixed {
        fn type_name(&self) -> &'static str {
            "test.Fixed"
        }

        fn to_json(&self, _: &RenderOptions) -> Result<Value, RenderError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn empty_object_renders_braces() {
        let out = render(&Fixed(json!({})), &RenderOptions::default()).unwrap();
        assert_eq!(out, "{}");
    }

    #[test]
    fn indent_is_applied_per_level() {
        let record = Fixed(json!({"ports": [{"port": 1}]}));
        let out = render(&record, &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "{\n  \"ports\": [\n    {\n      \"port\": 1\n    }\n  ]\n}"
        );

        let tabs = render(&record, &RenderOptions::new().with_indent("\t")).unwrap();
        assert_eq!(
            tabs,
            "{\n\t\"ports\": [\n\t\t{\n\t\t\t\"port\": 1\n\t\t}\n\t]\n}"
        );
    }

    #[test]
    fn empty_indent_is_compact() {
        let record = Fixed(json!({"a": [1, 2], "b": "x"}));
        let out = render(&record, &RenderOptions::new().with_indent("")).unwrap();
        assert_eq!(out, r#"{"a":[1,2],"b":"x"}"#);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut map = serde_json::Map::new();
        map.insert("zeta".into(), json!(1));
        map.insert("alpha".into(), json!(2));
        let out = render(&Fixed(Value::Object(map)), &RenderOptions::new().with_indent("")).unwrap();
        assert_eq!(out, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn rejects_non_whitespace_indent() {
        let err = render(&Fixed(json!({})), &RenderOptions::new().with_indent("--")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidOptions(_)));
    }

    #[test]
    fn within_prefixes_path() {
        let err = RenderError::unsupported("url", "not UTF-8").within("ports[0]");
        assert_eq!(
            err.to_string(),
            "unsupported value in field `ports[0].url`: not UTF-8"
        );
    }
}
