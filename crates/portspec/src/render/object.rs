//! Helper for building proto3-JSON shaped objects field by field.

use serde_json::{Map, Value};

use super::{RenderError, RenderOptions};
use crate::record::StructuredRecord;

/// Accumulates one message's fields in the order they are added.
///
/// Default values (zero, empty string, enum code 0, empty repeated field)
/// are omitted.
pub struct JsonObject<'o> {
    map: Map<String, Value>,
    options: &'o RenderOptions,
}

impl<'o> JsonObject<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self {
            map: Map::new(),
            options,
        }
    }

    pub fn uint32(&mut self, name: &str, value: u32) {
        if value != 0 {
            self.map.insert(name.to_owned(), Value::from(value));
        }
    }

    pub fn string(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.map.insert(name.to_owned(), Value::from(value));
        }
    }

    /// `symbol` is the symbolic name of `code`, if the schema knows one.
    /// Codes without a name always render as numbers.
    pub fn enumeration(&mut self, name: &str, code: i32, symbol: Option<&'static str>) {
        if code == 0 {
            return;
        }
        let value = match symbol {
            Some(symbol) if !self.options.enums_as_numbers => Value::from(symbol),
            _ => Value::from(code),
        };
        self.map.insert(name.to_owned(), value);
    }

    pub fn messages<R: StructuredRecord>(
        &mut self,
        name: &str,
        items: &[R],
    ) -> Result<(), RenderError> {
        if items.is_empty() {
            return Ok(());
        }
        let values = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.to_json(self.options)
                    .map_err(|err| err.within(&format!("{name}[{i}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.map.insert(name.to_owned(), Value::Array(values));
        Ok(())
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}
