//! ws-manager exposed-port messages.

use prost::Message;
use serde_json::Value;
use tracing::debug;

use crate::record::{RecordCodec, StructuredRecord};
use crate::render::{JsonObject, RenderError, RenderOptions};
use crate::wire::{self, FieldShape, MessageShape, WireType};
use crate::{text, DecodeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PortVisibility {
    Private = 0,
    Public = 1,
}

impl PortVisibility {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PortVisibility::Private => "PORT_VISIBILITY_PRIVATE",
            PortVisibility::Public => "PORT_VISIBILITY_PUBLIC",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "PORT_VISIBILITY_PRIVATE" => Some(Self::Private),
            "PORT_VISIBILITY_PUBLIC" => Some(Self::Public),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PortProtocol {
    Http = 0,
    Https = 1,
}

impl PortProtocol {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PortProtocol::Http => "PORT_PROTOCOL_HTTP",
            PortProtocol::Https => "PORT_PROTOCOL_HTTPS",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "PORT_PROTOCOL_HTTP" => Some(Self::Http),
            "PORT_PROTOCOL_HTTPS" => Some(Self::Https),
            _ => None,
        }
    }
}

/// One port exposed by a workspace. Tag 2 is reserved.
#[derive(Clone, PartialEq, Message)]
pub struct PortSpec {
    #[prost(uint32, tag = "1")]
    pub port: u32,
    #[prost(enumeration = "PortVisibility", tag = "3")]
    pub visibility: i32,
    #[prost(string, tag = "4")]
    pub url: String,
    #[prost(enumeration = "PortProtocol", tag = "5")]
    pub protocol: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct ExposedPorts {
    #[prost(message, repeated, tag = "1")]
    pub ports: Vec<PortSpec>,
}

pub static PORT_SPEC_SHAPE: MessageShape = MessageShape {
    name: "wsman.PortSpec",
    fields: &[
        FieldShape {
            number: 1,
            name: "port",
            wire_type: WireType::Varint,
            message: None,
        },
        FieldShape {
            number: 3,
            name: "visibility",
            wire_type: WireType::Varint,
            message: None,
        },
        FieldShape {
            number: 4,
            name: "url",
            wire_type: WireType::LengthDelimited,
            message: None,
        },
        FieldShape {
            number: 5,
            name: "protocol",
            wire_type: WireType::Varint,
            message: None,
        },
    ],
};

pub static EXPOSED_PORTS_SHAPE: MessageShape = MessageShape {
    name: "wsman.ExposedPorts",
    fields: &[FieldShape {
        number: 1,
        name: "ports",
        wire_type: WireType::LengthDelimited,
        message: Some(&PORT_SPEC_SHAPE),
    }],
};

impl StructuredRecord for PortSpec {
    fn type_name(&self) -> &'static str {
        PORT_SPEC_SHAPE.name
    }

    fn to_json(&self, options: &RenderOptions) -> Result<Value, RenderError> {
        let mut obj = JsonObject::new(options);
        obj.uint32("port", self.port);
        obj.enumeration(
            "visibility",
            self.visibility,
            PortVisibility::try_from(self.visibility)
                .ok()
                .map(|v| v.as_str_name()),
        );
        obj.string("url", &self.url);
        obj.enumeration(
            "protocol",
            self.protocol,
            PortProtocol::try_from(self.protocol)
                .ok()
                .map(|p| p.as_str_name()),
        );
        Ok(obj.finish())
    }
}

impl StructuredRecord for ExposedPorts {
    fn type_name(&self) -> &'static str {
        EXPOSED_PORTS_SHAPE.name
    }

    fn to_json(&self, options: &RenderOptions) -> Result<Value, RenderError> {
        let mut obj = JsonObject::new(options);
        obj.messages("ports", &self.ports)?;
        Ok(obj.finish())
    }
}

impl ExposedPorts {
    /// Decodes a base64-encoded protobuf blob.
    pub fn from_base64(input: &str) -> Result<Self, DecodeError> {
        let bytes = text::decode(input)?;
        PortSpecCodec.decode(&bytes)
    }

    /// Encodes the message as a base64 protobuf blob.
    pub fn to_base64(&self) -> String {
        text::encode(&self.encode_to_vec())
    }
}

/// Codec for [`ExposedPorts`]: structural scan, then typed decode.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortSpecCodec;

impl RecordCodec for PortSpecCodec {
    type Record = ExposedPorts;

    fn id(&self) -> &'static str {
        "portspec"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ExposedPorts, DecodeError> {
        let report = wire::scan(bytes, &EXPOSED_PORTS_SHAPE)?;
        for field in &report.unknown {
            debug!(
                message = field.message,
                number = field.number,
                wire_type = ?field.wire_type,
                expected = ?field.expected,
                offset = field.offset,
                end = field.end,
                "skipping unknown field"
            );
        }
        let record = ExposedPorts::decode(report.retained.as_slice())?;
        debug!(
            ports = record.ports.len(),
            known_fields = report.known,
            "decoded exposed ports"
        );
        Ok(record)
    }

    fn encode(&self, record: &ExposedPorts) -> Vec<u8> {
        record.encode_to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portspec_buffers::Writer;

    use crate::render::render;

    fn sample() -> ExposedPorts {
        ExposedPorts {
            ports: vec![
                PortSpec {
                    port: 3000,
                    visibility: PortVisibility::Public as i32,
                    url: "https://3000-ws.example.test".into(),
                    protocol: PortProtocol::Https as i32,
                },
                PortSpec {
                    port: 8080,
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn enum_names() {
        assert_eq!(PortVisibility::Public.as_str_name(), "PORT_VISIBILITY_PUBLIC");
        assert_eq!(
            PortProtocol::from_str_name("PORT_PROTOCOL_HTTPS"),
            Some(PortProtocol::Https)
        );
        assert_eq!(PortProtocol::from_str_name("https"), None);
    }

    #[test]
    fn wire_bytes_match_schema_tags() {
        let record = ExposedPorts {
            ports: vec![PortSpec {
                port: 8080,
                visibility: 1,
                url: "u".into(),
                protocol: 1,
            }],
        };
        assert_eq!(
            PortSpecCodec.encode(&record),
            vec![0x0A, 0x0A, 0x08, 0x90, 0x3F, 0x18, 0x01, 0x22, 0x01, b'u', 0x28, 0x01]
        );
    }

    #[test]
    fn renders_in_declaration_order_omitting_defaults() {
        let out = render(&sample(), &RenderOptions::new().with_indent("")).unwrap();
        assert_eq!(
            out,
            r#"{"ports":[{"port":3000,"visibility":1,"url":"https://3000-ws.example.test","protocol":1},{"port":8080}]}"#
        );
    }

    #[test]
    fn renders_symbolic_enums() {
        let options = RenderOptions::new()
            .with_indent("")
            .with_enums_as_numbers(false);
        let out = render(&sample(), &options).unwrap();
        assert!(out.contains(r#""visibility":"PORT_VISIBILITY_PUBLIC""#));
        assert!(out.contains(r#""protocol":"PORT_PROTOCOL_HTTPS""#));
    }

    #[test]
    fn unknown_enum_code_renders_as_number() {
        let record = ExposedPorts {
            ports: vec![PortSpec {
                visibility: 7,
                ..Default::default()
            }],
        };
        let options = RenderOptions::new()
            .with_indent("")
            .with_enums_as_numbers(false);
        assert_eq!(
            render(&record, &options).unwrap(),
            r#"{"ports":[{"visibility":7}]}"#
        );
    }

    #[test]
    fn default_port_spec_renders_empty_object() {
        let record = ExposedPorts {
            ports: vec![PortSpec::default()],
        };
        let out = render(&record, &RenderOptions::new().with_indent("")).unwrap();
        assert_eq!(out, r#"{"ports":[{}]}"#);
    }

    #[test]
    fn base64_helpers_roundtrip() {
        let record = sample();
        let encoded = record.to_base64();
        assert_eq!(ExposedPorts::from_base64(&encoded).unwrap(), record);
        assert_eq!(ExposedPorts::from_base64("").unwrap(), ExposedPorts::default());
    }

    #[test]
    fn unknown_and_reserved_fields_are_dropped() {
        let mut port = Writer::new();
        port.tag(1, WireType::Varint as u8);
        port.varint(22);
        port.tag(2, WireType::LengthDelimited as u8);
        port.bytes(b"legacy-target");
        port.tag(99, WireType::Fixed64 as u8);
        port.fixed64(7);
        let port = port.flush();

        let mut w = Writer::new();
        w.tag(1, WireType::LengthDelimited as u8);
        w.bytes(&port);
        w.tag(2, WireType::Varint as u8);
        w.varint(1);

        let record = PortSpecCodec.decode(&w.flush()).unwrap();
        assert_eq!(
            record,
            ExposedPorts {
                ports: vec![PortSpec {
                    port: 22,
                    ..Default::default()
                }]
            }
        );
    }

    #[test]
    fn wrong_wire_type_on_known_field_is_skipped() {
        let compact = RenderOptions::new().with_indent("");

        // ExposedPorts.ports as a varint.
        let record = PortSpecCodec.decode(&[0x08, 0x01]).unwrap();
        assert_eq!(record, ExposedPorts::default());
        assert_eq!(render(&record, &compact).unwrap(), "{}");

        // PortSpec.port as a fixed32 inside a well-formed ports entry.
        let record = PortSpecCodec
            .decode(&[0x0A, 0x05, 0x0D, 0x01, 0x00, 0x00, 0x00])
            .unwrap();
        assert_eq!(render(&record, &compact).unwrap(), r#"{"ports":[{}]}"#);
    }

    #[test]
    fn mismatched_field_does_not_hide_its_siblings() {
        let mut port = Writer::new();
        port.tag(4, WireType::Varint as u8);
        port.varint(3);
        port.tag(1, WireType::Varint as u8);
        port.varint(443);
        let port = port.flush();
        let mut w = Writer::new();
        w.tag(1, WireType::LengthDelimited as u8);
        w.bytes(&port);
        let record = PortSpecCodec.decode(&w.flush()).unwrap();
        assert_eq!(
            record,
            ExposedPorts {
                ports: vec![PortSpec {
                    port: 443,
                    ..Default::default()
                }]
            }
        );
    }

    #[test]
    fn invalid_utf8_url_is_malformed() {
        let mut port = Writer::new();
        port.tag(4, WireType::LengthDelimited as u8);
        port.bytes(&[0xC3, 0x28]);
        let port = port.flush();
        let mut w = Writer::new();
        w.tag(1, WireType::LengthDelimited as u8);
        w.bytes(&port);
        let err = PortSpecCodec.decode(&w.flush()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRecord { .. }));
    }

    #[test]
    fn truncated_nested_port_reports_offset() {
        // ports[0] claims 4 bytes but the url inside claims 9.
        let bytes = [0x0A, 0x04, 0x22, 0x09, b'h', b't'];
        let err = PortSpecCodec.decode(&bytes).unwrap_err();
        assert_eq!(err.offset(), Some(4));
    }
}
