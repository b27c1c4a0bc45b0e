//! Structural validation of the protobuf wire format.
//!
//! [`scan`] walks every key and payload of a message before the typed decoder
//! sees it. Violations are reported with the absolute byte offset of the
//! offending key, varint or payload. Unknown fields, and declared fields that
//! arrive with a different wire type, are collected instead of rejected and
//! left out of [`ScanReport::retained`].

mod error;

pub use error::WireError;

use portspec_buffers::{Reader, Writer};

/// Largest field number the wire format can address.
pub const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;

/// Nesting limit for sub-messages and groups.
pub const RECURSION_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(other),
        }
    }
}

/// Field numbers a message declares, and which of them hold sub-messages.
#[derive(Debug)]
pub struct MessageShape {
    pub name: &'static str,
    pub fields: &'static [FieldShape],
}

#[derive(Debug)]
pub struct FieldShape {
    pub number: u32,
    pub name: &'static str,
    /// Wire type the schema encodes this field with.
    pub wire_type: WireType,
    /// Set for length-delimited fields carrying a nested message.
    pub message: Option<&'static MessageShape>,
}

impl MessageShape {
    pub fn field(&self, number: u32) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.number == number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField {
    /// Message the field appeared in.
    pub message: &'static str,
    pub number: u32,
    pub wire_type: WireType,
    /// Declared wire type, when the number is known but the wire type is not.
    pub expected: Option<WireType>,
    /// Offset of the field key.
    pub offset: usize,
    /// End of the field payload (exclusive).
    pub end: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Declared fields seen, nested messages included.
    pub known: usize,
    pub unknown: Vec<UnknownField>,
    /// The input re-encoded with only declared, correctly typed fields.
    /// Nested length prefixes are rewritten to match.
    pub retained: Vec<u8>,
}

/// Validates `bytes` against the wire format, descending into the
/// sub-messages `shape` declares.
pub fn scan(bytes: &[u8], shape: &'static MessageShape) -> Result<ScanReport, WireError> {
    let mut report = ScanReport::default();
    let mut retained = Writer::new();
    let mut reader = Reader::new(bytes);
    let mut scanner = Scanner {
        report: &mut report,
        depth: 0,
    };
    scanner.message(&mut reader, Some(shape), None, Some(&mut retained))?;
    report.retained = retained.flush();
    Ok(report)
}

struct Scanner<'r> {
    report: &'r mut ScanReport,
    depth: usize,
}

impl Scanner<'_> {
    /// Scans fields until the reader is exhausted, or until the end-group key
    /// closing `group` (field number, start offset). Declared fields are
    /// copied to `out`.
    fn message(
        &mut self,
        reader: &mut Reader<'_>,
        shape: Option<&'static MessageShape>,
        group: Option<(u32, usize)>,
        mut out: Option<&mut Writer>,
    ) -> Result<(), WireError> {
        while !reader.is_empty() {
            let key_offset = reader.x;
            let key = reader.varint().map_err(WireError::varint)?;
            let number = key >> 3;
            if number == 0 {
                return Err(WireError::FieldNumberZero { offset: key_offset });
            }
            if number > MAX_FIELD_NUMBER {
                return Err(WireError::FieldNumberOutOfRange {
                    number,
                    offset: key_offset,
                });
            }
            let number = number as u32;
            let raw_type = (key & 0x07) as u8;
            let wire_type =
                WireType::try_from(raw_type).map_err(|wire_type| WireError::InvalidWireType {
                    wire_type,
                    offset: key_offset,
                })?;

            if wire_type == WireType::EndGroup {
                return match group {
                    Some((open, _)) if open == number => Ok(()),
                    _ => Err(WireError::UnmatchedEndGroup {
                        number,
                        offset: key_offset,
                    }),
                };
            }

            let declared = shape.and_then(|shape| shape.field(number));
            let field = declared.filter(|field| field.wire_type == wire_type);
            let mut nested_out = Writer::new();

            match wire_type {
                WireType::Varint => {
                    reader.varint().map_err(WireError::varint)?;
                }
                WireType::Fixed64 => {
                    reader
                        .fixed64()
                        .map_err(|err| WireError::truncated("fixed64", err))?;
                }
                WireType::Fixed32 => {
                    reader
                        .fixed32()
                        .map_err(|err| WireError::truncated("fixed32", err))?;
                }
                WireType::LengthDelimited => {
                    let len = reader.varint().map_err(WireError::varint)?;
                    let available = reader.size() as u64;
                    if len > available {
                        return Err(WireError::Truncated {
                            what: "length-delimited field",
                            offset: reader.x,
                            wanted: usize::try_from(len - available).unwrap_or(usize::MAX),
                        });
                    }
                    let mut payload = reader
                        .cut(len as usize)
                        .map_err(|err| WireError::truncated("length-delimited field", err))?;
                    if let Some(nested) = field.and_then(|field| field.message) {
                        self.descend(key_offset, |scanner| {
                            scanner.message(&mut payload, Some(nested), None, Some(&mut nested_out))
                        })?;
                    }
                }
                WireType::StartGroup => {
                    self.descend(key_offset, |scanner| {
                        scanner.message(reader, None, Some((number, key_offset)), None)
                    })?;
                }
                WireType::EndGroup => unreachable!("handled above"),
            }

            match (shape, field) {
                (Some(_), Some(field)) => {
                    self.report.known += 1;
                    if let Some(out) = out.as_deref_mut() {
                        if field.message.is_some() {
                            out.tag(number, WireType::LengthDelimited as u8);
                            out.bytes(&nested_out.flush());
                        } else {
                            out.raw(&reader.uint8[key_offset..reader.x]);
                        }
                    }
                }
                (Some(shape), None) => self.report.unknown.push(UnknownField {
                    message: shape.name,
                    number,
                    wire_type,
                    expected: declared.map(|field| field.wire_type),
                    offset: key_offset,
                    end: reader.x,
                }),
                // Group contents belong to the group's own unknown entry.
                (None, _) => {}
            }
        }
        match group {
            Some((number, offset)) => Err(WireError::UnterminatedGroup { number, offset }),
            None => Ok(()),
        }
    }

    fn descend(
        &mut self,
        offset: usize,
        inner: impl FnOnce(&mut Self) -> Result<(), WireError>,
    ) -> Result<(), WireError> {
        if self.depth >= RECURSION_LIMIT {
            return Err(WireError::RecursionLimit { offset });
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }
}
