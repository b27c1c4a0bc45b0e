//! proto3-JSON input for [`ExposedPorts`].
//!
//! Accepts what the renderer produces in either enum mode, plus the usual
//! proto3-JSON leniencies: enum codes or names, numeric strings for `port`,
//! and `null` for any field.

use serde::Deserialize;
use thiserror::Error;

use super::{ExposedPorts, PortProtocol, PortSpec, PortVisibility};

#[derive(Debug, Error)]
#[error("invalid port spec JSON: {0}")]
pub struct JsonInputError(#[from] serde_json::Error);

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExposedPortsJson {
    #[serde(default, deserialize_with = "proto3_deser::nullable")]
    ports: Vec<PortSpecJson>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PortSpecJson {
    #[serde(default, deserialize_with = "proto3_deser::uint32")]
    port: u32,
    #[serde(default, deserialize_with = "proto3_deser::visibility")]
    visibility: i32,
    #[serde(default, deserialize_with = "proto3_deser::nullable")]
    url: String,
    #[serde(default, deserialize_with = "proto3_deser::protocol")]
    protocol: i32,
}

impl ExposedPorts {
    pub fn from_json_str(input: &str) -> Result<Self, JsonInputError> {
        let parsed: ExposedPortsJson = serde_json::from_str(input)?;
        Ok(ExposedPorts {
            ports: parsed
                .ports
                .into_iter()
                .map(|json| PortSpec {
                    port: json.port,
                    visibility: json.visibility,
                    url: json.url,
                    protocol: json.protocol,
                })
                .collect(),
        })
    }
}

mod proto3_deser {
    use serde::de::{self, Deserialize, Deserializer};

    use super::{PortProtocol, PortVisibility};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Uint32Json {
        Int(u64),
        Float(f64),
        Text(String),
    }

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum EnumJson {
        Code(i64),
        Name(String),
    }

    /// `null` reads as the field default.
    pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn uint32<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let out_of_range = |value: &dyn std::fmt::Display| -> D::Error {
            de::Error::custom(format_args!("value {value} out of range for uint32"))
        };
        match Option::<Uint32Json>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Uint32Json::Int(n)) => u32::try_from(n).map_err(|_| out_of_range(&n)),
            // Integral floats such as 8080.0 are accepted.
            Some(Uint32Json::Float(f))
                if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) =>
            {
                Ok(f as u32)
            }
            Some(Uint32Json::Float(f)) => Err(out_of_range(&f)),
            Some(Uint32Json::Text(s)) => {
                let n: u64 = s.parse().map_err(|_| -> D::Error {
                    de::Error::invalid_value(de::Unexpected::Str(&s), &"an unsigned integer")
                })?;
                u32::try_from(n).map_err(|_| out_of_range(&s))
            }
        }
    }

    pub fn visibility<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        enumeration(deserializer, |name| {
            PortVisibility::from_str_name(name).map(|v| v as i32)
        })
    }

    pub fn protocol<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        enumeration(deserializer, |name| {
            PortProtocol::from_str_name(name).map(|p| p as i32)
        })
    }

    fn enumeration<'de, D>(
        deserializer: D,
        by_name: impl Fn(&str) -> Option<i32>,
    ) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<EnumJson>::deserialize(deserializer)? {
            None => Ok(0),
            Some(EnumJson::Code(n)) => i32::try_from(n).map_err(|_| {
                de::Error::custom(format_args!("enum code {n} out of range for int32"))
            }),
            Some(EnumJson::Name(name)) => by_name(&name)
                .ok_or_else(|| de::Error::custom(format_args!("unknown enum value `{name}`"))),
        }
    }
}
