//! The `write` and `invoke` results a script hands back to the host.
//!
//! Both serialize as a single-key JSON object naming the operation, with
//! camelCase fields. Optional fields are omitted when not supplied.

use crate::{base64, ResponseError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A script result requesting a command invocation or an attribute write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptResponse {
    Invoke(InvokeRequest),
    Write(WriteRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub cluster_id: u32,
    pub command_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlv_base64: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "endpoint_id_from_json"
    )]
    pub endpoint_id: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timed_invoke_timeout_ms: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteRequest {
    pub cluster_id: u32,
    pub attribute_id: u32,
    pub tlv_base64: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "endpoint_id_from_json"
    )]
    pub endpoint_id: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvokeOptions {
    pub endpoint_id: Option<u16>,
    pub timed_invoke_timeout_ms: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub endpoint_id: Option<u16>,
}

/// Builds an `invoke` result. An empty payload is treated as no payload.
pub fn invoke(
    cluster_id: u32,
    command_id: u32,
    tlv_base64: Option<&str>,
    options: Option<InvokeOptions>,
) -> ScriptResponse {
    let options = options.unwrap_or_default();
    ScriptResponse::Invoke(InvokeRequest {
        cluster_id,
        command_id,
        tlv_base64: tlv_base64.filter(|s| !s.is_empty()).map(str::to_owned),
        endpoint_id: options.endpoint_id,
        timed_invoke_timeout_ms: options.timed_invoke_timeout_ms,
    })
}

/// Builds a `write` result.
pub fn write(
    cluster_id: u32,
    attribute_id: u32,
    tlv_base64: &str,
    options: Option<WriteOptions>,
) -> ScriptResponse {
    ScriptResponse::Write(WriteRequest {
        cluster_id,
        attribute_id,
        tlv_base64: tlv_base64.to_owned(),
        endpoint_id: options.unwrap_or_default().endpoint_id,
    })
}

impl ScriptResponse {
    /// Parses a result as returned by a script.
    pub fn from_json(text: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(text)?)
    }

    pub const fn cluster_id(&self) -> u32 {
        match self {
            Self::Invoke(req) => req.cluster_id,
            Self::Write(req) => req.cluster_id,
        }
    }

    pub const fn endpoint_id(&self) -> Option<u16> {
        match self {
            Self::Invoke(req) => req.endpoint_id,
            Self::Write(req) => req.endpoint_id,
        }
    }

    pub fn tlv_base64(&self) -> Option<&str> {
        match self {
            Self::Invoke(req) => req.tlv_base64.as_deref(),
            Self::Write(req) => Some(&req.tlv_base64),
        }
    }

    /// Decoded payload bytes; empty when the result carries none.
    pub fn tlv_bytes(&self) -> Vec<u8> {
        self.tlv_base64().map(base64::decode).unwrap_or_default()
    }
}

/// Scripts may hand back the endpoint as a number or as a numeric string.
fn endpoint_id_from_json<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid endpointId {s:?}"))),
    }
}
