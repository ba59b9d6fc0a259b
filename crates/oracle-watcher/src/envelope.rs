//! JSON-RPC 2.0 request and response envelopes.

use {
    crate::{errors::EncodingError, filter::FilterQuery},
    alloy_json_rpc::ErrorPayload,
    serde::{Deserialize, Serialize},
    serde_json::{Number, Value},
    std::fmt::{self, Display, Formatter},
};

pub const JSONRPC_VERSION: &str = "2.0";
pub const GET_LOGS_METHOD: &str = "eth_getLogs";

/// Correlation token sent with a request. Any JSON number or string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(Number),
    String(String),
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::from(1u64)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::String(string) => f.write_str(string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub jsonrpc: String,
    pub id: Id,
    pub method: String,
    pub params: Vec<Value>,
}

impl RequestEnvelope {
    /// An `eth_getLogs` call with the filter as its only parameter.
    pub fn get_logs(id: Id, filter: &FilterQuery) -> Result<Self, EncodingError> {
        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: GET_LOGS_METHOD.to_string(),
            params: vec![serde_json::to_value(filter)?],
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("response is not a valid JSON-RPC envelope: {source}, raw response: {body}")]
    InvalidJson {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("node returned {0}")]
    Rpc(ErrorPayload),
    #[error("response contains neither a result nor an error")]
    MissingResult,
}

/// Response side of the envelope. Only `result` is of interest; it is kept
/// as untyped JSON because responses are not validated against a schema.
///
/// `id` is kept as raw JSON so that whatever a node echoes back never fails
/// the parse.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ResponseEnvelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(bytes).map_err(|source| ProtocolError::InvalidJson {
            body: String::from_utf8_lossy(bytes).trim().to_string(),
            source,
        })
    }

    /// The `result` field, or why there is none. An `error` takes precedence
    /// over a `result` should a node send both.
    pub fn into_result(self) -> Result<Value, ProtocolError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(ProtocolError::Rpc(error)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ProtocolError::MissingResult),
        }
    }
}
