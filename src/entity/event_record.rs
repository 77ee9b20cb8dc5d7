use std::fmt;
use std::time::SystemTime;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error raised when an event payload cannot be encoded or decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadError {
    pub event_name: String,
    pub message: String,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload error in {}: {}", self.event_name, self.message)
    }
}

impl std::error::Error for PayloadError {}

/// One entry of an entity's append-only event stream.
///
/// Payloads are bitcode bytes; when the record itself is written as JSON the
/// bytes are carried as base64 text.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct EventRecord {
    pub event_name: String,
    #[serde(with = "payload_serde")]
    pub payload: Vec<u8>,
    pub sequence: u64,
    pub recorded_at: SystemTime,
}

mod payload_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(payload: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(payload).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Bitcode-encode an event payload, tagging failures with the event name.
pub fn encode_payload<T: Serialize>(
    event_name: &str,
    payload: &T,
) -> Result<Vec<u8>, PayloadError> {
    bitcode::serialize(payload).map_err(|e| PayloadError {
        event_name: event_name.to_string(),
        message: e.to_string(),
    })
}

impl EventRecord {
    pub fn new(event_name: impl Into<String>, payload: Vec<u8>, sequence: u64) -> Self {
        EventRecord {
            event_name: event_name.into(),
            payload,
            sequence,
            recorded_at: SystemTime::now(),
        }
    }

    /// Deserialize the payload into the specified type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        bitcode::deserialize(&self.payload).map_err(|e| PayloadError {
            event_name: self.event_name.clone(),
            message: e.to_string(),
        })
    }
}
