//! Request documents
//!
//! ```json
//! {"request": {"request_type": "CONTAINER_REPORT",
//!              "container_report": {"id": 7, "weight": 40, "volume": 90, "volumemax": 100}}}
//! ```
//!
//! `request_type` is matched case-insensitively after trimming. The
//! type-specific section is named after the lower-cased type.

use serde_json::Value;

use crate::domain::{ContainerId, DomainError, Reading};

pub const CONTAINER_REPORT: &str = "CONTAINER_REPORT";
pub const REQ_SUPERVISION_STATE: &str = "REQ_SUPERVISION_STATE";
pub const TRIG_CIRCUIT_COMPUTATION: &str = "TRIG_CIRCUIT_COMPUTATION";
pub const REQ_CIRCUITS: &str = "REQ_CIRCUITS";
pub const REQ_CIRCUIT: &str = "REQ_CIRCUIT";

/// Errors while decoding a request document
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(transparent)]
    InvalidReading(#[from] DomainError),
}

/// New reading reported by a container
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerReport {
    pub container_id: ContainerId,
    pub reading: Reading,
}

/// Every request a client can send
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ContainerReport(ContainerReport),
    SupervisionState,
    TrigCircuitComputation,
    Circuits,
    /// Declared by the protocol but not served
    Circuit,
    /// Any other `request_type`, kept normalized for logging
    Unsupported(String),
}

impl Request {
    /// Decode a request document
    pub fn decode(document: &Value) -> Result<Self, ProtocolError> {
        let request_type = Self::request_type(document)?;
        Self::decode_as(document, request_type)
    }

    /// Normalized `request_type` of a document, without decoding its section
    pub fn request_type(document: &Value) -> Result<String, ProtocolError> {
        Self::root(document)?
            .get("request_type")
            .and_then(Value::as_str)
            .map(|t| t.trim().to_uppercase())
            .ok_or(ProtocolError::MissingField("request_type"))
    }

    /// Decode the section of a document whose type is already known
    pub fn decode_as(document: &Value, request_type: String) -> Result<Self, ProtocolError> {
        let root = Self::root(document)?;

        let request = match request_type.as_str() {
            CONTAINER_REPORT => {
                let section = root
                    .get("container_report")
                    .ok_or(ProtocolError::MissingField("container_report"))?;
                Request::ContainerReport(ContainerReport::decode(section)?)
            }
            REQ_SUPERVISION_STATE => Request::SupervisionState,
            TRIG_CIRCUIT_COMPUTATION => Request::TrigCircuitComputation,
            REQ_CIRCUITS => Request::Circuits,
            REQ_CIRCUIT => Request::Circuit,
            _ => Request::Unsupported(request_type),
        };

        Ok(request)
    }

    fn root(document: &Value) -> Result<&Value, ProtocolError> {
        document
            .get("request")
            .ok_or(ProtocolError::MissingField("request"))
    }
}

impl ContainerReport {
    fn decode(section: &Value) -> Result<Self, ProtocolError> {
        let container_id = int_field(section, "id")?;
        let weight = i32_field(section, "weight")?;
        let volume = i32_field(section, "volume")?;
        let volume_max = i32_field(section, "volumemax")?;

        Ok(Self {
            container_id,
            reading: Reading::new(weight, volume, volume_max)?,
        })
    }
}

/// Integer field given either as a JSON number or as a numeric string
fn int_field(section: &Value, field: &'static str) -> Result<i64, ProtocolError> {
    let value = section
        .get(field)
        .ok_or(ProtocolError::MissingField(field))?;

    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ProtocolError::InvalidField {
        field,
        reason: format!("expected an integer, got {}", value),
    })
}

fn i32_field(section: &Value, field: &'static str) -> Result<i32, ProtocolError> {
    let value = int_field(section, field)?;
    i32::try_from(value).map_err(|_| ProtocolError::InvalidField {
        field,
        reason: format!("{} is out of range", value),
    })
}
