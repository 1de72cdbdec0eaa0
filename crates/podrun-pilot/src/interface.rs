//! Interface serialization for staging command lines.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use podrun_core::VariableMap;
use prost::Message;

use crate::error::{PilotError, Result};

/// Which side of a task interface is being staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceSide {
    Input,
    Output,
}

impl fmt::Display for InterfaceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Encode a variable schema as a single command-line token.
///
/// The schema is written in its protobuf wire encoding and then base64
/// encoded (standard alphabet, padded). The staging binary reverses both
/// steps.
pub fn serialize_interface(variables: Option<&VariableMap>, side: InterfaceSide) -> Result<String> {
    let variables = variables.ok_or(PilotError::MissingInterface { side })?;

    let mut buf = Vec::with_capacity(variables.encoded_len());
    variables
        .encode(&mut buf)
        .map_err(|source| PilotError::Serialization { side, source })?;

    Ok(STANDARD.encode(buf))
}
