//! Typed input/output interface of a task.
//!
//! These are protobuf messages: the staging binary receives them in their
//! binary wire encoding, so field tags are part of the contract and must
//! never be renumbered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primitive literal types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SimpleType {
    NoneType = 0,
    Integer = 1,
    Float = 2,
    String = 3,
    Boolean = 4,
    Datetime = 5,
    Duration = 6,
    Binary = 7,
    Error = 8,
    Struct = 9,
}

/// Whether a blob is a single file or a directory of parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum BlobDimensionality {
    Single = 0,
    Multipart = 1,
}

/// Blob literal type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
pub struct BlobType {
    /// Free-form format tag (e.g. `csv`); empty means unspecified.
    #[prost(string, tag = "1")]
    #[serde(default)]
    pub format: String,

    #[prost(enumeration = "BlobDimensionality", tag = "2")]
    #[serde(default)]
    pub dimensionality: i32,
}

/// Type of a single interface variable.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
pub struct LiteralType {
    #[prost(enumeration = "SimpleType", tag = "1")]
    #[serde(default)]
    pub simple: i32,

    /// Set when the variable is a blob; `simple` is ignored then.
    #[prost(message, optional, tag = "2")]
    #[serde(default)]
    pub blob: Option<BlobType>,
}

impl LiteralType {
    /// Literal type for a primitive.
    pub fn of_simple(simple: SimpleType) -> Self {
        Self {
            simple: simple as i32,
            blob: None,
        }
    }

    /// Literal type for a blob.
    pub fn of_blob(format: impl Into<String>, dimensionality: BlobDimensionality) -> Self {
        Self {
            simple: SimpleType::NoneType as i32,
            blob: Some(BlobType {
                format: format.into(),
                dimensionality: dimensionality as i32,
            }),
        }
    }
}

/// A named variable in an interface.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
pub struct Variable {
    #[prost(message, optional, tag = "1")]
    #[serde(default)]
    pub literal_type: Option<LiteralType>,

    #[prost(string, tag = "2")]
    #[serde(default)]
    pub description: String,
}

impl Variable {
    /// Create a variable of the given type.
    pub fn new(literal_type: LiteralType) -> Self {
        Self {
            literal_type: Some(literal_type),
            description: String::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Variable schema for one side of an interface.
///
/// Ordered so that the binary encoding is deterministic.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
pub struct VariableMap {
    #[prost(btree_map = "string, message", tag = "1")]
    #[serde(default)]
    pub variables: BTreeMap<String, Variable>,
}

impl VariableMap {
    /// Builder method to add a variable.
    pub fn with_variable(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Declared inputs and outputs of a task.
///
/// A side that is `None` needs no staging; an empty map still does.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
pub struct TypedInterface {
    #[prost(message, optional, tag = "1")]
    #[serde(default)]
    pub inputs: Option<VariableMap>,

    #[prost(message, optional, tag = "2")]
    #[serde(default)]
    pub outputs: Option<VariableMap>,
}

impl TypedInterface {
    /// Create an interface from its two sides.
    pub fn new(inputs: Option<VariableMap>, outputs: Option<VariableMap>) -> Self {
        Self { inputs, outputs }
    }

    /// Returns true if either side needs staging.
    pub fn has_data(&self) -> bool {
        self.inputs.is_some() || self.outputs.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    fn sample_inputs() -> VariableMap {
        VariableMap::default()
            .with_variable("x", Variable::new(LiteralType::of_simple(SimpleType::Integer)))
            .with_variable(
                "data",
                Variable::new(LiteralType::of_blob("csv", BlobDimensionality::Single))
                    .with_description("training data"),
            )
    }

    #[test]
    fn test_has_data() {
        assert!(!TypedInterface::default().has_data());
        assert!(TypedInterface::new(Some(VariableMap::default()), None).has_data());
        assert!(TypedInterface::new(None, Some(sample_inputs())).has_data());
    }

    #[test]
    fn test_binary_encoding_is_deterministic() {
        let a = sample_inputs().encode_to_vec();
        let b = sample_inputs().encode_to_vec();
        assert_eq!(a, b);

        let decoded = VariableMap::decode(a.as_slice()).unwrap();
        assert_eq!(decoded, sample_inputs());
    }

    #[test]
    fn test_enumeration_getter() {
        let ty = LiteralType::of_simple(SimpleType::Float);
        assert_eq!(ty.simple(), SimpleType::Float);

        let blob = LiteralType::of_blob("parquet", BlobDimensionality::Multipart);
        assert_eq!(
            blob.blob.unwrap().dimensionality(),
            BlobDimensionality::Multipart
        );
    }

    #[test]
    fn test_json_input() {
        let json = r#"{"inputs":{"variables":{"x":{"literal_type":{"simple":1}}}}}"#;
        let iface: TypedInterface = serde_json::from_str(json).unwrap();
        let inputs = iface.inputs.unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(
            inputs.variables["x"].literal_type.as_ref().unwrap().simple(),
            SimpleType::Integer
        );
        assert!(iface.outputs.is_none());
    }
}
