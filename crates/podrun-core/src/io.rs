//! Accessors for where a task attempt's data lives in blob storage.

use serde::{Deserialize, Serialize};

use crate::DataReference;

/// Where the inputs of a task attempt are stored.
pub trait InputFilePaths {
    /// Prefix under which all input files live.
    fn input_prefix_path(&self) -> DataReference;

    /// Location of the serialized input literal map.
    fn input_path(&self) -> DataReference;
}

/// Where the outputs of a task attempt must be written.
pub trait OutputFilePaths {
    /// Prefix under which output metadata is written.
    fn output_prefix_path(&self) -> DataReference;

    /// Prefix for raw (offloaded) output data.
    fn raw_output_prefix(&self) -> DataReference;
}

/// Plain record implementing both accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPaths {
    pub input_prefix: DataReference,
    pub input: DataReference,
    pub output_prefix: DataReference,
    #[serde(default)]
    pub raw_output_prefix: DataReference,
}

impl InputFilePaths for TaskPaths {
    fn input_prefix_path(&self) -> DataReference {
        self.input_prefix.clone()
    }

    fn input_path(&self) -> DataReference {
        self.input.clone()
    }
}

impl OutputFilePaths for TaskPaths {
    fn output_prefix_path(&self) -> DataReference {
        self.output_prefix.clone()
    }

    fn raw_output_prefix(&self) -> DataReference {
        self.raw_output_prefix.clone()
    }
}
