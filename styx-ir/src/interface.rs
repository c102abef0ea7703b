//! Tool-level descriptor types.

use serde::{Deserialize, Serialize};

use crate::{OutputId, Param, StructBody};

/// Free-form documentation attached to packages, parameters and outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documentation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub literature: Vec<String>,
    pub urls: Vec<String>,
}

impl Documentation {
    /// Documentation with only a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Returns true if neither a title nor a description is present.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().is_none_or(str::is_empty)
            && self.description.as_deref().is_none_or(str::is_empty)
    }
}

/// The software package a tool ships with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Container image tag the tool runs in.
    #[serde(default)]
    pub docker: Option<String>,
    #[serde(default)]
    pub docs: Documentation,
}

/// Declares that stdout or stderr is captured as a list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdStreamOutput {
    pub id: OutputId,
    pub name: String,
    #[serde(default)]
    pub docs: Documentation,
}

/// A complete tool descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Stable unique id of the tool (e.g. a hash of its descriptor).
    pub uid: String,
    pub package: Package,
    /// Root command. Must be a struct parameter.
    pub command: Param,
    #[serde(default)]
    pub stdout_as_string_output: Option<StdStreamOutput>,
    #[serde(default)]
    pub stderr_as_string_output: Option<StdStreamOutput>,
}

impl Interface {
    /// Root command body, if the root is a struct.
    pub fn command_body(&self) -> Option<&StructBody> {
        self.command.as_struct()
    }
}
