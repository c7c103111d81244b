//! The fixed set of chat models a session may select.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::responder::ResponderError;

/// Chat model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl ModelId {
    /// Every selectable model, in menu order.
    pub const ALL: [ModelId; 2] = [ModelId::Gpt4, ModelId::Gpt35Turbo];

    /// Identifier sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt4 => "gpt-4",
            ModelId::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::Gpt35Turbo
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = ResponderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ResponderError::InvalidModel(s.to_string()))
    }
}
