use serde::{Deserialize, Serialize};

/// What a variable stands for. Search only ever sees measured variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    #[default]
    Measured,
    Latent,
    Error,
}

/// A named variable. Two nodes are the same variable iff their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub node_type: NodeType,
}

impl Node {
    /// A measured variable.
    pub fn measured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Measured,
        }
    }

    /// A latent variable.
    pub fn latent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Latent,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.node_type == NodeType::Measured
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
