//! Species identity for reaction networks

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A chemical or nuclear species tracked by the network
///
/// The name doubles as the index token in generated code, so it must be a
/// valid identifier in the target language (e.g. `c12`, `he4`). Equality and
/// hashing consider the name only; the mass number is carried for the emitted
/// mass array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nucleus {
    /// Identity token
    name: String,

    /// Mass number
    a: u32,
}

impl Nucleus {
    /// Create a new species
    pub fn new(name: impl Into<String>, a: u32) -> Self {
        Self {
            name: name.into(),
            a,
        }
    }

    /// The identity token
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mass number
    pub fn a(&self) -> u32 {
        self.a
    }
}

impl PartialEq for Nucleus {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Nucleus {}

impl Hash for Nucleus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Nucleus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
