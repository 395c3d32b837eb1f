//! Reaction network data model and graph construction
//!
//! This module provides the species/reaction data model and the network
//! aggregate that code generation consumes.
//!
//! # Overview
//!
//! A network is built once from an ordered list of [`Rate`] definitions. The
//! build derives the unique species set, in first-occurrence order, and the
//! consumed-by/produced-by indexes that the program emitter folds into
//! per-species derivative sums. The resulting [`Network`] is read-only.
//!
//! Species indices in generated code follow `unique_nuclei` order, so the same
//! rate list always produces the same program text.
//!
//! # Quick Start
//!
//! ```ignore
//! use nucnet::{CodeGenerator, Network, Rate};
//!
//! let rates = vec![
//!     Rate::builder()
//!         .reactant("c12", 12)
//!         .reactant("c12", 12)
//!         .product("he4", 4)
//!         .product("ne20", 20)
//!         .dens_exp(1)
//!         .reaclib(
//!             "cf88",
//!             [61.2863, -84.165, 0.0, -1.56627, -0.0736084, -0.072797, -0.666667],
//!         )
//!         .build(),
//! ];
//!
//! let network = Network::new(rates)?;
//! CodeGenerator::new(&network).write_to_path("cburn.py")?;
//! ```
//!
//! # JSON Rate Definitions
//!
//! [`Network::from_json`] accepts a JSON array of rate objects:
//!
//! | Field | Description |
//! |-------|-------------|
//! | `reactants` | Ordered list of `{ "name", "a" }` species; repeats encode multiplicity |
//! | `products` | Ordered list of `{ "name", "a" }` species |
//! | `dens_exp` | Density exponent (defaults to 0) |
//! | `prefactor` | Scalar rate multiplier (defaults to 1.0) |
//! | `fname` | Unique rate function identifier |
//! | `sets` | Additive fit terms, tagged by `type` |
//!
//! Fit terms:
//!
//! | `type` | Fields |
//! |--------|--------|
//! | `reaclib` | `label`, `a` (seven fit coefficients) |
//! | `constant` | `label`, `value` |
//!
//! # Error Handling
//!
//! Construction returns `Result<Network, NetworkError>`:
//!
//! ```ignore
//! match Network::from_json(json) {
//!     Ok(network) => println!("{} species", network.nnuc()),
//!     Err(NetworkError::DuplicateIdentifier { fname }) => {
//!         eprintln!("rate function '{}' defined twice", fname);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

mod builder;
mod errors;
mod nucleus;
mod rate;

pub use builder::RateBuilder;
pub use errors::NetworkError;
pub use nucleus::Nucleus;
pub use rate::{Rate, RateFit};

use std::collections::{HashMap, HashSet};

/// A reaction network ready for code generation
///
/// Holds the rate list in emission order, the deduplicated species set, and
/// the per-species consumption/production indexes.
#[derive(Debug, Clone)]
pub struct Network {
    rates: Vec<Rate>,
    unique_nuclei: Vec<Nucleus>,
    nuclei_consumed: HashMap<Nucleus, Vec<usize>>,
    nuclei_produced: HashMap<Nucleus, Vec<usize>>,
}

impl Network {
    /// Build a network from an ordered list of rates
    ///
    /// Fails with [`NetworkError::DuplicateIdentifier`] when two rates share
    /// an `fname`. Stoichiometry is not validated here; degenerate rates
    /// synthesize degenerate (but well-formed) expressions.
    pub fn new(rates: Vec<Rate>) -> Result<Self, NetworkError> {
        let mut seen = HashSet::new();
        for rate in &rates {
            if !seen.insert(rate.fname().to_string()) {
                return Err(NetworkError::duplicate_identifier(rate.fname()));
            }
        }

        let mut unique_nuclei: Vec<Nucleus> = Vec::new();
        let mut nuclei_consumed: HashMap<Nucleus, Vec<usize>> = HashMap::new();
        let mut nuclei_produced: HashMap<Nucleus, Vec<usize>> = HashMap::new();

        for (i, rate) in rates.iter().enumerate() {
            for n in rate.reactants().iter().chain(rate.products()) {
                if !unique_nuclei.contains(n) {
                    unique_nuclei.push(n.clone());
                }
            }
            for n in rate.distinct_reactants() {
                nuclei_consumed.entry(n.clone()).or_default().push(i);
            }
            for n in rate.distinct_products() {
                nuclei_produced.entry(n.clone()).or_default().push(i);
            }
        }

        Ok(Self {
            rates,
            unique_nuclei,
            nuclei_consumed,
            nuclei_produced,
        })
    }

    /// Build a network from a JSON array of rate definitions
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let rates: Vec<Rate> = serde_json::from_str(json)?;
        Self::new(rates)
    }

    /// The rates, in emission order
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// The unique species, in first-occurrence order
    pub fn nuclei(&self) -> &[Nucleus] {
        &self.unique_nuclei
    }

    /// Number of unique species
    pub fn nnuc(&self) -> usize {
        self.unique_nuclei.len()
    }

    /// Rates consuming the given species, in rate-list order
    pub fn consumers(&self, nucleus: &Nucleus) -> Vec<&Rate> {
        self.nuclei_consumed
            .get(nucleus)
            .map(|indices| indices.iter().map(|&i| &self.rates[i]).collect())
            .unwrap_or_default()
    }

    /// Rates producing the given species, in rate-list order
    pub fn producers(&self, nucleus: &Nucleus) -> Vec<&Rate> {
        self.nuclei_produced
            .get(nucleus)
            .map(|indices| indices.iter().map(|&i| &self.rates[i]).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rate in &self.rates {
            writeln!(f, "{}", rate)?;
        }
        Ok(())
    }
}
