//! Code generation from reaction networks to Python programs
//!
//! This module turns a [`Network`] into the text of a numpy program exposing
//! per-rate coefficient functions and the right-hand side `rhs(t, Y, rho, T)`
//! consumed by the surrounding integration tooling.

pub mod expr;
mod flux;

pub use expr::{Expr, Literal};
pub use flux::{jacobian_expr, jacobian_string, rate_string, ydot_expr, ydot_string};

use std::io::Write;
use std::path::Path;

use rayon::prelude::*;

use crate::network::{Network, NetworkError, Rate};

const HEADER: &str = "\
import numpy as np
from nucnet.rates import Tfactors

";

/// Program emitter for a reaction network
///
/// Emits, in order: the fixed header, one integer index binding per species
/// plus `nnuc`, the mass-number array, one rate function per reaction, and
/// `rhs`. [`CodeGenerator::with_jacobian`] appends a dense `jac` function.
///
/// Generation itself is pure; only the write step can fail.
pub struct CodeGenerator<'a> {
    network: &'a Network,
    jacobian: bool,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator for the network
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            jacobian: false,
        }
    }

    /// Create a generator that also emits `jac(t, Y, rho, T)`
    pub fn with_jacobian(network: &'a Network) -> Self {
        Self {
            network,
            jacobian: true,
        }
    }

    /// Generate the complete program text
    pub fn generate(&self) -> String {
        let mut program = String::from(HEADER);
        program.push_str(&self.generate_indices());
        program.push_str(&self.generate_mass_array());
        program.push_str(&self.generate_rate_functions());
        program.push_str(&self.generate_rhs());
        if self.jacobian {
            program.push('\n');
            program.push_str(&self.generate_jacobian());
        }
        program
    }

    /// Generate the program and write it to the sink
    pub fn write<W: Write>(&self, mut sink: W) -> Result<(), NetworkError> {
        sink.write_all(self.generate().as_bytes())?;
        Ok(())
    }

    /// Generate the program and write it to a file
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), NetworkError> {
        let path = path.as_ref();
        let file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("Failed to create {}: {}", path.display(), e);
                return Err(e.into());
            }
        };
        self.write(file)
    }

    /// Integer index bindings, one per species, plus the species count
    fn generate_indices(&self) -> String {
        let mut out = String::new();
        for (i, nucleus) in self.network.nuclei().iter().enumerate() {
            out.push_str(&format!("{} = {}\n", nucleus, i));
        }
        out.push_str(&format!("nnuc = {}\n\n", self.network.nnuc()));
        out
    }

    /// Mass-number array indexed by the species bindings
    fn generate_mass_array(&self) -> String {
        let mut out = String::from("mass = np.zeros((nnuc), dtype=np.int32)\n\n");
        for nucleus in self.network.nuclei() {
            out.push_str(&format!("mass[{}] = {}\n", nucleus, nucleus.a()));
        }
        out.push('\n');
        out
    }

    /// One coefficient function per rate, in rate-list order
    fn generate_rate_functions(&self) -> String {
        self.network
            .rates()
            .par_iter()
            .map(function_string)
            .collect::<Vec<_>>()
            .join("")
    }

    /// Temperature factors and one λ binding per rate
    fn generate_lambda_bindings(&self) -> String {
        let mut out = String::from("    tf = Tfactors(T)\n\n");
        for rate in self.network.rates() {
            out.push_str(&format!(
                "    lambda_{fname} = {fname}(tf)\n",
                fname = rate.fname()
            ));
        }
        out.push('\n');
        out
    }

    /// The right-hand-side function
    fn generate_rhs(&self) -> String {
        let mut out = String::from("def rhs(t, Y, rho, T):\n\n");
        out.push_str(&self.generate_lambda_bindings());
        out.push_str("    dYdt = np.zeros((nnuc), dtype=np.float64)\n\n");

        for nucleus in self.network.nuclei() {
            out.push_str(&format!("    dYdt[{}] = (\n", nucleus));
            for rate in self.network.consumers(nucleus) {
                out.push_str(&signed_term(
                    '-',
                    rate.reactant_count(nucleus),
                    &ydot_string(rate),
                ));
            }
            for rate in self.network.producers(nucleus) {
                out.push_str(&signed_term(
                    '+',
                    rate.product_count(nucleus),
                    &ydot_string(rate),
                ));
            }
            out.push_str("       )\n\n");
        }

        out.push_str("    return dYdt\n");
        out
    }

    /// The dense Jacobian function
    ///
    /// Entries where every derivative term is zero are never assigned and
    /// stay at the zero initialization.
    fn generate_jacobian(&self) -> String {
        let mut out = String::from("def jac(t, Y, rho, T):\n\n");
        out.push_str(&self.generate_lambda_bindings());
        out.push_str("    J = np.zeros((nnuc, nnuc), dtype=np.float64)\n\n");

        for target in self.network.nuclei() {
            for wrt in self.network.nuclei() {
                let mut terms = Vec::new();
                for rate in self.network.consumers(target) {
                    if let Some(expr) = jacobian_expr(rate, target, wrt) {
                        terms.push(signed_term(
                            '-',
                            rate.reactant_count(target),
                            &expr.to_python(),
                        ));
                    }
                }
                for rate in self.network.producers(target) {
                    if let Some(expr) = jacobian_expr(rate, target, wrt) {
                        terms.push(signed_term(
                            '+',
                            rate.product_count(target),
                            &expr.to_python(),
                        ));
                    }
                }
                if terms.is_empty() {
                    continue;
                }

                out.push_str(&format!("    J[{}, {}] = (\n", target, wrt));
                for term in &terms {
                    out.push_str(term);
                }
                out.push_str("       )\n\n");
            }
        }

        out.push_str("    return J\n");
        out
    }
}

/// A `def <fname>(tf):` function wrapping the rate's accumulator block
fn function_string(rate: &Rate) -> String {
    let mut out = format!("def {}(tf):\n", rate.fname());
    out.push_str(&indented(&rate_string(rate), 4));
    out.push_str("\n    return rate\n\n");
    out
}

/// One signed term line of a derivative sum, multiplicity folded in when > 1
fn signed_term(sign: char, multiplicity: usize, term: &str) -> String {
    if multiplicity == 1 {
        format!("       {}{}\n", sign, term)
    } else {
        format!("       {}{}*{}\n", sign, multiplicity, term)
    }
}

/// Indent every non-empty line of a block
fn indented(block: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::new();
    for line in block.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
