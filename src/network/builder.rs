//! Fluent construction of reaction rates

use crate::network::nucleus::Nucleus;
use crate::network::rate::{Rate, RateFit};

impl Rate {
    /// Start building a rate
    pub fn builder() -> RateBuilder {
        RateBuilder {
            reactants: Vec::new(),
            products: Vec::new(),
            dens_exp: 0,
            prefactor: 1.0,
            fname: None,
            sets: Vec::new(),
        }
    }
}

/// Builder for [`Rate`]
///
/// When no `fname` is given, `build` derives one from the equation: reactant
/// names joined by `_`, a `__` separator, then product names joined by `_`
/// (`c12 + c12 --> he4 + ne20` becomes `c12_c12__he4_ne20`).
pub struct RateBuilder {
    reactants: Vec<Nucleus>,
    products: Vec<Nucleus>,
    dens_exp: u32,
    prefactor: f64,
    fname: Option<String>,
    sets: Vec<RateFit>,
}

impl RateBuilder {
    /// Append a reactant; repeat for multiplicity
    pub fn reactant(mut self, name: impl Into<String>, a: u32) -> Self {
        self.reactants.push(Nucleus::new(name, a));
        self
    }

    /// Append a product; repeat for multiplicity
    pub fn product(mut self, name: impl Into<String>, a: u32) -> Self {
        self.products.push(Nucleus::new(name, a));
        self
    }

    /// Set the density exponent
    pub fn dens_exp(mut self, dens_exp: u32) -> Self {
        self.dens_exp = dens_exp;
        self
    }

    /// Set the scalar prefactor
    pub fn prefactor(mut self, prefactor: f64) -> Self {
        self.prefactor = prefactor;
        self
    }

    /// Override the derived rate function identifier
    pub fn fname(mut self, fname: impl Into<String>) -> Self {
        self.fname = Some(fname.into());
        self
    }

    /// Append a seven-coefficient fit term
    pub fn reaclib(mut self, label: impl Into<String>, a: [f64; 7]) -> Self {
        self.sets.push(RateFit::Reaclib {
            label: label.into(),
            a,
        });
        self
    }

    /// Append a temperature-independent fit term
    pub fn constant(mut self, label: impl Into<String>, value: f64) -> Self {
        self.sets.push(RateFit::Constant {
            label: label.into(),
            value,
        });
        self
    }

    /// Finish building the rate
    pub fn build(self) -> Rate {
        let fname = self.fname.unwrap_or_else(|| {
            let lhs = self
                .reactants
                .iter()
                .map(Nucleus::name)
                .collect::<Vec<_>>()
                .join("_");
            let rhs = self
                .products
                .iter()
                .map(Nucleus::name)
                .collect::<Vec<_>>()
                .join("_");
            format!("{}__{}", lhs, rhs)
        });
        Rate::new(
            self.reactants,
            self.products,
            self.dens_exp,
            self.prefactor,
            fname,
            self.sets,
        )
    }
}
