//! Reaction definitions and their temperature-dependent rate fits

use serde::{Deserialize, Serialize};

use crate::codegen::expr::Expr;
use crate::network::nucleus::Nucleus;

fn default_prefactor() -> f64 {
    1.0
}

/// A single reaction in the network
///
/// Reactants and products are ordered multisets: a species appearing twice has
/// stoichiometric multiplicity two, which governs the exponent of its abundance
/// factor and the coefficients of derivative terms.
///
/// # Example
///
/// ```ignore
/// use nucnet::Rate;
///
/// let rate = Rate::builder()
///     .reactant("c12", 12)
///     .reactant("c12", 12)
///     .product("he4", 4)
///     .product("ne20", 20)
///     .dens_exp(1)
///     .reaclib("cf88", [61.2863, -84.165, 0.0, -1.56627, -0.0736084, -0.072797, -0.666667])
///     .build();
///
/// assert_eq!(rate.to_string(), "c12 + c12 --> he4 + ne20");
/// assert_eq!(rate.fname(), "c12_c12__he4_ne20");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Consumed species, repeats encode multiplicity
    reactants: Vec<Nucleus>,

    /// Produced species, repeats encode multiplicity
    products: Vec<Nucleus>,

    /// Power of density multiplying the rate
    #[serde(default)]
    dens_exp: u32,

    /// Scalar multiplying the rate (1.0 = no-op)
    #[serde(default = "default_prefactor")]
    prefactor: f64,

    /// Code-safe token naming the generated rate function and its λ variable.
    /// Must be unique across the network.
    fname: String,

    /// Additive fit terms summed into the rate coefficient
    sets: Vec<RateFit>,
}

impl Rate {
    /// Create a new rate
    pub fn new(
        reactants: Vec<Nucleus>,
        products: Vec<Nucleus>,
        dens_exp: u32,
        prefactor: f64,
        fname: impl Into<String>,
        sets: Vec<RateFit>,
    ) -> Self {
        Self {
            reactants,
            products,
            dens_exp,
            prefactor,
            fname: fname.into(),
            sets,
        }
    }

    /// The consumed species
    pub fn reactants(&self) -> &[Nucleus] {
        &self.reactants
    }

    /// The produced species
    pub fn products(&self) -> &[Nucleus] {
        &self.products
    }

    /// The density exponent
    pub fn dens_exp(&self) -> u32 {
        self.dens_exp
    }

    /// The scalar prefactor
    pub fn prefactor(&self) -> f64 {
        self.prefactor
    }

    /// The rate function identifier
    pub fn fname(&self) -> &str {
        &self.fname
    }

    /// The additive fit terms
    pub fn sets(&self) -> &[RateFit] {
        &self.sets
    }

    /// Distinct reactants in first-occurrence order
    ///
    /// This order is shared by flux and derivative synthesis so that
    /// composition factors align term-for-term across both.
    pub fn distinct_reactants(&self) -> Vec<&Nucleus> {
        let mut distinct: Vec<&Nucleus> = Vec::new();
        for n in &self.reactants {
            if !distinct.contains(&n) {
                distinct.push(n);
            }
        }
        distinct
    }

    /// Distinct products in first-occurrence order
    pub fn distinct_products(&self) -> Vec<&Nucleus> {
        let mut distinct: Vec<&Nucleus> = Vec::new();
        for n in &self.products {
            if !distinct.contains(&n) {
                distinct.push(n);
            }
        }
        distinct
    }

    /// Multiplicity of a species among the reactants
    pub fn reactant_count(&self, nucleus: &Nucleus) -> usize {
        self.reactants.iter().filter(|n| *n == nucleus).count()
    }

    /// Multiplicity of a species among the products
    pub fn product_count(&self, nucleus: &Nucleus) -> usize {
        self.products.iter().filter(|n| *n == nucleus).count()
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lhs = self
            .reactants
            .iter()
            .map(Nucleus::name)
            .collect::<Vec<_>>()
            .join(" + ");
        let rhs = self
            .products
            .iter()
            .map(Nucleus::name)
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{} --> {}", lhs, rhs)
    }
}

/// One additive term of a reaction's rate coefficient
///
/// Each variant knows how to contribute its own accumulation line to the
/// generated rate function. The set is closed: the fit form is chosen when the
/// rate is constructed, never by runtime inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RateFit {
    /// Standard seven-coefficient fit, `exp(a0 + a1/T9 + a2/T9^(1/3) + a3*T9^(1/3)
    /// + a4*T9 + a5*T9^(5/3) + a6*ln T9)`. Resonant and non-resonant
    /// contributions use the same form under distinct labels.
    Reaclib { label: String, a: [f64; 7] },

    /// Temperature-independent coefficient, e.g. a laboratory weak-decay rate
    Constant { label: String, value: f64 },
}

impl RateFit {
    /// Human-readable tag, used for comments in generated code
    pub fn label(&self) -> &str {
        match self {
            Self::Reaclib { label, .. } => label,
            Self::Constant { label, .. } => label,
        }
    }

    /// The accumulation line adding this term to `prefix`
    pub fn set_string(&self, prefix: &str) -> String {
        match self {
            Self::Reaclib { a, .. } => {
                format!("{} += np.exp({})", prefix, reaclib_exponent(a).to_python())
            }
            Self::Constant { value, .. } => {
                format!("{} += {}", prefix, Expr::float(*value).to_python())
            }
        }
    }
}

/// The exponent polynomial of the seven-coefficient fit, in temperature factors
fn reaclib_exponent(a: &[f64; 7]) -> Expr {
    let factors = ["tf.T9i", "tf.T913i", "tf.T913", "tf.T9", "tf.T953", "tf.lnT9"];
    let mut terms = vec![Expr::float(a[0])];
    for (coeff, factor) in a[1..].iter().zip(factors) {
        terms.push(Expr::product(vec![
            Expr::float(*coeff),
            Expr::variable(factor),
        ]));
    }
    Expr::sum(terms)
}
