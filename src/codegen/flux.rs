//! Flux and derivative synthesis for single rates
//!
//! Pure functions from a [`Rate`] (and, for derivatives, a species pair) to
//! expression trees and their rendered text. Both flux and derivative walk the
//! distinct reactants in the same first-occurrence order, so their composition
//! factors line up term-for-term.

use crate::codegen::expr::Expr;
use crate::network::{Nucleus, Rate};

/// The labeled accumulator block computing a rate's temperature coefficient
///
/// ```text
/// # c12 + c12 --> he4 + ne20
/// rate = 0.0
///
/// # cf88
/// rate += np.exp(...)
/// ```
///
/// One comment and one accumulation line per fit term, in order. With no fit
/// terms the coefficient is identically zero.
pub fn rate_string(rate: &Rate) -> String {
    let mut out = format!("# {}\n", rate);
    out.push_str("rate = 0.0\n");

    if !rate.sets().is_empty() {
        out.push('\n');
        for set in rate.sets() {
            out.push_str(&format!("# {}\n", set.label()));
            out.push_str(&set.set_string("rate"));
            out.push('\n');
        }
    }
    out
}

/// One rate's net instantaneous flux as an expression tree
///
/// The factor order is prefactor, density, abundances, λ.
pub fn ydot_expr(rate: &Rate) -> Expr {
    let mut factors = Vec::new();

    if let Some(prefactor) = prefactor_expr(rate) {
        factors.push(prefactor);
    }
    if let Some(density) = density_expr(rate) {
        factors.push(density);
    }
    for nucleus in rate.distinct_reactants() {
        factors.push(abundance_expr(nucleus, rate.reactant_count(nucleus)));
    }
    factors.push(lambda_expr(rate));

    Expr::product(factors)
}

/// Rendered form of [`ydot_expr`]
pub fn ydot_string(rate: &Rate) -> String {
    ydot_expr(rate).to_python()
}

/// ∂(flux)/∂Y\[wrt\] as an expression tree, `None` when identically zero
///
/// The derivative is zero when `target` is neither consumed nor produced by
/// the rate, or when `wrt` is not a reactant (only reactant abundances appear
/// in the flux). Otherwise the product rule differentiates the `wrt` factor in
/// place: multiplicity 1 drops it, multiplicity `c` becomes `c*Y[r]**(c-1)`.
pub fn jacobian_expr(rate: &Rate, target: &Nucleus, wrt: &Nucleus) -> Option<Expr> {
    let touches_target =
        rate.reactants().contains(target) || rate.products().contains(target);
    if !touches_target || !rate.reactants().contains(wrt) {
        return None;
    }

    let mut factors = Vec::new();

    if let Some(prefactor) = prefactor_expr(rate) {
        factors.push(prefactor);
    }
    if let Some(density) = density_expr(rate) {
        factors.push(density);
    }
    for nucleus in rate.distinct_reactants() {
        let count = rate.reactant_count(nucleus);
        if nucleus == wrt {
            match count {
                1 => {}
                2 => {
                    factors.push(Expr::int(2));
                    factors.push(y_variable(nucleus));
                }
                _ => {
                    factors.push(Expr::int(count as i64));
                    factors.push(Expr::power(y_variable(nucleus), (count - 1) as u32));
                }
            }
        } else {
            factors.push(abundance_expr(nucleus, count));
        }
    }
    factors.push(lambda_expr(rate));

    Some(Expr::product(factors))
}

/// Rendered form of [`jacobian_expr`]; the empty string means zero
pub fn jacobian_string(rate: &Rate, target: &Nucleus, wrt: &Nucleus) -> String {
    jacobian_expr(rate, target, wrt)
        .map(|expr| expr.to_python())
        .unwrap_or_default()
}

fn prefactor_expr(rate: &Rate) -> Option<Expr> {
    if rate.prefactor() == 1.0 {
        None
    } else {
        Some(Expr::float(rate.prefactor()))
    }
}

fn density_expr(rate: &Rate) -> Option<Expr> {
    match rate.dens_exp() {
        0 => None,
        1 => Some(Expr::variable("rho")),
        n => Some(Expr::power(Expr::variable("rho"), n)),
    }
}

fn y_variable(nucleus: &Nucleus) -> Expr {
    Expr::variable(format!("Y[{}]", nucleus))
}

fn abundance_expr(nucleus: &Nucleus, count: usize) -> Expr {
    if count == 1 {
        y_variable(nucleus)
    } else {
        Expr::power(y_variable(nucleus), count as u32)
    }
}

fn lambda_expr(rate: &Rate) -> Expr {
    Expr::variable(format!("lambda_{}", rate.fname()))
}
