//! Symbolic arithmetic expressions for generated code
//!
//! The synthesizer builds expression trees and serializes them to target text
//! only at emission, keeping symbolic structure and textual formatting apart.

/// A numeric literal
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer, rendered plainly (stoichiometric coefficients, exponents)
    Int(i64),
    /// Real scalar, rendered with full double precision
    Float(f64),
}

impl Literal {
    /// Render as a Python literal
    pub fn to_python(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format!("{:.14e}", value),
        }
    }
}

/// A symbolic arithmetic expression
///
/// The variant set is closed; everything the generator emits is assembled
/// from these five forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal
    Literal(Literal),
    /// A named quantity, rendered verbatim (`Y[c12]`, `rho`, `tf.T9i`)
    Variable(String),
    /// Integer power of a base expression
    Power(Box<Expr>, u32),
    /// Ordered product of factors
    Product(Vec<Expr>),
    /// Ordered sum of terms
    Sum(Vec<Expr>),
}

impl Expr {
    /// An integer literal
    pub fn int(value: i64) -> Self {
        Self::Literal(Literal::Int(value))
    }

    /// A float literal
    pub fn float(value: f64) -> Self {
        Self::Literal(Literal::Float(value))
    }

    /// A named variable
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// A power
    pub fn power(base: Expr, exp: u32) -> Self {
        Self::Power(Box::new(base), exp)
    }

    /// A product of factors, in order
    pub fn product(factors: Vec<Expr>) -> Self {
        Self::Product(factors)
    }

    /// A sum of terms, in order
    pub fn sum(terms: Vec<Expr>) -> Self {
        Self::Sum(terms)
    }

    /// Render as a Python expression
    ///
    /// Composite bases and sum factors are parenthesized; an empty product
    /// renders `1` and an empty sum renders `0`. A sum term whose rendering
    /// carries a leading minus joins with ` - ` instead of ` + `.
    pub fn to_python(&self) -> String {
        match self {
            Self::Literal(literal) => literal.to_python(),
            Self::Variable(name) => name.clone(),
            Self::Power(base, exp) => match base.as_ref() {
                Self::Literal(_) | Self::Variable(_) => {
                    format!("{}**{}", base.to_python(), exp)
                }
                _ => format!("({})**{}", base.to_python(), exp),
            },
            Self::Product(factors) => {
                if factors.is_empty() {
                    return "1".to_string();
                }
                factors
                    .iter()
                    .map(|factor| match factor {
                        Self::Sum(_) => format!("({})", factor.to_python()),
                        _ => factor.to_python(),
                    })
                    .collect::<Vec<_>>()
                    .join("*")
            }
            Self::Sum(terms) => {
                if terms.is_empty() {
                    return "0".to_string();
                }
                let mut out = terms[0].to_python();
                for term in &terms[1..] {
                    let rendered = term.to_python();
                    match rendered.strip_prefix('-') {
                        Some(rest) => {
                            out.push_str(" - ");
                            out.push_str(rest);
                        }
                        None => {
                            out.push_str(" + ");
                            out.push_str(&rendered);
                        }
                    }
                }
                out
            }
        }
    }
}
