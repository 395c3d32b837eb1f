pub mod codegen;
pub mod network;

pub use crate::codegen::{
    jacobian_expr, jacobian_string, rate_string, ydot_expr, ydot_string, CodeGenerator, Expr,
    Literal,
};
pub use crate::network::{Network, NetworkError, Nucleus, Rate, RateBuilder, RateFit};

pub mod prelude {
    pub use crate::codegen::{CodeGenerator, Expr};
    pub use crate::network::{Network, NetworkError, Nucleus, Rate, RateBuilder, RateFit};
}
