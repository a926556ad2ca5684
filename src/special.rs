mod dual;
mod elementwise;
mod gamma_fn;

pub use elementwise::{binary_cross_entropy_with_logits, xlog1py, xlogy};
pub use gamma_fn::{digamma, gamma_p, ln_gamma, standard_gamma_grad};
