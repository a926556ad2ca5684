//! Differentiable probability distributions on `tch` tensors.
//!
//! Sampling is driven by an explicit, splittable [`PrngKey`]. Gamma-based
//! families (gamma, beta, Student's t, Dirichlet) are reparameterized through
//! [`standard_gamma`], whose gradient with respect to the shape parameter
//! comes from implicit differentiation of the gamma CDF.

pub mod error;
pub mod misc;
pub mod prob_distributions;
pub mod random;
pub mod special;
pub mod standard_gamma;

pub use error::{DistributionError, Result};
pub use prob_distributions::{BaseDistribution, Distribution, DistributionDescriptor, DistributionFamily, Params};
pub use random::PrngKey;
pub use standard_gamma::standard_gamma;
