pub mod base_distribution;
pub mod bernoulli;
pub mod beta;
pub mod binomial;
pub mod cauchy;
pub mod descriptor;
pub mod dirichlet;
pub mod exponential;
pub mod family;
pub mod gamma;
pub mod loc_scale;
pub mod lognormal;
pub mod multinomial;
pub mod normal;
pub mod student_t;
pub mod uniform;
mod validation;

pub use base_distribution::{BaseDistribution, ProbsOrLogits};
pub use bernoulli::Bernoulli;
pub use beta::Beta;
pub use binomial::Binomial;
pub use cauchy::Cauchy;
pub use descriptor::{DistributionDescriptor, ParamValue};
pub use dirichlet::Dirichlet;
pub use exponential::Exponential;
pub use family::{Distribution, DistributionFamily, Params};
pub use gamma::Gamma;
pub use loc_scale::{LocScale, StandardForm};
pub use lognormal::LogNormal;
pub use multinomial::Multinomial;
pub use normal::Normal;
pub use student_t::StudentT;
pub use uniform::Uniform;
