use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use crate::error::Result;
use crate::random::{uniform, PrngKey};
use std::f64::consts::PI;
use tch::Tensor;

/// Standard Cauchy, sampled by inverting its CDF.
pub struct Cauchy;

impl StandardForm for Cauchy {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Cauchy
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        Vec::new()
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        Ok(((uniform(key, shape) - 0.5) * PI).tan())
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        Ok(-(y.square().log1p() + PI.ln()))
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.isnan().logical_not()
    }
}
