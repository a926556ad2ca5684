use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use crate::error::Result;
use crate::random::{uniform, PrngKey};
use tch::Tensor;

pub struct Uniform;

impl StandardForm for Uniform {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Uniform
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        Vec::new()
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        Ok(uniform(key, shape))
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        Ok(y.zeros_like())
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.ge(0.0).logical_and(&y.le(1.0))
    }
}
