use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use crate::error::Result;
use crate::random::{uniform, PrngKey};
use tch::Tensor;

pub struct Exponential;

impl StandardForm for Exponential {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Exponential
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        Vec::new()
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        Ok(-uniform(key, shape).log())
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        Ok(-y)
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.ge(0.0)
    }
}
