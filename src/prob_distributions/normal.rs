use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use crate::error::Result;
use crate::random::{normal, PrngKey};
use tch::Tensor;

pub struct Normal;

impl StandardForm for Normal {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Normal
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        Vec::new()
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        Ok(normal(key, shape))
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        Ok(-0.5 * ((2.0 * std::f64::consts::PI).ln() + y.pow_tensor_scalar(2.0)))
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.isnan().logical_not()
    }
}
