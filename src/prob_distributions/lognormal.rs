use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use super::validation::positive;
use crate::error::Result;
use crate::random::{normal, PrngKey};
use std::f64::consts::PI;
use tch::{Kind, Tensor};

/// Log-normal with shape `s`: `exp(s * N)` for a standard normal `N`.
pub struct LogNormal {
    s: Tensor,
}

impl LogNormal {
    pub fn new(s: Tensor) -> Result<Self> {
        let s = s.to_kind(Kind::Double);
        positive("s", &s)?;
        Ok(LogNormal { s })
    }
}

impl StandardForm for LogNormal {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::LogNormal
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        vec![&self.s]
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        Ok((&self.s * normal(key, shape)).exp())
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        let log_y = y.log();
        let quad = log_y.square() / (self.s.square() * 2.0);
        Ok(-(self.s.log() + &log_y + quad + 0.5 * (2.0 * PI).ln()))
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.gt(0.0)
    }
}
