use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use super::validation::positive;
use crate::error::Result;
use crate::random::PrngKey;
use crate::special::{xlog1py, xlogy};
use crate::standard_gamma::standard_gamma;
use tch::{Kind, Tensor};

/// Beta(a, b) on [0, 1], sampled as `G_a / (G_a + G_b)`.
pub struct Beta {
    a: Tensor,
    b: Tensor,
}

impl Beta {
    pub fn new(a: Tensor, b: Tensor) -> Result<Self> {
        let a = a.to_kind(Kind::Double);
        let b = b.to_kind(Kind::Double);
        positive("a", &a)?;
        positive("b", &b)?;
        Ok(Beta { a, b })
    }
}

impl StandardForm for Beta {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Beta
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        vec![&self.a, &self.b]
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        let (key_a, key_b) = key.split();
        let ga = standard_gamma(key_a, &self.a, Some(shape))?;
        let gb = standard_gamma(key_b, &self.b, Some(shape))?;
        Ok(&ga / (&ga + gb))
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        let log_beta = self.a.lgamma() + self.b.lgamma() - (&self.a + &self.b).lgamma();
        Ok(xlogy(&(&self.a - 1.0), y)? + xlog1py(&(&self.b - 1.0), &(-y))? - log_beta)
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.ge(0.0).logical_and(&y.le(1.0))
    }
}
