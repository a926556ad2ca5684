use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use super::validation::positive;
use crate::error::Result;
use crate::random::{normal, PrngKey};
use crate::standard_gamma::standard_gamma;
use std::f64::consts::PI;
use tch::{Kind, Tensor};

/// Student's t with `df` degrees of freedom: `N / sqrt(V / df)` with `V ~ chi2(df)`.
pub struct StudentT {
    df: Tensor,
}

impl StudentT {
    pub fn new(df: Tensor) -> Result<Self> {
        let df = df.to_kind(Kind::Double);
        positive("df", &df)?;
        Ok(StudentT { df })
    }
}

impl StandardForm for StudentT {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::StudentT
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        vec![&self.df]
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        let (normal_key, gamma_key) = key.split();
        let n = normal(normal_key, shape);
        // chi2(df) = 2 * Gamma(df / 2)
        let g = standard_gamma(gamma_key, &(&self.df * 0.5), Some(shape))?;
        Ok(n * (&self.df / (g * 2.0)).sqrt())
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        let half = (&self.df + 1.0) * 0.5;
        let log_norm = half.lgamma() - (&self.df * 0.5).lgamma() - (&self.df * PI).log() * 0.5;
        Ok(log_norm - half * (y.square() / &self.df).log1p())
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.isnan().logical_not()
    }
}
