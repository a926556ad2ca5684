use super::base_distribution::BaseDistribution;
use super::family::DistributionFamily;
use super::validation::{check_support, positive};
use crate::error::{DistributionError, Result};
use crate::random::PrngKey;
use crate::special::xlogy;
use crate::standard_gamma::standard_gamma;
use tch::{Kind, Tensor};

/// Largest accepted `|sum(x) - 1|` for a point of the simplex.
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;

/// Dirichlet over the last axis of `alpha`, sampled as normalized gamma variates.
pub struct Dirichlet {
    alpha: Tensor,
}

impl Dirichlet {
    pub fn new(alpha: Tensor) -> Result<Self> {
        let alpha = alpha.to_kind(Kind::Double);
        if alpha.dim() == 0 {
            return Err(DistributionError::parameter("alpha", "a scalar concentration"));
        }
        positive("alpha", &alpha)?;
        Ok(Dirichlet { alpha })
    }

    pub fn alpha(&self) -> &Tensor {
        &self.alpha
    }
}

impl BaseDistribution for Dirichlet {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Dirichlet
    }

    fn batch_shape(&self) -> Vec<i64> {
        let shape = self.alpha.size();
        shape[..shape.len() - 1].to_vec()
    }

    fn event_shape(&self) -> Vec<i64> {
        self.alpha.size().last().map(|&k| vec![k]).unwrap_or_default()
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        let shape = self.extended_shape(size)?;
        let g = standard_gamma(key, &self.alpha, Some(&shape))?;
        let total = g.sum_dim_intlist([-1].as_ref(), true, Kind::Double);
        Ok(g / total)
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.to_kind(Kind::Double);
        if x.size().last() != self.event_shape().last() {
            return Err(DistributionError::Shape {
                left: x.size(),
                right: self.alpha.size(),
            });
        }
        self.log_prob_shape(&x)?;

        let family = self.family().name();
        check_support(family, &x, &x.gt(0.0).logical_and(&x.le(1.0)))?;
        let total = x.sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        check_support(family, &total, &(&total - 1.0).abs().le(SIMPLEX_TOLERANCE))?;

        let alpha = &self.alpha;
        let log_norm = alpha.sum_dim_intlist([-1].as_ref(), false, Kind::Double).lgamma()
            - alpha.lgamma().sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        let log_kernel = xlogy(&(alpha - 1.0), &x)?.sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        Ok(log_norm + log_kernel)
    }
}
