use super::base_distribution::{BaseDistribution, ProbsOrLogits};
use super::family::DistributionFamily;
use super::validation::check_support;
use crate::error::Result;
use crate::random::{uniform, PrngKey};
use crate::special::{binary_cross_entropy_with_logits, xlog1py, xlogy};
use tch::{Kind, Tensor};

pub struct Bernoulli {
    p: ProbsOrLogits,
}

impl Bernoulli {
    pub fn new(p: Tensor, is_logits: bool) -> Result<Self> {
        Ok(Bernoulli {
            p: ProbsOrLogits::new("p", p, is_logits)?,
        })
    }

    pub fn p(&self) -> &ProbsOrLogits {
        &self.p
    }
}

impl BaseDistribution for Bernoulli {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Bernoulli
    }

    fn batch_shape(&self) -> Vec<i64> {
        self.p.param().size()
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        let shape = self.extended_shape(size)?;
        let u = uniform(key, &shape);
        Ok(u.lt_tensor(&self.p.binary_probs()).to_kind(Kind::Double))
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.to_kind(Kind::Double);
        self.log_prob_shape(&x)?;
        check_support(self.family().name(), &x, &x.eq(0.0).logical_or(&x.eq(1.0)))?;
        match &self.p {
            ProbsOrLogits::Probs(p) => Ok(xlogy(&x, p)? + xlog1py(&(-&x + 1.0), &(-p))?),
            ProbsOrLogits::Logits(l) => Ok(-binary_cross_entropy_with_logits(l, &x)?),
        }
    }
}
