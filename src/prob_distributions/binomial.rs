use super::base_distribution::{BaseDistribution, ProbsOrLogits};
use super::family::DistributionFamily;
use super::validation::{check_support, is_integer, non_negative_integer};
use crate::error::Result;
use crate::misc::broadcast::broadcast_shapes;
use crate::misc::max_count;
use crate::random::{uniform, PrngKey};
use crate::special::{binary_cross_entropy_with_logits, xlog1py, xlogy};
use tch::{Device, Kind, Tensor};

/// Number of successes in `n` Bernoulli(p) trials.
pub struct Binomial {
    n: Tensor,
    p: ProbsOrLogits,
    batch_shape: Vec<i64>,
}

impl Binomial {
    pub fn new(n: Tensor, p: Tensor, is_logits: bool) -> Result<Self> {
        let n = n.to_kind(Kind::Double);
        non_negative_integer("n", &n)?;
        let p = ProbsOrLogits::new("p", p, is_logits)?;
        let batch_shape = broadcast_shapes(&[n.size().as_slice(), p.param().size().as_slice()])?;
        Ok(Binomial { n, p, batch_shape })
    }

    pub fn n(&self) -> &Tensor {
        &self.n
    }

    pub fn p(&self) -> &ProbsOrLogits {
        &self.p
    }
}

impl BaseDistribution for Binomial {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Binomial
    }

    fn batch_shape(&self) -> Vec<i64> {
        self.batch_shape.clone()
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        let shape = self.extended_shape(size)?;
        let max_n = max_count(&self.n)?;

        // One uniform per potential trial; trials past `n` are masked out.
        let mut trial_shape = shape.clone();
        trial_shape.push(max_n);
        let u = uniform(key, &trial_shape);
        let success = u.lt_tensor(&self.p.binary_probs().unsqueeze(-1));
        let active = Tensor::arange(max_n, (Kind::Double, Device::Cpu))
            .lt_tensor(&self.n.detach().unsqueeze(-1));
        Ok(success
            .logical_and(&active)
            .to_kind(Kind::Double)
            .sum_dim_intlist([-1].as_ref(), false, Kind::Double))
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.to_kind(Kind::Double);
        self.log_prob_shape(&x)?;
        let ok = is_integer(&x)
            .logical_and(&x.ge(0.0))
            .logical_and(&x.le_tensor(&self.n));
        check_support(self.family().name(), &x, &ok)?;

        let n = &self.n;
        let failures = n - &x;
        let log_binom = (n + 1.0).lgamma() - (&x + 1.0).lgamma() - (&failures + 1.0).lgamma();
        match &self.p {
            ProbsOrLogits::Probs(p) => Ok(log_binom + xlogy(&x, p)? + xlog1py(&failures, &(-p))?),
            ProbsOrLogits::Logits(l) => {
                // k l - n softplus(l)
                let softplus = binary_cross_entropy_with_logits(l, &Tensor::from(0.0))?;
                Ok(log_binom + &x * l - n * softplus)
            }
        }
    }
}
