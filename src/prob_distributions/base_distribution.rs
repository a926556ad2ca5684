use super::family::DistributionFamily;
use super::validation::{not_nan, unit_interval};
use crate::error::Result;
use crate::misc::broadcast::broadcast_shapes;
use crate::random::PrngKey;
use tch::{Kind, Tensor};

pub trait BaseDistribution {
    fn family(&self) -> DistributionFamily;

    /// Broadcast shape of every parameter.
    fn batch_shape(&self) -> Vec<i64>;

    fn event_shape(&self) -> Vec<i64> {
        Vec::new()
    }

    /// Draws a sample of shape `broadcast(size, batch_shape) ++ event_shape`.
    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor>;

    /// Log density (or log mass) of `x`, after checking `x` lies in the support.
    fn log_prob(&self, x: &Tensor) -> Result<Tensor>;

    fn prob(&self, x: &Tensor) -> Result<Tensor> {
        Ok(self.log_prob(x)?.exp())
    }

    fn extended_shape(&self, size: Option<&[i64]>) -> Result<Vec<i64>> {
        let batch_shape = self.batch_shape();
        let mut shape = broadcast_shapes(&[size.unwrap_or(&[]), batch_shape.as_slice()])?;
        shape.extend(self.event_shape());
        Ok(shape)
    }

    /// Shape of `log_prob(x)`; fails when `x` cannot broadcast against the batch.
    fn log_prob_shape(&self, x: &Tensor) -> Result<Vec<i64>> {
        let mut full = self.batch_shape();
        full.extend(self.event_shape());
        let mut shape = broadcast_shapes(&[x.size().as_slice(), full.as_slice()])?;
        let event_dims = self.event_shape().len();
        shape.truncate(shape.len() - event_dims);
        Ok(shape)
    }
}

/// Probability parameter of a discrete family, given directly or as logits.
pub enum ProbsOrLogits {
    Probs(Tensor),
    Logits(Tensor),
}

impl ProbsOrLogits {
    pub fn new(name: &'static str, param: Tensor, is_logits: bool) -> Result<Self> {
        let param = param.to_kind(Kind::Double);
        if is_logits {
            not_nan(name, &param)?;
            Ok(ProbsOrLogits::Logits(param))
        } else {
            unit_interval(name, &param)?;
            Ok(ProbsOrLogits::Probs(param))
        }
    }

    pub fn param(&self) -> &Tensor {
        match self {
            ProbsOrLogits::Probs(p) | ProbsOrLogits::Logits(p) => p,
        }
    }

    /// Success probability of a binary outcome (sigmoid of logits).
    pub fn binary_probs(&self) -> Tensor {
        match self {
            ProbsOrLogits::Probs(p) => p.shallow_clone(),
            ProbsOrLogits::Logits(l) => l.sigmoid(),
        }
    }

    /// Category probabilities along the last axis (softmax of logits).
    pub fn categorical_probs(&self) -> Tensor {
        match self {
            ProbsOrLogits::Probs(p) => p.shallow_clone(),
            ProbsOrLogits::Logits(l) => l.softmax(-1, Kind::Double),
        }
    }
}
