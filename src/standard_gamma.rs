//! Reparameterized `Gamma(α, 1)` sampler.
//!
//! Values come from a vectorized Marsaglia-Tsang rejection loop, with the
//! `α < 1` case boosted through `Gamma(α + 1, 1)`. The gradient with respect
//! to `α` does not flow through the accept/reject control flow: it is attached
//! afterwards from the implicit CDF rule in [`standard_gamma_grad`].

use crate::error::{DistributionError, Result};
use crate::misc::broadcast::broadcast_shapes;
use crate::misc::custom_grad::attach_grad;
use crate::misc::to_vec_f64;
use crate::random::{normal, uniform, PrngKey};
use crate::special::standard_gamma_grad;
use rayon::prelude::*;
use tch::{Kind, Tensor};
use tracing::{debug, trace};

/// Rejection rounds before the sampler gives up.
///
/// Each round accepts an element with probability above 0.95, so hitting this
/// cap points at NaN parameters or a numerical bug rather than bad luck.
pub const MAX_REJECTION_ROUNDS: usize = 256;

/// Draws `Gamma(alpha, 1)` samples of shape `broadcast(alpha.size(), shape)`.
pub fn standard_gamma(key: PrngKey, alpha: &Tensor, shape: Option<&[i64]>) -> Result<Tensor> {
    let alpha = alpha.to_kind(Kind::Double);
    let alpha_shape = alpha.size();
    let out_shape = broadcast_shapes(&[alpha_shape.as_slice(), shape.unwrap_or(&[])])?;
    let alpha = alpha.expand(out_shape.as_slice(), false);

    let value = tch::no_grad(|| sample_values(key, &alpha.detach(), &out_shape))?;
    if !alpha.requires_grad() {
        return Ok(value);
    }

    let z = to_vec_f64(&value)?;
    let a = to_vec_f64(&alpha)?;
    let grads: Vec<f64> = z
        .par_iter()
        .zip(a.par_iter())
        .map(|(&z, &a)| standard_gamma_grad(z, a))
        .collect();
    let grad = Tensor::from_slice(&grads).reshape(out_shape.as_slice());
    Ok(attach_grad(&value, &[(&alpha, &grad)]))
}

fn sample_values(key: PrngKey, alpha: &Tensor, shape: &[i64]) -> Result<Tensor> {
    let (boost_key, mut key) = key.split();
    let boosted = alpha.lt(1.0);
    let a = (alpha + 1.0).where_self(&boosted, alpha);

    let d = &a - 1.0 / 3.0;
    let c = (&d * 9.0).sqrt().reciprocal();

    let mut value = alpha.zeros_like();
    let mut accepted = boosted.zeros_like();
    let mut rounds = 0;
    while rounds < MAX_REJECTION_ROUNDS {
        rounds += 1;
        let (round_key, next_key) = key.split();
        key = next_key;
        let (x_key, u_key) = round_key.split();

        let x = normal(x_key, shape);
        let v = (&c * &x + 1.0).pow_tensor_scalar(3.0);
        let log_u = uniform(u_key, shape).log();
        let log_v = v.clamp_min(f64::MIN_POSITIVE).log();
        let bound = x.square() * 0.5 + &d - &d * &v + &d * &log_v;
        let ok = v.gt(0.0).logical_and(&log_u.lt_tensor(&bound));

        let fresh = ok.logical_and(&accepted.logical_not());
        value = (&d * &v).where_self(&fresh, &value);
        accepted = accepted.logical_or(&ok);

        let pending = accepted.logical_not().sum(Kind::Int64).f_int64_value(&[])?;
        trace!(round = rounds, pending, "standard gamma rejection round");
        if pending == 0 {
            break;
        }
    }

    if accepted.logical_not().any().to_kind(Kind::Int64).f_int64_value(&[])? != 0 {
        return Err(DistributionError::RejectionLimit {
            rounds: MAX_REJECTION_ROUNDS,
        });
    }
    debug!(rounds, elements = value.numel(), "standard gamma samples accepted");

    // Gamma(α) = Gamma(α + 1) · U^{1/α}
    let boost = (uniform(boost_key, shape).log() / alpha).exp();
    let value = (&value * boost).where_self(&boosted, &value);
    Ok(value.clamp_min(f64::MIN_POSITIVE))
}
