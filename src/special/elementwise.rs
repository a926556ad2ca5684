use crate::error::Result;
use crate::misc::broadcast::broadcast_pair;
use crate::misc::custom_grad::attach_grad;
use tch::{Kind, Tensor};

/// `x * log(y)`, taken as 0 wherever `x == 0`.
///
/// Gradients: `log(y)` for `x`, and `x / y` for `y` (0 wherever `x == 0`).
pub fn xlogy(x: &Tensor, y: &Tensor) -> Result<Tensor> {
    let (x, y) = broadcast_pair(&x.to_kind(Kind::Double), &y.to_kind(Kind::Double))?;
    let (value, grad_x, grad_y) = tch::no_grad(|| {
        let nonzero = x.ne(0.0);
        let zeros = x.zeros_like();
        let log_y = y.log();
        let value = (&x * &log_y).where_self(&nonzero, &zeros);
        let grad_y = (&x / &y).where_self(&nonzero, &zeros);
        (value, log_y, grad_y)
    });
    Ok(attach_grad(&value, &[(&x, &grad_x), (&y, &grad_y)]))
}

/// `x * log1p(y)`, taken as 0 wherever `x == 0`.
///
/// Gradients: `log1p(y)` for `x`, and `x / (1 + y)` for `y` (0 wherever `x == 0`).
pub fn xlog1py(x: &Tensor, y: &Tensor) -> Result<Tensor> {
    let (x, y) = broadcast_pair(&x.to_kind(Kind::Double), &y.to_kind(Kind::Double))?;
    let (value, grad_x, grad_y) = tch::no_grad(|| {
        let nonzero = x.ne(0.0);
        let zeros = x.zeros_like();
        let log1p_y = y.log1p();
        let value = (&x * &log1p_y).where_self(&nonzero, &zeros);
        let grad_y = (&x / (&y + 1.0)).where_self(&nonzero, &zeros);
        (value, log1p_y, grad_y)
    });
    Ok(attach_grad(&value, &[(&x, &grad_x), (&y, &grad_y)]))
}

/// `-y * log(sigmoid(x)) - (1 - y) * log(sigmoid(-x))` without forming the sigmoid.
pub fn binary_cross_entropy_with_logits(x: &Tensor, y: &Tensor) -> Result<Tensor> {
    let (x, y) = broadcast_pair(&x.to_kind(Kind::Double), &y.to_kind(Kind::Double))?;
    Ok(x.clamp_min(0.0) - &x * &y + (-x.abs()).exp().log1p())
}
