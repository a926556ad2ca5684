pub mod broadcast;
pub mod custom_grad;

use crate::error::Result;
use tch::{Kind, Tensor};

/// Copies a tensor of any shape into a flat host buffer of `f64`.
pub(crate) fn to_vec_f64(t: &Tensor) -> Result<Vec<f64>> {
    let flat = t.to_kind(Kind::Double).contiguous().reshape(&[-1]);
    Ok(Vec::<f64>::try_from(&flat)?)
}

/// Number of elements described by `shape`.
pub(crate) fn numel(shape: &[i64]) -> usize {
    shape.iter().product::<i64>().max(0) as usize
}

/// Largest entry of a tensor of counts, or 0 when it is empty.
pub(crate) fn max_count(n: &Tensor) -> Result<i64> {
    if n.numel() == 0 {
        return Ok(0);
    }
    Ok(n.f_max()?.f_double_value(&[])? as i64)
}
