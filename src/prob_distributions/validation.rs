//! Domain checks for parameters and samples.
//!
//! A failing check reports the first offending value it finds.

use crate::error::{DistributionError, Result};
use tch::{Kind, Tensor};

fn first_violation(values: &Tensor, ok: &Tensor) -> Result<Option<f64>> {
    let bad = ok.logical_not();
    if bad.any().to_kind(Kind::Int64).f_int64_value(&[])? == 0 {
        return Ok(None);
    }
    let offending = values.detach().to_kind(Kind::Double).masked_select(&bad);
    Ok(Some(offending.f_double_value(&[0])?))
}

fn check_parameter(name: &'static str, param: &Tensor, ok: &Tensor) -> Result<()> {
    match first_violation(param, ok)? {
        Some(value) => Err(DistributionError::parameter(name, value)),
        None => Ok(()),
    }
}

pub(crate) fn check_support(family: &'static str, x: &Tensor, ok: &Tensor) -> Result<()> {
    match first_violation(x, ok)? {
        Some(value) => Err(DistributionError::Support {
            family,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn is_integer(x: &Tensor) -> Tensor {
    x.eq_tensor(&x.floor()).logical_and(&x.isfinite())
}

pub(crate) fn positive(name: &'static str, param: &Tensor) -> Result<()> {
    check_parameter(name, param, &param.gt(0.0))
}

pub(crate) fn unit_interval(name: &'static str, param: &Tensor) -> Result<()> {
    check_parameter(name, param, &param.ge(0.0).logical_and(&param.le(1.0)))
}

pub(crate) fn non_negative_integer(name: &'static str, param: &Tensor) -> Result<()> {
    check_parameter(name, param, &param.ge(0.0).logical_and(&is_integer(param)))
}

pub(crate) fn not_nan(name: &'static str, param: &Tensor) -> Result<()> {
    check_parameter(name, param, &param.isnan().logical_not())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert!(positive("a", &Tensor::from_slice(&[0.5, 3.0])).is_ok());
        let err = positive("a", &Tensor::from_slice(&[0.5, -2.0, 0.0])).unwrap_err();
        assert_eq!(err.to_string(), "invalid distribution arguments: `a` = -2");
        assert!(positive("a", &Tensor::from(f64::NAN)).is_err());
    }

    #[test]
    fn test_unit_interval() {
        assert!(unit_interval("p", &Tensor::from_slice(&[0.0, 0.3, 1.0])).is_ok());
        let err = unit_interval("p", &Tensor::from_slice(&[0.3, 1.3])).unwrap_err();
        assert!(matches!(err, DistributionError::Parameter { name: "p", .. }));
    }

    #[test]
    fn test_non_negative_integer() {
        assert!(non_negative_integer("n", &Tensor::from_slice(&[0.0, 10.0])).is_ok());
        assert!(non_negative_integer("n", &Tensor::from_slice(&[2.5])).is_err());
        assert!(non_negative_integer("n", &Tensor::from_slice(&[-1.0])).is_err());
        assert!(non_negative_integer("n", &Tensor::from(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_check_support_reports_value() {
        let x = Tensor::from_slice(&[1.0, -0.5]);
        let err = check_support("binom", &x, &x.ge(0.0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid values for binom: -0.5");
    }
}
