use super::family::DistributionFamily;
use super::loc_scale::StandardForm;
use super::validation::positive;
use crate::error::Result;
use crate::random::PrngKey;
use crate::special::xlogy;
use crate::standard_gamma::standard_gamma;
use tch::{Kind, Tensor};

pub struct Gamma {
    a: Tensor,
}

impl Gamma {
    pub fn new(a: Tensor) -> Result<Self> {
        let a = a.to_kind(Kind::Double);
        positive("a", &a)?;
        Ok(Gamma { a })
    }
}

impl StandardForm for Gamma {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Gamma
    }

    fn shape_params(&self) -> Vec<&Tensor> {
        vec![&self.a]
    }

    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor> {
        standard_gamma(key, &self.a, Some(shape))
    }

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor> {
        Ok(xlogy(&(&self.a - 1.0), y)? - y - self.a.lgamma())
    }

    fn in_support(&self, y: &Tensor) -> Tensor {
        y.ge(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob_distributions::{BaseDistribution, LocScale};
    use statrs::distribution::{Continuous, Gamma as Reference};

    #[test]
    fn test_log_prob() {
        for &a in &[0.3, 2.5, 40.0] {
            let dist = LocScale::new(Gamma::new(Tensor::from(a)).unwrap(), None, None).unwrap();
            let reference = Reference::new(a, 1.0).unwrap();
            for &x in &[0.3, 1.0, 4.2, 38.0] {
                let lp = dist.log_prob(&Tensor::from(x)).unwrap().double_value(&[]);
                let expected = reference.ln_pdf(x);
                assert!((lp - expected).abs() < 1e-9, "a = {}, x = {}", a, x);
            }
        }
    }

    #[test]
    fn test_log_prob_at_zero() {
        let dist = LocScale::new(Gamma::new(Tensor::from(1.0)).unwrap(), None, None).unwrap();
        let lp = dist.log_prob(&Tensor::from(0.0)).unwrap().double_value(&[]);
        assert_eq!(lp, 0.0);
    }
}
