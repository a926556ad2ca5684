use super::base_distribution::{BaseDistribution, ProbsOrLogits};
use super::family::DistributionFamily;
use super::validation::{check_support, is_integer, non_negative_integer};
use crate::error::{DistributionError, Result};
use crate::misc::broadcast::broadcast_shapes;
use crate::misc::max_count;
use crate::random::{uniform, PrngKey};
use crate::special::xlogy;
use tch::{Device, Kind, Tensor};

/// Category counts of `n` draws over the last axis of `p`.
///
/// Probabilities are used as given: they are not renormalized. With logits the
/// probabilities are their softmax.
pub struct Multinomial {
    n: Tensor,
    p: ProbsOrLogits,
    num_categories: i64,
    batch_shape: Vec<i64>,
}

impl Multinomial {
    pub fn new(n: Tensor, p: Tensor, is_logits: bool) -> Result<Self> {
        let n = n.to_kind(Kind::Double);
        non_negative_integer("n", &n)?;
        let p = ProbsOrLogits::new("p", p, is_logits)?;
        let p_shape = p.param().size();
        let (num_categories, p_batch) = match p_shape.split_last() {
            Some((&k, batch)) if k > 0 => (k, batch),
            _ => return Err(DistributionError::parameter("p", format!("tensor of shape {:?}", p_shape))),
        };
        let batch_shape = broadcast_shapes(&[n.size().as_slice(), p_batch])?;
        Ok(Multinomial {
            n,
            p,
            num_categories,
            batch_shape,
        })
    }

    pub fn n(&self) -> &Tensor {
        &self.n
    }

    pub fn p(&self) -> &ProbsOrLogits {
        &self.p
    }
}

impl BaseDistribution for Multinomial {
    fn family(&self) -> DistributionFamily {
        DistributionFamily::Multinomial
    }

    fn batch_shape(&self) -> Vec<i64> {
        self.batch_shape.clone()
    }

    fn event_shape(&self) -> Vec<i64> {
        vec![self.num_categories]
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        let shape = self.extended_shape(size)?;
        let k = self.num_categories;
        let max_n = max_count(&self.n)?;

        // Each trial picks the first category whose cumulative probability
        // exceeds its uniform draw.
        let mut trial_shape = shape[..shape.len() - 1].to_vec();
        trial_shape.extend([max_n, 1]);
        let u = uniform(key, &trial_shape);
        let cdf = self.p.categorical_probs().detach().cumsum(-1, Kind::Double).unsqueeze(-2);
        let category = cdf
            .lt_tensor(&u)
            .sum_dim_intlist([-1].as_ref(), false, Kind::Int64)
            .clamp_max(k - 1);

        let active = Tensor::arange(max_n, (Kind::Double, Device::Cpu))
            .lt_tensor(&self.n.detach().unsqueeze(-1))
            .unsqueeze(-1)
            .to_kind(Kind::Double);
        let counts = category.one_hot(k).to_kind(Kind::Double) * active;
        Ok(counts.sum_dim_intlist([-2].as_ref(), false, Kind::Double))
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.to_kind(Kind::Double);
        let x_shape = x.size();
        if x_shape.last() != Some(&self.num_categories) {
            return Err(DistributionError::Shape {
                left: x_shape,
                right: self.extended_shape(None)?,
            });
        }
        self.log_prob_shape(&x)?;

        let family = self.family().name();
        check_support(family, &x, &is_integer(&x).logical_and(&x.ge(0.0)))?;
        let total = x.sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        check_support(family, &total, &total.eq_tensor(&self.n))?;

        let log_norm = (&self.n + 1.0).lgamma()
            - (&x + 1.0).lgamma().sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        let log_terms = match &self.p {
            ProbsOrLogits::Probs(p) => xlogy(&x, p)?,
            ProbsOrLogits::Logits(l) => &x * l.log_softmax(-1, Kind::Double),
        };
        Ok(log_norm + log_terms.sum_dim_intlist([-1].as_ref(), false, Kind::Double))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::function::factorial::ln_factorial;

    fn counts(t: &Tensor) -> Vec<f64> {
        Vec::<f64>::try_from(&t.reshape([-1])).unwrap()
    }

    #[test]
    fn test_sample_counts_sum_to_n() {
        let dist = Multinomial::new(Tensor::from(10.0), Tensor::from_slice(&[0.1, 0.4, 0.5]), false)
            .unwrap();
        let sample = dist.sample(PrngKey::new(0), Some(&[4])).unwrap();
        assert_eq!(sample.size(), vec![4, 3]);
        let totals = sample.sum_dim_intlist([-1].as_ref(), false, Kind::Double);
        assert_eq!(counts(&totals), vec![10.0; 4]);
    }

    #[test]
    fn test_sample_frequencies() {
        let dist = Multinomial::new(Tensor::from(1000.0), Tensor::from_slice(&[0.1, 0.4, 0.5]), false)
            .unwrap();
        let sample = counts(&dist.sample(PrngKey::new(7), None).unwrap());
        for (c, p) in sample.iter().zip([0.1, 0.4, 0.5]) {
            assert!((c / 1000.0 - p).abs() < 0.05, "{:?}", sample);
        }
    }

    #[test]
    fn test_log_prob() {
        let dist = Multinomial::new(Tensor::from(10.0), Tensor::from_slice(&[0.1, 0.4, 0.5]), false)
            .unwrap();
        let lp = dist.log_prob(&Tensor::from_slice(&[2.0, 3.0, 5.0])).unwrap();
        assert_eq!(lp.size(), Vec::<i64>::new());
        let expected = ln_factorial(10) - ln_factorial(2) - ln_factorial(3) - ln_factorial(5)
            + 2.0 * 0.1f64.ln()
            + 3.0 * 0.4f64.ln()
            + 5.0 * 0.5f64.ln();
        assert!(((lp.double_value(&[]) - expected) / expected).abs() < 1e-10);
    }

    #[test]
    fn test_unnormalized_probabilities() {
        let dist = Multinomial::new(Tensor::from(10.0), Tensor::from_slice(&[1.0, 1.0]), false)
            .unwrap();
        let sample = dist.sample(PrngKey::new(0), None).unwrap();
        assert_eq!(counts(&sample), vec![10.0, 0.0]);
        assert_eq!(dist.log_prob(&sample).unwrap().double_value(&[]), 0.0);
    }

    #[test]
    fn test_total_must_match_n() {
        let dist = Multinomial::new(Tensor::from(10.0), Tensor::from_slice(&[0.5, 0.5]), false)
            .unwrap();
        let err = dist.log_prob(&Tensor::from_slice(&[4.0, 5.0])).unwrap_err();
        assert!(matches!(err, DistributionError::Support { .. }));
    }

    #[test]
    fn test_event_size_mismatch() {
        let dist = Multinomial::new(Tensor::from(10.0), Tensor::from_slice(&[0.5, 0.5]), false)
            .unwrap();
        let err = dist.log_prob(&Tensor::from_slice(&[4.0, 5.0, 1.0])).unwrap_err();
        assert!(matches!(err, DistributionError::Shape { .. }));
    }

    #[test]
    fn test_scalar_probabilities_are_rejected() {
        assert!(Multinomial::new(Tensor::from(3.0), Tensor::from(0.5), false).is_err());
    }

    #[test]
    fn test_empty_trials() {
        let n = Tensor::from_slice::<f64>(&[]);
        let dist = Multinomial::new(n, Tensor::from_slice(&[0.5, 0.5]), false).unwrap();
        let sample = dist.sample(PrngKey::new(0), None).unwrap();
        assert_eq!(sample.size(), vec![0, 2]);
    }
}
