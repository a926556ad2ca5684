use super::base_distribution::BaseDistribution;
use super::family::DistributionFamily;
use super::validation::{check_support, not_nan, positive};
use crate::error::Result;
use crate::misc::broadcast::broadcast_shapes;
use crate::random::PrngKey;
use tch::{Kind, Tensor};

/// A continuous family in standard form (`loc = 0`, `scale = 1`).
pub trait StandardForm {
    fn family(&self) -> DistributionFamily;

    /// Shape parameters, in positional order.
    fn shape_params(&self) -> Vec<&Tensor>;

    /// Standardized variates of exactly `shape`, which already covers every
    /// shape parameter.
    fn sample_standard(&self, key: PrngKey, shape: &[i64]) -> Result<Tensor>;

    fn log_prob_standard(&self, y: &Tensor) -> Result<Tensor>;

    /// Elementwise support mask for standardized values.
    fn in_support(&self, y: &Tensor) -> Tensor;
}

/// `loc + scale * Y` for a standardized variate `Y`.
pub struct LocScale<S> {
    standard: S,
    loc: Tensor,
    scale: Tensor,
    batch_shape: Vec<i64>,
}

impl<S: StandardForm> LocScale<S> {
    pub fn new(standard: S, loc: Option<Tensor>, scale: Option<Tensor>) -> Result<Self> {
        let loc = loc.map_or_else(|| Tensor::from(0.0), |t| t.to_kind(Kind::Double));
        let scale = scale.map_or_else(|| Tensor::from(1.0), |t| t.to_kind(Kind::Double));
        not_nan("loc", &loc)?;
        positive("scale", &scale)?;

        let mut shapes: Vec<Vec<i64>> = standard.shape_params().iter().map(|t| t.size()).collect();
        shapes.push(loc.size());
        shapes.push(scale.size());
        let shapes: Vec<&[i64]> = shapes.iter().map(Vec::as_slice).collect();
        let batch_shape = broadcast_shapes(&shapes)?;
        Ok(LocScale {
            standard,
            loc,
            scale,
            batch_shape,
        })
    }

    pub fn standard(&self) -> &S {
        &self.standard
    }

    pub fn loc(&self) -> &Tensor {
        &self.loc
    }

    pub fn scale(&self) -> &Tensor {
        &self.scale
    }

    pub fn transform(&self, y: &Tensor) -> Tensor {
        &self.loc + &self.scale * y
    }

    pub fn standardize(&self, x: &Tensor) -> Tensor {
        (x - &self.loc) / &self.scale
    }

    pub fn log_abs_det_jacobian(&self) -> Tensor {
        -self.scale.log()
    }
}

impl<S: StandardForm> BaseDistribution for LocScale<S> {
    fn family(&self) -> DistributionFamily {
        self.standard.family()
    }

    fn batch_shape(&self) -> Vec<i64> {
        self.batch_shape.clone()
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        let shape = self.extended_shape(size)?;
        let y = self.standard.sample_standard(key, &shape)?;
        Ok(self.transform(&y))
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.to_kind(Kind::Double);
        self.log_prob_shape(&x)?;
        let y = self.standardize(&x);
        check_support(self.family().name(), &x, &self.standard.in_support(&y))?;
        Ok(self.standard.log_prob_standard(&y)? + self.log_abs_det_jacobian())
    }
}
