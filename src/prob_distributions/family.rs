use super::base_distribution::BaseDistribution;
use super::bernoulli::Bernoulli;
use super::beta::Beta;
use super::binomial::Binomial;
use super::cauchy::Cauchy;
use super::dirichlet::Dirichlet;
use super::exponential::Exponential;
use super::gamma::Gamma;
use super::loc_scale::LocScale;
use super::lognormal::LogNormal;
use super::multinomial::Multinomial;
use super::normal::Normal;
use super::student_t::StudentT;
use super::uniform::Uniform;
use crate::error::{DistributionError, Result};
use crate::random::PrngKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use tch::Tensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionFamily {
    Beta,
    Cauchy,
    #[serde(alias = "expon")]
    Exponential,
    Gamma,
    #[serde(alias = "lognorm")]
    LogNormal,
    #[serde(alias = "norm")]
    Normal,
    #[serde(alias = "t")]
    StudentT,
    Uniform,
    Bernoulli,
    #[serde(alias = "binom")]
    Binomial,
    Multinomial,
    Dirichlet,
}

impl DistributionFamily {
    pub const ALL: [DistributionFamily; 12] = [
        DistributionFamily::Beta,
        DistributionFamily::Cauchy,
        DistributionFamily::Exponential,
        DistributionFamily::Gamma,
        DistributionFamily::LogNormal,
        DistributionFamily::Normal,
        DistributionFamily::StudentT,
        DistributionFamily::Uniform,
        DistributionFamily::Bernoulli,
        DistributionFamily::Binomial,
        DistributionFamily::Multinomial,
        DistributionFamily::Dirichlet,
    ];

    /// Short name used by common statistics libraries (`norm`, `binom`, ...).
    pub fn name(self) -> &'static str {
        match self {
            DistributionFamily::Beta => "beta",
            DistributionFamily::Cauchy => "cauchy",
            DistributionFamily::Exponential => "expon",
            DistributionFamily::Gamma => "gamma",
            DistributionFamily::LogNormal => "lognorm",
            DistributionFamily::Normal => "norm",
            DistributionFamily::StudentT => "t",
            DistributionFamily::Uniform => "uniform",
            DistributionFamily::Bernoulli => "bernoulli",
            DistributionFamily::Binomial => "binom",
            DistributionFamily::Multinomial => "multinomial",
            DistributionFamily::Dirichlet => "dirichlet",
        }
    }

    /// Positional shape parameters, excluding `loc` and `scale`.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            DistributionFamily::Beta => &["a", "b"],
            DistributionFamily::Gamma => &["a"],
            DistributionFamily::LogNormal => &["s"],
            DistributionFamily::StudentT => &["df"],
            DistributionFamily::Bernoulli => &["p"],
            DistributionFamily::Binomial | DistributionFamily::Multinomial => &["n", "p"],
            DistributionFamily::Dirichlet => &["alpha"],
            DistributionFamily::Cauchy
            | DistributionFamily::Exponential
            | DistributionFamily::Normal
            | DistributionFamily::Uniform => &[],
        }
    }

    pub fn numargs(self) -> usize {
        self.param_names().len()
    }

    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            DistributionFamily::Bernoulli | DistributionFamily::Binomial | DistributionFamily::Multinomial
        )
    }

    pub fn is_multivariate(self) -> bool {
        matches!(self, DistributionFamily::Multinomial | DistributionFamily::Dirichlet)
    }

    /// Continuous families accept `loc` and `scale`.
    pub fn is_loc_scale(self) -> bool {
        !self.is_discrete() && !self.is_multivariate()
    }

    pub fn supports_logits(self) -> bool {
        self.is_discrete()
    }

    /// Validates `params` and builds a reusable distribution.
    pub fn freeze(self, params: Params) -> Result<Distribution> {
        Distribution::new(self, params)
    }

    pub fn sample(self, key: PrngKey, params: Params, size: Option<&[i64]>) -> Result<Tensor> {
        self.freeze(params)?.sample(key, size)
    }

    pub fn log_prob(self, x: &Tensor, params: Params) -> Result<Tensor> {
        self.freeze(params)?.log_prob(x)
    }
}

impl fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a distribution, with shape parameters in positional order.
#[derive(Default)]
pub struct Params {
    args: Vec<Tensor>,
    loc: Option<Tensor>,
    scale: Option<Tensor>,
    is_logits: bool,
}

impl Params {
    pub fn new(args: Vec<Tensor>) -> Self {
        Params {
            args,
            ..Default::default()
        }
    }

    pub fn loc(mut self, loc: Tensor) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn scale(mut self, scale: Tensor) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Reads the probability parameter as logits.
    pub fn logits(mut self) -> Self {
        self.is_logits = true;
        self
    }
}

/// A validated distribution of any family.
pub enum Distribution {
    Beta(LocScale<Beta>),
    Cauchy(LocScale<Cauchy>),
    Exponential(LocScale<Exponential>),
    Gamma(LocScale<Gamma>),
    LogNormal(LocScale<LogNormal>),
    Normal(LocScale<Normal>),
    StudentT(LocScale<StudentT>),
    Uniform(LocScale<Uniform>),
    Bernoulli(Bernoulli),
    Binomial(Binomial),
    Multinomial(Multinomial),
    Dirichlet(Dirichlet),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            Distribution::Beta($d) => $body,
            Distribution::Cauchy($d) => $body,
            Distribution::Exponential($d) => $body,
            Distribution::Gamma($d) => $body,
            Distribution::LogNormal($d) => $body,
            Distribution::Normal($d) => $body,
            Distribution::StudentT($d) => $body,
            Distribution::Uniform($d) => $body,
            Distribution::Bernoulli($d) => $body,
            Distribution::Binomial($d) => $body,
            Distribution::Multinomial($d) => $body,
            Distribution::Dirichlet($d) => $body,
        }
    };
}

fn next_arg(args: &mut std::vec::IntoIter<Tensor>, name: &'static str) -> Result<Tensor> {
    args.next().ok_or(DistributionError::MissingParameter(name))
}

impl Distribution {
    pub fn new(family: DistributionFamily, params: Params) -> Result<Self> {
        let Params {
            args,
            loc,
            scale,
            is_logits,
        } = params;
        if args.len() > family.numargs() {
            return Err(DistributionError::UnexpectedParameter(format!(
                "{} positional arguments for {}",
                args.len(),
                family
            )));
        }
        if !family.is_loc_scale() {
            if loc.is_some() {
                return Err(DistributionError::UnexpectedParameter("loc".to_string()));
            }
            if scale.is_some() {
                return Err(DistributionError::UnexpectedParameter("scale".to_string()));
            }
        }
        if is_logits && !family.supports_logits() {
            return Err(DistributionError::parameter("is_logits", true));
        }

        let mut args = args.into_iter();
        let args = &mut args;
        let dist = match family {
            DistributionFamily::Beta => {
                let a = next_arg(args, "a")?;
                let b = next_arg(args, "b")?;
                Distribution::Beta(LocScale::new(Beta::new(a, b)?, loc, scale)?)
            }
            DistributionFamily::Cauchy => Distribution::Cauchy(LocScale::new(Cauchy, loc, scale)?),
            DistributionFamily::Exponential => {
                Distribution::Exponential(LocScale::new(Exponential, loc, scale)?)
            }
            DistributionFamily::Gamma => {
                let a = next_arg(args, "a")?;
                Distribution::Gamma(LocScale::new(Gamma::new(a)?, loc, scale)?)
            }
            DistributionFamily::LogNormal => {
                let s = next_arg(args, "s")?;
                Distribution::LogNormal(LocScale::new(LogNormal::new(s)?, loc, scale)?)
            }
            DistributionFamily::Normal => Distribution::Normal(LocScale::new(Normal, loc, scale)?),
            DistributionFamily::StudentT => {
                let df = next_arg(args, "df")?;
                Distribution::StudentT(LocScale::new(StudentT::new(df)?, loc, scale)?)
            }
            DistributionFamily::Uniform => Distribution::Uniform(LocScale::new(Uniform, loc, scale)?),
            DistributionFamily::Bernoulli => {
                let p = next_arg(args, "p")?;
                Distribution::Bernoulli(Bernoulli::new(p, is_logits)?)
            }
            DistributionFamily::Binomial => {
                let n = next_arg(args, "n")?;
                let p = next_arg(args, "p")?;
                Distribution::Binomial(Binomial::new(n, p, is_logits)?)
            }
            DistributionFamily::Multinomial => {
                let n = next_arg(args, "n")?;
                let p = next_arg(args, "p")?;
                Distribution::Multinomial(Multinomial::new(n, p, is_logits)?)
            }
            DistributionFamily::Dirichlet => {
                let alpha = next_arg(args, "alpha")?;
                Distribution::Dirichlet(Dirichlet::new(alpha)?)
            }
        };
        Ok(dist)
    }
}

impl BaseDistribution for Distribution {
    fn family(&self) -> DistributionFamily {
        dispatch!(self, d => d.family())
    }

    fn batch_shape(&self) -> Vec<i64> {
        dispatch!(self, d => d.batch_shape())
    }

    fn event_shape(&self) -> Vec<i64> {
        dispatch!(self, d => d.event_shape())
    }

    fn sample(&self, key: PrngKey, size: Option<&[i64]>) -> Result<Tensor> {
        dispatch!(self, d => d.sample(key, size))
    }

    fn log_prob(&self, x: &Tensor) -> Result<Tensor> {
        dispatch!(self, d => d.log_prob(x))
    }
}
