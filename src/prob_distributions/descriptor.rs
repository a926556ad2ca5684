use super::family::{Distribution, DistributionFamily, Params};
use crate::error::{DistributionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tch::Tensor;
use tracing::debug;

/// Parameter value of a [`DistributionDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl ParamValue {
    pub fn to_tensor(&self) -> Result<Tensor> {
        match self {
            ParamValue::Scalar(v) => Ok(Tensor::from(*v)),
            ParamValue::Vector(v) => Ok(Tensor::from_slice(v)),
            ParamValue::Matrix(rows) => {
                let cols = rows.first().map_or(0, Vec::len);
                if let Some(row) = rows.iter().find(|row| row.len() != cols) {
                    return Err(DistributionError::Shape {
                        left: vec![rows.len() as i64, cols as i64],
                        right: vec![row.len() as i64],
                    });
                }
                let flat: Vec<f64> = rows.iter().flatten().copied().collect();
                Ok(Tensor::from_slice(&flat).reshape([rows.len() as i64, cols as i64]))
            }
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        ParamValue::Vector(v)
    }
}

impl From<Vec<Vec<f64>>> for ParamValue {
    fn from(v: Vec<Vec<f64>>) -> Self {
        ParamValue::Matrix(v)
    }
}

/// Declarative, serializable description of a distribution.
///
/// Parameters are keyed by name: the family's shape parameters, plus `loc`
/// and `scale` for continuous families (defaulting to 0 and 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionDescriptor {
    pub family: DistributionFamily,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    #[serde(default)]
    pub is_logits: bool,
}

impl DistributionDescriptor {
    pub fn new(family: DistributionFamily) -> Self {
        DistributionDescriptor {
            family,
            params: BTreeMap::new(),
            is_logits: false,
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn with_logits(mut self) -> Self {
        self.is_logits = true;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn build(&self) -> Result<Distribution> {
        let family = self.family;
        let names = family.param_names();
        for name in self.params.keys() {
            let known = names.contains(&name.as_str())
                || (family.is_loc_scale() && (name == "loc" || name == "scale"));
            if !known {
                return Err(DistributionError::UnexpectedParameter(name.clone()));
            }
        }

        let mut args = Vec::with_capacity(names.len());
        for &name in names {
            let value = self
                .params
                .get(name)
                .ok_or(DistributionError::MissingParameter(name))?;
            args.push(value.to_tensor()?);
        }
        let mut params = Params::new(args);
        if let Some(loc) = self.params.get("loc") {
            params = params.loc(loc.to_tensor()?);
        }
        if let Some(scale) = self.params.get("scale") {
            params = params.scale(scale.to_tensor()?);
        }
        if self.is_logits {
            params = params.logits();
        }

        debug!(family = family.name(), params = self.params.len(), "building distribution");
        Distribution::new(family, params)
    }
}
