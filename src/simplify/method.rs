use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimplifyError};

/// Weighting used by weighted Visvalingam when the caller doesn't pick one.
pub const DEFAULT_WEIGHTING: f64 = 0.7;

/// How we rank vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplifyMethod {
    /// Douglas-Peucker: distance from the chord.
    Dp,
    /// Visvalingam-Whyatt: effective area.
    Visvalingam,
    /// Visvalingam-Whyatt, with areas weighted by the angle at each vertex.
    WeightedVisvalingam,
}

impl SimplifyMethod {
    /// Picks a method from user-facing options.
    ///
    /// * no method => `WeightedVisvalingam`
    /// * `"weighted"` => `WeightedVisvalingam`
    /// * `"visvalingam"` plus a weighting => `WeightedVisvalingam`
    pub fn resolve(method: Option<&str>, weighting: Option<f64>) -> Result<SimplifyMethod> {
        let method = match method {
            None => SimplifyMethod::default(),
            Some(name) => name.parse()?,
        };

        Ok(match (method, weighting) {
            (SimplifyMethod::Visvalingam, Some(_)) => SimplifyMethod::WeightedVisvalingam,
            (m, _) => m,
        })
    }

    pub fn name(&self) -> &'static str {
        match *self {
            SimplifyMethod::Dp => "dp",
            SimplifyMethod::Visvalingam => "visvalingam",
            SimplifyMethod::WeightedVisvalingam => "weighted_visvalingam",
        }
    }
}

impl Default for SimplifyMethod {
    fn default() -> SimplifyMethod {
        SimplifyMethod::WeightedVisvalingam
    }
}

impl FromStr for SimplifyMethod {
    type Err = SimplifyError;

    fn from_str(s: &str) -> Result<SimplifyMethod> {
        match s {
            "dp" => Ok(SimplifyMethod::Dp),
            "visvalingam" => Ok(SimplifyMethod::Visvalingam),
            "weighted" | "weighted_visvalingam" => Ok(SimplifyMethod::WeightedVisvalingam),
            _ => Err(SimplifyError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SimplifyMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
