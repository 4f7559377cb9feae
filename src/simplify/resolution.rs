//! Parses a user-supplied output resolution, such as `"1000x800"`.
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimplifyError};

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"[x ,]").unwrap();
}

/// A resolution as the user typed it: a number, or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawResolution {
    Number(f64),
    Text(String),
}

impl From<f64> for RawResolution {
    fn from(n: f64) -> RawResolution {
        RawResolution::Number(n)
    }
}

impl<'a> From<&'a str> for RawResolution {
    fn from(s: &'a str) -> RawResolution {
        RawResolution::Text(s.to_string())
    }
}

impl From<String> for RawResolution {
    fn from(s: String) -> RawResolution {
        RawResolution::Text(s)
    }
}

/// Returns `[width, height]`.
///
/// * `1000` or `"1e3"`: both dimensions
/// * `"1000x800"`: width and height (`,` and space work as separators, too)
/// * `"1000x"` or `"x800"`: the missing side is 0
///
/// Negative or non-numeric parts are errors.
pub fn parse_simplify_resolution<T: Into<RawResolution>>(raw: T) -> Result<[f64; 2]> {
    let raw = raw.into();

    let parts: Vec<f64> = match raw {
        RawResolution::Number(n) => vec![ n, n ],
        RawResolution::Text(ref s) => {
            let mut parts = SEPARATOR.split(s.trim())
                .map(|part| parse_part(part, s))
                .collect::<Result<Vec<f64>>>()?;
            if parts.len() == 1 {
                let n = parts[0];
                parts.push(n);
            }
            parts
        }
    };

    match parts[..] {
        [ w, h ] if w >= 0.0 && h >= 0.0 => Ok([ w, h ]),
        _ => Err(SimplifyError::InvalidResolution(describe(&raw))),
    }
}

fn parse_part(part: &str, whole: &str) -> Result<f64> {
    if part.is_empty() {
        return Ok(0.0);
    }
    part.parse::<f64>().map_err(|_| SimplifyError::InvalidResolution(whole.to_string()))
}

fn describe(raw: &RawResolution) -> String {
    match *raw {
        RawResolution::Number(n) => n.to_string(),
        RawResolution::Text(ref s) => s.clone(),
    }
}
