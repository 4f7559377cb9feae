use serde::{Deserialize, Serialize};

use crate::geo::sphere::R;
use crate::simplify::method::SimplifyMethod;
use crate::simplify::resolution::RawResolution;

/// What the caller asked for.
///
/// Every field is optional, so a collaborator (a CLI, say) can build this
/// from whatever flags the user typed, or deserialize it from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyOptions {
    /// `"dp"`, `"visvalingam"`, `"weighted"` or `"weighted_visvalingam"`.
    pub method: Option<String>,

    /// Weighted Visvalingam's angle weighting. Setting it implies weighted
    /// Visvalingam.
    pub weighting: Option<f64>,

    /// `Some(true)` forces planar math even when coordinates look like
    /// longitude/latitude.
    pub planar: Option<bool>,

    /// `Some(true)` forces spherical math, `Some(false)` planar math.
    /// Ignored when `planar` is `Some(true)`.
    pub spherical: Option<bool>,

    /// Fraction of removable vertices to retain, from 0 to 1.
    pub pct: Option<f64>,

    /// Retain vertices with at least this threshold (data units; metres
    /// when spherical).
    pub interval: Option<f64>,

    /// Output resolution, for instance `"1000x800"`; converted to an interval.
    pub resolution: Option<RawResolution>,

    /// Defaults to on for spherical data that reaches a world edge.
    pub protect_world_edges: Option<bool>,

    /// Pin vertices on the content's bounding box.
    pub lock_box: bool,

    /// Sphere radius, for spherical math.
    pub radius: f64,
}

impl Default for SimplifyOptions {
    fn default() -> SimplifyOptions {
        SimplifyOptions {
            method: None,
            weighting: None,
            planar: None,
            spherical: None,
            pct: None,
            interval: None,
            resolution: None,
            protect_world_edges: None,
            lock_box: false,
            radius: R,
        }
    }
}

/// How a Dataset was last simplified.
///
/// `planar` is whatever the caller passed (omitted when they passed
/// nothing); `spherical` is what we actually did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimplifyRecord {
    pub method: SimplifyMethod,
    pub spherical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planar: Option<bool>,
}
