//! The shared-topology data model.
//!
//! Upstream topology construction has already split every ring into Arcs:
//! a boundary between two polygons appears exactly once, and both polygons
//! point to it. Simplifying that one Arc simplifies both polygons the same
//! way, so they can't drift apart.
use crate::geo::Bounds;
use crate::simplify::SimplifyRecord;

pub mod arcs;

pub use self::arcs::{ArcCollection, ArcView, VertexData};

/// Whatever we know about a Dataset besides its geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetInfo {
    /// How the Dataset was last simplified.
    pub simplify: Option<SimplifyRecord>,
}

/// Arcs plus bookkeeping.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub arcs: ArcCollection,

    /// Full extent of the Dataset, if upstream knows it. When None we use
    /// the Arcs' extent.
    pub bounds: Option<Bounds>,

    pub info: DatasetInfo,
}

impl Dataset {
    pub fn new(arcs: ArcCollection) -> Dataset {
        Dataset {
            arcs: arcs,
            bounds: None,
            info: DatasetInfo::default(),
        }
    }

    pub fn with_bounds(arcs: ArcCollection, bounds: Bounds) -> Dataset {
        Dataset {
            arcs: arcs,
            bounds: Some(bounds),
            info: DatasetInfo::default(),
        }
    }

    /// Returns the explicit bounds, or else the Arcs' bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds.or_else(|| self.arcs.bounds())
    }
}
