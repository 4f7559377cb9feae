//! Ranks every vertex in a Dataset, so a Dataset can be drawn with fewer
//! vertices.
//!
//! Nothing is deleted: each vertex gets a threshold, and the ArcCollection
//! filters out vertices below its retained interval when it's read. Because
//! every polygon reads a shared boundary from the same Arc, neighbors stay
//! glued together at any level of detail.
use rayon::prelude::*;

use crate::error::{Result, SimplifyError};
use crate::geo::Bounds;
use crate::geo::sphere::{lonlat_to_xyz, probably_decimal_degree_bounds, reaches_world_edge};
use crate::geo::vector::Vec3;
use crate::topology::{ArcCollection, ArcView, Dataset};

mod douglas_peucker;
mod visvalingam;
pub mod edges;
pub mod interval;
pub mod method;
pub mod options;
pub mod resolution;

pub use self::edges::{protect_content_edges, protect_world_edges};
pub use self::interval::{calc_planar_interval, calc_spherical_interval};
pub use self::method::{SimplifyMethod, DEFAULT_WEIGHTING};
pub use self::options::{SimplifyOptions, SimplifyRecord};
pub use self::resolution::{parse_simplify_resolution, RawResolution};

/// Whether we do math on the plane or on the sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordinateMode {
    Planar,
    /// Coordinates are longitude/latitude; math happens on a sphere of the
    /// given radius, so thresholds come out in the radius' units.
    Spherical { radius: f64 },
}

impl CoordinateMode {
    pub fn is_spherical(&self) -> bool {
        match *self {
            CoordinateMode::Planar => false,
            CoordinateMode::Spherical { .. } => true,
        }
    }

    /// Returns the Arc's vertices in the space we'll measure them in.
    fn project(&self, view: &ArcView) -> Vec<Vec3> {
        let xy = view.xx.iter().zip(view.yy.iter());
        match *self {
            CoordinateMode::Planar => xy.map(|(&x, &y)| [ x, y, 0.0 ]).collect(),
            CoordinateMode::Spherical { radius } => xy.map(|(&x, &y)| lonlat_to_xyz(x, y, radius)).collect(),
        }
    }
}

/// Which vertices survive, once thresholds are known.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Retention {
    All,
    Pct(f64),
    Interval(f64),
}

/// Recomputes every threshold in `arcs` from scratch.
///
/// Each Arc owns a disjoint stretch of the threshold buffer, so Arcs are
/// ranked in parallel.
pub fn simplify_paths(arcs: &mut ArcCollection, method: SimplifyMethod, mode: CoordinateMode, weighting: f64) {
    arcs.reset_thresholds();

    arcs.arc_views_mut().into_par_iter().for_each(|view| {
        let vertices = mode.project(&view);
        match method {
            SimplifyMethod::Dp => {
                douglas_peucker::calc_arc_thresholds(&vertices, view.zz)
            }
            SimplifyMethod::Visvalingam => {
                visvalingam::calc_arc_thresholds(&vertices, visvalingam::standard_metric, view.zz)
            }
            SimplifyMethod::WeightedVisvalingam => {
                visvalingam::calc_arc_thresholds(&vertices, visvalingam::weighted_metric(weighting), view.zz)
            }
        }
    });
}

/// Simplifies a Dataset.
///
/// 1. Picks a method and decides between planar and spherical math
///    (`planar` wins over `spherical`; with neither, lon/lat bounds mean
///    spherical).
/// 2. Ranks every vertex (overwriting any earlier ranking).
/// 3. Protects world edges and/or the content's bounding box.
/// 4. Sets the ArcCollection's retained interval from `pct`, `interval` or
///    `resolution` (in that order of preference). With none of them, every
///    vertex is retained.
/// 5. Records what it did in `dataset.info.simplify`.
///
/// Options are validated before anything changes: on error, the Dataset is
/// untouched.
pub fn simplify(dataset: &mut Dataset, opts: &SimplifyOptions) -> Result<()> {
    let method = SimplifyMethod::resolve(opts.method.as_ref().map(|s| s.as_str()), opts.weighting)?;
    if !(opts.radius > 0.0) {
        return Err(SimplifyError::InvalidRadius(opts.radius));
    }
    let bounds = dataset.bounds();

    let spherical = match (opts.planar, opts.spherical) {
        (Some(true), _) => false,
        (_, Some(spherical)) => spherical,
        _ => bounds.map_or(false, |b| probably_decimal_degree_bounds(&b)),
    };
    let mode = if spherical {
        CoordinateMode::Spherical { radius: opts.radius }
    } else {
        CoordinateMode::Planar
    };

    let retention = choose_retention(opts, bounds, mode)?;

    debug!(
        "simplifying {} arcs ({} vertices): method={}, spherical={}",
        dataset.arcs.size(), dataset.arcs.point_count(), method, spherical
    );

    simplify_paths(&mut dataset.arcs, method, mode, opts.weighting.unwrap_or(DEFAULT_WEIGHTING));

    let protect = opts.protect_world_edges
        .unwrap_or_else(|| spherical && bounds.map_or(false, |b| reaches_world_edge(&b)));
    if protect {
        protect_world_edges(&mut dataset.arcs);
    }

    if opts.lock_box {
        if let Some(b) = bounds {
            protect_content_edges(&mut dataset.arcs, &b);
        }
    }

    match retention {
        Retention::All => dataset.arcs.set_retained_interval(0.0)?,
        Retention::Pct(pct) => dataset.arcs.set_retained_pct(pct)?,
        Retention::Interval(interval) => dataset.arcs.set_retained_interval(interval)?,
    }
    debug!("retained interval: {}", dataset.arcs.retained_interval());

    dataset.info.simplify = Some(SimplifyRecord {
        method: method,
        spherical: mode.is_spherical(),
        planar: opts.planar,
    });

    Ok(())
}

fn choose_retention(opts: &SimplifyOptions, bounds: Option<Bounds>, mode: CoordinateMode) -> Result<Retention> {
    if let Some(pct) = opts.pct {
        if !(pct >= 0.0 && pct <= 1.0) {
            return Err(SimplifyError::InvalidPercentage(pct));
        }
        return Ok(Retention::Pct(pct));
    }

    if let Some(interval) = opts.interval {
        if !(interval >= 0.0) {
            return Err(SimplifyError::InvalidInterval(interval));
        }
        return Ok(Retention::Interval(interval));
    }

    if let Some(ref raw) = opts.resolution {
        let [ xres, yres ] = parse_simplify_resolution(raw.clone())?;
        if xres == 0.0 && yres == 0.0 {
            return Err(SimplifyError::InvalidResolution("width and height are both 0".to_string()));
        }

        let b = match bounds {
            None => return Ok(Retention::All),
            Some(b) => b,
        };
        let interval = match mode {
            CoordinateMode::Planar => calc_planar_interval(xres, yres, b.width(), b.height()),
            CoordinateMode::Spherical { radius } => calc_spherical_interval(xres, yres, &b, radius),
        };
        if !(interval >= 0.0) {
            return Err(SimplifyError::InvalidInterval(interval));
        }
        return Ok(Retention::Interval(interval));
    }

    Ok(Retention::All)
}

#[cfg(test)]
mod test {
    use std::f64::INFINITY;
    use crate::error::SimplifyError;
    use crate::geo::{Bounds, Point};
    use crate::topology::{ArcCollection, Dataset};
    use super::*;

    fn dataset(coords: &[&[(f64, f64)]]) -> Dataset {
        Dataset::new(ArcCollection::new(
            coords.iter()
                .map(|arc| arc.iter().map(|&(x, y)| Point(x, y)).collect())
                .collect()
        ).unwrap())
    }

    fn wiggly_dataset() -> Dataset {
        let arc = |offset: f64| -> Vec<Point> {
            (0 .. 40)
                .map(|i| {
                    let t = i as f64;
                    Point(t, offset + (t * 0.9).sin() * 2.0 + (t * 0.37).cos())
                })
                .collect()
        };
        Dataset::new(ArcCollection::new(vec![ arc(0.0), arc(10.0), arc(20.0) ]).unwrap())
    }

    fn opts() -> SimplifyOptions {
        SimplifyOptions::default()
    }

    #[test]
    fn record_default_method_spherical() {
        let mut data = dataset(&[ &[ (180.0, 90.0), (-180.0, -90.0) ] ]);
        simplify(&mut data, &opts()).unwrap();
        assert_eq!(
            Some(SimplifyRecord { method: SimplifyMethod::WeightedVisvalingam, spherical: true, planar: None }),
            data.info.simplify
        );
    }

    #[test]
    fn record_dp_auto_planar() {
        let mut data = dataset(&[ &[ (0.0, 100.0), (100.0, 100.0) ] ]);
        simplify(&mut data, &SimplifyOptions { method: Some("dp".to_string()), ..opts() }).unwrap();
        assert_eq!(
            Some(SimplifyRecord { method: SimplifyMethod::Dp, spherical: false, planar: None }),
            data.info.simplify
        );
    }

    #[test]
    fn record_explicit_planar() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (1.0, -1.0) ] ]);
        simplify(&mut data, &SimplifyOptions {
            method: Some("visvalingam".to_string()),
            planar: Some(true),
            ..opts()
        }).unwrap();
        assert_eq!(
            Some(SimplifyRecord { method: SimplifyMethod::Visvalingam, spherical: false, planar: Some(true) }),
            data.info.simplify
        );
    }

    #[test]
    fn record_serializes_like_metadata() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (1.0, -1.0) ] ]);
        simplify(&mut data, &SimplifyOptions { planar: Some(true), ..opts() }).unwrap();
        assert_eq!(
            r#"{"method":"weighted_visvalingam","spherical":false,"planar":true}"#,
            serde_json::to_string(&data.info.simplify).unwrap()
        );
    }

    #[test]
    fn can_be_reapplied() {
        let mut data = wiggly_dataset();
        let a = data.arcs.to_vec();

        simplify(&mut data, &SimplifyOptions { pct: Some(0.1), method: Some("dp".to_string()), ..opts() }).unwrap();
        let b = data.arcs.to_vec();

        simplify(&mut data, &SimplifyOptions { pct: Some(0.3), method: Some("visvalingam".to_string()), ..opts() }).unwrap();
        simplify(&mut data, &SimplifyOptions { pct: Some(1.0), ..opts() }).unwrap();
        let c = data.arcs.to_vec();

        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn full_retention_after_every_method() {
        for method in &[ "dp", "visvalingam", "weighted" ] {
            let mut data = wiggly_dataset();
            let original = data.arcs.to_vec();

            simplify(&mut data, &SimplifyOptions { pct: Some(0.05), method: Some(method.to_string()), ..opts() }).unwrap();
            simplify(&mut data, &SimplifyOptions { pct: Some(1.0), method: Some(method.to_string()), ..opts() }).unwrap();

            assert_eq!(original, data.arcs.to_vec());
        }
    }

    #[test]
    fn thresholds_are_overwritten_not_accumulated() {
        let mut data = wiggly_dataset();
        simplify(&mut data, &SimplifyOptions { method: Some("dp".to_string()), ..opts() }).unwrap();
        let first = data.arcs.thresholds().to_vec();

        simplify(&mut data, &SimplifyOptions { method: Some("visvalingam".to_string()), ..opts() }).unwrap();
        simplify(&mut data, &SimplifyOptions { method: Some("dp".to_string()), ..opts() }).unwrap();

        assert_eq!(first, data.arcs.thresholds().to_vec());
    }

    #[test]
    fn endpoints_are_infinite_interiors_finite() {
        for method in &[ "dp", "visvalingam", "weighted_visvalingam" ] {
            let mut data = wiggly_dataset();
            simplify(&mut data, &SimplifyOptions { method: Some(method.to_string()), ..opts() }).unwrap();

            for arc_id in 0 .. data.arcs.size() {
                let range = data.arcs.arc_range(arc_id);
                let zz = &data.arcs.thresholds()[range];
                assert_eq!(INFINITY, zz[0]);
                assert_eq!(INFINITY, zz[zz.len() - 1]);
                assert!(zz[1 .. zz.len() - 1].iter().all(|z| z.is_finite() && *z >= 0.0));
            }
        }
    }

    #[test]
    fn lock_box_protects_a_rectangle() {
        let square = [ (0.0, 0.0), (0.0, 1.0), (2.0, 1.0), (2.0, 0.0), (0.0, 0.0) ];
        let mut data = dataset(&[ &square ]);
        let original = data.arcs.to_vec();

        simplify(&mut data, &SimplifyOptions { pct: Some(0.0), lock_box: true, ..opts() }).unwrap();

        assert_eq!(original, data.arcs.to_vec());
    }

    #[test]
    fn rectangle_collapses_without_lock_box() {
        let square = [ (0.0, 0.0), (0.0, 1.0), (2.0, 1.0), (2.0, 0.0), (0.0, 0.0) ];
        let mut data = dataset(&[ &square ]);

        simplify(&mut data, &SimplifyOptions { pct: Some(0.0), ..opts() }).unwrap();

        assert_eq!(vec![ vec![ Point(0.0, 0.0), Point(0.0, 0.0) ] ], data.arcs.to_vec());
    }

    #[test]
    fn world_edges_protected_by_default() {
        let mut data = dataset(&[
            &[ (170.0, 0.0), (180.0, 10.0), (180.0, 20.0), (180.0, 30.0), (170.0, 40.0) ],
            &[ (170.0, 40.0), (150.0, 20.0), (170.0, 0.0) ],
        ]);
        simplify(&mut data, &SimplifyOptions { method: Some("dp".to_string()), ..opts() }).unwrap();

        let zz = data.arcs.thresholds();
        assert_eq!(zz[1], zz[2]);
        assert_eq!(zz[2], zz[3]);
    }

    #[test]
    fn spherical_thresholds_are_metres() {
        let coords = [ (0.0, 0.0), (1.0, 1.0), (2.0, 0.0) ];

        let mut spherical = dataset(&[ &coords ]);
        simplify(&mut spherical, &SimplifyOptions { method: Some("dp".to_string()), ..opts() }).unwrap();

        let mut planar = dataset(&[ &coords ]);
        simplify(&mut planar, &SimplifyOptions { method: Some("dp".to_string()), planar: Some(true), ..opts() }).unwrap();

        assert_eq!(1.0, planar.arcs.thresholds()[1]);
        // one degree is about 111km
        assert!(spherical.arcs.thresholds()[1] > 100000.0);
        assert!(spherical.arcs.thresholds()[1] < 120000.0);
    }

    #[test]
    fn resolution_sets_interval() {
        let mut data = Dataset::with_bounds(
            ArcCollection::new(vec![ vec![ Point(0.0, 0.0), Point(500.0, 250.0), Point(1000.0, 500.0) ] ]).unwrap(),
            Bounds::new(0.0, 0.0, 1000.0, 500.0)
        );
        simplify(&mut data, &SimplifyOptions { resolution: Some("100x".into()), ..opts() }).unwrap();
        assert_eq!(10.0, data.arcs.retained_interval());
    }

    #[test]
    fn zero_resolution_rejected() {
        let mut data = wiggly_dataset();
        match simplify(&mut data, &SimplifyOptions { resolution: Some(0.0f64.into()), ..opts() }) {
            Err(SimplifyError::InvalidResolution(_)) => {},
            other => panic!("expected InvalidResolution, got {:?}", other),
        }
    }

    #[test]
    fn bad_options_leave_dataset_untouched() {
        let mut data = wiggly_dataset();
        assert!(simplify(&mut data, &SimplifyOptions { pct: Some(1.5), ..opts() }).is_err());
        assert!(simplify(&mut data, &SimplifyOptions { interval: Some(-1.0), ..opts() }).is_err());
        assert!(simplify(&mut data, &SimplifyOptions { resolution: Some("-200x".into()), ..opts() }).is_err());
        assert!(simplify(&mut data, &SimplifyOptions { method: Some("rdp".to_string()), ..opts() }).is_err());
        assert!(!data.arcs.has_thresholds());
        assert_eq!(None, data.info.simplify);
    }

    #[test]
    fn bad_radius_leaves_dataset_untouched() {
        let mut data = wiggly_dataset();
        match simplify(&mut data, &SimplifyOptions { resolution: Some("100".into()), radius: -1.0, ..opts() }) {
            Err(SimplifyError::InvalidRadius(_)) => {},
            other => panic!("expected InvalidRadius, got {:?}", other),
        }
        assert!(!data.arcs.has_thresholds());
        assert_eq!(None, data.info.simplify);
    }

    #[test]
    fn inverted_bounds_leave_dataset_untouched() {
        let mut data = Dataset::with_bounds(
            ArcCollection::new(vec![ vec![ Point(0.0, 0.0), Point(5.0, 3.0), Point(10.0, 0.0) ] ]).unwrap(),
            Bounds::new(10.0, 0.0, 0.0, 10.0)
        );
        match simplify(&mut data, &SimplifyOptions { resolution: Some("100x".into()), planar: Some(true), ..opts() }) {
            Err(SimplifyError::InvalidInterval(_)) => {},
            other => panic!("expected InvalidInterval, got {:?}", other),
        }
        assert!(!data.arcs.has_thresholds());
        assert_eq!(None, data.info.simplify);
    }

    #[test]
    fn spherical_areas_shrink_toward_the_poles() {
        for method in &[ "visvalingam", "weighted_visvalingam" ] {
            let options = SimplifyOptions { method: Some(method.to_string()), ..opts() };

            let mut equator = dataset(&[ &[ (0.0, 0.0), (1.0, 1.0), (2.0, 0.0) ] ]);
            simplify(&mut equator, &options).unwrap();
            let mut polar = dataset(&[ &[ (0.0, 85.0), (1.0, 86.0), (2.0, 85.0) ] ]);
            simplify(&mut polar, &options).unwrap();

            assert_eq!(Some(true), equator.info.simplify.as_ref().map(|r| r.spherical));
            assert_eq!(Some(true), polar.info.simplify.as_ref().map(|r| r.spherical));

            // sqrt of about half a square degree, in metres
            let at_equator = equator.arcs.thresholds()[1];
            assert!(at_equator > 100000.0 && at_equator < 120000.0);

            // a degree of longitude is under a tenth as long at 85 degrees
            let at_pole = polar.arcs.thresholds()[1];
            assert!(at_pole < at_equator * 0.5, "{} vs {}", at_pole, at_equator);
        }
    }

    #[test]
    fn spherical_can_be_forced() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (500.0, 3.0), (1000.0, 10.0) ] ]);
        simplify(&mut data, &SimplifyOptions { spherical: Some(true), ..opts() }).unwrap();
        assert_eq!(
            Some(SimplifyRecord { method: SimplifyMethod::WeightedVisvalingam, spherical: true, planar: None }),
            data.info.simplify
        );
    }

    #[test]
    fn planar_beats_spherical() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (1.0, 1.0), (2.0, 0.0) ] ]);
        simplify(&mut data, &SimplifyOptions { spherical: Some(true), planar: Some(true), ..opts() }).unwrap();
        assert_eq!(Some(false), data.info.simplify.as_ref().map(|r| r.spherical));
    }

    #[test]
    fn lonlat_can_be_forced_planar_by_spherical_false() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (1.0, 1.0), (2.0, 0.0) ] ]);
        simplify(&mut data, &SimplifyOptions { spherical: Some(false), ..opts() }).unwrap();
        assert_eq!(Some(false), data.info.simplify.as_ref().map(|r| r.spherical));
        assert_eq!(None, data.info.simplify.as_ref().and_then(|r| r.planar));
    }

    #[test]
    fn interval_option_retains_by_threshold() {
        let mut data = dataset(&[ &[ (0.0, 0.0), (1.0, 3.0), (2.0, 0.0), (3.0, 0.5), (4.0, 0.0) ] ]);
        simplify(&mut data, &SimplifyOptions {
            method: Some("dp".to_string()),
            planar: Some(true),
            interval: Some(1.0),
            ..opts()
        }).unwrap();
        assert_eq!(
            vec![ vec![ Point(0.0, 0.0), Point(1.0, 3.0), Point(2.0, 0.0), Point(4.0, 0.0) ] ],
            data.arcs.to_vec()
        );
    }

    #[test]
    fn reversed_arc_simplifies_identically() {
        let mut data = wiggly_dataset();
        simplify(&mut data, &SimplifyOptions { pct: Some(0.2), ..opts() }).unwrap();

        let mut backwards = data.arcs.arc_points(!1);
        backwards.reverse();
        assert_eq!(data.arcs.arc_points(1), backwards);
    }

    #[test]
    fn weighting_changes_the_ranking() {
        let mut light = wiggly_dataset();
        let mut heavy = wiggly_dataset();
        simplify(&mut light, &SimplifyOptions { weighting: Some(0.1), planar: Some(true), ..opts() }).unwrap();
        simplify(&mut heavy, &SimplifyOptions { weighting: Some(0.9), planar: Some(true), ..opts() }).unwrap();
        assert_ne!(light.arcs.thresholds(), heavy.arcs.thresholds());
    }
}
