//! Vertex math shared by planar and spherical simplification.
//!
//! Planar vertices are lifted to `[x, y, 0.0]`; spherical vertices are
//! projected onto the sphere with `sphere::lonlat_to_xyz`. Either way the
//! same formulas apply.

pub type Vec3 = [f64; 3];

fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [ a[0] - b[0], a[1] - b[1], a[2] - b[2] ]
}

fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Returns the area of triangle abc.
pub fn triangle_area(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    length(&cross(&sub(b, a), &sub(c, a))) / 2.0
}

/// Returns the cosine of the angle abc (the angle at `b`).
///
/// A straight line gives -1; a spike that doubles back on itself gives 1.
/// Zero-length legs give 0, so they neither reward nor punish the vertex.
pub fn cosine(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    let ba = sub(a, b);
    let bc = sub(c, b);
    let den = length(&ba) * length(&bc);

    if den > 0.0 {
        (dot(&ba, &bc) / den).max(-1.0).min(1.0)
    } else {
        0.0
    }
}

/// Returns the distance from `p` to the segment `ab`.
///
/// When a == b (say, the chord across a closed ring), that's the distance
/// from p to a.
pub fn segment_distance(p: &Vec3, a: &Vec3, b: &Vec3) -> f64 {
    let ab = sub(b, a);
    let ap = sub(p, a);
    let len2 = dot(&ab, &ab);

    let t = if len2 > 0.0 { (dot(&ap, &ab) / len2).max(0.0).min(1.0) } else { 0.0 };
    let nearest = [ a[0] + t * ab[0], a[1] + t * ab[1], a[2] + t * ab[2] ];
    length(&sub(p, &nearest))
}
