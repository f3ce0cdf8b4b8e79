//! Position blending on the sphere
//!
//! Averaging latitude and longitude directly goes wrong close to the poles
//! and across the antimeridian, so positions are converted to n-vectors
//! (unit vectors from the earth center), blended, and converted back.

use geo::geometry::Point;

use super::sample::GeoSample;

/// Below this the blended vector has no usable direction
const DEGENERATE_MAGNITUDE: f64 = 1e-12;

/// Weighted position between `a` and `b`.
///
/// The weights don't need to be normalized. For an antipodal pair the
/// blend has no direction: the position of the heavier sample is returned
/// (`a` on a tie).
pub fn interpolate(a: &GeoSample, b: &GeoSample, weight_a: f64, weight_b: f64) -> Point {
    let va = to_nvector(a.coordinates());
    let vb = to_nvector(b.coordinates());

    let sum = [
        weight_a * va[0] + weight_b * vb[0],
        weight_a * va[1] + weight_b * vb[1],
        weight_a * va[2] + weight_b * vb[2],
    ];

    let magnitude = (sum[0] * sum[0] + sum[1] * sum[1] + sum[2] * sum[2]).sqrt();
    if !(magnitude > DEGENERATE_MAGNITUDE) {
        return if weight_b > weight_a {
            b.coordinates()
        } else {
            a.coordinates()
        };
    }

    from_nvector([sum[0] / magnitude, sum[1] / magnitude, sum[2] / magnitude])
}

fn to_nvector(p: Point) -> [f64; 3] {
    let lat = p.y().to_radians();
    let lon = p.x().to_radians();

    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn from_nvector(v: [f64; 3]) -> Point {
    let lat = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
    let lon = v[1].atan2(v[0]);

    Point::new(lon.to_degrees(), lat.to_degrees())
}
