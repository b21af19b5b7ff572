//! Heading normalization.
//!
//! Headings are kept in the half-open interval (−π, π].
//! Values already inside the interval are returned untouched, so repeated
//! normalization never perturbs a heading by rounding.

use std::f64::consts::{PI, TAU};

use uom::si::{angle::radian, f64::Angle};

/// Wraps an angle in radians into (−π, π].
///
/// Out-of-range values are wrapped with a single Euclidean remainder,
/// so the cost is constant no matter how many turns the input spans.
/// Non-finite inputs yield `NaN`.
///
/// ```
/// use std::f64::consts::PI;
/// use paddock_core::angle::wrap_radians;
///
/// assert_eq!(wrap_radians(-PI), PI);
/// assert!((wrap_radians(3.0 * PI) - PI).abs() < 1e-12);
/// ```
#[must_use]
pub fn wrap_radians(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }

    let wrapped = PI - (PI - angle).rem_euclid(TAU);

    // `rem_euclid` can round up to exactly `TAU` for tiny negative remainders.
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Wraps an [`Angle`] into (−π, π] radians.
#[must_use]
pub fn normalize(angle: Angle) -> Angle {
    Angle::new::<radian>(wrap_radians(angle.get::<radian>()))
}

/// Returns `true` if `angle` lies in (−π, π] radians.
#[must_use]
pub fn is_normalized(angle: Angle) -> bool {
    let rad = angle.get::<radian>();
    rad > -PI && rad <= PI
}
