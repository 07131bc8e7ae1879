/// Maps an angle in degrees into the half-open range `[-180, 180)`.
///
/// Non-finite input is returned unchanged.
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return degrees;
    }
    let wrapped = (degrees + 180.0).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        -180.0
    } else {
        wrapped - 180.0
    }
}
