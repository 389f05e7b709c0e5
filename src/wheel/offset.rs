use crate::foundation::core::Canvas;
use crate::foundation::math::SplitMix64;

/// Random signed offset pair bounded to roughly the inner two thirds of the canvas radius.
///
/// Each axis is `±floor(u * (2 * c / 3) + 1)` for a uniform `u` in `[0, 1)` and the matching
/// half-extent `c`; the sign is a fair coin.
pub(crate) fn random_offsets(canvas: Canvas, rng: &mut SplitMix64) -> (i32, i32) {
    let center = canvas.center();
    (axis(center.x, rng), axis(center.y, rng))
}

fn axis(half_extent: f64, rng: &mut SplitMix64) -> i32 {
    let magnitude = (rng.next_f64() * (half_extent * 2.0 / 3.0) + 1.0).floor() as i32;
    if rng.next_bool() {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/offset.rs"]
mod tests;
