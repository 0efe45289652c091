//! Seven-stop colour ramp for scores, dark red (0) through yellow (50) to dark green (100).
//!
//! The same stops drive the numeric readout colour and the gauge track gradient,
//! so a readout always matches the track colour at its position.

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Per-channel linear interpolation, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let (a, b) = (a as f64, b as f64);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// A control point on the ramp: position in score units and its colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: Rgb,
}

const fn stop(position: f64, color: Rgb) -> ColorStop {
    ColorStop { position, color }
}

/// The fixed score ramp, ordered by position and spanning 0–100.
pub const SCORE_STOPS: [ColorStop; 7] = [
    stop(0.0, Rgb(0xb7, 0x1c, 0x1c)),   // dark red
    stop(15.0, Rgb(0xe5, 0x39, 0x35)),
    stop(35.0, Rgb(0xfb, 0x8c, 0x00)),  // orange
    stop(50.0, Rgb(0xfd, 0xd8, 0x35)),  // yellow
    stop(70.0, Rgb(0x7c, 0xb3, 0x42)),  // lime
    stop(85.0, Rgb(0x43, 0xa0, 0x47)),  // green
    stop(100.0, Rgb(0x2e, 0x7d, 0x32)), // dark green
];

/// Clamp a score into [0, 100]; non-finite values become 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Colour of `value` on an arbitrary ordered ramp.
///
/// Picks the first pair with `left.position <= v <= right.position` and
/// interpolates between them. Values outside the ramp clamp to its ends.
pub fn interpolate(stops: &[ColorStop], value: f64) -> Rgb {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Rgb(0, 0, 0),
    };
    let v = if value.is_finite() { value } else { first.position };
    if v <= first.position {
        return first.color;
    }
    if v >= last.position {
        return last.color;
    }

    let (left, right) = stops
        .windows(2)
        .find(|w| w[0].position <= v && v <= w[1].position)
        .map(|w| (w[0], w[1]))
        .unwrap_or((first, last));

    let span = right.position - left.position;
    if span <= 0.0 {
        return left.color;
    }
    left.color.lerp(right.color, (v - left.position) / span)
}

/// Colour of a score on [`SCORE_STOPS`].
pub fn color_at(value: f64) -> Rgb {
    interpolate(&SCORE_STOPS, clamp_score(value))
}
