//! Asteroid colouring (cosmetic only)

/// Gradient stops over normalized speed: dull grey rock, amber, hot red
const STOPS: [(f32, [u8; 3]); 3] = [
    (0.0, [140, 140, 150]),
    (0.5, [240, 180, 70]),
    (1.0, [230, 60, 50]),
];

/// Colour an asteroid by its speed relative to `max_speed`
///
/// Returns a CSS `rgb(...)` string.
pub fn speed_color(speed: f32, max_speed: f32) -> String {
    let t = if max_speed > 0.0 {
        (speed / max_speed).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut rgb = STOPS[0].1;
    for pair in STOPS.windows(2) {
        let ((lo, from), (hi, to)) = (pair[0], pair[1]);
        if t <= hi {
            let u = (t - lo) / (hi - lo);
            rgb = [
                lerp(from[0], to[0], u),
                lerp(from[1], to[1], u),
                lerp(from[2], to[2], u),
            ];
            break;
        }
    }

    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

fn lerp(from: u8, to: u8, u: f32) -> u8 {
    let v = from as f32 + (to as f32 - from as f32) * u;
    v.round().clamp(0.0, 255.0) as u8
}
