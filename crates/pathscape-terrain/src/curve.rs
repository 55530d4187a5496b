//! Keyframed shaping curve applied to raw noise before height scaling.

/// A curve keyframe with Hermite tangents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key.
    pub in_tangent: f32,
    /// Slope leaving this key.
    pub out_tangent: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Maps a noise sample in `[0, 1]` to a height multiplier.
///
/// Segments between keys are cubic Hermite splines. Inputs before the first key
/// or after the last evaluate to that key's value. A non-finite tangent makes
/// its segment a step that holds the left key's value.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapingCurve {
    keys: Vec<CurveKey>,
}

impl ShapingCurve {
    /// Build a curve from keys in any order.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line from `(0, 0)` to `(1, 1)`.
    pub fn linear() -> Self {
        Self::new(vec![
            CurveKey::new(0.0, 0.0, 1.0, 1.0),
            CurveKey::new(1.0, 1.0, 1.0, 1.0),
        ])
    }

    /// A curve that returns `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, value, 0.0, 0.0)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate the curve at `t`. An empty curve evaluates to zero.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time, so 1 <= upper < len.
        let upper = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[upper - 1];
        let k1 = &self.keys[upper];

        let dt = k1.time - k0.time;
        if dt <= 0.0 || !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
            return k0.value;
        }

        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
    }
}

impl Default for ShapingCurve {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_linear_curve_is_identity() {
        let curve = ShapingCurve::linear();
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert!((curve.evaluate(t) - t).abs() < EPSILON, "t={t}");
        }
    }

    #[test]
    fn test_clamps_outside_key_range() {
        let curve = ShapingCurve::linear();
        assert_eq!(curve.evaluate(-0.5), 0.0);
        assert_eq!(curve.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_passes_through_keys() {
        let curve = ShapingCurve::new(vec![
            CurveKey::new(1.0, 0.2, 0.0, 0.0),
            CurveKey::new(0.0, 0.0, 0.0, 0.0),
            CurveKey::new(0.5, 0.9, 0.0, 0.0),
        ]);
        assert_eq!(curve.keys()[1].time, 0.5);
        assert!((curve.evaluate(0.5) - 0.9).abs() < EPSILON);
        assert!((curve.evaluate(1.0) - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_flat_tangents_ease_in_out() {
        let curve = ShapingCurve::new(vec![
            CurveKey::new(0.0, 0.0, 0.0, 0.0),
            CurveKey::new(1.0, 1.0, 0.0, 0.0),
        ]);
        // Smoothstep: below the line early, symmetric around the midpoint.
        assert!(curve.evaluate(0.25) < 0.25);
        assert!((curve.evaluate(0.5) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_infinite_tangent_steps() {
        let curve = ShapingCurve::new(vec![
            CurveKey::new(0.0, 0.3, 0.0, f32::INFINITY),
            CurveKey::new(1.0, 0.8, 0.0, 0.0),
        ]);
        assert_eq!(curve.evaluate(0.7), 0.3);
    }

    #[test]
    fn test_constant_and_empty() {
        assert_eq!(ShapingCurve::constant(0.4).evaluate(0.9), 0.4);
        assert_eq!(ShapingCurve::new(Vec::new()).evaluate(0.5), 0.0);
    }
}
