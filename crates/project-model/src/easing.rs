//! Progress and easing primitives shared by clip animation and scene
//! camera motion.

use crate::Frame;

/// Clamp `value` to `[min, max]`, returning `fallback` for NaN or infinities.
pub fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

/// Cubic ease `t²(3 - 2t)` on `t` clamped to `[0, 1]`.
pub fn smoothstep(value: f64) -> f64 {
    let t = clamp_finite(value, 0.0, 1.0, 0.0);
    t * t * (3.0 - 2.0 * t)
}

/// Local progress of `frame` through `[start, start + duration)`, clamped to `[0, 1]`.
pub fn span_progress(frame: Frame, start: Frame, duration: Frame) -> f64 {
    let elapsed = frame as f64 - start as f64;
    clamp_finite(elapsed / duration.max(1) as f64, 0.0, 1.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_finite() {
        assert_eq!(clamp_finite(5.0, 0.0, 1.0, 0.5), 1.0);
        assert_eq!(clamp_finite(-5.0, 0.0, 1.0, 0.5), 0.0);
        assert_eq!(clamp_finite(f64::NAN, 0.0, 1.0, 0.5), 0.5);
        assert_eq!(clamp_finite(f64::NEG_INFINITY, 0.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn test_smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(smoothstep(2.0), 1.0);
        assert_eq!(smoothstep(f64::NAN), 0.0);
    }

    #[test]
    fn test_span_progress() {
        assert_eq!(span_progress(0, 10, 20), 0.0);
        assert!((span_progress(20, 10, 20) - 0.5).abs() < 1e-12);
        assert_eq!(span_progress(100, 10, 20), 1.0);
        // zero-length spans never divide by zero
        assert_eq!(span_progress(10, 10, 0), 0.0);
    }
}
