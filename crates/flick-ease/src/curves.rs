//! The Penner easing function library.
//!
//! Every function takes the canonical `(t, b, c, d)` parameters:
//! elapsed time `t` in `[0, d]`, start value `b`, total change `c`,
//! and duration `d > 0`, returning the eased value at `t`. The
//! formulas, including branch thresholds, follow Robert Penner's
//! originals so eased values match the classic tables exactly.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Linear,
    Quad,
    Cubic,
    Quart,
    Quint,
    Sine,
    Expo,
    Circ,
    Back,
    Elastic,
    Bounce,
}

impl Family {
    /// All families, in the order they are usually listed.
    pub const ALL: [Family; 11] = [
        Family::Linear,
        Family::Quad,
        Family::Cubic,
        Family::Quart,
        Family::Quint,
        Family::Sine,
        Family::Expo,
        Family::Circ,
        Family::Back,
        Family::Elastic,
        Family::Bounce,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Family::Linear => "linear",
            Family::Quad => "quad",
            Family::Cubic => "cubic",
            Family::Quart => "quart",
            Family::Quint => "quint",
            Family::Sine => "sine",
            Family::Expo => "expo",
            Family::Circ => "circ",
            Family::Back => "back",
            Family::Elastic => "elastic",
            Family::Bounce => "bounce",
        }
    }
}

/// How a family's acceleration profile is applied over the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Accelerate from rest.
    In,
    /// Decelerate to rest.
    Out,
    /// `In` at double speed for the first half, `Out` for the second.
    InOut,
    /// The inverse composition: `Out` first, then `In`.
    OutIn,
}

/// Tuning parameters for the Back and Elastic families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Back: how far the curve overshoots its endpoints.
    pub overshoot: f64,
    /// Elastic: oscillation amplitude. Zero (or less than `|c|`) falls
    /// back to `c` with a derived phase shift.
    pub amplitude: f64,
    /// Elastic: oscillation period. Zero falls back to `d * 0.3`
    /// (`d * 0.45` for `InOut`).
    pub period: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            overshoot: 1.70158,
            amplitude: 0.0,
            period: 0.0,
        }
    }
}

/// A fully selected easing curve: family plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    pub family: Family,
    pub mode: Mode,
}

impl Curve {
    pub fn new(family: Family, mode: Mode) -> Self {
        Self { family, mode }
    }

    /// Evaluate the curve at elapsed time `t`.
    pub fn sample(&self, t: f64, b: f64, c: f64, d: f64, tuning: &Tuning) -> f64 {
        match self.mode {
            Mode::In => ease_in(self.family, t, b, c, d, tuning),
            Mode::Out => ease_out(self.family, t, b, c, d, tuning),
            Mode::InOut => ease_in_out(self.family, t, b, c, d, tuning),
            Mode::OutIn => {
                if t < d / 2.0 {
                    ease_out(self.family, t * 2.0, b, c / 2.0, d, tuning)
                } else {
                    ease_in(self.family, t * 2.0 - d, b + c / 2.0, c / 2.0, d, tuning)
                }
            }
        }
    }
}

fn ease_in(family: Family, t: f64, b: f64, c: f64, d: f64, tn: &Tuning) -> f64 {
    match family {
        Family::Linear => linear(t, b, c, d),
        Family::Quad => quad_in(t, b, c, d),
        Family::Cubic => cubic_in(t, b, c, d),
        Family::Quart => quart_in(t, b, c, d),
        Family::Quint => quint_in(t, b, c, d),
        Family::Sine => sine_in(t, b, c, d),
        Family::Expo => expo_in(t, b, c, d),
        Family::Circ => circ_in(t, b, c, d),
        Family::Back => back_in(t, b, c, d, tn.overshoot),
        Family::Elastic => elastic_in(t, b, c, d, tn.amplitude, tn.period),
        Family::Bounce => bounce_in(t, b, c, d),
    }
}

fn ease_out(family: Family, t: f64, b: f64, c: f64, d: f64, tn: &Tuning) -> f64 {
    match family {
        Family::Linear => linear(t, b, c, d),
        Family::Quad => quad_out(t, b, c, d),
        Family::Cubic => cubic_out(t, b, c, d),
        Family::Quart => quart_out(t, b, c, d),
        Family::Quint => quint_out(t, b, c, d),
        Family::Sine => sine_out(t, b, c, d),
        Family::Expo => expo_out(t, b, c, d),
        Family::Circ => circ_out(t, b, c, d),
        Family::Back => back_out(t, b, c, d, tn.overshoot),
        Family::Elastic => elastic_out(t, b, c, d, tn.amplitude, tn.period),
        Family::Bounce => bounce_out(t, b, c, d),
    }
}

fn ease_in_out(family: Family, t: f64, b: f64, c: f64, d: f64, tn: &Tuning) -> f64 {
    match family {
        Family::Linear => linear(t, b, c, d),
        Family::Quad => quad_in_out(t, b, c, d),
        Family::Cubic => cubic_in_out(t, b, c, d),
        Family::Quart => quart_in_out(t, b, c, d),
        Family::Quint => quint_in_out(t, b, c, d),
        Family::Sine => sine_in_out(t, b, c, d),
        Family::Expo => expo_in_out(t, b, c, d),
        Family::Circ => circ_in_out(t, b, c, d),
        Family::Back => back_in_out(t, b, c, d, tn.overshoot),
        Family::Elastic => elastic_in_out(t, b, c, d, tn.amplitude, tn.period),
        Family::Bounce => bounce_in_out(t, b, c, d),
    }
}

fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * t / d + b
}

fn quad_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t + b
}

fn quad_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

fn quad_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * t * t + b
    } else {
        t -= 1.0;
        -c / 2.0 * (t * (t - 2.0) - 1.0) + b
    }
}

fn cubic_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t + b
}

fn cubic_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

fn cubic_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * t * t * t + b
    } else {
        t -= 2.0;
        c / 2.0 * (t * t * t + 2.0) + b
    }
}

fn quart_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t + b
}

fn quart_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    -c * (t * t * t * t - 1.0) + b
}

fn quart_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * t * t * t * t + b
    } else {
        t -= 2.0;
        -c / 2.0 * (t * t * t * t - 2.0) + b
    }
}

fn quint_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t * t + b
}

fn quint_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t * t * t + 1.0) + b
}

fn quint_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * t * t * t * t * t + b
    } else {
        t -= 2.0;
        c / 2.0 * (t * t * t * t * t + 2.0) + b
    }
}

fn sine_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c * (t / d * FRAC_PI_2).cos() + c + b
}

fn sine_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * (t / d * FRAC_PI_2).sin() + b
}

fn sine_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
}

fn expo_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        b
    } else {
        c * 2f64.powf(10.0 * (t / d - 1.0)) + b
    }
}

fn expo_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == d {
        b + c
    } else {
        c * (-(2f64.powf(-10.0 * t / d)) + 1.0) + b
    }
}

fn expo_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    if t == d {
        return b + c;
    }
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b
    } else {
        t -= 1.0;
        c / 2.0 * (-(2f64.powf(-10.0 * t)) + 2.0) + b
    }
}

fn circ_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * ((1.0 - t * t).sqrt() - 1.0) + b
}

fn circ_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (1.0 - t * t).sqrt() + b
}

fn circ_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
    } else {
        t -= 2.0;
        c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
    }
}

fn back_in(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let t = t / d;
    c * t * t * ((s + 1.0) * t - s) + b
}

fn back_out(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
}

fn back_in_out(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let s = s * 1.525;
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
    } else {
        t -= 2.0;
        c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
    }
}

/// Resolve the elastic amplitude/phase, applying the zero-amplitude
/// fallback: an amplitude of zero or smaller than `|c|` is clamped to
/// `c` and the phase shift derived as a quarter period.
fn elastic_params(a: f64, p: f64, c: f64) -> (f64, f64) {
    if a == 0.0 || a < c.abs() {
        (c, p / 4.0)
    } else {
        (a, p / TAU * (c / a).asin())
    }
}

fn elastic_in(t: f64, b: f64, c: f64, d: f64, a: f64, p: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let t = t / d;
    if t == 1.0 {
        return b + c;
    }
    let p = if p == 0.0 { d * 0.3 } else { p };
    let (a, s) = elastic_params(a, p, c);
    let t = t - 1.0;
    -(a * 2f64.powf(10.0 * t) * ((t * d - s) * TAU / p).sin()) + b
}

fn elastic_out(t: f64, b: f64, c: f64, d: f64, a: f64, p: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let t = t / d;
    if t == 1.0 {
        return b + c;
    }
    let p = if p == 0.0 { d * 0.3 } else { p };
    let (a, s) = elastic_params(a, p, c);
    a * 2f64.powf(-10.0 * t) * ((t * d - s) * TAU / p).sin() + c + b
}

fn elastic_in_out(t: f64, b: f64, c: f64, d: f64, a: f64, p: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let mut t = t / (d / 2.0);
    if t == 2.0 {
        return b + c;
    }
    let p = if p == 0.0 { d * 0.45 } else { p };
    let (a, s) = elastic_params(a, p, c);
    if t < 1.0 {
        t -= 1.0;
        -0.5 * (a * 2f64.powf(10.0 * t) * ((t * d - s) * TAU / p).sin()) + b
    } else {
        t -= 1.0;
        a * 2f64.powf(-10.0 * t) * ((t * d - s) * TAU / p).sin() * 0.5 + c + b
    }
}

fn bounce_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        t -= 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        t -= 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        t -= 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

fn bounce_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c - bounce_out(d - t, 0.0, c, d) + b
}

fn bounce_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t < d / 2.0 {
        bounce_in(t * 2.0, 0.0, c, d) * 0.5 + b
    } else {
        bounce_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn all_curves() -> Vec<Curve> {
        let mut out = Vec::new();
        for family in Family::ALL {
            for mode in [Mode::In, Mode::Out, Mode::InOut, Mode::OutIn] {
                out.push(Curve::new(family, mode));
            }
        }
        out
    }

    #[test]
    fn linear_boundaries_are_exact() {
        let tn = Tuning::default();
        let curve = Curve::new(Family::Linear, Mode::In);
        assert_eq!(curve.sample(0.0, 5.0, 40.0, 2.0, &tn), 5.0);
        assert_eq!(curve.sample(2.0, 5.0, 40.0, 2.0, &tn), 45.0);
    }

    #[test]
    fn quad_out_half_duration() {
        // -c*(t/=d)*(t-2)+b with t=1.0, b=0, c=100, d=2.0
        let tn = Tuning::default();
        let curve = Curve::new(Family::Quad, Mode::Out);
        assert_eq!(curve.sample(1.0, 0.0, 100.0, 2.0, &tn), 75.0);
    }

    #[test]
    fn every_curve_starts_at_b() {
        let tn = Tuning::default();
        for curve in all_curves() {
            let v = curve.sample(0.0, 3.0, 17.0, 1.5, &tn);
            assert!(
                (v - 3.0).abs() < EPS,
                "{:?} should start at b, got {v}",
                curve
            );
        }
    }

    #[test]
    fn every_curve_ends_at_b_plus_c() {
        let tn = Tuning::default();
        for curve in all_curves() {
            let v = curve.sample(1.5, 3.0, 17.0, 1.5, &tn);
            assert!(
                (v - 20.0).abs() < EPS,
                "{:?} should end at b+c, got {v}",
                curve
            );
        }
    }

    #[test]
    fn bounce_reflection_identity() {
        // Bounce.In(t) == c - Bounce.Out(d-t) + b by construction.
        let (b, c, d) = (2.0, 50.0, 1.0);
        for i in 0..=20 {
            let t = d * i as f64 / 20.0;
            let lhs = bounce_in(t, b, c, d);
            let rhs = c - bounce_out(d - t, 0.0, c, d) + b;
            assert!((lhs - rhs).abs() < EPS, "t={t}: {lhs} != {rhs}");
        }
    }

    #[test]
    fn bounce_out_piecewise_segments() {
        // One point inside each of the four segments.
        let d = 2.75;
        assert!((bounce_out(0.5, 0.0, 1.0, d) - 7.5625 * (0.5 / d) * (0.5 / d)).abs() < EPS);
        let t1: f64 = 1.7 / d - 1.5 / 2.75;
        assert!((bounce_out(1.7, 0.0, 1.0, d) - (7.5625 * t1 * t1 + 0.75)).abs() < EPS);
        let t2: f64 = 2.3 / d - 2.25 / 2.75;
        assert!((bounce_out(2.3, 0.0, 1.0, d) - (7.5625 * t2 * t2 + 0.9375)).abs() < EPS);
        let t3: f64 = 2.7 / d - 2.625 / 2.75;
        assert!((bounce_out(2.7, 0.0, 1.0, d) - (7.5625 * t3 * t3 + 0.984375)).abs() < EPS);
    }

    #[test]
    fn in_out_hits_midpoint_halfway() {
        let tn = Tuning::default();
        for family in [Family::Quad, Family::Cubic, Family::Sine, Family::Bounce] {
            let curve = Curve::new(family, Mode::InOut);
            let v = curve.sample(1.0, 0.0, 100.0, 2.0, &tn);
            assert!(
                (v - 50.0).abs() < EPS,
                "{:?} InOut midpoint should be 50, got {v}",
                family
            );
        }
    }

    #[test]
    fn out_in_hits_midpoint_halfway() {
        let tn = Tuning::default();
        for family in Family::ALL {
            let curve = Curve::new(family, Mode::OutIn);
            let v = curve.sample(1.0, 0.0, 100.0, 2.0, &tn);
            assert!(
                (v - 50.0).abs() < EPS,
                "{:?} OutIn midpoint should be 50, got {v}",
                family
            );
        }
    }

    #[test]
    fn back_in_dips_below_start() {
        let tn = Tuning::default();
        let curve = Curve::new(Family::Back, Mode::In);
        let v = curve.sample(0.3, 0.0, 1.0, 1.0, &tn);
        assert!(v < 0.0, "Back.In should undershoot early, got {v}");
    }

    #[test]
    fn elastic_fallback_with_zero_amplitude() {
        // amplitude=0 triggers the clamp-to-c fallback; endpoints stay exact
        // and the curve oscillates in between.
        let tn = Tuning {
            amplitude: 0.0,
            period: 0.0,
            ..Tuning::default()
        };
        let curve = Curve::new(Family::Elastic, Mode::Out);
        assert_eq!(curve.sample(0.0, 0.0, 100.0, 1.0, &tn), 0.0);
        assert_eq!(curve.sample(1.0, 0.0, 100.0, 1.0, &tn), 100.0);
        let mid = curve.sample(0.25, 0.0, 100.0, 1.0, &tn);
        assert!(mid.is_finite());
    }

    #[test]
    fn elastic_large_amplitude_uses_configured_value() {
        let tn = Tuning {
            amplitude: 200.0,
            period: 0.3,
            ..Tuning::default()
        };
        let curve = Curve::new(Family::Elastic, Mode::In);
        assert_eq!(curve.sample(0.0, 0.0, 100.0, 1.0, &tn), 0.0);
        assert_eq!(curve.sample(1.0, 0.0, 100.0, 1.0, &tn), 100.0);
    }

    #[test]
    fn expo_edge_branches() {
        // The t==0 / t==d branches keep Expo exact where the power form
        // would only approach the endpoints.
        assert_eq!(expo_in(0.0, 10.0, 5.0, 2.0), 10.0);
        assert_eq!(expo_out(2.0, 10.0, 5.0, 2.0), 15.0);
        assert_eq!(expo_in_out(0.0, 10.0, 5.0, 2.0), 10.0);
        assert_eq!(expo_in_out(2.0, 10.0, 5.0, 2.0), 15.0);
    }

    #[test]
    fn family_names_are_stable() {
        assert_eq!(Family::Linear.name(), "linear");
        assert_eq!(Family::Elastic.name(), "elastic");
        assert_eq!(Family::ALL.len(), 11);
    }
}
