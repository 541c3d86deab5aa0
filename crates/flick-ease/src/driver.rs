use anyhow::{bail, Result};
use flick_core::geom::Vec2;

use crate::curves::{Curve, Family, Mode, Tuning};

/// Sign applied to an axis's eased offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    /// Offsets push the axis toward larger values.
    Positive,
    /// Offsets push the axis toward smaller values.
    Negative,
}

impl AxisDirection {
    fn sign(self) -> f64 {
        match self {
            AxisDirection::Positive => 1.0,
            AxisDirection::Negative => -1.0,
        }
    }
}

/// Configuration for an [`EasingDriver`].
///
/// Both axes share the scalar easing parameters (`initial_value`,
/// `change_in_value`, `duration`) but each selects its own curve and
/// direction, and each is computed and applied independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSpec {
    pub x_curve: Curve,
    pub y_curve: Curve,
    pub x_direction: AxisDirection,
    pub y_direction: AxisDirection,
    /// Penner `b`: the value the curve starts from.
    pub initial_value: f64,
    /// Penner `c`: total change over the duration.
    pub change_in_value: f64,
    /// Penner `d`: seconds from start to completion. Must be positive.
    pub duration: f64,
    pub tuning: Tuning,
    /// Restart from zero elapsed time when the duration expires.
    pub looping: bool,
    /// When looping, run the return trip with flipped directions
    /// instead of snapping back to the start.
    pub return_in_reverse: bool,
}

impl DriverSpec {
    /// A linear left-to-right sweep of `change` units over `duration`
    /// seconds, no vertical motion. Useful as a `..Default`-style base.
    pub fn horizontal(change: f64, duration: f64) -> Self {
        Self {
            x_curve: Curve::new(Family::Linear, Mode::In),
            y_curve: Curve::new(Family::Linear, Mode::In),
            x_direction: AxisDirection::Positive,
            y_direction: AxisDirection::Positive,
            initial_value: 0.0,
            change_in_value: change,
            duration,
            tuning: Tuning::default(),
            looping: false,
            return_in_reverse: false,
        }
    }
}

/// Animates a position once per external tick using easing curves.
///
/// The driver accumulates elapsed seconds against the configured
/// duration. While running, each axis's offset is evaluated from its
/// curve and added to a starting-position snapshot captured when the
/// current sweep began — not to the live position, so repeated
/// evaluation cannot drift. A non-looping driver latches inactive once
/// the duration expires and stays that way until [`restart`].
///
/// [`restart`]: EasingDriver::restart
#[derive(Debug, Clone)]
pub struct EasingDriver {
    spec: DriverSpec,
    elapsed: f64,
    active: bool,
    in_reverse: bool,
    x_sign: f64,
    y_sign: f64,
    start: Vec2,
    reverse_start: Vec2,
}

impl EasingDriver {
    /// Create a driver starting its sweep from `start`.
    ///
    /// Rejects a non-positive or non-finite duration; there is no
    /// instant at which such a sweep could complete.
    pub fn new(spec: DriverSpec, start: Vec2) -> Result<Self> {
        if !(spec.duration > 0.0 && spec.duration.is_finite()) {
            bail!(
                "easing duration must be a positive number of seconds, got {}",
                spec.duration
            );
        }
        Ok(Self {
            spec,
            elapsed: 0.0,
            active: true,
            in_reverse: false,
            x_sign: spec.x_direction.sign(),
            y_sign: spec.y_direction.sign(),
            start,
            reverse_start: start,
        })
    }

    /// Advance the driver by `dt` seconds and write the eased position
    /// into `pos`.
    ///
    /// No-op when inactive. Negative `dt` is clamped to zero. Each axis
    /// only ever writes its own component of `pos`.
    pub fn update(&mut self, dt: f64, pos: &mut Vec2) {
        if !self.active {
            return;
        }
        self.elapsed += dt.max(0.0);

        let s = &self.spec;
        if self.elapsed < s.duration {
            let base = if s.looping && s.return_in_reverse && self.in_reverse {
                self.reverse_start
            } else {
                self.start
            };
            pos.x = base.x
                + self.x_sign
                    * s.x_curve.sample(
                        self.elapsed,
                        s.initial_value,
                        s.change_in_value,
                        s.duration,
                        &s.tuning,
                    );
            pos.y = base.y
                + self.y_sign
                    * s.y_curve.sample(
                        self.elapsed,
                        s.initial_value,
                        s.change_in_value,
                        s.duration,
                        &s.tuning,
                    );
            return;
        }

        // Duration expired: loop or latch inactive.
        if s.looping {
            self.elapsed = 0.0;
            if s.return_in_reverse {
                self.in_reverse = !self.in_reverse;
                self.x_sign = -self.x_sign;
                self.y_sign = -self.y_sign;
                if self.in_reverse {
                    self.reverse_start = *pos;
                } else {
                    self.start = *pos;
                }
            }
        } else {
            self.active = false;
            self.elapsed = 0.0;
        }
    }

    /// Re-arm an inactive (or running) driver for a fresh sweep from
    /// `start`.
    pub fn restart(&mut self, start: Vec2) {
        self.elapsed = 0.0;
        self.active = true;
        self.in_reverse = false;
        self.x_sign = self.spec.x_direction.sign();
        self.y_sign = self.spec.y_direction.sign();
        self.start = start;
        self.reverse_start = start;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_in_reverse(&self) -> bool {
        self.in_reverse
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn spec(&self) -> &DriverSpec {
        &self.spec
    }
}
