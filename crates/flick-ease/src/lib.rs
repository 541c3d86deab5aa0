//! Easing curves and the tick-driven easing driver.
//!
//! [`curves`] is a pure function library: the canonical Penner easing
//! formulas in `(t, b, c, d)` form, eleven families with four modes
//! each, selected by enum dispatch. [`driver`] wraps them in a small
//! state machine that animates a [`flick_core::geom::Vec2`] position
//! once per external tick.
//!
//! # Quick start
//!
//! ```
//! use flick_core::geom::Vec2;
//! use flick_ease::{Curve, DriverSpec, EasingDriver, Family, Mode};
//!
//! let spec = DriverSpec {
//!     x_curve: Curve::new(Family::Quad, Mode::Out),
//!     ..DriverSpec::horizontal(100.0, 2.0)
//! };
//! let mut pos = Vec2::ZERO;
//! let mut driver = EasingDriver::new(spec, pos).unwrap();
//! driver.update(1.0, &mut pos);
//! assert_eq!(pos.x, 75.0);
//! ```

pub mod curves;
pub mod driver;

pub use curves::{Curve, Family, Mode, Tuning};
pub use driver::{AxisDirection, DriverSpec, EasingDriver};
