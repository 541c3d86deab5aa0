//! Frame cycling for sprite-sheet animation.
//!
//! [`FrameCycler`] advances a discrete frame index over time according
//! to a loop style and repeat policy, producing a source rectangle
//! into a sprite sheet. [`Sprite`] composes a position, a cycler, and
//! an optional easing driver behind a single `update(dt)` call.
//!
//! # Quick start
//!
//! ```
//! use flick_anim::{FrameCycler, LoopStyle, Repeat};
//!
//! let mut cycler =
//!     FrameCycler::new(0, 0, 32, 32, 4, 0.1, LoopStyle::Forward, Repeat::Infinite).unwrap();
//! let rect = cycler.advance(0.1);
//! assert_eq!(rect.x, 32);
//! ```

mod cycler;
mod sprite;

pub use cycler::{FrameCycler, LoopStyle, Repeat};
pub use sprite::Sprite;
