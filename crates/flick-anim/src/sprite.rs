use flick_core::geom::{Rect, Vec2};
use flick_ease::EasingDriver;

use crate::cycler::FrameCycler;

/// A positioned, animated sprite.
///
/// Composes a position, a [`FrameCycler`], and an optional
/// [`EasingDriver`] behind one [`update`](Self::update) call. The
/// pieces share no state beyond the position the driver writes; each
/// can also be driven directly through the accessors.
#[derive(Debug, Clone)]
pub struct Sprite {
    position: Vec2,
    cycler: FrameCycler,
    easing: Option<EasingDriver>,
}

impl Sprite {
    pub fn new(position: Vec2, cycler: FrameCycler) -> Self {
        Self {
            position,
            cycler,
            easing: None,
        }
    }

    /// Attach an easing driver that will move this sprite's position.
    pub fn with_easing(mut self, driver: EasingDriver) -> Self {
        self.easing = Some(driver);
        self
    }

    /// Advance motion and animation by `dt` seconds. Returns the
    /// current source rectangle.
    pub fn update(&mut self, dt: f64) -> Rect {
        if let Some(driver) = &mut self.easing {
            driver.update(dt, &mut self.position);
        }
        self.cycler.advance(dt)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn cycler(&self) -> &FrameCycler {
        &self.cycler
    }

    pub fn cycler_mut(&mut self) -> &mut FrameCycler {
        &mut self.cycler
    }

    pub fn easing(&self) -> Option<&EasingDriver> {
        self.easing.as_ref()
    }

    pub fn easing_mut(&mut self) -> Option<&mut EasingDriver> {
        self.easing.as_mut()
    }
}
