use anyhow::{bail, Result};
use flick_core::geom::Rect;

/// Direction pattern in which frame indices advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStyle {
    /// 0, 1, …, N-1, 0, 1, …
    Forward,
    /// N-1, …, 1, 0, N-1, …
    Reverse,
    /// 0, 1, …, N-1, N-2, …, 1, 0, 1, … — boundary frames are visited
    /// once per sweep, never duplicated.
    Alternating,
}

/// How many passes the cycle runs before freezing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Wrap forever.
    Infinite,
    /// One pass, then hold the last frame reached in its direction.
    Once,
    /// `n` completed passes, then hold.
    Count(u32),
}

impl Repeat {
    /// Decode the pack-manifest integer encoding: `-1` infinite, `0`
    /// once, `n > 0` a finite count.
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            -1 => Ok(Repeat::Infinite),
            0 => Ok(Repeat::Once),
            n if n > 0 && n <= u32::MAX as i64 => Ok(Repeat::Count(n as u32)),
            other => bail!("repeat must be -1, 0, or a positive count, got {other}"),
        }
    }

    /// Completed passes after which the cycle freezes, or `None` for
    /// infinite.
    fn limit(&self) -> Option<u32> {
        match self {
            Repeat::Infinite => None,
            Repeat::Once => Some(0),
            Repeat::Count(n) => Some(*n),
        }
    }
}

/// Internal sweep state. Alternating is split into its two directions
/// so the transition function is total over named states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Forward,
    Reverse,
    AlternatingForward,
    AlternatingReverse,
}

impl Phase {
    fn initial(style: LoopStyle) -> Self {
        match style {
            LoopStyle::Forward => Phase::Forward,
            LoopStyle::Reverse => Phase::Reverse,
            LoopStyle::Alternating => Phase::AlternatingForward,
        }
    }

    fn initial_index(style: LoopStyle, last: usize) -> usize {
        match style {
            LoopStyle::Reverse => last,
            _ => 0,
        }
    }
}

/// One frame-index transition. Pure: takes the current phase and index
/// plus the last valid index, returns the next phase and index and
/// whether this step completed a pass (`wrapped`).
///
/// Alternating counts a pass on the reverse-to-forward flip, so a full
/// forward+backward traversal is one pass.
fn step(phase: Phase, index: usize, last: usize) -> (Phase, usize, bool) {
    match phase {
        Phase::Forward => {
            if index >= last {
                (Phase::Forward, 0, true)
            } else {
                (Phase::Forward, index + 1, false)
            }
        }
        Phase::Reverse => {
            if index == 0 {
                (Phase::Reverse, last, true)
            } else {
                (Phase::Reverse, index - 1, false)
            }
        }
        Phase::AlternatingForward => {
            if last == 0 {
                (Phase::AlternatingForward, 0, true)
            } else if index >= last {
                (Phase::AlternatingReverse, last - 1, false)
            } else {
                (Phase::AlternatingForward, index + 1, false)
            }
        }
        Phase::AlternatingReverse => {
            if index == 0 {
                (Phase::AlternatingForward, if last == 0 { 0 } else { 1 }, true)
            } else {
                (Phase::AlternatingReverse, index - 1, false)
            }
        }
    }
}

/// Advances a frame index over time and maps it to a source rectangle
/// into a sprite sheet.
///
/// The cycler is driven once per rendered frame with elapsed seconds;
/// `frame_seconds` throttles how often the index actually moves, which
/// decouples animation rate from render rate. Loop style and repeat
/// policy can be changed at runtime; doing so clears the pass counter
/// so a stale count cannot terminate the new cycle early.
#[derive(Debug, Clone)]
pub struct FrameCycler {
    origin_x: i32,
    origin_y: i32,
    frame_width: u32,
    frame_height: u32,
    frames: usize,
    frame_seconds: f64,
    elapsed: f64,
    index: usize,
    phase: Phase,
    style: LoopStyle,
    repeat: Repeat,
    passes: u32,
    frozen: bool,
}

impl FrameCycler {
    /// Create a cycler over `frames` sub-rectangles of
    /// `frame_width`×`frame_height` pixels laid out in a row starting
    /// at `(origin_x, origin_y)` in the sheet.
    ///
    /// Rejects zero frames, zero frame dimensions, and a non-positive
    /// `frame_seconds`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin_x: i32,
        origin_y: i32,
        frame_width: u32,
        frame_height: u32,
        frames: usize,
        frame_seconds: f64,
        style: LoopStyle,
        repeat: Repeat,
    ) -> Result<Self> {
        if frames == 0 {
            bail!("frame cycle must contain at least one frame");
        }
        if frame_width == 0 || frame_height == 0 {
            bail!("frame dimensions must be non-zero, got {frame_width}x{frame_height}");
        }
        if !(frame_seconds > 0.0 && frame_seconds.is_finite()) {
            bail!("frame_seconds must be a positive number, got {frame_seconds}");
        }
        Ok(Self {
            origin_x,
            origin_y,
            frame_width,
            frame_height,
            frames,
            frame_seconds,
            elapsed: 0.0,
            index: Phase::initial_index(style, frames - 1),
            phase: Phase::initial(style),
            style,
            repeat,
            passes: 0,
            frozen: false,
        })
    }

    /// Advance the cycle by `dt` seconds and return the current source
    /// rectangle.
    ///
    /// The index moves at most one step per call, and only once
    /// `frame_seconds` has accumulated. Negative `dt` is clamped to
    /// zero.
    pub fn advance(&mut self, dt: f64) -> Rect {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.frame_seconds {
            return self.source_rect();
        }
        self.elapsed = 0.0;

        if self.frozen {
            return self.source_rect();
        }

        let (next_phase, next_index, wrapped) = step(self.phase, self.index, self.frames - 1);

        match self.repeat.limit() {
            None => {
                // Infinite: the counter is cleared every advance so a
                // later switch to a finite policy starts from zero.
                self.passes = 0;
                self.phase = next_phase;
                self.index = next_index;
            }
            Some(limit) => {
                if wrapped {
                    self.passes += 1;
                    if self.passes >= limit {
                        // Hold at the wrap boundary instead of taking
                        // the wrapping transition.
                        self.frozen = true;
                        return self.source_rect();
                    }
                }
                self.phase = next_phase;
                self.index = next_index;
            }
        }

        self.source_rect()
    }

    /// The source rectangle for the current frame.
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            self.origin_x + self.index as i32 * self.frame_width as i32,
            self.origin_y,
            self.frame_width,
            self.frame_height,
        )
    }

    /// Switch the loop style. Clears the pass counter and unfreezes.
    pub fn set_style(&mut self, style: LoopStyle) {
        if self.style == style {
            return;
        }
        self.style = style;
        self.phase = Phase::initial(style);
        self.index = Phase::initial_index(style, self.frames - 1);
        self.passes = 0;
        self.frozen = false;
    }

    /// Switch the repeat policy. Clears the pass counter and unfreezes.
    pub fn set_repeat(&mut self, repeat: Repeat) {
        if self.repeat == repeat {
            return;
        }
        self.repeat = repeat;
        self.passes = 0;
        self.frozen = false;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn style(&self) -> LoopStyle {
        self.style
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Completed passes under a finite repeat policy.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// True once a finite repeat policy has exhausted its passes.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
