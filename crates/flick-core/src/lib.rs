//! Shared infrastructure for the flick animation toolkit.
//!
//! This crate provides the pieces every other flick crate leans on:
//! geometry primitives ([`geom::Vec2`], [`geom::Rect`]), delta-time
//! derivation and tick-rate measurement ([`clock`]), and the logging
//! subsystem ([`logging`]).

pub mod clock;
pub mod geom;
pub mod logging;
