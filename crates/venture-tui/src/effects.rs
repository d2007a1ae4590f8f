//! Visual transitions, powered by tachyonfx.
//!
//! The terminal analog of the mockup's slide/fade animations: switching
//! sections sweeps the new content in, and an opening accordion body
//! fades up from black. Effects are cosmetic only; rendering is complete
//! without them.

use std::time::Duration;

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use tachyonfx::{fx, Effect, EffectManager as TachyonManager, Interpolation, Motion};

/// Fade-in for a newly opened accordion body.
pub fn fade_in() -> Effect {
    let dark = Color::Black;
    fx::fade_from(dark, dark, (300, Interpolation::QuadOut))
}

/// Sweep for a section switch, entering from the right like a pushed
/// phone screen.
pub fn sweep_in() -> Effect {
    fx::sweep_in(
        Motion::RightToLeft,
        10, // gradient_length
        3,  // randomness
        Color::Black,
        (250, Interpolation::QuadOut),
    )
}

/// Holds the active effects and paints them over the frame buffer once
/// per draw.
pub struct EffectManager {
    inner: TachyonManager<String>,
}

impl EffectManager {
    pub fn new() -> Self {
        Self {
            inner: TachyonManager::default(),
        }
    }

    /// A named effect replaces any previous effect with the same key, so
    /// rapid section switches never stack sweeps.
    pub fn section_swept(&mut self) {
        self.inner
            .add_unique_effect("section-sweep".to_string(), sweep_in());
    }

    pub fn accordion_opened(&mut self) {
        self.inner
            .add_unique_effect("accordion-fade".to_string(), fade_in());
    }

    /// Advance all active effects by `delta` and paint them into `buf`.
    /// Call after widgets have rendered so effects layer on top.
    pub fn tick_and_render(&mut self, delta: Duration, buf: &mut Buffer, area: Rect) {
        self.inner.process_effects(delta.into(), buf, area);
    }
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new()
    }
}
