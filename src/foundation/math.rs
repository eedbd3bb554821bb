/// Clamp `x` into `[0, 1]`. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// A progress window `[start, end)` over which a layer ramps from 0 to 1.
///
/// Below `start` the value is 0, inside the window it grows linearly, at or past `end` it holds
/// at 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealWindow {
    /// Progress at which the ramp begins.
    pub start: f64,
    /// Progress at which the ramp reaches 1.
    pub end: f64,
}

impl RevealWindow {
    /// Window starting at `start` and reaching full opacity at `end`.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Opacity for `progress`. Input is clamped to `[0, 1]` first; NaN counts as 0.
    pub fn alpha(self, progress: f64) -> f64 {
        let progress = clamp01(progress);
        if progress < self.start {
            return 0.0;
        }
        if progress >= self.end || self.end <= self.start {
            return 1.0;
        }
        (progress - self.start) / (self.end - self.start)
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
