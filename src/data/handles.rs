use super::model::Span;

// ---------------------------------------------------------------------------
// Two-handle range slider model
// ---------------------------------------------------------------------------

/// Position state of a slider with a low and a high handle.
///
/// Handles are unordered: either may pass the other, and [`DualHandle::span`]
/// reports them sorted. Positions snap to `1 / steps_per_unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct DualHandle {
    handles: [f64; 2],
    limits: Span<f64>,
    steps_per_unit: f64,
}

impl DualHandle {
    /// Handles start at the two ends of `limits`.
    pub fn new(limits: Span<f64>, steps_per_unit: f64) -> Self {
        DualHandle {
            handles: [limits.min, limits.max],
            limits,
            steps_per_unit,
        }
    }

    /// Whole-number steps, as used by the year slider.
    pub fn whole(limits: Span<i32>) -> Self {
        Self::new(Span::new(limits.min as f64, limits.max as f64), 1.0)
    }

    /// Tenth-of-a-unit steps, as used by the engine-size slider.
    pub fn tenths(limits: Span<f64>) -> Self {
        Self::new(limits, 10.0)
    }

    pub fn limits(&self) -> Span<f64> {
        self.limits
    }

    pub fn handles(&self) -> [f64; 2] {
        self.handles
    }

    /// Round to the nearest increment, then clamp to the track.
    pub fn snap(&self, value: f64) -> f64 {
        let snapped = (value * self.steps_per_unit).round() / self.steps_per_unit;
        self.limits.clamp_value(snapped)
    }

    /// Move the handle closest to `position` there. When both handles are
    /// equally close the first one moves. Returns the index of the moved
    /// handle, or `None` for a NaN position.
    pub fn drag_to(&mut self, position: f64) -> Option<usize> {
        if position.is_nan() {
            return None;
        }
        let target = self.snap(position);
        let [a, b] = self.handles;
        let idx = if (target - a).abs() <= (target - b).abs() {
            0
        } else {
            1
        };
        self.handles[idx] = target;
        Some(idx)
    }

    /// The selected range, lowest handle first.
    pub fn span(&self) -> Span<f64> {
        Span::new(self.handles[0], self.handles[1])
    }

    /// The selected range rounded to whole numbers.
    pub fn whole_span(&self) -> Span<i32> {
        let s = self.span();
        Span::new(s.min.round() as i32, s.max.round() as i32)
    }

    /// Reposition both handles from an externally set range (e.g. after a
    /// filter reset), keeping the low handle first.
    pub fn sync(&mut self, span: Span<f64>) {
        let span = span.clamped_to(&self.limits);
        self.handles = [span.min, span.max];
    }
}
