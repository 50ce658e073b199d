/// Linear 0→1 ramp over a fixed duration, anchored to the first timestamp it
/// sees. Timestamps are milliseconds from any monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    duration_ms: f64,
    start_ms: Option<f64>,
}

impl Fade {
    /// Negative or non-finite durations complete immediately.
    pub fn from_secs(secs: f64) -> Self {
        let duration_ms = if secs.is_finite() && secs > 0.0 {
            secs * 1000.0
        } else {
            0.0
        };
        Self {
            duration_ms,
            start_ms: None,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn progress(&mut self, now_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        match self.start_ms {
            Some(start) => self.duration_ms <= 0.0 || now_ms - start >= self.duration_ms,
            None => self.duration_ms <= 0.0,
        }
    }
}

/// One element faded out when the viewer is entered.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeOutItem {
    pub element_id: &'static str,
    pub duration_secs: f64,
}

impl FadeOutItem {
    /// CSS `transition` value for this item.
    pub fn transition_css(&self) -> String {
        format!("opacity {}s ease-in-out", self.duration_secs)
    }

    /// When to disable pointer events, in whole milliseconds.
    pub fn settle_delay_ms(&self) -> i32 {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            (self.duration_secs * 1000.0).round() as i32
        } else {
            0
        }
    }
}
