//! Recorded draw steps
//!
//! A scene is not drawn directly. Generation appends placements to a
//! `StepRecorder`, and the animator replays a prefix of them each frame.

/// Longest glyph fragment a single step may carry, in bytes
pub const MAX_GLYPH_BYTES: usize = 63;

/// Default ceiling on recorded steps per scene
pub const DEFAULT_CAPACITY: usize = 30_000;

/// Semantic color category of a step; the surface picks the real color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorClass {
    Leaf,
    Wood,
    /// Pot body; the stock pot draws with `Text` and `Leaf`, so nothing emits it yet
    #[allow(dead_code)]
    Base,
    Text,
}

/// One glyph placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawStep {
    pub row: i32,
    pub col: i32,
    pub glyph: String,
    pub color: ColorClass,
    pub emphasis: bool,
}

/// Append-only, capacity-bounded list of draw steps.
///
/// Once `capacity` steps are held, `record` silently drops its input.
/// Indices handed out before that point stay valid.
#[derive(Debug)]
pub struct StepRecorder {
    steps: Vec<DrawStep>,
    capacity: usize,
    dropped: usize,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity.min(1024)),
            capacity,
            dropped: 0,
        }
    }

    /// Append one placement. Coordinates are stored as given, negative included.
    pub fn record(&mut self, row: i32, col: i32, glyph: &str, color: ColorClass, emphasis: bool) {
        if self.is_full() {
            self.dropped += 1;
            return;
        }

        self.steps.push(DrawStep {
            row,
            col,
            glyph: truncate_glyph(glyph).to_string(),
            color,
            emphasis,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.steps.len() >= self.capacity
    }

    /// Number of `record` calls ignored because the recorder was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[DrawStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<DrawStep> {
        self.steps
    }
}

impl Default for StepRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_glyph(glyph: &str) -> &str {
    if glyph.len() <= MAX_GLYPH_BYTES {
        return glyph;
    }
    let mut end = MAX_GLYPH_BYTES;
    while !glyph.is_char_boundary(end) {
        end -= 1;
    }
    &glyph[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut rec = StepRecorder::new();
        rec.record(3, 4, "/~", ColorClass::Wood, false);
        rec.record(2, 5, "&", ColorClass::Leaf, true);

        let steps = rec.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].glyph, "/~");
        assert_eq!((steps[1].row, steps[1].col), (2, 5));
        assert!(steps[1].emphasis);
    }

    #[test]
    fn keeps_negative_coordinates() {
        let mut rec = StepRecorder::new();
        rec.record(-2, -7, ":", ColorClass::Text, true);
        assert_eq!((rec.steps()[0].row, rec.steps()[0].col), (-2, -7));
    }

    #[test]
    fn drops_silently_once_full() {
        let mut rec = StepRecorder::with_capacity(2);
        for i in 0..5 {
            rec.record(i, i, "&", ColorClass::Leaf, true);
        }
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.dropped(), 3);
        assert_eq!(rec.steps()[1].row, 1);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut rec = StepRecorder::with_capacity(0);
        rec.record(0, 0, "&", ColorClass::Leaf, true);
        assert!(rec.is_empty());
        assert!(rec.is_full());
    }

    #[test]
    fn long_glyphs_are_truncated_on_char_boundary() {
        let mut rec = StepRecorder::new();
        let long = "é".repeat(40); // 80 bytes
        rec.record(0, 0, &long, ColorClass::Text, false);
        let glyph = &rec.steps()[0].glyph;
        assert!(glyph.len() <= MAX_GLYPH_BYTES);
        assert_eq!(glyph.chars().count(), 31);
    }
}
