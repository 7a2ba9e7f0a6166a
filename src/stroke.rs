// Stroke tracking: turns a per-frame "fingertip seen here / not seen" signal
// into connected line segments.
// Visual: while your finger stays in view, consecutive positions get joined into
// one continuous stroke; the moment the hand drops out, the stroke ends and the
// next detection starts a fresh one (no long jump across the gap).

use crate::types::Point;

/// Fixed look of every stroke, immutable for the whole run.
#[derive(Clone, Copy)]
pub struct StrokeStyle {
    pub color: u32,      // 0x00RRGGBB
    pub thickness: i32,  // stroke width in pixels
}

/// Remembers where the fingertip was on the previous frame.
///
/// `None` means "no previous point" — at startup and after every frame without a
/// detection. An `Option` instead of a (0,0) sentinel keeps a real fingertip at
/// pixel (0,0) drawable.
#[derive(Default)]
pub struct StrokeTracker {
    last: Option<Point>,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Feed one frame's fingertip observation.
    ///
    /// Returns the segment to paint this frame, if any:
    /// - first point after start or a gap arms the tracker, draws nothing;
    /// - a point with a predecessor yields `(previous, current)`;
    /// - `None` (no hand this frame) ends the stroke and yields nothing.
    pub fn advance(&mut self, fingertip: Option<Point>) -> Option<(Point, Point)> {
        match (self.last, fingertip) {
            (Some(prev), Some(cur)) => {
                self.last = Some(cur);
                Some((prev, cur))
            }
            (None, Some(cur)) => {
                self.last = Some(cur);
                None
            }
            (_, None) => {
                self.last = None;
                None
            }
        }
    }

    /// The point the next segment would start from (if any).
    pub fn last_point(&self) -> Option<Point> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn starts_with_no_previous_point() {
        let tracker = StrokeTracker::new();
        assert_eq!(tracker.last_point(), None);
    }

    #[test]
    fn first_detection_arms_without_drawing() {
        let mut tracker = StrokeTracker::new();
        assert_eq!(tracker.advance(Some(p(120, 80))), None);
        assert_eq!(tracker.last_point(), Some(p(120, 80)));
    }

    #[test]
    fn consecutive_detections_yield_a_segment() {
        let mut tracker = StrokeTracker::new();
        tracker.advance(Some(p(10, 10)));
        assert_eq!(tracker.advance(Some(p(30, 25))), Some((p(10, 10), p(30, 25))));
        assert_eq!(tracker.last_point(), Some(p(30, 25)));
    }

    #[test]
    fn detection_gap_breaks_the_stroke() {
        let mut tracker = StrokeTracker::new();
        tracker.advance(Some(p(10, 10)));
        tracker.advance(Some(p(20, 20)));
        // Hand leaves the frame: stroke ends.
        assert_eq!(tracker.advance(None), None);
        assert_eq!(tracker.last_point(), None);
        // Next detection must not connect to any pre-gap point.
        assert_eq!(tracker.advance(Some(p(300, 5))), None);
        assert_eq!(tracker.advance(Some(p(310, 9))), Some((p(300, 5), p(310, 9))));
    }

    #[test]
    fn origin_is_a_legitimate_fingertip_position() {
        // The old (0,0)-as-sentinel scheme could not draw from the corner pixel.
        let mut tracker = StrokeTracker::new();
        tracker.advance(Some(p(0, 0)));
        assert_eq!(tracker.advance(Some(p(4, 4))), Some((p(0, 0), p(4, 4))));
    }
}
