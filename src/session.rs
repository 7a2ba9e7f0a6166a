// Session: the one owner of all drawing state (canvas, stroke tracker, style).
// main.rs holds a single Session and mutates it through these methods; nothing
// else touches the canvas or the tracker.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::stroke::{StrokeStyle, StrokeTracker};
use crate::types::Point;
use std::path::Path;

pub struct Session {
    canvas: Canvas,
    tracker: StrokeTracker,
    style: StrokeStyle,
}

impl Session {
    /// Set up drawing state at the first frame's dimensions.
    pub fn new(width: usize, height: usize, style: StrokeStyle) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            tracker: StrokeTracker::new(),
            style,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Feed one frame's fingertip observation (or `None` when no hand was seen).
    /// Visual: a stroke segment appears on the canvas only when this frame *and*
    /// the previous one both saw the fingertip.
    pub fn observe(&mut self, fingertip: Option<Point>) {
        if let Some((from, to)) = self.tracker.advance(fingertip) {
            self.canvas.draw_segment(from, to, self.style);
        }
    }

    /// Wipe the canvas; the in-flight stroke keeps going from its last point.
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Save the canvas as an image file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.canvas.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: StrokeStyle = StrokeStyle { color: 0x000000FF, thickness: 3 };

    fn session() -> Session {
        Session::new(64, 48, STYLE)
    }

    fn painted(s: &Session) -> usize {
        s.canvas().buffer().pixels.iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn first_detection_never_draws() {
        let mut s = session();
        s.observe(Some(Point::new(30, 20)));
        assert_eq!(painted(&s), 0);
    }

    #[test]
    fn two_consecutive_detections_draw_a_segment() {
        let mut s = session();
        s.observe(Some(Point::new(10, 24)));
        s.observe(Some(Point::new(50, 24)));
        // The midpoint of the segment carries the stroke color.
        assert_eq!(s.canvas().buffer().pixels[24 * 64 + 30], STYLE.color);
        assert!(painted(&s) > 0);
    }

    #[test]
    fn gap_prevents_a_segment_across_it() {
        let mut s = session();
        s.observe(Some(Point::new(5, 5)));
        s.observe(None); // hand lost
        s.observe(Some(Point::new(60, 40)));
        // Two isolated arm-only observations: nothing drawn anywhere.
        assert_eq!(painted(&s), 0);
    }

    #[test]
    fn clear_does_not_end_the_stroke() {
        let mut s = session();
        s.observe(Some(Point::new(10, 10)));
        s.observe(Some(Point::new(20, 10)));
        s.clear();
        assert_eq!(painted(&s), 0);
        // Still mid-stroke: the next point connects to (20,10).
        s.observe(Some(Point::new(30, 10)));
        assert!(painted(&s) > 0);
    }
}
