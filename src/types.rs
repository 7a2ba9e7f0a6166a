// Core pixel types shared by every stage of the loop.

/// One 2D grid of `0x00RRGGBB` pixels. Both the transient camera frame
/// (replaced every cycle) and scratch buffers use this shape.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // pixels per row
    pub height: usize,     // rows
    pub pixels: Vec<u32>,  // length = width * height, each entry 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black buffer of the given size.
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A pixel position on the frame/canvas. Signed so partially off-screen
/// fingertip estimates stay representable; drawing clips at the edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
