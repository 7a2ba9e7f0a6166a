// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String),   // Opening/starting the camera failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
    Blend(String),        // Compositing buffers of mismatched size
    DetectorInit(String), // Loading the hand-landmark model failed
    DetectorRun(String),  // Running inference on a frame failed
    SaveImage(String),    // Writing the canvas PNG failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::Blend(s) => write!(f, "Blend error: {s}"),
            Error::DetectorInit(s) => write!(f, "Detector init error: {s}"),
            Error::DetectorRun(s) => write!(f, "Detector inference error: {s}"),
            Error::SaveImage(s) => write!(f, "Save image error: {s}"),
        }
    }
}

// We don't implement std::error::Error for now to keep things minimal.
// It's easy to add later when we wire in more components.
