// Hand-landmark detection via ONNX Runtime.
// The heavy lifting is the external model (a MediaPipe-compatible hand-landmark
// network from the PINTO model zoo); this module only feeds it a resized frame
// and reads back 21 normalized landmarks, a hand-presence score and handedness.
// Visual: none by itself — main.rs turns landmark 8 (index fingertip) into the
// brush position, and `draw_skeleton` paints the detected hand over the video.

use crate::draw;
use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use ndarray::Array4;
use std::path::PathBuf;

/// Landmarks per hand in the MediaPipe topology.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark index of the tip of the index finger (the brush).
pub const INDEX_FINGER_TIP: usize = 8;

/// Side length of the square model input.
const INPUT_SIZE: usize = 224;

/// Model file looked up under `models/`.
const MODEL_FILE: &str = "hand_landmark.onnx";

/// Bone connections of the 21-landmark hand topology, used for the skeleton
/// overlay: thumb, index, middle, ring, pinky chains plus the palm edges.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),           // thumb
    (0, 5), (5, 6), (6, 7), (7, 8),           // index finger
    (5, 9), (9, 10), (10, 11), (11, 12),      // middle finger
    (9, 13), (13, 14), (14, 15), (15, 16),    // ring finger
    (13, 17), (17, 18), (18, 19), (19, 20),   // pinky
    (0, 17),                                  // palm base
];

/// One landmark, coordinates normalized to [0,1] relative to the frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One detected hand.
#[derive(Clone)]
pub struct Hand {
    pub landmarks: [HandLandmark; LANDMARK_COUNT],
    pub confidence: f32,
    pub is_right: bool,
}

impl Hand {
    /// Scale a normalized landmark into pixel coordinates on the given frame.
    pub fn landmark_pixel(&self, index: usize, width: usize, height: usize) -> Point {
        let lm = self.landmarks[index];
        Point::new((lm.x * width as f32) as i32, (lm.y * height as f32) as i32)
    }

    /// Pixel position of the index fingertip (the brush).
    pub fn fingertip_pixel(&self, width: usize, height: usize) -> Point {
        self.landmark_pixel(INDEX_FINGER_TIP, width, height)
    }
}

/// Wraps one ORT session over the hand-landmark model.
/// Configured once: at most `max_hands` results, detections under
/// `min_confidence` dropped.
pub struct HandLandmarker {
    session: ort::session::Session,
    max_hands: usize,
    min_confidence: f32,
}

impl HandLandmarker {
    /// Initialize ONNX Runtime and load the model from a `models/` directory
    /// (next to the executable, or under the working directory).
    pub fn new(max_hands: usize, min_confidence: f32) -> Result<Self, Error> {
        let model_path = find_model()?;
        log::info!("Loading hand-landmark model from {:?}", model_path);

        ort::init()
            .with_name("AirCanvas")
            .commit()
            .map_err(|e| Error::DetectorInit(format!("Initialize ORT: {e}")))?;

        let session = ort::session::Session::builder()
            .map_err(|e| Error::DetectorInit(format!("Session builder: {e}")))?
            .with_intra_threads(2)
            .map_err(|e| Error::DetectorInit(format!("Set threads: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::DetectorInit(format!("Load model: {e}")))?;

        Ok(Self { session, max_hands, min_confidence })
    }

    /// Run the model on one frame. Returns zero hands (nothing confident enough)
    /// or up to `max_hands` hands with normalized landmarks.
    pub fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<Hand>, Error> {
        // 1) Resize + unpack the 0x00RRGGBB frame into NHWC float RGB in [0,1].
        let input = preprocess_nhwc(frame, INPUT_SIZE);
        let input_array = Array4::from_shape_vec((1, INPUT_SIZE, INPUT_SIZE, 3), input)
            .map_err(|e| Error::DetectorRun(format!("Shape input: {e}")))?;
        let input_tensor = ort::value::Tensor::from_array(input_array)
            .map_err(|e| Error::DetectorRun(format!("Create tensor: {e}")))?;

        // 2) Inference.
        let outputs = self
            .session
            .run(ort::inputs![input_tensor])
            .map_err(|e| Error::DetectorRun(format!("Inference: {e}")))?;

        // 3) Pull every float tensor out. Exports of this model disagree on
        //    output order, so we match by element count instead: 63 floats are
        //    the landmarks, single floats are presence score then handedness.
        let mut raw_landmarks: Option<Vec<f32>> = None;
        let mut scalars: Vec<f32> = Vec::new();
        for (_name, value) in outputs.iter() {
            if let Ok((_shape, data)) = value.try_extract_tensor::<f32>() {
                if data.len() == LANDMARK_COUNT * 3 {
                    raw_landmarks = Some(data.to_vec());
                } else if data.len() == 1 {
                    scalars.push(data[0]);
                }
            }
        }
        let raw = raw_landmarks
            .ok_or_else(|| Error::DetectorRun("Model produced no landmark tensor".into()))?;
        let score = scalars.first().copied().unwrap_or(0.0);
        let handedness = scalars.get(1).copied().unwrap_or(0.0);

        // 4) Gate on confidence and normalize.
        let mut hands = Vec::new();
        if let Some(hand) = hand_from_raw(&raw, score, handedness, self.min_confidence) {
            log::trace!("Hand detected (confidence {:.2})", hand.confidence);
            hands.push(hand);
        }
        hands.truncate(self.max_hands);
        Ok(hands)
    }
}

/// Build a `Hand` from the model's raw outputs, or `None` when the presence
/// score is below the confidence floor. Raw landmark coordinates come back in
/// model-input pixels (0..224); we normalize to [0,1].
fn hand_from_raw(raw: &[f32], score: f32, handedness: f32, min_confidence: f32) -> Option<Hand> {
    if score < min_confidence || raw.len() < LANDMARK_COUNT * 3 {
        return None;
    }
    let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
    for (i, lm) in landmarks.iter_mut().enumerate() {
        lm.x = raw[i * 3] / INPUT_SIZE as f32;
        lm.y = raw[i * 3 + 1] / INPUT_SIZE as f32;
        lm.z = raw[i * 3 + 2] / INPUT_SIZE as f32;
    }
    Some(Hand { landmarks, confidence: score, is_right: handedness >= 0.5 })
}

/// Nearest-neighbor resize + unpack to HWC float RGB in [0,1].
fn preprocess_nhwc(frame: &FrameBuffer, target: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; target * target * 3];

    let x_ratio = frame.width as f32 / target as f32;
    let y_ratio = frame.height as f32 / target as f32;

    for y in 0..target {
        for x in 0..target {
            let src_x = ((x as f32 * x_ratio) as usize).min(frame.width - 1);
            let src_y = ((y as f32 * y_ratio) as usize).min(frame.height - 1);
            let px = frame.pixels[src_y * frame.width + src_x];

            let out_idx = (y * target + x) * 3;
            output[out_idx] = ((px >> 16) & 0xFF) as f32 / 255.0;     // R
            output[out_idx + 1] = ((px >> 8) & 0xFF) as f32 / 255.0;  // G
            output[out_idx + 2] = (px & 0xFF) as f32 / 255.0;         // B
        }
    }

    output
}

/// Locate `models/hand_landmark.onnx`: next to the executable first (including
/// the cargo target-dir layouts), then under the working directory.
fn find_model() -> Result<PathBuf, Error> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        let mut dir = exe.parent().map(PathBuf::from);
        // Walk up a few levels so `cargo run` from target/debug still finds it.
        for _ in 0..3 {
            if let Some(d) = dir {
                roots.push(d.clone());
                dir = d.parent().map(PathBuf::from);
            } else {
                break;
            }
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    for root in roots {
        let candidate = root.join("models").join(MODEL_FILE);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(Error::DetectorInit(format!(
        "{MODEL_FILE} not found. Place it in a 'models' directory next to the \
         executable or the working directory."
    )))
}

/// Draw the detected hand's skeleton over the display frame.
/// Visual: thin lines along every bone plus a small dot on each joint, on the
/// live video only — the canvas never sees these.
pub fn draw_skeleton(fb: &mut FrameBuffer, hand: &Hand) {
    const BONE_COLOR: u32 = 0x0000CC66;
    const JOINT_COLOR: u32 = 0x00FFFFFF;

    for &(a, b) in &HAND_CONNECTIONS {
        let pa = hand.landmark_pixel(a, fb.width, fb.height);
        let pb = hand.landmark_pixel(b, fb.width, fb.height);
        draw::draw_line(fb, pa.x, pa.y, pb.x, pb.y, BONE_COLOR);
    }
    for i in 0..LANDMARK_COUNT {
        let p = hand.landmark_pixel(i, fb.width, fb.height);
        draw::fill_disc(fb, p.x, p.y, 2, JOINT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_hand_at(x: f32, y: f32) -> Vec<f32> {
        // Every landmark at the same model-input position; good enough for
        // scaling checks.
        let mut raw = Vec::with_capacity(LANDMARK_COUNT * 3);
        for _ in 0..LANDMARK_COUNT {
            raw.extend_from_slice(&[x, y, 0.0]);
        }
        raw
    }

    #[test]
    fn low_presence_score_yields_no_hand() {
        let raw = raw_hand_at(112.0, 112.0);
        assert!(hand_from_raw(&raw, 0.4, 0.0, 0.7).is_none());
        let hand = hand_from_raw(&raw, 0.9, 0.0, 0.7).unwrap();
        // The presence score travels with the hand.
        assert!((hand.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn landmarks_are_normalized_from_model_input_pixels() {
        let raw = raw_hand_at(56.0, 168.0);
        let hand = hand_from_raw(&raw, 1.0, 0.0, 0.7).unwrap();
        let lm = hand.landmarks[INDEX_FINGER_TIP];
        assert!((lm.x - 0.25).abs() < 1e-6);
        assert!((lm.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn fingertip_scales_to_frame_pixels() {
        let raw = raw_hand_at(112.0, 56.0); // normalized (0.5, 0.25)
        let hand = hand_from_raw(&raw, 1.0, 1.0, 0.7).unwrap();
        assert_eq!(hand.fingertip_pixel(640, 480), Point::new(320, 120));
        assert!(hand.is_right);
    }

    #[test]
    fn truncated_output_is_rejected() {
        assert!(hand_from_raw(&[0.0; 10], 1.0, 0.0, 0.7).is_none());
    }

    #[test]
    fn preprocess_produces_unit_range_rgb() {
        let mut fb = FrameBuffer::zeroed(4, 4);
        fb.pixels.fill(0x00FF0080); // R=255 G=0 B=128
        let data = preprocess_nhwc(&fb, 8);
        assert_eq!(data.len(), 8 * 8 * 3);
        assert!((data[0] - 1.0).abs() < 1e-6);
        assert_eq!(data[1], 0.0);
        assert!((data[2] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn connection_table_stays_inside_the_topology() {
        for &(a, b) in &HAND_CONNECTIONS {
            assert!(a < LANDMARK_COUNT && b < LANDMARK_COUNT);
        }
    }
}
