// Air Canvas — draw in the air with your index finger.
// What you SEE:
// • Live (mirrored) camera is always the base image, at half brightness.
// • Hold your hand up: a red dot marks your index fingertip and a green
//   skeleton overlays the hand; moving the fingertip paints a red stroke.
// • Drop the hand out of view to lift the brush; raise it again to start
//   a fresh stroke anywhere.
// • C clears the drawing. S saves it as a PNG. ESC (or closing the window) quits.

mod camera;
mod canvas;
mod draw;
mod error;
mod hand;
mod session;
mod stroke;
mod types;
mod vision;

use camera::CameraCapture;
use draw::Drawer;
use error::Error;
use hand::HandLandmarker;
use session::Session;
use stroke::StrokeStyle;
use std::time::{Duration, Instant};
use types::FrameBuffer;

const CAMERA_INDEX: u32 = 0;

// Fixed draw style for the whole run.
const DRAW_COLOR: u32 = 0x00FF0000; // red
const BRUSH_THICKNESS: i32 = 5;
const MARKER_RADIUS: i32 = 8;

// Detector configuration: one hand, confident detections only.
const MAX_HANDS: usize = 1;
const MIN_DETECTION_CONFIDENCE: f32 = 0.7;

const SAVE_PATH: &str = "air_canvas_output.png";

fn main() -> Result<(), Error> {
    // Info by default so the clear/save/exit notices reach the console;
    // RUST_LOG still overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Camera + detector setup ---
       Either failing here ends the program before a window ever opens. */
    let mut cam = CameraCapture::new(CAMERA_INDEX, 640, 480)?;
    let (cam_w, cam_h) = cam.resolution();
    log::info!("Camera streaming at {cam_w}x{cam_h}");
    let mut detector = HandLandmarker::new(MAX_HANDS, MIN_DETECTION_CONFIDENCE)?;

    /* --- First frame fixes every dimension for the session ---
       Window, canvas and composite all take this frame's size and keep it. */
    let mut frame = cam.next_frame()?;
    let (w, h) = (frame.width, frame.height);
    let mut drawer = Drawer::new("Air Canvas", w, h)?;
    let mut session = Session::new(w, h, StrokeStyle { color: DRAW_COLOR, thickness: BRUSH_THICKNESS });
    let mut composite = FrameBuffer::zeroed(w, h);

    /* --- HUD / FPS ---
       Visual: small text top-left shows DRAW/IDLE plus FPS. */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        /* 1) Mirror so the window behaves like a mirror (selfie view). */
        vision::mirror_horizontal(&mut frame);

        /* 2) Ask the detector where the hand is in this frame. */
        let hands = detector.detect(&frame)?;
        let hand_seen = !hands.is_empty();
        if let Some(hand) = hands.first() {
            let tip = hand.fingertip_pixel(frame.width, frame.height);

            // Fingertip marker + skeleton go on the display frame only;
            // the stroke itself lands on the persistent canvas.
            draw::fill_disc(&mut frame, tip.x, tip.y, MARKER_RADIUS, DRAW_COLOR);
            session.observe(Some(tip));
            hand::draw_skeleton(&mut frame, hand);
        } else {
            // Brush lifted: the next detection starts a fresh stroke.
            session.observe(None);
        }

        /* 3) Composite video and canvas 50/50 and add the HUD. */
        vision::blend_even(&frame, session.canvas().buffer(), &mut composite)?;

        let status = if hand_seen { "DRAW" } else { "IDLE" };
        let hud = format!("{status} | {hud_fps_text}");
        draw::draw_text_5x7(&mut composite, 8, 8, &hud, 0x00FFFFFF);

        /* 4) Present to the window (this also polls the keyboard). */
        drawer.present(&composite)?;

        /* 5) Keys: clear / save / quit. */
        if drawer.c_pressed_once() {
            session.clear();
            log::info!("Canvas cleared.");
        }
        if drawer.s_pressed_once() {
            session.save(SAVE_PATH)?;
            log::info!("Drawing saved as {SAVE_PATH}");
        }
        if drawer.esc_pressed() {
            log::info!("Exiting Air Canvas.");
            break;
        }

        /* 6) FPS counter, once per second. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }

        /* 7) Next frame. A capture failure is end-of-stream, not an error. */
        frame = match cam.next_frame() {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Capture ended: {e}");
                break;
            }
        };
    }

    cam.stop();
    Ok(())
}
