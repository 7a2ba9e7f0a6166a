// Per-frame pixel transforms.
// Visual expectation: the mirror makes the window behave like a bathroom mirror
// (raise your right hand, the hand on the right side of the window rises), and
// the blend shows the live video at half brightness with the strokes glowing
// through on top.

use crate::error::Error;
use crate::types::FrameBuffer;

/// Flip each row left-to-right, in place.
pub fn mirror_horizontal(fb: &mut FrameBuffer) {
    for row in fb.pixels.chunks_exact_mut(fb.width) {
        row.reverse();
    }
}

/// Equal-weight composite: dst = frame/2 + canvas/2, per channel.
/// Same semantics as blending two images at 50% opacity each; black canvas
/// pixels simply darken the video, painted ones shine through.
pub fn blend_even(frame: &FrameBuffer, canvas: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), Error> {
    if frame.width != canvas.width || frame.height != canvas.height {
        return Err(Error::Blend("frame/canvas dimension mismatch".into()));
    }
    if dst.width != frame.width || dst.height != frame.height {
        return Err(Error::Blend("dst dimension mismatch".into()));
    }

    for i in 0..frame.pixels.len() {
        let pf = frame.pixels[i];
        let pc = canvas.pixels[i];

        let r = (((pf >> 16) & 0xFF) + ((pc >> 16) & 0xFF)) / 2;
        let g = (((pf >> 8) & 0xFF) + ((pc >> 8) & 0xFF)) / 2;
        let b = ((pf & 0xFF) + (pc & 0xFF)) / 2;

        dst.pixels[i] = (r << 16) | (g << 8) | b;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_reverses_each_row_independently() {
        let mut fb = FrameBuffer { width: 3, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };
        mirror_horizontal(&mut fb);
        assert_eq!(fb.pixels, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn mirror_twice_is_identity() {
        let mut fb = FrameBuffer { width: 4, height: 1, pixels: vec![9, 8, 7, 6] };
        mirror_horizontal(&mut fb);
        mirror_horizontal(&mut fb);
        assert_eq!(fb.pixels, vec![9, 8, 7, 6]);
    }

    #[test]
    fn blend_averages_every_channel() {
        let frame = FrameBuffer { width: 1, height: 1, pixels: vec![0x00FF8040] };
        let canvas = FrameBuffer { width: 1, height: 1, pixels: vec![0x00014080] };
        let mut dst = FrameBuffer::zeroed(1, 1);
        blend_even(&frame, &canvas, &mut dst).unwrap();
        assert_eq!(dst.pixels[0], 0x00806060);
    }

    #[test]
    fn blend_with_black_canvas_halves_the_video() {
        let frame = FrameBuffer { width: 2, height: 1, pixels: vec![0x00FFFFFF, 0x00204060] };
        let canvas = FrameBuffer::zeroed(2, 1);
        let mut dst = FrameBuffer::zeroed(2, 1);
        blend_even(&frame, &canvas, &mut dst).unwrap();
        assert_eq!(dst.pixels, vec![0x007F7F7F, 0x00102030]);
    }

    #[test]
    fn blend_rejects_mismatched_dimensions() {
        let frame = FrameBuffer::zeroed(2, 2);
        let canvas = FrameBuffer::zeroed(3, 2);
        let mut dst = FrameBuffer::zeroed(2, 2);
        let err = blend_even(&frame, &canvas, &mut dst).unwrap_err();
        // Reported as a blend failure, not blamed on the camera.
        assert!(matches!(err, Error::Blend(_)));
        assert!(err.to_string().starts_with("Blend error"));
    }
}
