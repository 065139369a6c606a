//! Nearest-neighbor resampling.
//!
//! Backward mapping: output coordinate `d` reads source coordinate
//! `floor(d * src_len / dst_len)`, clamped to `src_len - 1`. Truncation
//! biases toward the top-left neighbor, and output files depend on that bias,
//! so it must not be changed to rounding.

use log::debug;

use crate::buffer::{Dimensions, ImageBuffer};
use crate::error::PgmError;
use crate::limits::Limits;
use crate::pixel::Pixel;

/// Source coordinate sampled for output coordinate `dst`.
///
/// `scale` is `src_len / dst_len`. The result is clamped to `src_len - 1`
/// so floating-point error at the far edge can never index out of bounds.
#[inline]
pub fn source_index(dst: usize, scale: f64, src_len: usize) -> usize {
    let src = (dst as f64 * scale) as usize;
    src.min(src_len.saturating_sub(1))
}

/// Source coordinate for every output coordinate along one axis.
///
/// The result has `dst_len` entries, is non-decreasing, starts at 0 and
/// never exceeds `src_len - 1`.
pub fn axis_map(src_len: usize, dst_len: usize) -> Vec<usize> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| source_index(d, scale, src_len))
        .collect()
}

/// Resample `input` to `target` with nearest-neighbor sampling.
///
/// Every output pixel is an exact copy of one input pixel.
pub fn resample(input: &ImageBuffer, target: Dimensions) -> ImageBuffer {
    let src = input.dimensions();
    let src_w = src.width() as usize;
    let dst_w = target.width() as usize;
    let cols = axis_map(src_w, dst_w);
    let rows = axis_map(src.height() as usize, target.height() as usize);
    debug!(
        "resampling {src} -> {target} (scale {:.4} x {:.4})",
        src.width() as f64 / target.width() as f64,
        src.height() as f64 / target.height() as f64
    );

    let pixels = input.pixels();
    let mut out: Vec<Pixel> = Vec::with_capacity(target.pixel_count());
    for &sy in &rows {
        let row = &pixels[sy * src_w..(sy + 1) * src_w];
        out.extend(cols.iter().map(|&sx| row[sx]));
    }

    ImageBuffer::from_exact(target, out)
}

/// [`resample`] after checking `limits` against the target size.
pub fn resample_with_limits(
    input: &ImageBuffer,
    target: Dimensions,
    limits: &Limits,
) -> Result<ImageBuffer, PgmError> {
    limits.check_allocation(
        target.width(),
        target.height(),
        core::mem::size_of::<Pixel>(),
    )?;
    Ok(resample(input, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::LimitExceeded;
    use crate::pixel::gray;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    fn ramp(w: u32, h: u32) -> ImageBuffer {
        let samples: Vec<u8> = (0..w * h).map(|i| (i % 251) as u8).collect();
        ImageBuffer::from_gray(dims(w, h), &samples).unwrap()
    }

    #[test]
    fn two_by_two_to_four_by_four() {
        let input = ImageBuffer::from_gray(dims(2, 2), &[10, 20, 30, 40]).unwrap();
        let out = resample(&input, dims(4, 4));
        let top = [gray(10), gray(10), gray(20), gray(20)];
        let bottom = [gray(30), gray(30), gray(40), gray(40)];
        assert_eq!(out.row(0), &top);
        assert_eq!(out.row(1), &top);
        assert_eq!(out.row(2), &bottom);
        assert_eq!(out.row(3), &bottom);
    }

    #[test]
    fn identity_is_byte_identical() {
        let input = ramp(17, 9);
        let out = resample(&input, input.dimensions());
        assert_eq!(out, input);
    }

    #[test]
    fn corner_always_maps_to_corner() {
        let input = ramp(13, 7);
        for (w, h) in [(1, 1), (2, 3), (13, 7), (26, 14), (5, 100), (100, 5)] {
            let out = resample(&input, dims(w, h));
            assert_eq!(out.get(0, 0), input.get(0, 0), "target {w}x{h}");
        }
    }

    #[test]
    fn axis_map_is_monotonic() {
        for (src, dst) in [(10, 3), (3, 10), (7, 7), (1472, 1000), (1000, 1472), (1, 9)] {
            let map = axis_map(src, dst);
            assert_eq!(map.len(), dst);
            assert_eq!(map[0], 0);
            assert!(map.windows(2).all(|w| w[0] <= w[1]), "{src}->{dst}");
        }
    }

    #[test]
    fn source_indices_stay_in_bounds() {
        for src in 1..40usize {
            for dst in 1..=src {
                let map = axis_map(src, dst);
                assert!(map.iter().all(|&s| s < src), "{src}->{dst}");
            }
        }
    }

    #[test]
    fn source_index_clamps_at_edge() {
        // A scale a hair above the exact ratio would read one past the end.
        assert_eq!(source_index(3, 1.0 + 1e-9, 3), 2);
        assert_eq!(source_index(0, 0.5, 1), 0);
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // scale 2/3: x=1 -> 0.67 -> 0, x=2 -> 1.33 -> 1
        assert_eq!(axis_map(2, 3), vec![0, 0, 1]);
        // scale 3/2: x=1 -> 1.5 -> 1
        assert_eq!(axis_map(3, 2), vec![0, 1]);
    }

    #[test]
    fn downscale_picks_top_left_samples() {
        let input = ImageBuffer::from_gray(dims(4, 2), &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let out = resample(&input, dims(2, 1));
        assert_eq!(out.pixels(), &[gray(1), gray(3)]);
    }

    #[test]
    fn limits_reject_large_target() {
        let input = ramp(4, 4);
        let err = resample_with_limits(&input, dims(100, 100), &Limits::none().with_max_width(64))
            .unwrap_err();
        assert!(matches!(
            err,
            PgmError::Limit(LimitExceeded::Width {
                actual: 100,
                max: 64
            })
        ));
        assert!(resample_with_limits(&input, dims(8, 8), &Limits::none()).is_ok());
    }
}
