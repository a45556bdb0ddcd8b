//! Image decode/encode boundary adapter.
//!
//! The filter core never sees channel counts: decoding takes channel 0
//! of the RGB data as the intensity grid, and encoding replicates the
//! intensity into all three channels (grayscale-as-RGB). Range
//! validation happens here before encoding; a grid reaching the
//! encoder outside [0, 255] is a diagnostic, not a crash.

use std::path::Path;

use image::{Rgb, RgbImage};
use ndarray::{Array2, ArrayView2};

use crate::error::IoError;

/// Decode an image file into an intensity grid.
///
/// Takes channel 0 of the RGB image, discarding the other two channels.
///
/// # Errors
/// [`IoError::Decode`] on a missing or undecodable file. Fatal to the
/// batch run, no retry.
pub fn load_intensity(path: &Path) -> Result<Array2<f32>, IoError> {
    let img = image::open(path)
        .map_err(|source| IoError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = img.dimensions();
    let mut grid = Array2::<f32>::zeros((height as usize, width as usize));

    for (x, y, pixel) in img.enumerate_pixels() {
        grid[[y as usize, x as usize]] = pixel[0] as f32;
    }

    Ok(grid)
}

/// Encode an intensity grid as a grayscale-as-RGB image.
///
/// All three output channels carry the intensity value; the container
/// format follows the path's extension. Cells outside [0, 255] are
/// reported through tracing and clamped; by this point they indicate a
/// logic error upstream, since every filter clamps its own output.
///
/// # Errors
/// [`IoError::Encode`] when the file cannot be written.
pub fn save_intensity(grid: ArrayView2<f32>, path: &Path) -> Result<(), IoError> {
    let escaped = grid.iter().filter(|v| !(0.0..=255.0).contains(*v)).count();
    if escaped > 0 {
        tracing::warn!(
            path = %path.display(),
            cells = escaped,
            "grid reached the encoder out of range; clamping"
        );
    }

    let (height, width) = grid.dim();
    let mut img = RgbImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            let v = grid[[y, x]].clamp(0.0, 255.0).round() as u8;
            img.put_pixel(x as u32, y as u32, Rgb([v, v, v]));
        }
    }

    img.save(path).map_err(|source| IoError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_roundtrip_through_lossless_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");

        let grid = array![[0.0, 128.0, 255.0], [17.0, 99.0, 254.0]];

        save_intensity(grid.view(), &path).unwrap();
        let loaded = load_intensity(&path).unwrap();

        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_decode_takes_channel_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");

        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 200, 30]));
        img.put_pixel(1, 0, Rgb([250, 1, 2]));
        img.save(&path).unwrap();

        let grid = load_intensity(&path).unwrap();

        assert_eq!(grid, array![[10.0, 250.0]]);
    }

    #[test]
    fn test_encode_replicates_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");

        let grid = array![[42.0, 77.0]];
        save_intensity(grid.view(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(*img.get_pixel(0, 0), Rgb([42, 42, 42]));
        assert_eq!(*img.get_pixel(1, 0), Rgb([77, 77, 77]));
    }

    #[test]
    fn test_out_of_range_cells_are_clamped_on_encode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escaped.png");

        let grid = array![[-20.0, 300.0]];
        save_intensity(grid.view(), &path).unwrap();

        let loaded = load_intensity(&path).unwrap();
        assert_eq!(loaded, array![[0.0, 255.0]]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_intensity(Path::new("definitely/not/here.png")).unwrap_err();

        assert!(matches!(err, IoError::Decode { .. }));
    }
}
