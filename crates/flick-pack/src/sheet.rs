use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use image::GenericImageView;

use crate::manifest::PackManifest;

/// One sliced frame: raw RGBA pixel data at the manifest's frame size.
///
/// Stored as a flat `Vec<u8>` in row-major RGBA order (4 bytes per
/// pixel) so consumers don't need to depend on the `image` crate.
#[derive(Debug, Clone)]
pub struct FrameImage {
    /// Raw RGBA pixel data, length = `width * height * 4`.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode a PNG sprite sheet and slice every clip in the manifest into
/// RGBA frames, keyed by clip name.
///
/// The sheet must match the manifest grid exactly: wide enough for the
/// widest clip and tall enough for the deepest row.
pub fn slice_from_bytes(
    png: &[u8],
    manifest: &PackManifest,
) -> Result<BTreeMap<String, Vec<FrameImage>>> {
    let sheet = image::load_from_memory(png).context("failed to decode sprite sheet PNG")?;
    let (sheet_w, sheet_h) = sheet.dimensions();

    let frame_w = manifest.sheet.frame_width;
    let frame_h = manifest.sheet.frame_height;
    let expected_w = frame_w * manifest.columns();
    let expected_h = frame_h * manifest.rows();
    if sheet_w != expected_w || sheet_h != expected_h {
        bail!(
            "sprite sheet dimensions {sheet_w}×{sheet_h} don't match \
             expected {expected_w}×{expected_h} \
             ({} columns × {frame_w}px wide, {} rows × {frame_h}px tall)",
            manifest.columns(),
            manifest.rows(),
        );
    }

    let mut clips = BTreeMap::new();
    for (name, clip) in &manifest.clips {
        let y = clip.row * frame_h;
        let mut frames = Vec::with_capacity(clip.frames as usize);
        for col in 0..clip.frames {
            let sub = sheet.crop_imm(col * frame_w, y, frame_w, frame_h);
            frames.push(FrameImage {
                data: sub.to_rgba8().into_raw(),
                width: frame_w,
                height: frame_h,
            });
        }
        clips.insert(name.clone(), frames);
    }

    Ok(clips)
}

/// Load and slice a sprite sheet from a PNG file on disk.
pub fn slice_from_file(
    png_path: &Path,
    manifest: &PackManifest,
) -> Result<BTreeMap<String, Vec<FrameImage>>> {
    let png = std::fs::read(png_path)
        .with_context(|| format!("failed to read {}", png_path.display()))?;
    slice_from_bytes(&png, manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    const MANIFEST: &str = r#"
format = "1.0.0"

[sheet]
frame_width = 4
frame_height = 4

[clips.walk]
row = 0
frames = 3
frame_seconds = 0.1

[clips.blink]
row = 1
frames = 2
frame_seconds = 0.2
"#;

    /// Build a PNG sheet whose red channel encodes the frame column and
    /// green channel the row, so sliced frames are easy to assert on.
    fn tagged_sheet(cols: u32, rows: u32, frame: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(cols * frame, rows * frame, |x, y| {
            Rgba([(x / frame) as u8, (y / frame) as u8, 0, 255])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn slices_all_clips() {
        let manifest = PackManifest::from_toml_str(MANIFEST).unwrap();
        let png = tagged_sheet(3, 2, 4);
        let clips = slice_from_bytes(&png, &manifest).unwrap();

        assert_eq!(clips.len(), 2);
        assert_eq!(clips["walk"].len(), 3);
        assert_eq!(clips["blink"].len(), 2);

        for frames in clips.values() {
            for frame in frames {
                assert_eq!(frame.width, 4);
                assert_eq!(frame.height, 4);
                assert_eq!(frame.data.len(), 4 * 4 * 4);
            }
        }
    }

    #[test]
    fn sliced_pixels_come_from_the_right_cell() {
        let manifest = PackManifest::from_toml_str(MANIFEST).unwrap();
        let png = tagged_sheet(3, 2, 4);
        let clips = slice_from_bytes(&png, &manifest).unwrap();

        // walk frame 2 is column 2, row 0: red=2, green=0
        let f = &clips["walk"][2];
        assert_eq!(&f.data[0..4], &[2, 0, 0, 255]);

        // blink frame 1 is column 1, row 1: red=1, green=1
        let f = &clips["blink"][1];
        assert_eq!(&f.data[0..4], &[1, 1, 0, 255]);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let manifest = PackManifest::from_toml_str(MANIFEST).unwrap();
        let png = tagged_sheet(2, 2, 4); // one column short
        let err = slice_from_bytes(&png, &manifest).unwrap_err().to_string();
        assert!(err.contains("don't match"), "got: {err}");
    }

    #[test]
    fn bad_png_is_rejected() {
        let manifest = PackManifest::from_toml_str(MANIFEST).unwrap();
        let err = slice_from_bytes(b"not a png", &manifest)
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to decode sprite sheet PNG"));
    }
}
