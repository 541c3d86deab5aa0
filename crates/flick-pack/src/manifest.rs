use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use flick_anim::{FrameCycler, LoopStyle, Repeat};
use semver::{Version, VersionReq};
use serde::Deserialize;

/// Manifest format versions this crate understands.
pub const SUPPORTED_FORMAT: &str = "^1";

/// Clip-pack manifest schema loaded from `pack.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackManifest {
    /// Manifest format version (semver), gated against
    /// [`SUPPORTED_FORMAT`].
    pub format: String,
    pub sheet: SheetGeometry,
    pub clips: BTreeMap<String, ClipSpec>,
}

/// Frame grid geometry of the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetGeometry {
    pub frame_width: u32,
    pub frame_height: u32,
}

/// One named clip: a row of frames in the sheet plus its cycle policy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClipSpec {
    /// Row index in the sheet grid.
    pub row: u32,
    /// Number of frames in the clip's row.
    pub frames: u32,
    /// Seconds each frame is held.
    pub frame_seconds: f64,
    #[serde(default)]
    pub style: StyleName,
    /// `-1` infinite, `0` once, `n > 0` finite count.
    #[serde(default = "default_repeat")]
    pub repeat: i64,
}

fn default_repeat() -> i64 {
    -1
}

/// Loop style as spelled in manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    #[default]
    Forward,
    Reverse,
    Alternating,
}

impl From<StyleName> for LoopStyle {
    fn from(name: StyleName) -> Self {
        match name {
            StyleName::Forward => LoopStyle::Forward,
            StyleName::Reverse => LoopStyle::Reverse,
            StyleName::Alternating => LoopStyle::Alternating,
        }
    }
}

impl PackManifest {
    /// Parse and validate manifest TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(input).context("failed to parse pack manifest TOML")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read pack manifest at {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid pack manifest at {}", path.display()))
    }

    /// Validate field constraints and the format version gate.
    pub fn validate(&self) -> Result<()> {
        let format = Version::parse(&self.format)
            .with_context(|| format!("manifest format must be valid semver: {}", self.format))?;
        let supported = VersionReq::parse(SUPPORTED_FORMAT)
            .context("supported format requirement must parse")?;
        if !supported.matches(&format) {
            bail!(
                "pack format {} is not supported (this build reads {})",
                self.format,
                SUPPORTED_FORMAT
            );
        }

        if self.sheet.frame_width == 0 || self.sheet.frame_height == 0 {
            bail!(
                "sheet frame dimensions must be non-zero, got {}x{}",
                self.sheet.frame_width,
                self.sheet.frame_height
            );
        }

        if self.clips.is_empty() {
            bail!("pack manifest must declare at least one clip");
        }

        for (name, clip) in &self.clips {
            if name.trim().is_empty() {
                bail!("clip names must not be empty");
            }
            if clip.frames == 0 {
                bail!("clip \"{name}\" must have at least one frame");
            }
            if !(clip.frame_seconds > 0.0 && clip.frame_seconds.is_finite()) {
                bail!(
                    "clip \"{name}\" frame_seconds must be positive, got {}",
                    clip.frame_seconds
                );
            }
            Repeat::from_raw(clip.repeat)
                .with_context(|| format!("clip \"{name}\" has an invalid repeat"))?;
        }

        Ok(())
    }

    /// Build a [`FrameCycler`] for the named clip, with its source
    /// origin positioned at the clip's row in the sheet.
    pub fn cycler(&self, clip_name: &str) -> Result<FrameCycler> {
        let clip = self
            .clips
            .get(clip_name)
            .with_context(|| format!("no clip named \"{clip_name}\" in pack manifest"))?;

        FrameCycler::new(
            0,
            (clip.row * self.sheet.frame_height) as i32,
            self.sheet.frame_width,
            self.sheet.frame_height,
            clip.frames as usize,
            clip.frame_seconds,
            clip.style.into(),
            Repeat::from_raw(clip.repeat)?,
        )
    }

    /// Number of frame columns the sheet must provide (widest clip).
    pub fn columns(&self) -> u32 {
        self.clips.values().map(|c| c.frames).max().unwrap_or(0)
    }

    /// Number of frame rows the sheet must provide.
    pub fn rows(&self) -> u32 {
        self.clips.values().map(|c| c.row + 1).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_MANIFEST: &str = r#"
format = "1.0.0"

[sheet]
frame_width = 32
frame_height = 32

[clips.walk]
row = 0
frames = 4
frame_seconds = 0.1

[clips.pulse]
row = 1
frames = 3
frame_seconds = 0.25
style = "alternating"
repeat = 2
"#;

    #[test]
    fn parses_valid_manifest() {
        let manifest = PackManifest::from_toml_str(VALID_MANIFEST).unwrap();
        assert_eq!(manifest.sheet.frame_width, 32);
        assert_eq!(manifest.clips.len(), 2);

        let walk = &manifest.clips["walk"];
        assert_eq!(walk.style, StyleName::Forward); // default
        assert_eq!(walk.repeat, -1); // default

        let pulse = &manifest.clips["pulse"];
        assert_eq!(pulse.style, StyleName::Alternating);
        assert_eq!(pulse.repeat, 2);
    }

    #[test]
    fn grid_extents_cover_widest_and_deepest_clip() {
        let manifest = PackManifest::from_toml_str(VALID_MANIFEST).unwrap();
        assert_eq!(manifest.columns(), 4);
        assert_eq!(manifest.rows(), 2);
    }

    #[test]
    fn cycler_positions_origin_at_clip_row() {
        let manifest = PackManifest::from_toml_str(VALID_MANIFEST).unwrap();
        let cycler = manifest.cycler("pulse").unwrap();
        let rect = cycler.source_rect();
        assert_eq!(rect.y, 32);
        assert_eq!(rect.width, 32);
        assert_eq!(cycler.frames(), 3);
        assert_eq!(cycler.style(), LoopStyle::Alternating);
        assert_eq!(cycler.repeat(), Repeat::Count(2));
    }

    #[test]
    fn unknown_clip_is_an_error() {
        let manifest = PackManifest::from_toml_str(VALID_MANIFEST).unwrap();
        let err = manifest.cycler("swim").unwrap_err().to_string();
        assert!(err.contains("swim"), "error should name the clip: {err}");
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = PackManifest::from_toml_str("format = ")
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse pack manifest TOML"));
    }

    #[test]
    fn invalid_format_semver_is_rejected() {
        let raw = VALID_MANIFEST.replace("format = \"1.0.0\"", "format = \"latest\"");
        let err = PackManifest::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("manifest format must be valid semver"));
    }

    #[test]
    fn unsupported_format_major_is_rejected() {
        let raw = VALID_MANIFEST.replace("format = \"1.0.0\"", "format = \"2.0.0\"");
        let err = PackManifest::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("not supported"));
    }

    #[test]
    fn zero_frames_is_rejected() {
        let raw = VALID_MANIFEST.replace("frames = 4", "frames = 0");
        let err = PackManifest::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("walk"), "error should name the clip: {err}");
    }

    #[test]
    fn non_positive_frame_seconds_is_rejected() {
        let raw = VALID_MANIFEST.replace("frame_seconds = 0.1", "frame_seconds = 0.0");
        assert!(PackManifest::from_toml_str(&raw).is_err());
    }

    #[test]
    fn out_of_range_repeat_is_rejected() {
        let raw = VALID_MANIFEST.replace("repeat = 2", "repeat = -5");
        let err = PackManifest::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("pulse"), "error should name the clip: {err}");
    }

    #[test]
    fn empty_clip_table_is_rejected() {
        let raw = r#"
format = "1.0.0"

[sheet]
frame_width = 32
frame_height = 32

[clips]
"#;
        let err = PackManifest::from_toml_str(raw).unwrap_err().to_string();
        assert!(err.contains("at least one clip"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = VALID_MANIFEST.replace("row = 0", "row = 0\nvolume = 11");
        assert!(PackManifest::from_toml_str(&raw).is_err());
    }
}
