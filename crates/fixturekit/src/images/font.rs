//! Font lookup with a silent fallback to a built-in bitmap face.
//!
//! The preferred TrueType font is searched for by file name, first as given
//! (relative to the working directory), then in configured directories, then
//! in the platform font directories. When nothing loads, text is drawn with
//! the 8x8 bitmap font: same lines, same positions, coarser glyphs.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use log::debug;
use walkdir::WalkDir;

use crate::config::ImagesConfig;

/// How deep to descend into a font directory (vendor/family/style nesting).
const FONT_SEARCH_DEPTH: usize = 4;

const BITMAP_GLYPH_SIZE: u32 = 8;

pub enum FontSource {
    TrueType { font: FontVec, path: PathBuf },
    Builtin,
}

impl FontSource {
    pub fn load(config: &ImagesConfig) -> Self {
        let Some(path) = locate_font(&config.font, &config.font_directories) else {
            debug!("Font '{}' not found, using built-in bitmap font", config.font);
            return FontSource::Builtin;
        };

        let loaded = std::fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));

        match loaded {
            Ok(font) => {
                debug!("Using font {}", path.display());
                FontSource::TrueType { font, path }
            }
            Err(e) => {
                debug!(
                    "Font {} could not be loaded ({}), using built-in bitmap font",
                    path.display(),
                    e
                );
                FontSource::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontSource::Builtin)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FontSource::TrueType { path, .. } => Some(path),
            FontSource::Builtin => None,
        }
    }

    /// The face at a nominal pixel size.
    pub fn sized(&self, px: f32) -> SizedFont<'_> {
        SizedFont {
            source: self,
            px,
            bitmap_scale: bitmap_scale(px),
        }
    }
}

pub struct SizedFont<'a> {
    source: &'a FontSource,
    px: f32,
    bitmap_scale: u32,
}

impl SizedFont<'_> {
    /// Lowers the bitmap magnification until the longest of `lines` is at
    /// most `max_width` pixels wide. TrueType text is left as requested.
    pub fn fitting(mut self, lines: &[&str], max_width: u32) -> Self {
        let longest = lines
            .iter()
            .map(|line| line.chars().count() as u32)
            .max()
            .unwrap_or(0);
        while self.bitmap_scale > 1 && longest * BITMAP_GLYPH_SIZE * self.bitmap_scale > max_width {
            self.bitmap_scale -= 1;
        }
        self
    }

    /// Advance width of `text` when drawn with the bitmap face.
    pub fn bitmap_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * BITMAP_GLYPH_SIZE * self.bitmap_scale
    }

    /// Draws `text` with its top-left corner at (`x`, `y`), clipped to the canvas.
    pub fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self.source {
            FontSource::TrueType { font, .. } => {
                imageproc::drawing::draw_text_mut(canvas, color, x, y, PxScale::from(self.px), font, text);
            }
            FontSource::Builtin => draw_bitmap_text(canvas, x, y, text, color, self.bitmap_scale),
        }
    }
}

/// Integer magnification of the 8px bitmap glyphs for a requested size.
pub fn bitmap_scale(px: f32) -> u32 {
    ((px / 10.0).round() as u32).max(1)
}

fn draw_bitmap_text(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let advance = (BITMAP_GLYPH_SIZE * scale) as i32;
    let (width, height) = canvas.dimensions();

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let origin_x = x + index as i32 * advance;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BITMAP_GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = origin_x + (col * scale + dx) as i32;
                        let py = y + (row as u32 * scale + dy) as i32;
                        if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                            canvas.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

/// Finds a font file by name. Returns the first readable match.
pub fn locate_font(name: &str, extra_directories: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }

    let file_name = direct.file_name()?.to_str()?;

    extra_directories
        .iter()
        .cloned()
        .chain(system_font_directories())
        .filter(|dir| dir.is_dir())
        .find_map(|dir| find_in_directory(&dir, file_name))
}

fn find_in_directory(dir: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(FONT_SEARCH_DEPTH)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|n| n.eq_ignore_ascii_case(file_name))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
}

fn system_font_directories() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(user) = dirs::font_dir() {
        candidates.push(user);
    }

    if cfg!(target_os = "windows") {
        let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        candidates.push(PathBuf::from(windir).join("Fonts"));
    } else if cfg!(target_os = "macos") {
        candidates.push(PathBuf::from("/Library/Fonts"));
        candidates.push(PathBuf::from("/System/Library/Fonts"));
    } else {
        candidates.push(PathBuf::from("/usr/local/share/fonts"));
        candidates.push(PathBuf::from("/usr/share/fonts"));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_font_config() -> ImagesConfig {
        ImagesConfig {
            font: "fixturekit-missing-face-7f3a.ttf".to_string(),
            ..ImagesConfig::default()
        }
    }

    #[test]
    fn test_missing_font_falls_back_silently() {
        let fonts = FontSource::load(&missing_font_config());
        assert!(fonts.is_builtin());
        assert!(fonts.path().is_none());
    }

    #[test]
    fn test_unparseable_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken-face.ttf"), b"not a font").unwrap();

        let config = ImagesConfig {
            font: "broken-face.ttf".to_string(),
            font_directories: vec![dir.path().to_path_buf()],
            ..ImagesConfig::default()
        };
        assert!(FontSource::load(&config).is_builtin());
    }

    #[test]
    fn test_locate_font_in_nested_directory_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("truetype").join("vendor");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Fixture-Face.TTF"), b"x").unwrap();

        let found = locate_font("fixture-face.ttf", &[dir.path().to_path_buf()]);
        assert_eq!(found, Some(nested.join("Fixture-Face.TTF")));
    }

    #[test]
    fn test_locate_font_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("direct.ttf");
        std::fs::write(&path, b"x").unwrap();

        let name = path.to_str().unwrap();
        assert_eq!(locate_font(name, &[]), Some(path.clone()));
    }

    #[test]
    fn test_bitmap_scale() {
        assert_eq!(bitmap_scale(24.0), 2);
        assert_eq!(bitmap_scale(20.0), 2);
        assert_eq!(bitmap_scale(18.0), 2);
        assert_eq!(bitmap_scale(14.0), 1);
        assert_eq!(bitmap_scale(2.0), 1);
    }

    #[test]
    fn test_bitmap_text_draws_inside_box() {
        let mut canvas = RgbImage::from_pixel(100, 40, Rgb([255, 255, 255]));
        let fonts = FontSource::Builtin;
        fonts.sized(14.0).draw(&mut canvas, 10, 10, "AB", Rgb([0, 0, 0]));

        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == [0, 0, 0])
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked
            .iter()
            .all(|&(x, y)| (10..26).contains(&x) && (10..18).contains(&y)));
    }

    #[test]
    fn test_fitting_shrinks_bitmap_scale_to_width() {
        let fonts = FontSource::Builtin;
        let lines = ["notes: Available weekdays", "agency: Premier Talent"];

        let unfitted = fonts.sized(20.0);
        assert_eq!(unfitted.bitmap_width(lines[0]), 400);

        let fitted = fonts.sized(20.0).fitting(&lines, 380);
        assert!(lines.iter().all(|l| fitted.bitmap_width(l) <= 380));
        assert_eq!(fitted.bitmap_width(lines[0]), 200);

        let roomy = fonts.sized(20.0).fitting(&lines, 400);
        assert_eq!(roomy.bitmap_width(lines[0]), 400);
    }

    #[test]
    fn test_fitting_never_goes_below_one() {
        let fitted = FontSource::Builtin.sized(24.0).fitting(&["WWWWWWWW"], 10);
        assert_eq!(fitted.bitmap_width("WWWWWWWW"), 64);
    }
}
