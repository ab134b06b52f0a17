use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use log::info;

use crate::config::ImagesConfig;
use crate::error::{ImageError, Result};
use crate::images::font::FontSource;
use crate::images::layout::TextBlock;
use crate::images::{AGENT_IMAGE_FILE, AGENT_IMAGE_SIZE, SIMPLE_IMAGE_FILE, SIMPLE_IMAGE_SIZE};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Distance of the agent card border from each edge; the border is 2px wide.
const BORDER_INSET: u32 = 10;

const AGENT_CARD_LINES: &[&str] = &[
    "Name: Sarah Johnson",
    "Agency: Elite Modeling Agency",
    "Phone: +1 (555) 123-4567",
    "Email: sarah.johnson@elitemodeling.com",
    "Office: 123 Fashion Ave, New York, NY 10001",
    "Website: www.elitemodeling.com",
    "",
    "Specialties: Fashion, Commercial, Editorial",
    "Commission: 15-20%",
    "Experience: 10+ years in industry",
];

const SIMPLE_TEXT_LINES: &[&str] = &[
    "bookingAgent: John Smith",
    "agency: Premier Talent",
    "phone: +1-555-0123",
    "email: john@premier.com",
    "notes: Available weekdays",
];

/// Detailed agent card: bordered, titled, ruled, with a contact block.
pub fn agent_card(fonts: &FontSource) -> RgbImage {
    let (width, height) = AGENT_IMAGE_SIZE;
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);

    // 2px border, inclusive corners (10,10)-(width-10,height-10)
    for inset in 0..2u32 {
        let side = BORDER_INSET + inset;
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(side as i32, side as i32).of_size(width - 2 * side + 1, height - 2 * side + 1),
            BLACK,
        );
    }

    // text stays left of the inner border column
    let text_width = width - BORDER_INSET - 1 - 50;

    let title = "TALENT AGENT";
    let subtitle = "Professional Representation";
    fonts
        .sized(24.0)
        .fitting(&[title], text_width)
        .draw(&mut canvas, 50, 30, title, BLACK);
    fonts
        .sized(14.0)
        .fitting(&[subtitle], text_width)
        .draw(&mut canvas, 50, 60, subtitle, GRAY);

    draw_line_segment_mut(
        &mut canvas,
        (50.0, 90.0),
        ((width - 50) as f32, 90.0),
        BLACK,
    );

    let block = TextBlock {
        x: 50,
        top: 120,
        line_height: 25,
    };
    let body = fonts.sized(18.0).fitting(AGENT_CARD_LINES, text_width);
    for (y, line) in block.place(AGENT_CARD_LINES) {
        body.draw(&mut canvas, block.x, y, line, BLACK);
    }

    canvas
}

/// Plain five-line block for basic OCR checks.
pub fn simple_text(fonts: &FontSource) -> RgbImage {
    let (width, height) = SIMPLE_IMAGE_SIZE;
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);

    let block = TextBlock {
        x: 20,
        top: 30,
        line_height: 30,
    };
    let body = fonts
        .sized(20.0)
        .fitting(SIMPLE_TEXT_LINES, width - block.x as u32);
    for (y, line) in block.place(SIMPLE_TEXT_LINES) {
        body.draw(&mut canvas, block.x, y, line, BLACK);
    }

    canvas
}

/// Encodes to memory first, then swaps the file into place so a failed
/// encode or write never leaves a truncated PNG behind.
fn save_png(canvas: &RgbImage, dir: &Path, filename: &str) -> Result<PathBuf> {
    let _span = tracing::info_span!("images.write", file = filename).entered();

    std::fs::create_dir_all(dir).map_err(|e| ImageError::CreateDirectory {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(filename);

    let mut encoded = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .map_err(|e| ImageError::Encode {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let staging = dir.join(format!(".{}.partial", filename));
    std::fs::write(&staging, &encoded).map_err(|e| ImageError::WriteFile {
        path: staging.clone(),
        source: e,
    })?;
    if let Err(e) = std::fs::rename(&staging, &path) {
        let _ = std::fs::remove_file(&staging);
        return Err(ImageError::WriteFile { path, source: e }.into());
    }

    info!("Wrote {} ({}x{})", path.display(), canvas.width(), canvas.height());
    Ok(path)
}

pub fn create_agent_test_image(dir: &Path, fonts: &FontSource) -> Result<PathBuf> {
    save_png(&agent_card(fonts), dir, AGENT_IMAGE_FILE)
}

pub fn create_simple_text_image(dir: &Path, fonts: &FontSource) -> Result<PathBuf> {
    save_png(&simple_text(fonts), dir, SIMPLE_IMAGE_FILE)
}

/// Loads the font once and writes both images, stopping at the first failure.
pub fn create_all(config: &ImagesConfig) -> Result<Vec<PathBuf>> {
    let fonts = FontSource::load(config);
    let dir = config.output_directory.as_path();
    Ok(vec![
        create_agent_test_image(dir, &fonts)?,
        create_simple_text_image(dir, &fonts)?,
    ])
}
