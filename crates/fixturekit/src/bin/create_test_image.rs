//! Writes two PNG images for testing OCR extraction.

use std::path::PathBuf;

use fixturekit::config::load_default_config;
use fixturekit::error::FixtureError;
use fixturekit::{images, logging, report};

fn main() {
    logging::init();

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match load_default_config(&root) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", report::failure_line("loading configuration", &FixtureError::from(e)));
            return;
        }
    };

    println!("🖼️ Creating OCR test images...");

    match images::create_all(&config.images) {
        Ok(files) => {
            for file in &files {
                println!("{}", report::image_created_line(file, &root));
            }
            println!("{}", report::images_report(&files, &root, &config.app_url));
        }
        Err(e) => println!("{}", report::failure_line("creating images", &e)),
    }
}
