//! Writes three sample DOCX files for testing file upload.

use std::path::PathBuf;

use log::info;

use fixturekit::config::load_default_config;
use fixturekit::error::FixtureError;
use fixturekit::{documents, logging, report};

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

    println!("📄 Creating sample DOCX files...");

    match documents::create_all(&config.documents) {
        Ok(files) => {
            info!("Created {} documents", files.len());
            println!("{}", report::documents_report(&files, &root, &config.app_url));
        }
        Err(e) => println!("{}", report::failure_line("creating DOCX files", &e)),
    }
}
