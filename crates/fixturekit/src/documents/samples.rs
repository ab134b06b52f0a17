use std::path::{Path, PathBuf};

use log::info;

use crate::config::DocumentsConfig;
use crate::documents::model::Document;
use crate::documents::package;
use crate::documents::{BOOKING_DETAILS_FILE, MODELING_CONTRACT_FILE, MODEL_PORTFOLIO_FILE};
use crate::error::{DocumentError, Result};

pub fn modeling_contract() -> Document {
    Document::new()
        .title("MODELING CONTRACT AGREEMENT")
        .heading("Contract Details", 1)
        .labeled(&[
            ("Client: ", "Fashion Forward Magazine\n"),
            ("Model: ", "Sarah Johnson\n"),
            ("Agency: ", "Elite Modeling Agency\n"),
            ("Date: ", "January 15, 2025\n"),
            ("Location: ", "New York Studio, 123 Fashion Ave\n"),
        ])
        .heading("Terms and Conditions", 1)
        .bullets([
            "Shoot Duration: 8 hours (9:00 AM - 5:00 PM)",
            "Rate: $500 per hour",
            "Total Fee: $4,000",
            "Usage Rights: Editorial use only, 1 year license",
            "Wardrobe: Provided by client",
            "Hair & Makeup: Professional team provided",
            "Payment Terms: Net 30 days",
            "Cancellation: 48 hours notice required",
        ])
        .heading("Additional Clauses", 1)
        .paragraph(
            "The model agrees to arrive on time and maintain professional conduct \
             throughout the shoot. The client agrees to provide a safe working \
             environment and all necessary equipment.",
        )
        .paragraph(
            "This contract is governed by the laws of New York State. Any disputes \
             will be resolved through arbitration.",
        )
        .heading("Signatures", 1)
        .table(&[
            ("Model Signature:", "Date:"),
            ("Client Signature:", "Date:"),
            ("Agent Signature:", "Date:"),
        ])
}

pub fn model_portfolio() -> Document {
    Document::new()
        .title("MODEL PORTFOLIO")
        .heading("Model Information", 1)
        .table(&[
            ("Name:", "Alexandra Smith"),
            ("Age:", "22"),
            ("Height:", "5'9\" (175 cm)"),
            ("Measurements:", "34-24-36"),
            ("Hair Color:", "Blonde"),
            ("Eye Color:", "Blue"),
            ("Agency:", "Premier Talent Group"),
            ("Experience:", "3 years professional modeling"),
        ])
        .heading("Professional Experience", 1)
        .bullets([
            "Vogue Magazine - Editorial Spread (2024)",
            "Calvin Klein - Commercial Campaign (2023)",
            "New York Fashion Week - Runway Shows (2023-2024)",
            "H&M - Print Advertisement (2023)",
            "Local Fashion Boutiques - Catalog Shoots (2022-2024)",
        ])
        .heading("Skills & Specialties", 1)
        .bullets([
            "Editorial Photography",
            "Commercial Modeling",
            "Runway Walking",
            "Product Photography",
            "Fitness Modeling",
            "Beauty Shots",
        ])
        .heading("Contact Information", 1)
        .labeled(&[
            ("Email: ", "alexandra.smith@premiertalent.com\n"),
            ("Phone: ", "+1 (555) 987-6543\n"),
            ("Agent: ", "Michael Chen - m.chen@premiertalent.com\n"),
            ("Portfolio: ", "www.alexandrasmith-model.com"),
        ])
}

pub fn booking_details() -> Document {
    Document::new()
        .title("BOOKING DETAILS")
        .heading("Booking Information", 1)
        .table(&[
            ("Booking ID:", "BK-2025-0115-001"),
            ("Client:", "Luxury Fashion Brand"),
            ("Project:", "Spring Collection Catalog"),
            ("Date:", "January 20, 2025"),
            ("Time:", "10:00 AM - 6:00 PM"),
            ("Location:", "Downtown Studio, Los Angeles"),
            ("Model:", "Jessica Williams"),
            ("Rate:", "$800/day"),
            ("Usage:", "Print & Digital Catalog"),
            ("Status:", "Confirmed"),
        ])
        .heading("Requirements", 1)
        .bullets([
            "Bring natural makeup and hair styling tools",
            "Wear comfortable, form-fitting undergarments",
            "Arrive 30 minutes early for preparation",
            "Professional attitude and punctuality required",
            "No food or drinks near wardrobe area",
        ])
        .heading("Additional Notes", 1)
        .paragraph(
            "This is a high-profile catalog shoot for a luxury brand. \
             Professional conduct is essential. Parking is available \
             in the building garage. Lunch will be provided.",
        )
}

fn write_fixture(doc: &Document, dir: &Path, filename: &str) -> Result<PathBuf> {
    let _span = tracing::info_span!("documents.write", file = filename).entered();

    std::fs::create_dir_all(dir).map_err(|e| DocumentError::CreateDirectory {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(filename);
    package::save(doc, &path)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

pub fn create_modeling_contract(dir: &Path) -> Result<PathBuf> {
    write_fixture(&modeling_contract(), dir, MODELING_CONTRACT_FILE)
}

pub fn create_model_portfolio(dir: &Path) -> Result<PathBuf> {
    write_fixture(&model_portfolio(), dir, MODEL_PORTFOLIO_FILE)
}

pub fn create_booking_details(dir: &Path) -> Result<PathBuf> {
    write_fixture(&booking_details(), dir, BOOKING_DETAILS_FILE)
}

/// Writes all three fixtures, stopping at the first failure.
pub fn create_all(config: &DocumentsConfig) -> Result<Vec<PathBuf>> {
    let dir = config.output_directory.as_path();
    Ok(vec![
        create_modeling_contract(dir)?,
        create_model_portfolio(dir)?,
        create_booking_details(dir)?,
    ])
}
