//! PNG fixtures for exercising OCR extraction.
//!
//! This module is optionally compiled with the "image" feature flag.
//! When the feature is disabled, stub implementations are provided.

#[cfg(feature = "image")]
pub mod font;
#[cfg(feature = "image")]
pub mod layout;
#[cfg(feature = "image")]
mod samples;

#[cfg(not(feature = "image"))]
mod stub;

#[cfg(feature = "image")]
pub use font::{FontSource, SizedFont};
#[cfg(feature = "image")]
pub use samples::{
    agent_card, create_agent_test_image, create_all, create_simple_text_image, simple_text,
};

#[cfg(not(feature = "image"))]
pub use stub::{create_all, create_agent_test_image, create_simple_text_image, FontSource};

pub const AGENT_IMAGE_FILE: &str = "agent_test_image.png";
pub const SIMPLE_IMAGE_FILE: &str = "simple_ocr_test.png";

pub const AGENT_IMAGE_SIZE: (u32, u32) = (600, 400);
pub const SIMPLE_IMAGE_SIZE: (u32, u32) = (400, 200);
