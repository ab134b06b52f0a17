//! Sample DOCX fixtures for exercising document upload flows.
//!
//! Compiled with the "docx" feature. Without it, a stub with the same API
//! reports the missing feature instead of writing files.

#[cfg(feature = "docx")]
pub mod model;
#[cfg(feature = "docx")]
pub mod package;
#[cfg(feature = "docx")]
mod samples;

#[cfg(not(feature = "docx"))]
mod stub;

#[cfg(feature = "docx")]
pub use samples::{
    booking_details, create_all, create_booking_details, create_model_portfolio,
    create_modeling_contract, model_portfolio, modeling_contract,
};

#[cfg(not(feature = "docx"))]
pub use stub::{create_all, create_booking_details, create_model_portfolio, create_modeling_contract};

pub const MODELING_CONTRACT_FILE: &str = "modeling_contract_sample.docx";
pub const MODEL_PORTFOLIO_FILE: &str = "model_portfolio_sample.docx";
pub const BOOKING_DETAILS_FILE: &str = "booking_details_sample.docx";
