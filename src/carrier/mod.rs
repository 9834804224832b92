//! Carrier verification against the FMCSA regulator API.
//!
//! # Example
//!
//! ```no_run
//! use freight_desk::carrier::FmcsaClient;
//! use url::Url;
//!
//! # async fn run() -> freight_desk::error::DeskResult<()> {
//! let base = Url::parse("https://mobile.fmcsa.dot.gov/qc/services/carriers").unwrap();
//! let client = FmcsaClient::new(base, "my-web-key")?;
//! let verification = client.verify_carrier("MC123456").await?;
//! println!("verified: {}", verification.is_verified());
//! # Ok(())
//! # }
//! ```

mod client;
mod types;

pub use client::{FmcsaClient, mc_digits};
pub use types::{
    AUTHORIZED_FOR_HIRE, CarrierRecord, ClassificationResponse, DocketEntry, DocketResponse,
    DotNumber, OperationClassification,
};
