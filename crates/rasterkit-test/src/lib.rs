//! rasterkit-test - Regression test framework for rasterkit
//!
//! Regression tests live in each crate's `tests/*_reg.rs` and drive a
//! [`RegParams`]: every check advances an index, failures are collected,
//! and [`RegParams::cleanup`] reports the outcome.
//!
//! # Usage
//!
//! ```ignore
//! use rasterkit_test::RegParams;
//!
//! let mut rp = RegParams::new("resize");
//! rp.compare_pix(&expected, &actual);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display". Display mode
//!   additionally dumps every compared buffer to stderr as hex.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
