//! compcolor-test - Regression test framework for compcolor
//!
//! Each regression test creates a [`RegParams`], records a series of
//! numbered checks and asserts on [`RegParams::cleanup`]. Three modes:
//!
//! - **Generate**: write outputs and copy them to the golden directory
//! - **Compare**: compare outputs with golden files (default)
//! - **Display**: write outputs only, for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use compcolor_test::RegParams;
//!
//! let mut rp = RegParams::new("composite");
//! rp.compare_values(85.0, gray.data()[2] as f64, 0.0);
//! rp.write_pix_and_check(&rgb).unwrap();
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // compcolor-test is at crates/compcolor-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path of a file or directory inside the regout directory
pub fn regout_path(name: &str) -> String {
    format!("{}/{}", regout_dir(), name)
}
