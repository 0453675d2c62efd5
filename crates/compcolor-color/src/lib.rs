//! Compcolor Color - False-color compositing of fluorescence channels
//!
//! This crate turns raw channel planes into a single RGB image:
//!
//! - **Color ramps** ([`ramp`], [`palette`]): black-to-color lookup tables and the named set a session can pick from
//! - **Intensity windowing** ([`rescale`]): contrast windows onto the 8-bit display range
//! - **Compositing** ([`composite`]): colorize each channel, combine by per-component maximum
//! - **Session state** ([`config`], [`session`]): per-slot ramp and contrast assignment
//! - **Interactive pipeline** ([`viewer`]): config changes in, fresh composites out
//! - **Histograms and export** ([`panel`], [`export`]): per-channel histogram data and frame-by-frame movie export
//!
//! # Example
//!
//! ```
//! use compcolor_color::RenderSession;
//! use compcolor_core::Plane;
//!
//! let channels = vec![
//!     Plane::new_with_value(4, 4, 200.0).unwrap(),
//!     Plane::new_with_value(4, 4, 50.0).unwrap(),
//!     Plane::new_with_value(4, 4, 0.0).unwrap(),
//! ];
//! let mut session = RenderSession::new();
//! session.set_contrast(0, 0.0, 100.0).unwrap();
//! let rgb = session.render(&channels).unwrap();
//! assert_eq!(rgb.get_rgb(0, 0), Some((255, 50, 0)));
//! ```

pub mod composite;
pub mod config;
pub mod error;
pub mod export;
pub mod palette;
pub mod panel;
pub mod ramp;
pub mod rescale;
pub mod session;
pub mod viewer;

// Re-export core types
pub use compcolor_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use composite::{COMPOSITE_CHANNELS, colorize, composite, max_project};
pub use config::{ChannelConfig, ChannelSetting};
pub use export::{ExportOptions, FrameSink, MovieFrame, export_movie};
pub use palette::{BUILTIN_RAMPS, Palette};
pub use panel::{ChannelHistogram, HistogramBins, histogram_panel};
pub use ramp::{ColorRamp, Rgb};
pub use rescale::{
    ContrastWindow, normalize_joint, rescale_intensity, rescale_to_image_range,
    rescale_with_window,
};
pub use session::{Normalization, RenderSession};
pub use viewer::{ConfigChange, Renderer, Viewer};
