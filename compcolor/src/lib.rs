//! Compcolor - False-color compositing of multi-channel microscopy stacks
//!
//! Fluorescence time-lapse recordings carry one grayscale image per channel
//! per time point. Compcolor assigns each of three channels a color ramp and
//! a contrast window and merges them into one RGB frame by per-component
//! maximum, so overlapping signals stay distinguishable.
//!
//! # Overview
//!
//! - Stack containers and histograms (re-exported from `compcolor-core`)
//! - Ramps, contrast windows, compositing, the viewer pipeline and movie
//!   export ([`color`])
//! - ImageJ hyperstack TIFF input, PNG output and PNG frame sequences
//!   ([`io`])
//!
//! # Example
//!
//! ```
//! use compcolor::color::{ConfigChange, RenderSession, Viewer};
//! use compcolor::{ImageStack, Plane, RgbaPix};
//!
//! let planes = (0..6)
//!     .map(|i| Plane::new_with_value(8, 8, (i * 40) as f32).unwrap())
//!     .collect();
//! let stack = ImageStack::from_planes(3, planes).unwrap();
//!
//! let mut shown = Vec::new();
//! let mut viewer = Viewer::new(RenderSession::new(), stack, |t: usize, _: &RgbaPix| {
//!     shown.push(t)
//! })
//! .unwrap();
//! viewer.apply(ConfigChange::Time(1)).unwrap();
//! assert_eq!(viewer.current().unwrap().get_rgb(0, 0), Some((120, 160, 200)));
//! drop(viewer);
//! assert_eq!(shown, [0, 1]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use compcolor_core::*;

// Pixel packing helpers, renamed so the compositing crate can take `color`
pub use compcolor_core::color as pixel;

// Re-export domain crates as modules to avoid name conflicts
pub use compcolor_color as color;
pub use compcolor_io as io;
