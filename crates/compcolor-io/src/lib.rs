//! Compcolor IO - Reading stacks and writing composites
//!
//! - **TIFF** ([`tiff`]): ImageJ hyperstacks in, 16-bit gray stacks out
//!   (feature `tiff-format`)
//! - **PNG** ([`png`]): RGBA composites in and out (feature `png-format`)
//! - **Sinks** ([`sink`]): [`PngSequenceSink`], a movie-export target that
//!   writes numbered PNG frames
//!
//! The `*_file` helpers wrap the reader/writer functions with buffered file
//! handles.

pub mod error;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "png-format")]
pub mod sink;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use compcolor_core;
pub use error::{IoError, IoResult};

#[cfg(feature = "png-format")]
pub use crate::png::{read_png, write_png};
#[cfg(feature = "png-format")]
pub use crate::sink::{PngSequenceSink, write_histogram_csv};
#[cfg(feature = "tiff-format")]
pub use crate::tiff::{
    HyperstackLayout, read_hyperstack, read_tiff_stack, tiff_page_count, write_tiff_stack,
};

#[cfg(any(feature = "png-format", feature = "tiff-format"))]
use std::fs::File;
#[cfg(any(feature = "png-format", feature = "tiff-format"))]
use std::io::{BufReader, BufWriter, Write};
#[cfg(any(feature = "png-format", feature = "tiff-format"))]
use std::path::Path;

/// Read an ImageJ hyperstack from a file path.
#[cfg(feature = "tiff-format")]
pub fn read_hyperstack_file<P: AsRef<Path>>(path: P) -> IoResult<compcolor_core::ImageStack> {
    let file = File::open(path)?;
    read_hyperstack(BufReader::new(file))
}

/// Read a multi-page TIFF with an explicit layout from a file path.
#[cfg(feature = "tiff-format")]
pub fn read_stack_file<P: AsRef<Path>>(
    path: P,
    layout: &HyperstackLayout,
) -> IoResult<compcolor_core::ImageStack> {
    let file = File::open(path)?;
    read_tiff_stack(BufReader::new(file), layout)
}

/// Write a stack as a 16-bit hyperstack TIFF file.
#[cfg(feature = "tiff-format")]
pub fn write_stack_file<P: AsRef<Path>>(
    stack: &compcolor_core::ImageStack,
    path: P,
) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_tiff_stack(stack, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a PNG file as packed RGBA.
#[cfg(feature = "png-format")]
pub fn read_png_file<P: AsRef<Path>>(path: P) -> IoResult<compcolor_core::RgbaPix> {
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write an RGBA image to a PNG file.
#[cfg(feature = "png-format")]
pub fn write_png_file<P: AsRef<Path>>(pix: &compcolor_core::RgbaPix, path: P) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_png(pix, &mut writer)?;
    writer.flush()?;
    Ok(())
}
