//! TIFF hyperstack support
//!
//! Fluorescence time-lapse data usually comes as one multi-page TIFF in the
//! ImageJ hyperstack layout: pages are ordered channel-fastest, then z
//! slice, then time frame, and the first page's `ImageDescription` tag
//! records the dimensions as `key=value` lines:
//!
//! ```text
//! ImageJ=1.54f
//! images=60
//! channels=3
//! slices=5
//! frames=4
//! hyperstack=true
//! ```
//!
//! On read the z slices of every (time, channel) pair are collapsed by
//! maximum-intensity projection, giving an [`ImageStack`] of shape
//! `(frames, channels, height, width)`.

use crate::{IoError, IoResult};
use compcolor_core::{ImageStack, Plane};
use log::debug;
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray16;
use tiff::tags::Tag;

/// Dimensions of a hyperstack
///
/// `frames: None` means "whatever is left": the page count divided by
/// `channels * slices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperstackLayout {
    pub channels: usize,
    pub slices: usize,
    pub frames: Option<usize>,
}

impl Default for HyperstackLayout {
    fn default() -> Self {
        HyperstackLayout {
            channels: 1,
            slices: 1,
            frames: None,
        }
    }
}

impl HyperstackLayout {
    pub fn new(channels: usize, slices: usize, frames: Option<usize>) -> Self {
        HyperstackLayout {
            channels,
            slices,
            frames,
        }
    }

    /// Parse the `channels=`, `slices=` and `frames=` keys of an ImageJ
    /// description. Missing or malformed keys keep their defaults.
    pub fn from_description(description: &str) -> Self {
        let mut layout = HyperstackLayout::default();
        for line in description.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<usize>() else {
                continue;
            };
            match key.trim() {
                "channels" => layout.channels = value,
                "slices" => layout.slices = value,
                "frames" => layout.frames = Some(value),
                _ => {}
            }
        }
        layout
    }

    /// ImageJ description for a stack of this layout
    pub fn to_description(&self, pages: usize) -> String {
        let per_frame = self.channels.checked_mul(self.slices).unwrap_or(0).max(1);
        let frames = self.frames.unwrap_or(pages / per_frame);
        format!(
            "ImageJ=1.54f\nimages={}\nchannels={}\nslices={}\nframes={}\nhyperstack=true\nmode=composite\n",
            pages, self.channels, self.slices, frames
        )
    }

    /// Number of frames for a file of `pages` pages.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidData`] if a dimension is zero, the product of the
    /// dimensions overflows, or the page count does not match
    /// `channels * slices * frames`.
    pub fn resolve_frames(&self, pages: usize) -> IoResult<usize> {
        let per_frame = self.channels.checked_mul(self.slices).unwrap_or(0);
        if per_frame == 0 {
            return Err(IoError::InvalidData(format!(
                "hyperstack layout with {} channels and {} slices",
                self.channels, self.slices
            )));
        }
        let frames = match self.frames {
            Some(frames) => frames,
            None => pages / per_frame,
        };
        if frames == 0 || per_frame.checked_mul(frames) != Some(pages) {
            return Err(IoError::InvalidData(format!(
                "{} pages do not fit {} channels x {} slices x {:?} frames",
                pages, self.channels, self.slices, self.frames
            )));
        }
        Ok(frames)
    }
}

/// Get the number of pages in a TIFF file
pub fn tiff_page_count<R: Read + Seek>(reader: R) -> IoResult<usize> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let mut count = 1;
    while decoder.more_images() {
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
        count += 1;
    }

    Ok(count)
}

/// Read a multi-page TIFF as a stack with an explicit layout.
pub fn read_tiff_stack<R: Read + Seek>(
    reader: R,
    layout: &HyperstackLayout,
) -> IoResult<ImageStack> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;
    let pages = read_pages(&mut decoder)?;
    assemble(pages, layout)
}

/// Read an ImageJ hyperstack, taking the layout from its description tag.
///
/// A TIFF without a description is read as a single-channel time series.
pub fn read_hyperstack<R: Read + Seek>(reader: R) -> IoResult<ImageStack> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;
    let layout = match decoder.get_tag_ascii_string(Tag::ImageDescription) {
        Ok(description) => HyperstackLayout::from_description(&description),
        Err(_) => HyperstackLayout::default(),
    };
    debug!("tiff: hyperstack layout {layout:?}");
    let pages = read_pages(&mut decoder)?;
    assemble(pages, &layout)
}

/// Write a stack as 16-bit gray pages in hyperstack order.
///
/// Samples are rounded and clamped to `0..=65535`; NaN is written as 0.
pub fn write_tiff_stack<W: Write + Seek>(stack: &ImageStack, writer: W) -> IoResult<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;
    let (frames, channels, height, width) = stack.shape();
    let layout = HyperstackLayout::new(channels, 1, Some(frames));
    let description = layout.to_description(frames * channels);

    for (index, slice) in stack.iter_slices().flat_map(|s| s.iter()).enumerate() {
        let data: Vec<u16> = slice
            .data()
            .iter()
            .map(|&v| (v.round().clamp(0.0, 65535.0)) as u16)
            .collect();
        let mut image = encoder
            .new_image::<Gray16>(width, height)
            .map_err(|e| IoError::EncodeError(format!("TIFF page error: {}", e)))?;
        if index == 0 {
            image
                .encoder()
                .write_tag(Tag::ImageDescription, description.as_str())
                .map_err(|e| IoError::EncodeError(format!("TIFF tag error: {}", e)))?;
        }
        image
            .write_data(&data)
            .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
    }

    Ok(())
}

fn read_pages<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<Vec<Plane>> {
    let mut pages = Vec::new();
    loop {
        pages.push(decode_page(decoder)?);
        if !decoder.more_images() {
            break;
        }
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }
    Ok(pages)
}

/// Decode the page at the current decoder position
fn decode_page<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<Plane> {
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    if !matches!(color_type, ColorType::Gray(8 | 16 | 32)) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported TIFF color type: {:?}",
            color_type
        )));
    }

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let plane = match image_data {
        DecodingResult::U8(data) => Plane::from_u8(width, height, &data)?,
        DecodingResult::U16(data) => Plane::from_u16(width, height, &data)?,
        DecodingResult::F32(data) => Plane::from_data(width, height, data)?,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF sample format for {:?}",
                color_type
            )));
        }
    };
    Ok(plane)
}

/// Reorder hyperstack pages into a frame-major stack, projecting z.
fn assemble(pages: Vec<Plane>, layout: &HyperstackLayout) -> IoResult<ImageStack> {
    let frames = layout.resolve_frames(pages.len())?;
    let (channels, slices) = (layout.channels, layout.slices);
    debug!(
        "tiff: {} pages -> {} frames x {} channels ({} slices projected)",
        pages.len(),
        frames,
        channels,
        slices
    );

    let mut planes = Vec::with_capacity(frames * channels);
    for t in 0..frames {
        for c in 0..channels {
            let column: Vec<Plane> = (0..slices)
                .map(|z| pages[(t * slices + z) * channels + c].clone())
                .collect();
            planes.push(Plane::max_projection(&column)?);
        }
    }
    Ok(ImageStack::from_planes(channels, planes)?)
}
