//! PNG image format support
//!
//! Composites are written as 8-bit RGBA. Reading accepts 8-bit gray, RGB
//! and RGBA files so that golden images produced by other tools can be
//! compared against.

use crate::{IoError, IoResult};
use compcolor_core::{RgbaPix, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as packed RGBA
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RgbaPix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let channels = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut data = Vec::with_capacity((width * height) as usize);
    for row in buf.chunks(output_info.line_size).take(height as usize) {
        for px in row.chunks_exact(channels).take(width as usize) {
            let pixel = match channels {
                1 => color::compose_rgb(px[0], px[0], px[0]),
                3 => color::compose_rgb(px[0], px[1], px[2]),
                _ => color::compose_rgba(px[0], px[1], px[2], px[3]),
            };
            data.push(pixel);
        }
    }

    Ok(RgbaPix::from_data(width, height, data)?)
}

/// Write an RGBA image as an 8-bit RGBA PNG
pub fn write_png<W: Write>(pix: &RgbaPix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&pix.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip() {
        let data = vec![
            color::compose_rgb(255, 0, 0),
            color::compose_rgb(0, 128, 0),
            color::compose_rgba(1, 2, 3, 4),
            color::compose_rgb(0, 0, 0),
            color::compose_rgb(10, 20, 30),
            color::compose_rgb(255, 255, 255),
        ];
        let pix = RgbaPix::from_data(3, 2, data).unwrap();

        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        assert_eq!(&buf[1..4], b"PNG");

        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back, pix);
    }

    #[test]
    fn test_read_gray_png() {
        let mut buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buf, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[7, 200]).unwrap();
        }
        let pix = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(pix.get_rgba(1, 0), Some((200, 200, 200, 255)));
    }

    #[test]
    fn test_read_garbage() {
        assert!(matches!(
            read_png(Cursor::new(vec![0u8; 16])),
            Err(IoError::DecodeError(_))
        ));
    }
}
