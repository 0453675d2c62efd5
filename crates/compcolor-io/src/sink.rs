//! Frame sinks that write to disk

use crate::png::write_png;
use crate::{IoError, IoResult};
use compcolor_color::{ColorError, ColorResult, FrameSink, MovieFrame};
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each exported frame as `<prefix>_<index:04>.png` into a directory.
///
/// With [`PngSequenceSink::with_histograms`] the histogram panel of every
/// frame is written next to it as `<prefix>_<index:04>_hist.csv`: one row per
/// bin, the bin's left edge followed by one count column per channel.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    histograms: bool,
    fps: Option<u32>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: &str) -> Self {
        PngSequenceSink {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            histograms: false,
            fps: None,
            written: Vec::new(),
        }
    }

    /// Also write the histogram panel of each frame as CSV.
    pub fn with_histograms(mut self, histograms: bool) -> Self {
        self.histograms = histograms;
        self
    }

    /// Paths of the PNG files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Frame rate announced by the exporter, once started
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    /// Path of frame `index`
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{:04}.png", self.prefix, index))
    }

    fn write_frame_files(&mut self, frame: &MovieFrame) -> IoResult<()> {
        let path = self.frame_path(frame.index);
        let mut file = BufWriter::new(File::create(&path)?);
        write_png(&frame.composite, &mut file)?;
        file.flush()?;

        if self.histograms {
            let csv = self
                .dir
                .join(format!("{}_{:04}_hist.csv", self.prefix, frame.index));
            write_histogram_csv(frame, BufWriter::new(File::create(csv)?))?;
        }

        debug!("png sink: wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, fps: u32, _width: u32, _height: u32) -> ColorResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| sink_error(e.into()))?;
        self.fps = Some(fps);
        Ok(())
    }

    fn write_frame(&mut self, frame: &MovieFrame) -> ColorResult<()> {
        self.write_frame_files(frame).map_err(sink_error)
    }
}

fn sink_error(e: IoError) -> ColorError {
    ColorError::Sink(e.to_string())
}

/// Write the histogram panel of one frame as CSV.
pub fn write_histogram_csv<W: Write>(frame: &MovieFrame, mut writer: W) -> IoResult<()> {
    write!(writer, "bin_start")?;
    for h in &frame.histograms {
        write!(writer, ",channel{}", h.channel)?;
    }
    writeln!(writer)?;

    let bins = frame
        .histograms
        .first()
        .map_or(0, |h| h.histogram.len());
    for i in 0..bins {
        write!(writer, "{}", frame.histograms[0].histogram.bin_start(i))?;
        for h in &frame.histograms {
            write!(writer, ",{}", h.histogram.counts().get(i).copied().unwrap_or(0.0))?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
