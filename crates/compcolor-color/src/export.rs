//! Movie export
//!
//! Walks the time axis of a stack, composites every selected time point
//! with the session's current settings and hands each frame, together with
//! its histogram panel, to a [`FrameSink`]. Encoding is the sink's business:
//! a sink may write still images, feed a video encoder or collect frames in
//! memory.

use crate::panel::{ChannelHistogram, HistogramBins, histogram_panel};
use crate::session::RenderSession;
use crate::{ColorError, ColorResult};
use compcolor_core::{ImageStack, RgbaPix};
use log::{debug, info};
use std::ops::Range;

/// Export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Playback rate passed to the sink
    pub fps: u32,
    /// Time points to export; `None` exports the whole stack
    pub time_range: Option<Range<usize>>,
    /// Stop after this many frames
    pub max_frames: Option<usize>,
    /// Binning of the histogram panel
    pub bins: HistogramBins,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            fps: 15,
            time_range: None,
            max_frames: None,
            bins: HistogramBins::default(),
        }
    }
}

/// One exported frame
#[derive(Debug, Clone)]
pub struct MovieFrame {
    /// Position in the output sequence, starting at 0
    pub index: usize,
    /// Time point in the stack
    pub time: usize,
    pub composite: RgbaPix,
    pub histograms: Vec<ChannelHistogram>,
}

/// Destination of exported frames
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, _fps: u32, _width: u32, _height: u32) -> ColorResult<()> {
        Ok(())
    }

    /// Accept one frame.
    fn write_frame(&mut self, frame: &MovieFrame) -> ColorResult<()>;

    /// Called once after the last frame.
    fn finish(&mut self) -> ColorResult<()> {
        Ok(())
    }
}

/// Sink that keeps every frame in memory
impl FrameSink for Vec<MovieFrame> {
    fn write_frame(&mut self, frame: &MovieFrame) -> ColorResult<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Export the selected time points of `stack` into `sink`.
///
/// Returns the number of frames written. Once `begin` succeeded the sink is
/// always finished, also when compositing or writing a frame fails; the
/// first error is returned.
///
/// # Errors
///
/// - [`ColorError::InvalidParameters`] if `fps` or `max_frames` is 0, or the
///   time range is empty or extends past the stack
/// - any compositing error, or an error reported by the sink
pub fn export_movie<S: FrameSink + ?Sized>(
    stack: &ImageStack,
    session: &RenderSession,
    options: &ExportOptions,
    sink: &mut S,
) -> ColorResult<usize> {
    if options.fps == 0 {
        return Err(ColorError::InvalidParameters(
            "frame rate must be positive".to_string(),
        ));
    }
    if options.max_frames == Some(0) {
        return Err(ColorError::InvalidParameters(
            "frame limit must be positive".to_string(),
        ));
    }
    let range = options.time_range.clone().unwrap_or(0..stack.frames());
    if range.is_empty() || range.end > stack.frames() {
        return Err(ColorError::InvalidParameters(format!(
            "time range {:?} invalid for stack of {} frames",
            range,
            stack.frames()
        )));
    }
    let limit = options.max_frames.unwrap_or(usize::MAX);

    info!(
        "export: {} frames at {} fps, {}x{}",
        range.len().min(limit),
        options.fps,
        stack.width(),
        stack.height()
    );
    sink.begin(options.fps, stack.width(), stack.height())?;

    let result = write_frames(stack, session, options, range.take(limit), sink);
    let finished = sink.finish();
    let written = result?;
    finished?;
    info!("export: done, {written} frames");
    Ok(written)
}

fn write_frames<S: FrameSink + ?Sized>(
    stack: &ImageStack,
    session: &RenderSession,
    options: &ExportOptions,
    times: impl Iterator<Item = usize>,
    sink: &mut S,
) -> ColorResult<usize> {
    let mut written = 0;
    for (index, time) in times.enumerate() {
        let composite = session.render(stack.slice(time)?)?;
        let histograms = histogram_panel(stack, time, session, &options.bins)?;
        sink.write_frame(&MovieFrame {
            index,
            time,
            composite,
            histograms,
        })?;
        debug!("export: wrote frame {index} (t={time})");
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compcolor_core::Plane;

    fn stack(frames: usize) -> ImageStack {
        let planes = (0..frames * 3)
            .map(|i| Plane::new_with_value(2, 2, i as f32).unwrap())
            .collect();
        ImageStack::from_planes(3, planes).unwrap()
    }

    #[derive(Default)]
    struct Lifecycle {
        began: Option<(u32, u32, u32)>,
        times: Vec<usize>,
        fail_at: Option<usize>,
        finished: bool,
    }

    impl FrameSink for Lifecycle {
        fn begin(&mut self, fps: u32, width: u32, height: u32) -> ColorResult<()> {
            self.began = Some((fps, width, height));
            Ok(())
        }

        fn write_frame(&mut self, frame: &MovieFrame) -> ColorResult<()> {
            if self.fail_at == Some(frame.index) {
                return Err(ColorError::Sink("disk full".to_string()));
            }
            self.times.push(frame.time);
            Ok(())
        }

        fn finish(&mut self) -> ColorResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_export_whole_stack() {
        let mut frames: Vec<MovieFrame> = Vec::new();
        let n = export_movie(&stack(4), &RenderSession::new(), &ExportOptions::default(), &mut frames)
            .unwrap();
        assert_eq!(n, 4);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].time, 3);
        assert_eq!(frames[3].composite.get_rgb(0, 0), Some((9, 10, 11)));
        assert_eq!(frames[0].histograms.len(), 3);
    }

    #[test]
    fn test_export_range_and_limit() {
        let mut sink = Lifecycle::default();
        let options = ExportOptions {
            fps: 5,
            time_range: Some(1..5),
            max_frames: Some(2),
            ..Default::default()
        };
        let n = export_movie(&stack(6), &RenderSession::new(), &options, &mut sink).unwrap();
        assert_eq!(n, 2);
        assert_eq!(sink.began, Some((5, 2, 2)));
        assert_eq!(sink.times, [1, 2]);
        assert!(sink.finished);
    }

    #[test]
    fn test_export_rejects_bad_range() {
        let mut frames: Vec<MovieFrame> = Vec::new();
        let options = ExportOptions {
            time_range: Some(2..9),
            ..Default::default()
        };
        assert!(matches!(
            export_movie(&stack(3), &RenderSession::new(), &options, &mut frames),
            Err(ColorError::InvalidParameters(_))
        ));
        let options = ExportOptions {
            fps: 0,
            ..Default::default()
        };
        assert!(export_movie(&stack(3), &RenderSession::new(), &options, &mut frames).is_err());
        assert!(frames.is_empty());
    }

    #[test]
    fn test_export_rejects_zero_limit() {
        let mut sink = Lifecycle::default();
        let options = ExportOptions {
            max_frames: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            export_movie(&stack(3), &RenderSession::new(), &options, &mut sink),
            Err(ColorError::InvalidParameters(_))
        ));
        assert_eq!(sink.began, None);
        assert!(!sink.finished);
    }

    #[test]
    fn test_export_finishes_after_sink_error() {
        let mut sink = Lifecycle {
            fail_at: Some(1),
            ..Default::default()
        };
        let result = export_movie(&stack(3), &RenderSession::new(), &ExportOptions::default(), &mut sink);
        assert!(matches!(result, Err(ColorError::Sink(_))));
        assert_eq!(sink.times, [0]);
        assert!(sink.finished);
    }

    #[test]
    fn test_export_sink_error_stops() {
        struct Failing;
        impl FrameSink for Failing {
            fn write_frame(&mut self, _frame: &MovieFrame) -> ColorResult<()> {
                Err(ColorError::Sink("disk full".to_string()))
            }
        }
        let result = export_movie(&stack(2), &RenderSession::new(), &ExportOptions::default(), &mut Failing);
        assert!(matches!(result, Err(ColorError::Sink(_))));
    }
}
