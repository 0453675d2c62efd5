//! Histogram panel data
//!
//! The panel shown next to a composite plots the raw intensity distribution
//! of each channel, colored like the ramp that channel is composited with.
//! This module computes that data; drawing it is left to the front end.

use crate::composite::COMPOSITE_CHANNELS;
use crate::ramp::Rgb;
use crate::session::RenderSession;
use crate::ColorResult;
use compcolor_core::{Histogram, ImageStack};

/// Binning of the raw intensity axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBins {
    /// Left edge of the first bin
    pub start: f32,
    /// Bin width
    pub delta: f32,
    /// Number of bins
    pub count: usize,
}

impl Default for HistogramBins {
    /// 0..8000 in steps of 100, a useful span for 12-bit cameras with
    /// headroom
    fn default() -> Self {
        HistogramBins {
            start: 0.0,
            delta: 100.0,
            count: 80,
        }
    }
}

/// Histogram of one channel at one time point
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistogram {
    /// Channel index in the stack
    pub channel: usize,
    /// Bar color: the assigned ramp's target, gray if not composited
    pub color: Rgb,
    pub histogram: Histogram,
}

/// Histograms of every channel of the raw data at `time`.
///
/// Channels `0..3` take the color of the ramp in the matching slot; any
/// further channels are drawn in neutral gray.
pub fn histogram_panel(
    stack: &ImageStack,
    time: usize,
    session: &RenderSession,
    bins: &HistogramBins,
) -> ColorResult<Vec<ChannelHistogram>> {
    let slice = stack.slice(time)?;
    slice
        .iter()
        .enumerate()
        .map(|(channel, plane)| -> ColorResult<ChannelHistogram> {
            let color = if channel < COMPOSITE_CHANNELS {
                session.slot_color(channel)?
            } else {
                Rgb::GRAY
            };
            let histogram = Histogram::from_plane(plane, bins.start, bins.delta, bins.count)?;
            Ok(ChannelHistogram {
                channel,
                color,
                histogram,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compcolor_core::Plane;

    fn stack() -> ImageStack {
        let planes = vec![
            Plane::from_data(2, 1, vec![50.0, 150.0]).unwrap(),
            Plane::from_data(2, 1, vec![150.0, 150.0]).unwrap(),
            Plane::from_data(2, 1, vec![9000.0, 0.0]).unwrap(),
            Plane::from_data(2, 1, vec![7999.0, 7999.0]).unwrap(),
        ];
        ImageStack::from_planes(4, planes).unwrap()
    }

    #[test]
    fn test_panel_counts_and_colors() {
        let session = RenderSession::new();
        let panel = histogram_panel(&stack(), 0, &session, &HistogramBins::default()).unwrap();
        assert_eq!(panel.len(), 4);
        assert_eq!(panel[0].color, Rgb::RED);
        assert_eq!(panel[0].histogram.counts()[0..2], [1.0, 1.0]);
        assert_eq!(panel[1].histogram.counts()[1], 2.0);
        // 9000 is past the last bin
        assert_eq!(panel[2].histogram.total(), 1.0);
        assert_eq!(panel[3].color, Rgb::GRAY);
        assert_eq!(panel[3].histogram.counts()[79], 2.0);
    }

    #[test]
    fn test_panel_follows_slot_ramps() {
        let mut session = RenderSession::new();
        session.set_ramp(1, "Magenta").unwrap();
        let panel = histogram_panel(&stack(), 0, &session, &HistogramBins::default()).unwrap();
        assert_eq!(panel[1].color, Rgb::MAGENTA);
    }

    #[test]
    fn test_panel_bad_time() {
        let session = RenderSession::new();
        assert!(histogram_panel(&stack(), 1, &session, &HistogramBins::default()).is_err());
    }
}
