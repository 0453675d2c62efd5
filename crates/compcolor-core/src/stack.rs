//! ImageStack - time-lapse, multi-channel image stack
//!
//! A stack is the 4-D array `(time, channel, height, width)` of one
//! acquisition. It is stored as `frames x channels` [`Plane`]s of identical
//! size, frame-major: the planes of time point `t` are contiguous, so a time
//! slice can be borrowed as a plain `&[Plane]`.
//!
//! Stacks are read-only once built. Rendering code borrows slices and never
//! mutates the raw data.

use crate::error::{Error, Result};
use crate::plane::Plane;

/// Multi-channel time-lapse stack
#[derive(Debug, Clone)]
pub struct ImageStack {
    frames: usize,
    channels: usize,
    width: u32,
    height: u32,
    /// `frames * channels` planes, index `t * channels + c`
    planes: Vec<Plane>,
}

impl ImageStack {
    /// Build a stack from planes ordered frame-major (`t * channels + c`).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if `channels` is 0 or the plane count is
    ///   not a non-zero multiple of `channels`
    /// - [`Error::DimensionMismatch`] if the planes differ in size
    pub fn from_planes(channels: usize, planes: Vec<Plane>) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidParameter(
                "stack needs at least one channel".to_string(),
            ));
        }
        if planes.is_empty() || planes.len() % channels != 0 {
            return Err(Error::InvalidParameter(format!(
                "{} planes cannot be split into {} channels",
                planes.len(),
                channels
            )));
        }

        let (width, height) = planes[0].dimensions();
        if let Some(bad) = planes.iter().find(|p| p.dimensions() != (width, height)) {
            return Err(Error::DimensionMismatch {
                expected: (width, height),
                actual: bad.dimensions(),
            });
        }

        Ok(ImageStack {
            frames: planes.len() / channels,
            channels,
            width,
            height,
            planes,
        })
    }

    /// Build a stack from one `Vec` of channel planes per time point.
    pub fn from_frames(frames: Vec<Vec<Plane>>) -> Result<Self> {
        let channels = frames
            .first()
            .map(Vec::len)
            .ok_or(Error::NullInput("no frames"))?;
        if let Some(bad) = frames.iter().find(|f| f.len() != channels) {
            return Err(Error::InvalidParameter(format!(
                "frame has {} channels, expected {}",
                bad.len(),
                channels
            )));
        }
        Self::from_planes(channels, frames.into_iter().flatten().collect())
    }

    /// Number of time points
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of channels per time point
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shape as `(frames, channels, height, width)`
    pub fn shape(&self) -> (usize, usize, u32, u32) {
        (self.frames, self.channels, self.height, self.width)
    }

    /// Borrow one plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `time` or `channel` is out of
    /// range.
    pub fn plane(&self, time: usize, channel: usize) -> Result<&Plane> {
        if channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.channels,
            });
        }
        Ok(&self.slice(time)?[channel])
    }

    /// Borrow all channel planes of one time point.
    pub fn slice(&self, time: usize) -> Result<&[Plane]> {
        if time >= self.frames {
            return Err(Error::IndexOutOfBounds {
                index: time,
                len: self.frames,
            });
        }
        let start = time * self.channels;
        Ok(&self.planes[start..start + self.channels])
    }

    /// Iterate over time slices in order.
    pub fn iter_slices(&self) -> impl Iterator<Item = &[Plane]> {
        self.planes.chunks(self.channels)
    }

    /// Append zero-valued channels until the stack has `channels` channels.
    ///
    /// Lets acquisitions with fewer detectors than compositing slots be
    /// rendered; a stack that already has enough channels is returned as is.
    pub fn pad_channels(self, channels: usize) -> Result<Self> {
        if channels <= self.channels {
            return Ok(self);
        }
        log::warn!(
            "padding stack from {} to {} channels with blank planes",
            self.channels,
            channels
        );
        let blank = Plane::new(self.width, self.height)?;
        let mut planes = Vec::with_capacity(self.frames * channels);
        for slice in self.planes.chunks(self.channels) {
            planes.extend_from_slice(slice);
            for _ in self.channels..channels {
                planes.push(blank.clone());
            }
        }
        Self::from_planes(channels, planes)
    }

    /// Minimum and maximum over every plane of one channel.
    pub fn channel_range(&self, channel: usize) -> Result<(f32, f32)> {
        if channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.channels,
            });
        }
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for slice in self.iter_slices() {
            let (a, b) = slice[channel].min_max();
            lo = lo.min(a);
            hi = hi.max(b);
        }
        Ok((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(v: f32) -> Plane {
        Plane::new_with_value(4, 3, v).unwrap()
    }

    #[test]
    fn test_from_planes_layout() {
        let planes = (0..6).map(|i| plane(i as f32)).collect();
        let stack = ImageStack::from_planes(3, planes).unwrap();
        assert_eq!(stack.shape(), (2, 3, 3, 4));
        assert_eq!(stack.plane(1, 0).unwrap().data()[0], 3.0);
        assert_eq!(stack.slice(1).unwrap().len(), 3);
        assert!(stack.plane(2, 0).is_err());
        assert!(stack.plane(0, 3).is_err());
    }

    #[test]
    fn test_from_planes_rejects_partial_frame() {
        let planes = (0..5).map(|i| plane(i as f32)).collect();
        assert!(ImageStack::from_planes(3, planes).is_err());
        assert!(ImageStack::from_planes(0, vec![plane(0.0)]).is_err());
    }

    #[test]
    fn test_from_planes_rejects_mixed_sizes() {
        let planes = vec![plane(0.0), Plane::new(5, 3).unwrap()];
        assert!(matches!(
            ImageStack::from_planes(2, planes),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_frames() {
        let stack = ImageStack::from_frames(vec![vec![plane(1.0), plane(2.0)]; 4]).unwrap();
        assert_eq!(stack.frames(), 4);
        assert_eq!(stack.channels(), 2);
        assert!(ImageStack::from_frames(vec![vec![plane(1.0)], vec![]]).is_err());
    }

    #[test]
    fn test_pad_channels() {
        let stack = ImageStack::from_frames(vec![vec![plane(7.0), plane(8.0)]; 2]).unwrap();
        let padded = stack.pad_channels(3).unwrap();
        assert_eq!(padded.channels(), 3);
        assert_eq!(padded.plane(1, 1).unwrap().data()[0], 8.0);
        assert_eq!(padded.plane(1, 2).unwrap().min_max(), (0.0, 0.0));
    }

    #[test]
    fn test_channel_range() {
        let stack =
            ImageStack::from_frames(vec![vec![plane(5.0)], vec![plane(50.0)]]).unwrap();
        assert_eq!(stack.channel_range(0).unwrap(), (5.0, 50.0));
    }
}
