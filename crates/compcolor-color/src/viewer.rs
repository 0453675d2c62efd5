//! Interactive viewer pipeline
//!
//! The viewer turns user edits into redraws with an explicit, synchronous
//! pipeline: apply a [`ConfigChange`] to the session, recompute the
//! composite for the current time point, and hand it to a [`Renderer`].
//! Whatever front end drives it (sliders, a terminal UI, a test) only
//! produces `ConfigChange`s and implements `Renderer`.
//!
//! A change that fails validation leaves the session and the time index
//! untouched and does not reach the renderer.

use crate::composite::COMPOSITE_CHANNELS;
use crate::ramp::Rgb;
use crate::session::{Normalization, RenderSession};
use crate::{ColorError, ColorResult};
use compcolor_core::{ImageStack, RgbaPix};
use log::debug;

/// Receiver of freshly computed composites
pub trait Renderer {
    /// Display the composite for time point `time`.
    fn present(&mut self, time: usize, composite: &RgbaPix);
}

impl<F: FnMut(usize, &RgbaPix)> Renderer for F {
    fn present(&mut self, time: usize, composite: &RgbaPix) {
        self(time, composite)
    }
}

/// One user edit
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigChange {
    /// Assign a palette ramp to a slot
    Ramp { slot: usize, name: String },
    /// Set a slot's contrast window
    Contrast { slot: usize, low: f32, high: f32 },
    /// Move to another time point
    Time(usize),
    /// Register a ramp for a picked color and assign it to a slot
    AddRamp { slot: usize, color: Rgb },
    /// Switch the normalization mode
    Normalization(Normalization),
}

/// Session, stack and renderer wired together
pub struct Viewer<R: Renderer> {
    session: RenderSession,
    stack: ImageStack,
    time: usize,
    renderer: R,
    current: Option<RgbaPix>,
}

impl<R: Renderer> Viewer<R> {
    /// Create a viewer positioned at time 0 and render the first frame.
    ///
    /// # Errors
    ///
    /// [`ColorError::Arity`] if the stack has fewer than three channels, or
    /// any error from rendering the first frame.
    pub fn new(session: RenderSession, stack: ImageStack, renderer: R) -> ColorResult<Self> {
        if stack.channels() < COMPOSITE_CHANNELS {
            return Err(ColorError::Arity {
                what: "channels",
                expected: COMPOSITE_CHANNELS,
                actual: stack.channels(),
            });
        }
        let mut viewer = Viewer {
            session,
            stack,
            time: 0,
            renderer,
            current: None,
        };
        viewer.refresh()?;
        Ok(viewer)
    }

    #[inline]
    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    #[inline]
    pub fn stack(&self) -> &ImageStack {
        &self.stack
    }

    #[inline]
    pub fn time(&self) -> usize {
        self.time
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The most recently presented composite
    #[inline]
    pub fn current(&self) -> Option<&RgbaPix> {
        self.current.as_ref()
    }

    /// Apply one change, recompute and notify the renderer.
    pub fn apply(&mut self, change: ConfigChange) -> ColorResult<()> {
        let mut session = self.session.clone();
        let mut time = self.time;

        match &change {
            ConfigChange::Ramp { slot, name } => session.set_ramp(*slot, name)?,
            ConfigChange::Contrast { slot, low, high } => {
                session.set_contrast(*slot, *low, *high)?
            }
            ConfigChange::Time(t) => {
                if *t >= self.stack.frames() {
                    return Err(ColorError::InvalidParameters(format!(
                        "time {} outside stack of {} frames",
                        t,
                        self.stack.frames()
                    )));
                }
                time = *t;
            }
            ConfigChange::AddRamp { slot, color } => {
                // check the slot before the palette grows
                session.config().slot(*slot)?;
                let name = session.build_ramp(*color);
                session.set_ramp(*slot, &name)?;
            }
            ConfigChange::Normalization(mode) => session.set_normalization(*mode),
        }

        let frame = session.render(self.stack.slice(time)?)?;
        debug!("viewer: {change:?} -> recomposited t={time}");
        self.session = session;
        self.time = time;
        self.renderer.present(time, &frame);
        self.current = Some(frame);
        Ok(())
    }

    /// Recompute the current frame without changing anything.
    pub fn refresh(&mut self) -> ColorResult<()> {
        let frame = self.session.render(self.stack.slice(self.time)?)?;
        self.renderer.present(self.time, &frame);
        self.current = Some(frame);
        Ok(())
    }

    /// Give back the session and the renderer.
    pub fn into_parts(self) -> (RenderSession, R) {
        (self.session, self.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compcolor_core::Plane;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(usize, RgbaPix)>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, time: usize, composite: &RgbaPix) {
            self.frames.push((time, composite.clone()));
        }
    }

    fn stack(frames: usize, channels: usize) -> ImageStack {
        let planes = (0..frames * channels)
            .map(|i| Plane::new_with_value(3, 3, (i * 20) as f32).unwrap())
            .collect();
        ImageStack::from_planes(channels, planes).unwrap()
    }

    #[test]
    fn test_new_renders_first_frame() {
        let viewer = Viewer::new(RenderSession::new(), stack(2, 3), Recorder::default()).unwrap();
        assert_eq!(viewer.renderer().frames.len(), 1);
        assert_eq!(viewer.current().unwrap().get_rgb(0, 0), Some((0, 20, 40)));
    }

    #[test]
    fn test_new_rejects_two_channels() {
        let result = Viewer::new(RenderSession::new(), stack(2, 2), Recorder::default());
        assert!(matches!(result, Err(ColorError::Arity { actual: 2, .. })));
    }

    #[test]
    fn test_time_change() {
        let mut viewer =
            Viewer::new(RenderSession::new(), stack(2, 3), Recorder::default()).unwrap();
        viewer.apply(ConfigChange::Time(1)).unwrap();
        assert_eq!(viewer.time(), 1);
        let (t, frame) = viewer.renderer().frames.last().unwrap();
        assert_eq!(*t, 1);
        assert_eq!(frame.get_rgb(0, 0), Some((60, 80, 100)));
    }

    #[test]
    fn test_failed_change_is_not_rendered() {
        let mut viewer =
            Viewer::new(RenderSession::new(), stack(2, 3), Recorder::default()).unwrap();
        assert!(viewer.apply(ConfigChange::Time(2)).is_err());
        assert!(
            viewer
                .apply(ConfigChange::Contrast { slot: 0, low: 9.0, high: 9.0 })
                .is_err()
        );
        assert!(
            viewer
                .apply(ConfigChange::Ramp { slot: 0, name: "Nope".into() })
                .is_err()
        );
        assert_eq!(viewer.renderer().frames.len(), 1);
        assert_eq!(viewer.time(), 0);
    }

    #[test]
    fn test_add_ramp_bad_slot_leaves_palette() {
        let mut viewer =
            Viewer::new(RenderSession::new(), stack(1, 3), Recorder::default()).unwrap();
        let change = ConfigChange::AddRamp { slot: 7, color: Rgb::GRAY };
        assert!(viewer.apply(change).is_err());
        assert_eq!(viewer.session().palette().len(), 5);
    }

    #[test]
    fn test_contrast_change_rerenders() {
        let mut viewer =
            Viewer::new(RenderSession::new(), stack(1, 3), Recorder::default()).unwrap();
        viewer
            .apply(ConfigChange::Contrast { slot: 2, low: 0.0, high: 40.0 })
            .unwrap();
        assert_eq!(viewer.current().unwrap().get_rgb(0, 0), Some((0, 20, 255)));
        assert_eq!(viewer.renderer().frames.len(), 2);
    }

    #[test]
    fn test_closure_renderer() {
        let mut seen = Vec::new();
        let viewer = Viewer::new(RenderSession::new(), stack(1, 3), |t: usize, _: &RgbaPix| {
            seen.push(t)
        })
        .unwrap();
        drop(viewer);
        assert_eq!(seen, [0]);
    }
}
