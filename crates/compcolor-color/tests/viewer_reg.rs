//! Viewer and export regression test
//!
//! Drives the interactive pipeline with a scripted sequence of edits and
//! exports the result, checking that every accepted edit produces exactly
//! one fresh composite and rejected edits change nothing.

use compcolor_color::{
    ConfigChange, ExportOptions, HistogramBins, MovieFrame, Normalization, RenderSession, Renderer,
    Rgb, Viewer, export_movie,
};
use compcolor_core::{ImageStack, Plane, RgbaPix};
use compcolor_test::RegParams;

/// Records every presented frame
#[derive(Default)]
struct Screen {
    shown: Vec<(usize, RgbaPix)>,
}

impl Renderer for Screen {
    fn present(&mut self, time: usize, composite: &RgbaPix) {
        self.shown.push((time, composite.clone()));
    }
}

/// Four channels over five time points; channel c at time t is a
/// horizontal gradient scaled by (t + 1)
fn time_lapse() -> ImageStack {
    let (w, h) = (16u32, 4u32);
    let frames: Vec<Vec<Plane>> = (0..5u32)
        .map(|t| {
            (0..4u32)
                .map(|c| {
                    let data = (0..w * h)
                        .map(|i| ((i % w) * 10 * (t + 1) + c * 5) as f32)
                        .collect();
                    Plane::from_data(w, h, data).unwrap()
                })
                .collect::<Vec<Plane>>()
        })
        .collect();
    ImageStack::from_frames(frames).unwrap()
}

#[test]
fn viewer_reg() {
    let mut rp = RegParams::new("viewer");
    let stack = time_lapse();

    // Test 1: construction renders time 0
    let mut viewer = Viewer::new(RenderSession::new(), stack.clone(), Screen::default()).unwrap();
    rp.compare_values(1.0, viewer.renderer().shown.len() as f64, 0.0);
    rp.compare_values(0.0, viewer.time() as f64, 0.0);

    // Test 2: scripted edits
    let script = vec![
        ConfigChange::Time(2),
        ConfigChange::Contrast { slot: 0, low: 0.0, high: 450.0 },
        ConfigChange::Ramp { slot: 1, name: "Cyan".to_string() },
        ConfigChange::AddRamp { slot: 2, color: Rgb::new(255, 128, 0) },
        ConfigChange::Normalization(Normalization::None),
        ConfigChange::Time(4),
    ];
    let n = script.len();
    for change in script {
        rp.compare_values(1.0, viewer.apply(change).is_ok() as u8 as f64, 0.0);
    }
    rp.compare_values((n + 1) as f64, viewer.renderer().shown.len() as f64, 0.0);
    rp.compare_values(4.0, viewer.time() as f64, 0.0);
    rp.compare_values(6.0, viewer.session().palette().len() as f64, 0.0);

    // at t = 4 the channel 0 sample at x = 9 is 450: saturated red
    let (r, _, _) = viewer.current().unwrap().get_rgb(9, 0).unwrap();
    rp.compare_values(255.0, r as f64, 0.0);

    // Test 3: rejected edits
    let rejected = [
        ConfigChange::Time(5),
        ConfigChange::Contrast { slot: 1, low: 10.0, high: 5.0 },
        ConfigChange::Ramp { slot: 0, name: "Ultraviolet".to_string() },
        ConfigChange::Ramp { slot: 3, name: "Red".to_string() },
        ConfigChange::AddRamp { slot: 9, color: Rgb::GRAY },
        ConfigChange::Contrast { slot: usize::MAX, low: 0.0, high: 10.0 },
        ConfigChange::Ramp { slot: usize::MAX, name: "Red".to_string() },
        ConfigChange::AddRamp { slot: usize::MAX, color: Rgb::GRAY },
    ];
    for change in rejected {
        rp.compare_values(1.0, viewer.apply(change).is_err() as u8 as f64, 0.0);
    }
    rp.compare_values((n + 1) as f64, viewer.renderer().shown.len() as f64, 0.0);
    rp.compare_values(6.0, viewer.session().palette().len() as f64, 0.0);
    rp.compare_values(4.0, viewer.time() as f64, 0.0);

    // Test 4: export with the session the viewer ended up with
    let (session, screen) = viewer.into_parts();
    let mut frames: Vec<MovieFrame> = Vec::new();
    let options = ExportOptions {
        bins: HistogramBins { start: 0.0, delta: 50.0, count: 20 },
        ..Default::default()
    };
    let written = export_movie(&stack, &session, &options, &mut frames).unwrap();
    rp.compare_values(5.0, written as f64, 0.0);

    // the last exported frame equals what the viewer showed at t = 4
    let (_, last_shown) = screen.shown.last().unwrap();
    rp.compare_pix(last_shown, &frames[4].composite);

    // histogram bars follow the slot ramps, the extra channel is gray
    let panel = &frames[0].histograms;
    rp.compare_values(4.0, panel.len() as f64, 0.0);
    rp.compare_values(1.0, (panel[0].color == Rgb::RED) as u8 as f64, 0.0);
    rp.compare_values(1.0, (panel[1].color == Rgb::CYAN) as u8 as f64, 0.0);
    rp.compare_values(1.0, (panel[2].color == Rgb::new(255, 128, 0)) as u8 as f64, 0.0);
    rp.compare_values(1.0, (panel[3].color == Rgb::GRAY) as u8 as f64, 0.0);
    // t = 0, channel 0: 0..150 in steps of 10, 4 rows
    rp.compare_values(64.0, panel[0].histogram.total() as f64, 0.0);
    rp.compare_values(20.0, panel[0].histogram.counts()[0] as f64, 0.0);

    // Test 5: partial export
    let mut first_two: Vec<MovieFrame> = Vec::new();
    let options = ExportOptions {
        time_range: Some(1..5),
        max_frames: Some(2),
        ..Default::default()
    };
    export_movie(&stack, &session, &options, &mut first_two).unwrap();
    rp.compare_values(2.0, first_two.len() as f64, 0.0);
    rp.compare_values(2.0, first_two[1].time as f64, 0.0);
    rp.compare_values(1.0, first_two[1].index as f64, 0.0);

    assert!(rp.cleanup(), "viewer regression test failed");
}
