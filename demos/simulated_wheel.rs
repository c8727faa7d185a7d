// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Turns a simulated finger around the first wheel of a picoslidertoy.

use std::{cell::Cell, rc::Rc, time::Duration};

use strum::VariantArray as _;
use touchslider::{
    devices::picoslidertoy::{self, hid::sliders_config, Slider, STAR_PAD},
    output::LogSink,
    pad::{DEFAULT_CALIBRATION_SAMPLES, DEFAULT_THRESHOLD_OFFSET},
    CalibratedPad, EventLoop, Indicator, LabelTarget, PadId, SliderId,
};

const BASELINE: u16 = 1000;
const MAX_COVERAGE: f32 = 800.0;

const TICK_PERIOD: Duration = Duration::from_millis(10);
const NUM_TICKS: usize = 300;
const FINGER_STEP: f32 = 0.01;

/// Finger position in the pad's frame, `None` if lifted.
type Finger = Rc<Cell<Option<f32>>>;

/// Raw count of a pad centered at `center`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pad_response(finger: Option<f32>, center: f32) -> u16 {
    let Some(finger) = finger else {
        return BASELINE;
    };
    let distance = (finger - center).rem_euclid(1.0);
    let distance = distance.min(1.0 - distance);
    // Neighbouring pads are 1/3 apart
    let coverage = (1.0 - distance * 3.0).max(0.0);
    BASELINE + (coverage * MAX_COVERAGE) as u16
}

fn sensor(finger: &Finger, center: f32) -> impl FnMut() -> u16 {
    let finger = Rc::clone(finger);
    move || pad_response(finger.get(), center)
}

#[derive(Debug, Default)]
struct LogIndicator;

impl Indicator for LogIndicator {
    fn set_position(&mut self, slider_id: SliderId, position: Option<f32>) {
        if let Some(position) = position {
            log::trace!("slider {slider_id} at {position:.3}");
        }
    }

    fn set_pad(&mut self, pad_id: PadId, pressed: bool) {
        log::info!("pad {pad_id} pressed: {pressed}");
    }

    fn set_label(&mut self, target: LabelTarget, text: &str) {
        if !text.is_empty() {
            log::info!("label {target:?}: {text}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let wheel_finger = Finger::default();
    let star_finger = Finger::default();
    let lifted = Finger::default();

    let calibrate = |finger: &Finger, center: f32| {
        CalibratedPad::calibrate(
            sensor(finger, center),
            DEFAULT_CALIBRATION_SAMPLES,
            DEFAULT_THRESHOLD_OFFSET,
        )
    };
    let sliders = Slider::VARIANTS
        .iter()
        .map(|slider| {
            let finger = if *slider == Slider::WheelX {
                &wheel_finger
            } else {
                &lifted
            };
            [0.0, 1.0 / 3.0, 2.0 / 3.0].map(|center| calibrate(finger, center))
        })
        .collect();
    let pads = (0..picoslidertoy::NUM_PADS)
        .map(|index| {
            let finger = if index == STAR_PAD.0 {
                &star_finger
            } else {
                &lifted
            };
            calibrate(finger, 0.0)
        })
        .collect();

    let mut event_loop = EventLoop::new(sliders_config(), sliders, pads, LogSink, LogIndicator)?;

    let mut finger_position = 0.0_f32;
    for tick in 0..NUM_TICKS {
        if tick == NUM_TICKS / 2 {
            // Tap the `*` pad to switch modes
            star_finger.set(Some(0.0));
        } else {
            star_finger.set(None);
        }
        finger_position = (finger_position + FINGER_STEP).rem_euclid(1.0);
        wheel_finger.set(Some(finger_position));
        event_loop.run_tick();
        std::thread::sleep(TICK_PERIOD);
    }
    log::info!("Finished in mode {mode:?}", mode = event_loop.mode());
    Ok(())
}
