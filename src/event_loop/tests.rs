// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

use std::{cell::Cell, collections::HashMap, rc::Rc};

use strum::{AsRefStr, VariantArray};

use crate::{
    ButtonBinding, ConsumerControlCode, DeltaPolicy, KeyCombo, Keycode, ModeBindings,
    OutputCommand, OutputError, OutputResult, Settings, SliderBinding, SliderConfig, Topology,
};

use super::*;

const THRESHOLD: u16 = 1000;
const UNTOUCHED: u16 = 900;
const TOUCHED: u16 = 1200;

const NUM_PADS: usize = 5;
const MODE_SWITCH_PAD: PadId = PadId(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, VariantArray)]
enum TestMode {
    Hotkey,
    Media,
}

#[derive(Debug, Clone)]
struct FakePad {
    raw: Rc<Cell<u16>>,
}

impl TouchPad for FakePad {
    fn read_raw(&mut self) -> u16 {
        self.raw.get()
    }

    fn threshold(&self) -> u16 {
        THRESHOLD
    }
}

#[derive(Debug, Default)]
struct RecordingSink {
    sent: Vec<OutputCommand>,
    fail: bool,
}

impl OutputSink for RecordingSink {
    fn send_command(&mut self, command: &OutputCommand) -> OutputResult<()> {
        if self.fail {
            return Err(OutputError::Disconnected);
        }
        self.sent.push(command.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingIndicator {
    positions: Vec<(SliderId, Option<f32>)>,
    pads: Vec<(PadId, bool)>,
    labels: HashMap<LabelTarget, String>,
    label_updates: usize,
}

impl Indicator for RecordingIndicator {
    fn set_position(&mut self, slider_id: SliderId, position: Option<f32>) {
        self.positions.push((slider_id, position));
    }

    fn set_pad(&mut self, pad_id: PadId, pressed: bool) {
        self.pads.push((pad_id, pressed));
    }

    fn set_label(&mut self, target: LabelTarget, text: &str) {
        self.label_updates += 1;
        self.labels.insert(target, text.to_owned());
    }
}

struct Harness {
    slider: [Rc<Cell<u16>>; 3],
    pads: Vec<Rc<Cell<u16>>>,
    event_loop: EventLoop<TestMode, FakePad, RecordingSink, RecordingIndicator>,
}

impl Harness {
    fn new(slider_config: SliderConfig) -> Self {
        let slider = [(); 3].map(|()| Rc::new(Cell::new(UNTOUCHED)));
        let pads = (0..NUM_PADS)
            .map(|_| Rc::new(Cell::new(UNTOUCHED)))
            .collect::<Vec<_>>();
        let fake_pad = |raw: &Rc<Cell<u16>>| FakePad {
            raw: Rc::clone(raw),
        };
        let config = ControllerConfig {
            settings: Settings {
                segments: 10,
                max_repeats: 3,
                delta_policy: DeltaPolicy::Raw,
            },
            sliders: vec![slider_config],
            mode_switch_pad: Some(MODE_SWITCH_PAD),
            initial_mode: TestMode::Hotkey,
            mode_bindings: vec![
                (TestMode::Hotkey, hotkey_bindings()),
                (TestMode::Media, media_bindings()),
            ],
        };
        let event_loop = EventLoop::new(
            config,
            vec![slider.each_ref().map(fake_pad)],
            pads.iter().map(fake_pad).collect(),
            RecordingSink::default(),
            RecordingIndicator::default(),
        )
        .unwrap();
        Self {
            slider,
            pads,
            event_loop,
        }
    }

    fn touch_slider(&self, [a, b, c]: [u16; 3]) {
        self.slider[0].set(a);
        self.slider[1].set(b);
        self.slider[2].set(c);
    }

    fn release_slider(&self) {
        self.touch_slider([UNTOUCHED; 3]);
    }

    fn set_pad(&self, pad_id: PadId, pressed: bool) {
        self.pads[pad_id.0].set(if pressed { TOUCHED } else { UNTOUCHED });
    }

    fn tick(&mut self) {
        self.event_loop.run_tick();
    }

    fn sent(&self) -> &[OutputCommand] {
        &self.event_loop.output_sink().sent
    }

    fn label(&self, target: LabelTarget) -> Option<&str> {
        self.event_loop
            .indicator()
            .labels
            .get(&target)
            .map(String::as_str)
    }
}

fn ctrl(key: Keycode) -> OutputCommand {
    KeyCombo::ctrl(key).into()
}

fn hotkey_bindings() -> ModeBindings {
    ModeBindings {
        buttons: vec![
            Some(ButtonBinding::new(KeyCombo::ctrl(Keycode::F1))),
            Some(ButtonBinding::new(KeyCombo::ctrl(Keycode::F2))),
            Some(ButtonBinding::new(KeyCombo::ctrl(Keycode::F3))),
            Some(ButtonBinding::new(KeyCombo::ctrl(Keycode::F4))),
        ],
        sliders: vec![Some(SliderBinding::new(
            KeyCombo::ctrl(Keycode::F9),
            KeyCombo::ctrl(Keycode::F10),
        ))],
    }
}

fn media_bindings() -> ModeBindings {
    ModeBindings {
        buttons: vec![
            None,
            None,
            None,
            Some(ButtonBinding::new(ConsumerControlCode::PLAY_PAUSE).with_label("play")),
        ],
        sliders: vec![Some(
            SliderBinding::new(
                ConsumerControlCode::VOLUME_DECREMENT,
                ConsumerControlCode::VOLUME_INCREMENT,
            )
            .with_label("volume"),
        )],
    }
}

// Readings of a linear slider at positions 0.15, 0.35 and 0.95
const AT_0_15: [u16; 3] = [1700, 1300, UNTOUCHED];
const AT_0_35: [u16; 3] = [1300, 1700, UNTOUCHED];
const AT_0_95: [u16; 3] = [UNTOUCHED, 1100, 1900];

#[test]
fn initial_labels() {
    let harness = Harness::new(Topology::SLIDER.into());
    assert_eq!(TestMode::Hotkey, harness.event_loop.mode());
    assert_eq!(Some("Hotkey"), harness.label(LabelTarget::Title));
    assert_eq!(Some(""), harness.label(LabelTarget::Pad(PadId(3))));
    assert_eq!(Some(""), harness.label(LabelTarget::Slider(SliderId(0))));
    assert_eq!(None, harness.label(LabelTarget::Pad(MODE_SWITCH_PAD)));
}

#[test]
fn button_emits_once_per_press() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    for pressed in [false, true, true, false] {
        harness.set_pad(PadId(3), pressed);
        harness.tick();
    }
    assert_eq!(&[ctrl(Keycode::F4)], harness.sent());
    assert_eq!(
        vec![(PadId(3), true), (PadId(3), false)],
        harness.event_loop.indicator().pads
    );
}

#[test]
fn mode_switch_pad() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    let label_updates = harness.event_loop.indicator().label_updates;
    harness.set_pad(MODE_SWITCH_PAD, true);
    harness.tick();
    assert_eq!(TestMode::Media, harness.event_loop.mode());
    assert!(harness.sent().is_empty());
    assert!(harness.event_loop.indicator().label_updates > label_updates);
    assert_eq!(Some("Media"), harness.label(LabelTarget::Title));
    assert_eq!(Some("play"), harness.label(LabelTarget::Pad(PadId(3))));
    assert_eq!(Some("volume"), harness.label(LabelTarget::Slider(SliderId(0))));

    // Holding the pad does not switch again
    harness.tick();
    assert_eq!(TestMode::Media, harness.event_loop.mode());

    // Wraps around after the last mode
    harness.set_pad(MODE_SWITCH_PAD, false);
    harness.tick();
    harness.set_pad(MODE_SWITCH_PAD, true);
    harness.tick();
    assert_eq!(TestMode::Hotkey, harness.event_loop.mode());
    assert_eq!(Some(""), harness.label(LabelTarget::Pad(PadId(3))));
    assert!(harness.sent().is_empty());
}

#[test]
fn bindings_follow_mode() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    harness.event_loop.switch_to_next_mode();
    harness.set_pad(PadId(3), true);
    harness.tick();
    // Unbound in this mode
    harness.set_pad(PadId(0), true);
    harness.tick();
    assert_eq!(
        &[OutputCommand::from(ConsumerControlCode::PLAY_PAUSE)],
        harness.sent()
    );
}

#[test]
fn slider_sequence() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    // Values 8, 6, 6, 0 with deltas 0, -2, 0, -6
    for readings in [AT_0_15, AT_0_35, AT_0_35, AT_0_95] {
        harness.touch_slider(readings);
        harness.tick();
    }
    // 2 + 3 (clamped) decrements
    assert_eq!(vec![ctrl(Keycode::F9); 5], harness.sent());

    // Moving backwards increments
    harness.touch_slider(AT_0_35);
    harness.tick();
    assert_eq!(ctrl(Keycode::F10), harness.sent()[5]);
    assert_eq!(8, harness.sent().len());
}

#[test]
fn indicator_follows_slider() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    harness.touch_slider(AT_0_35);
    harness.tick();
    harness.release_slider();
    harness.tick();
    let positions = &harness.event_loop.indicator().positions;
    assert_eq!(2, positions.len());
    let (slider_id, position) = positions[0];
    assert_eq!(SliderId(0), slider_id);
    assert!((position.unwrap() - 0.35).abs() < 1e-5);
    assert_eq!((SliderId(0), None), positions[1]);
}

#[test]
fn release_forgets_last_value() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    harness.touch_slider(AT_0_15);
    harness.tick();
    harness.release_slider();
    harness.tick();
    harness.touch_slider(AT_0_95);
    harness.tick();
    assert!(harness.sent().is_empty());
}

#[test]
fn raw_delta_jumps_across_wheel_boundary() {
    let mut harness = Harness::new(Topology::WHEEL.into());
    // Positions ~0.95 and ~0.05
    harness.touch_slider([1600, UNTOUCHED, 1100]);
    harness.tick();
    harness.touch_slider([1600, 1100, UNTOUCHED]);
    harness.tick();
    assert_eq!(vec![ctrl(Keycode::F10); 3], harness.sent());
}

#[test]
fn wrap_aware_delta_across_wheel_boundary() {
    let slider_config =
        SliderConfig::new(Topology::WHEEL).with_delta_policy(DeltaPolicy::WrapAware);
    let mut harness = Harness::new(slider_config);
    harness.touch_slider([1600, UNTOUCHED, 1100]);
    harness.tick();
    harness.touch_slider([1600, 1100, UNTOUCHED]);
    harness.tick();
    assert_eq!(&[ctrl(Keycode::F9)], harness.sent());
}

#[test]
fn failing_sink_does_not_abort_the_loop() {
    let mut harness = Harness::new(Topology::SLIDER.into());
    harness.event_loop.output_sink_mut().fail = true;
    harness.set_pad(PadId(0), true);
    harness.tick();
    harness.event_loop.output_sink_mut().fail = false;
    harness.set_pad(PadId(0), false);
    harness.tick();
    harness.set_pad(PadId(0), true);
    harness.tick();
    assert_eq!(&[ctrl(Keycode::F1)], harness.sent());
}

#[test]
fn invalid_config_is_rejected() {
    let config = ControllerConfig {
        settings: Settings {
            segments: 0,
            ..Default::default()
        },
        sliders: vec![],
        mode_switch_pad: None,
        initial_mode: TestMode::Hotkey,
        mode_bindings: vec![
            (TestMode::Hotkey, ModeBindings::default()),
            (TestMode::Media, ModeBindings::default()),
        ],
    };
    let result = EventLoop::new(
        config,
        Vec::<[FakePad; 3]>::new(),
        vec![],
        RecordingSink::default(),
        RecordingIndicator::default(),
    );
    assert!(matches!(result, Err(ConfigError::ZeroSegments)));
}
