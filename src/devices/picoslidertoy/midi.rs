// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! MIDI controller profile.
//!
//! Sliders send absolute control changes, button pads trigger notes.

use std::num::NonZeroU16;

use strum::EnumCount;

use super::{slider_configs, Slider, NUM_PADS};
use crate::{
    AbsoluteControlChange, ButtonBinding, ControllerConfig, MidiChannel, MidiCommand,
    ModeBindings, Settings, SingleMode, SliderBinding,
};

pub const CONTROL_NUMBERS: [u8; Slider::COUNT] = [73, 1, 72, 74, 71];

pub const NOTE_NUMBERS: [u8; NUM_PADS] = [34, 35, 36, 37, 38, 39, 40, 41, 24];

pub const NOTE_VELOCITY: u8 = 127;

/// One segment per 7-bit control value.
pub const ABSOLUTE_SEGMENTS: NonZeroU16 = match NonZeroU16::new(128) {
    Some(segments) => segments,
    None => unreachable!(),
};

pub const DEFAULT_CHANNEL: MidiChannel = match MidiChannel::from_number(1) {
    Some(channel) => channel,
    None => unreachable!(),
};

/// How the sliders report their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaderOutput {
    /// The segment value, `127` at position 0 and `0` at the end.
    #[default]
    Absolute,

    /// A single relative step per segment.
    Relative,
}

/// Absolute control changes on all sliders.
#[must_use]
pub fn midi_config(channel: MidiChannel) -> ControllerConfig<SingleMode> {
    midi_config_with_fader_output(channel, FaderOutput::Absolute)
}

#[must_use]
pub fn midi_config_with_fader_output(
    channel: MidiChannel,
    fader_output: FaderOutput,
) -> ControllerConfig<SingleMode> {
    let slider_binding = |control: u8| match fader_output {
        FaderOutput::Absolute => SliderBinding::absolute_control_change(
            AbsoluteControlChange::new(channel, control),
        )
        .with_segments(ABSOLUTE_SEGMENTS),
        FaderOutput::Relative => SliderBinding::new(
            MidiCommand::relative_control_change(channel, control, false),
            MidiCommand::relative_control_change(channel, control, true),
        ),
    };
    let bindings = ModeBindings {
        buttons: NOTE_NUMBERS
            .into_iter()
            .map(|note| {
                Some(ButtonBinding::new(MidiCommand::NoteTrigger {
                    channel,
                    note,
                    velocity: NOTE_VELOCITY,
                }))
            })
            .collect(),
        sliders: CONTROL_NUMBERS
            .into_iter()
            .map(|control| Some(slider_binding(control)))
            .collect(),
    };
    ControllerConfig {
        settings: Settings::default(),
        sliders: slider_configs(),
        mode_switch_pad: None,
        initial_mode: SingleMode::Default,
        mode_bindings: vec![(SingleMode::Default, bindings)],
    }
}
