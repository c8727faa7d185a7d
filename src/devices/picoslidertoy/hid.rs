// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Keyboard and media control profiles.

use std::num::NonZeroU16;

use strum::{AsRefStr, VariantArray};

use super::{slider_configs, STAR_PAD};
use crate::{
    ButtonBinding, ConsumerControlCode, ControllerConfig, DeltaPolicy, KeyCombo, Keycode,
    ModeBindings, Settings, SingleMode, SliderBinding,
};

const EIGHT: NonZeroU16 = match NonZeroU16::new(8) {
    Some(segments) => segments,
    None => unreachable!(),
};

/// Modes of the [`sliders_config()`] profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, VariantArray)]
pub enum HidMode {
    #[default]
    Hotkey,
    Media,
}

fn ctrl_button(key: Keycode) -> Option<ButtonBinding> {
    Some(ButtonBinding::new(KeyCombo::ctrl(key)))
}

fn ctrl_slider(decrement: Keycode, increment: Keycode) -> Option<SliderBinding> {
    Some(SliderBinding::new(
        KeyCombo::ctrl(decrement),
        KeyCombo::ctrl(increment),
    ))
}

fn media_button(code: ConsumerControlCode, label: &'static str) -> Option<ButtonBinding> {
    Some(ButtonBinding::new(code).with_label(label))
}

fn media_slider(
    decrement: ConsumerControlCode,
    increment: ConsumerControlCode,
    label: &'static str,
) -> SliderBinding {
    SliderBinding::new(decrement, increment).with_label(label)
}

/// Hotkeys on all controls, including the `*` pad.
///
/// Each slider step sends a single key combo.
#[must_use]
pub fn hotkeys_config() -> ControllerConfig<SingleMode> {
    let bindings = ModeBindings {
        buttons: [
            Keycode::F1,
            Keycode::F2,
            Keycode::F3,
            Keycode::F4,
            Keycode::F5,
            Keycode::F6,
            Keycode::F7,
            Keycode::F8,
            Keycode::F9,
        ]
        .into_iter()
        .map(ctrl_button)
        .collect(),
        sliders: vec![
            ctrl_slider(Keycode::F10, Keycode::F11),
            ctrl_slider(Keycode::F12, Keycode::F13),
            ctrl_slider(Keycode::F14, Keycode::F15),
            ctrl_slider(Keycode::F16, Keycode::F17),
            ctrl_slider(Keycode::F18, Keycode::F19),
        ],
    };
    ControllerConfig {
        settings: Settings {
            segments: 16,
            max_repeats: 1,
            delta_policy: DeltaPolicy::Raw,
        },
        sliders: slider_configs(),
        mode_switch_pad: None,
        initial_mode: SingleMode::Default,
        mode_bindings: vec![(SingleMode::Default, bindings)],
    }
}

/// Media controls with a coarse rewind/fast-forward wheel.
#[must_use]
pub fn media_config() -> ControllerConfig<SingleMode> {
    let bindings = ModeBindings {
        buttons: vec![
            ctrl_button(Keycode::F1),
            ctrl_button(Keycode::F2),
            ctrl_button(Keycode::F3),
            ctrl_button(Keycode::F4),
            media_button(ConsumerControlCode::EJECT, "⏏️"),
            media_button(ConsumerControlCode::MUTE, "🔇"),
            media_button(ConsumerControlCode::SCAN_PREVIOUS_TRACK, "⏮️"),
            media_button(ConsumerControlCode::SCAN_NEXT_TRACK, "⏭️"),
            media_button(ConsumerControlCode::PLAY_PAUSE, "⏯️"),
        ],
        sliders: vec![
            ctrl_slider(Keycode::F9, Keycode::F10),
            ctrl_slider(Keycode::F11, Keycode::F12),
            Some(media_slider(
                ConsumerControlCode::BRIGHTNESS_DECREMENT,
                ConsumerControlCode::BRIGHTNESS_INCREMENT,
                "🔆",
            )),
            Some(
                media_slider(
                    ConsumerControlCode::REWIND,
                    ConsumerControlCode::FAST_FORWARD,
                    "⏩",
                )
                .with_segments(EIGHT),
            ),
            Some(media_slider(
                ConsumerControlCode::VOLUME_DECREMENT,
                ConsumerControlCode::VOLUME_INCREMENT,
                "🔊",
            )),
        ],
    };
    ControllerConfig {
        settings: Settings {
            segments: 16,
            max_repeats: 1,
            delta_policy: DeltaPolicy::Raw,
        },
        sliders: slider_configs(),
        mode_switch_pad: None,
        initial_mode: SingleMode::Default,
        mode_bindings: vec![(SingleMode::Default, bindings)],
    }
}

/// Switches between [`HidMode::Hotkey`] and [`HidMode::Media`] with the `*` pad.
#[must_use]
pub fn sliders_config() -> ControllerConfig<HidMode> {
    let hotkey = ModeBindings {
        buttons: [
            Keycode::F1,
            Keycode::F2,
            Keycode::F3,
            Keycode::F4,
            Keycode::F5,
            Keycode::F6,
            Keycode::F7,
            Keycode::F8,
        ]
        .into_iter()
        .map(ctrl_button)
        .collect(),
        sliders: vec![
            ctrl_slider(Keycode::F9, Keycode::F10),
            ctrl_slider(Keycode::F11, Keycode::F12),
            ctrl_slider(Keycode::F13, Keycode::F14),
            ctrl_slider(Keycode::F15, Keycode::F16),
            ctrl_slider(Keycode::F17, Keycode::F18),
        ],
    };
    let media = ModeBindings {
        buttons: vec![
            ctrl_button(Keycode::F1),
            ctrl_button(Keycode::F2),
            ctrl_button(Keycode::F3),
            media_button(ConsumerControlCode::MUTE, "🔇"),
            media_button(ConsumerControlCode::EJECT, "⏏️"),
            media_button(ConsumerControlCode::SCAN_PREVIOUS_TRACK, "⏮️"),
            media_button(ConsumerControlCode::SCAN_NEXT_TRACK, "⏭️"),
            media_button(ConsumerControlCode::PLAY_PAUSE, "⏯️"),
        ],
        sliders: vec![
            ctrl_slider(Keycode::F9, Keycode::F10),
            ctrl_slider(Keycode::F11, Keycode::F12),
            Some(media_slider(
                ConsumerControlCode::BRIGHTNESS_DECREMENT,
                ConsumerControlCode::BRIGHTNESS_INCREMENT,
                "🔆",
            )),
            Some(media_slider(
                ConsumerControlCode::REWIND,
                ConsumerControlCode::FAST_FORWARD,
                "⏩",
            )),
            Some(media_slider(
                ConsumerControlCode::VOLUME_DECREMENT,
                ConsumerControlCode::VOLUME_INCREMENT,
                "🔊",
            )),
        ],
    };
    ControllerConfig {
        settings: Settings::default(),
        sliders: slider_configs(),
        mode_switch_pad: Some(STAR_PAD),
        initial_mode: HidMode::default(),
        mode_bindings: vec![(HidMode::Hotkey, hotkey), (HidMode::Media, media)],
    }
}
