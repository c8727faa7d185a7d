// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

use derive_more::{Display, From};

pub mod action;
pub use self::action::{
    ActionTable, ButtonBinding, Control, ControlGroup, Direction, Mode, ModeBindings,
    ResolvedAction, SingleMode, SliderAction, SliderBinding,
};

pub mod config;
pub use self::config::{ConfigError, ControllerConfig, Settings, SliderConfig};

pub mod devices;

pub mod event_loop;
pub use self::event_loop::EventLoop;
#[cfg(feature = "tick-thread")]
pub use self::event_loop::TickThread;

pub mod indicator;
pub use self::indicator::{Indicator, LabelTarget, NoIndicator};

#[cfg(feature = "midi")]
pub mod midi;
#[cfg(feature = "midi")]
pub use self::midi::{
    AbsoluteControlChange, MidiChannel, MidiCommand, MidiMessage, MidiOutputConnection,
    MidiOutputGateway,
};

pub mod output;
pub use self::output::{
    ConsumerControlCode, KeyCombo, Keycode, OutputCommand, OutputError, OutputResult, OutputSink,
};

pub mod pad;
pub use self::pad::{CalibratedPad, PadReading, RawSensor, TouchPad};

pub mod position;
pub use self::position::{decode, decode_readings, Topology, TouchSlider};

pub mod quantize;
pub use self::quantize::{quantize, segment_delta, DeltaPolicy};

/// Stable identifier of a slider or wheel.
///
/// Indexes the sliders in the order they have been configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
pub struct SliderId(pub usize);

/// Stable identifier of a single button pad.
///
/// Indexes the button pads in the order they have been configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
pub struct PadId(pub usize);
