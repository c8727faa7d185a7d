// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Three faders, two wheels and nine button pads.
//!
//! The last button pad is labeled `*` and reserved for switching
//! modes in profiles with multiple modes.

use strum::{EnumCount, FromRepr, VariantArray};

use super::BoardDescriptor;
use crate::{PadId, SliderConfig, SliderId, Topology};

#[cfg(feature = "hid-profiles")]
pub mod hid;

#[cfg(feature = "midi-profiles")]
pub mod midi;

pub const NUM_PADS: usize = 9;

pub const BOARD_DESCRIPTOR: BoardDescriptor = BoardDescriptor {
    vendor_name: "todbot",
    model_name: "picoslidertoy",
    num_sliders: Slider::COUNT,
    num_pads: NUM_PADS,
};

/// The `*` pad.
pub const STAR_PAD: PadId = PadId(NUM_PADS - 1);

/// Rotation of the wheels, i.e. pad `A` is located at the bottom.
pub const WHEEL_PHASE_OFFSET: f32 = 0.25;

pub const FADER_TOPOLOGY: Topology = Topology::SLIDER;

pub const WHEEL_TOPOLOGY: Topology = Topology::WHEEL.with_phase_offset(WHEEL_PHASE_OFFSET);

/// Sliders in the order of their [`SliderId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, FromRepr, VariantArray)]
#[repr(u8)]
pub enum Slider {
    FaderA,
    FaderB,
    FaderC,
    WheelX,
    WheelY,
}

impl Slider {
    #[must_use]
    pub const fn id(self) -> SliderId {
        SliderId(self as usize)
    }

    #[must_use]
    pub const fn is_wheel(self) -> bool {
        matches!(self, Self::WheelX | Self::WheelY)
    }

    #[must_use]
    pub const fn topology(self) -> Topology {
        if self.is_wheel() {
            WHEEL_TOPOLOGY
        } else {
            FADER_TOPOLOGY
        }
    }
}

#[must_use]
pub fn slider_configs() -> Vec<SliderConfig> {
    Slider::VARIANTS
        .iter()
        .map(|slider| slider.topology().into())
        .collect()
}
