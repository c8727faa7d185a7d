// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Presets of supported boards.

pub mod picoslidertoy;

/// Static properties of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDescriptor {
    pub vendor_name: &'static str,
    pub model_name: &'static str,
    pub num_sliders: usize,
    pub num_pads: usize,
}

impl BoardDescriptor {
    #[must_use]
    pub fn name(&self) -> String {
        let Self {
            vendor_name,
            model_name,
            ..
        } = self;
        format!("{vendor_name} {model_name}")
    }
}
