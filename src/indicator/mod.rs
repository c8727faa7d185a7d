// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Purely presentational feedback, e.g. on a small display.

use std::ops::{Deref, DerefMut};

use crate::{PadId, SliderId};

/// Target of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelTarget {
    /// Shows the name of the current mode.
    Title,
    Pad(PadId),
    Slider(SliderId),
}

/// Renders the state of the controls.
///
/// Never fails. Implementations should ignore unknown targets.
pub trait Indicator {
    /// Update the position of a slider, `None` if untouched.
    fn set_position(&mut self, slider_id: SliderId, position: Option<f32>);

    fn set_pad(&mut self, pad_id: PadId, pressed: bool);

    /// An empty text clears the label.
    fn set_label(&mut self, target: LabelTarget, text: &str);
}

impl<D> Indicator for D
where
    D: DerefMut,
    <D as Deref>::Target: Indicator,
{
    fn set_position(&mut self, slider_id: SliderId, position: Option<f32>) {
        self.deref_mut().set_position(slider_id, position);
    }

    fn set_pad(&mut self, pad_id: PadId, pressed: bool) {
        self.deref_mut().set_pad(pad_id, pressed);
    }

    fn set_label(&mut self, target: LabelTarget, text: &str) {
        self.deref_mut().set_label(target, text);
    }
}

/// Discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn set_position(&mut self, _slider_id: SliderId, _position: Option<f32>) {}

    fn set_pad(&mut self, _pad_id: PadId, _pressed: bool) {}

    fn set_label(&mut self, _target: LabelTarget, _text: &str) {}
}
