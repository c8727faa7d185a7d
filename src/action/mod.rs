// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Mode-dependent mapping of controls onto output commands.

use std::{
    borrow::Cow,
    fmt,
    marker::PhantomData,
    num::{NonZeroU16, NonZeroU8},
};

use strum::{AsRefStr, EnumIs, VariantArray};

#[cfg(feature = "midi")]
use crate::midi::AbsoluteControlChange;
use crate::{OutputCommand, PadId, SliderId};

/// A named set of bindings.
///
/// Modes are switched in the declaration order of the variants, wrapping
/// around after the last one.
pub trait Mode: Copy + Eq + fmt::Debug + AsRef<str> + VariantArray + 'static {
    /// The mode that follows `self` cyclically.
    #[must_use]
    fn next(self) -> Self {
        let variants = Self::VARIANTS;
        let Some(index) = variants.iter().position(|mode| *mode == self) else {
            return self;
        };
        variants[(index + 1) % variants.len()]
    }

    /// Position in the cyclic order.
    #[must_use]
    fn index(self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or_default()
    }
}

impl<M> Mode for M where M: Copy + Eq + fmt::Debug + AsRef<str> + VariantArray + 'static {}

/// The only mode of a controller that never switches modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, VariantArray)]
pub enum SingleMode {
    #[default]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum ControlGroup {
    Button,
    Slider,
}

/// Direction of a slider movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Direction {
    Decrement,
    Increment,
}

impl Direction {
    /// Direction from the sign of a segment delta.
    ///
    /// `None` if there is no movement.
    #[must_use]
    pub const fn from_delta(delta: i32) -> Option<Self> {
        if delta < 0 {
            Some(Self::Decrement)
        } else if delta > 0 {
            Some(Self::Increment)
        } else {
            None
        }
    }
}

/// Identifies an abstract control for looking up its binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Button(PadId),
    Slider(SliderId, Direction),
}

impl Control {
    #[must_use]
    pub const fn group(self) -> ControlGroup {
        match self {
            Self::Button(_) => ControlGroup::Button,
            Self::Slider(..) => ControlGroup::Slider,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Button(PadId(index)) | Self::Slider(SliderId(index), _) => index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBinding {
    pub command: OutputCommand,
    pub label: Option<Cow<'static, str>>,
}

impl ButtonBinding {
    #[must_use]
    pub fn new(command: impl Into<OutputCommand>) -> Self {
        Self {
            command: command.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What a slider sends when its segment value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderAction {
    /// A command per segment step, depending on the direction of the movement.
    Steps {
        decrement: OutputCommand,
        increment: OutputCommand,
    },

    /// The new segment value as an absolute control change.
    #[cfg(feature = "midi")]
    AbsoluteControlChange(AbsoluteControlChange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderBinding {
    pub action: SliderAction,
    pub label: Option<Cow<'static, str>>,

    /// Overrides the default number of segments, i.e. the sensitivity.
    pub segments: Option<NonZeroU16>,
}

impl SliderBinding {
    /// Step commands for both directions.
    #[must_use]
    pub fn new(decrement: impl Into<OutputCommand>, increment: impl Into<OutputCommand>) -> Self {
        Self::with_action(SliderAction::Steps {
            decrement: decrement.into(),
            increment: increment.into(),
        })
    }

    #[cfg(feature = "midi")]
    #[must_use]
    pub const fn absolute_control_change(control_change: AbsoluteControlChange) -> Self {
        Self::with_action(SliderAction::AbsoluteControlChange(control_change))
    }

    #[must_use]
    pub const fn with_action(action: SliderAction) -> Self {
        Self {
            action,
            label: None,
            segments: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_segments(mut self, segments: NonZeroU16) -> Self {
        self.segments = Some(segments);
        self
    }

    /// The step command for a direction.
    ///
    /// `None` if the slider sends absolute values.
    #[must_use]
    pub const fn command(&self, direction: Direction) -> Option<&OutputCommand> {
        match &self.action {
            SliderAction::Steps {
                decrement,
                increment,
            } => match direction {
                Direction::Decrement => Some(decrement),
                Direction::Increment => Some(increment),
            },
            #[cfg(feature = "midi")]
            SliderAction::AbsoluteControlChange(_) => None,
        }
    }

    /// The command that reports an absolute segment value.
    ///
    /// `None` if the slider sends steps.
    #[must_use]
    #[cfg_attr(not(feature = "midi"), allow(unused_variables))]
    pub fn value_command(&self, value: u16) -> Option<OutputCommand> {
        match &self.action {
            SliderAction::Steps { .. } => None,
            #[cfg(feature = "midi")]
            SliderAction::AbsoluteControlChange(control_change) => {
                Some(control_change.command(value).into())
            }
        }
    }
}

/// All bindings of a single mode, indexed by control.
///
/// Controls without a binding are either `None` or beyond the end
/// of the respective vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeBindings {
    pub buttons: Vec<Option<ButtonBinding>>,
    pub sliders: Vec<Option<SliderBinding>>,
}

impl ModeBindings {
    #[must_use]
    pub fn button(&self, pad_id: PadId) -> Option<&ButtonBinding> {
        self.buttons.get(pad_id.0).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn slider(&self, slider_id: SliderId) -> Option<&SliderBinding> {
        self.sliders.get(slider_id.0).and_then(Option::as_ref)
    }
}

/// A command that should be sent `repeats` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAction<'a> {
    pub command: &'a OutputCommand,
    pub repeats: NonZeroU8,
}

/// Immutable bindings of all modes.
///
/// Constructed from a validated [`ControllerConfig`](crate::ControllerConfig).
#[derive(Debug, Clone)]
pub struct ActionTable<M> {
    // Indexed by `Mode::index()`
    bindings: Vec<ModeBindings>,
    default_segments: NonZeroU16,
    max_repeats: NonZeroU8,
    mode_switch_pad: Option<PadId>,
    _mode: PhantomData<M>,
}

impl<M: Mode> ActionTable<M> {
    /// The bindings must be ordered like `M::VARIANTS`.
    pub(crate) fn new(
        bindings: Vec<ModeBindings>,
        default_segments: NonZeroU16,
        max_repeats: NonZeroU8,
        mode_switch_pad: Option<PadId>,
    ) -> Self {
        debug_assert_eq!(M::VARIANTS.len(), bindings.len());
        Self {
            bindings,
            default_segments,
            max_repeats,
            mode_switch_pad,
            _mode: PhantomData,
        }
    }

    #[must_use]
    pub const fn max_repeats(&self) -> NonZeroU8 {
        self.max_repeats
    }

    #[must_use]
    pub const fn mode_switch_pad(&self) -> Option<PadId> {
        self.mode_switch_pad
    }

    #[must_use]
    pub fn mode_bindings(&self, mode: M) -> Option<&ModeBindings> {
        self.bindings.get(mode.index())
    }

    /// Number of segments of a slider in the given mode.
    #[must_use]
    pub fn segments(&self, mode: M, slider_id: SliderId) -> NonZeroU16 {
        self.mode_bindings(mode)
            .and_then(|bindings| bindings.slider(slider_id))
            .and_then(|binding| binding.segments)
            .unwrap_or(self.default_segments)
    }

    /// Look up the command of a control.
    ///
    /// The number of repeats is `magnitude` clamped to `1..=max_repeats`.
    /// Returns `None` for the mode switch pad and for unbound controls.
    #[must_use]
    pub fn resolve(&self, mode: M, control: Control, magnitude: u32) -> Option<ResolvedAction<'_>> {
        let Some(bindings) = self.mode_bindings(mode) else {
            log::debug!("No bindings for mode {mode:?}");
            return None;
        };
        let command = match control {
            Control::Button(pad_id) => {
                if self.mode_switch_pad == Some(pad_id) {
                    log::debug!("Pad {pad_id} switches modes");
                    return None;
                }
                bindings.button(pad_id).map(|binding| &binding.command)
            }
            Control::Slider(slider_id, direction) => bindings
                .slider(slider_id)
                .and_then(|binding| binding.command(direction)),
        };
        let Some(command) = command else {
            log::debug!("Unmapped control {control:?} in mode {mode:?}");
            return None;
        };
        let magnitude = NonZeroU8::new(u8::try_from(magnitude).unwrap_or(u8::MAX))
            .unwrap_or(NonZeroU8::MIN);
        let repeats = magnitude.min(self.max_repeats);
        Some(ResolvedAction { command, repeats })
    }

    /// Look up the command that reports the new segment value of a slider.
    ///
    /// Returns `None` for unbound sliders and for sliders that send steps.
    #[must_use]
    pub fn resolve_value(&self, mode: M, slider_id: SliderId, value: u16) -> Option<OutputCommand> {
        self.mode_bindings(mode)?
            .slider(slider_id)?
            .value_command(value)
    }
}
