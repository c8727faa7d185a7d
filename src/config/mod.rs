// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Static configuration that is validated once at startup.

use std::num::{NonZeroU16, NonZeroU8};

use thiserror::Error;

use crate::{ActionTable, DeltaPolicy, Mode, ModeBindings, PadId, SliderId, Topology};

/// Tolerance for rounding errors of the sector scale.
const RANGE_END_EPSILON: f32 = 1e-3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("number of segments must be positive")]
    ZeroSegments,
    #[error("maximum number of repeats must be positive")]
    ZeroMaxRepeats,
    #[error("no modes")]
    NoModes,
    #[error("no bindings for mode {mode}")]
    MissingModeBindings { mode: String },
    #[error("duplicate bindings for mode {mode}")]
    DuplicateModeBindings { mode: String },
    #[error("{configured} sliders configured, but {actual} available")]
    SliderCountMismatch { configured: usize, actual: usize },
    #[error("mode {mode} binds {bindings} buttons, but only {pads} pads are available")]
    TooManyButtonBindings {
        mode: String,
        bindings: usize,
        pads: usize,
    },
    #[error("mode {mode} binds {bindings} sliders, but only {sliders} sliders are available")]
    TooManySliderBindings {
        mode: String,
        bindings: usize,
        sliders: usize,
    },
    #[error("mode switch pad {pad_id} out of range, only {pads} pads are available")]
    ModeSwitchPadOutOfRange { pad_id: PadId, pads: usize },
    #[error("mode switch pad {pad_id} is bound to an action in mode {mode}")]
    ModeSwitchPadBound { pad_id: PadId, mode: String },
    #[error("invalid topology of slider {slider_id}: {reason}")]
    InvalidTopology {
        slider_id: SliderId,
        reason: &'static str,
    },
}

/// Global settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Default number of segments per slider.
    ///
    /// Increase for more sensitivity.
    pub segments: u16,

    /// Upper bound for repeating a command on fast slider movements.
    pub max_repeats: u8,

    pub delta_policy: DeltaPolicy,
}

impl Settings {
    pub const DEFAULT_SEGMENTS: u16 = 32;
    pub const DEFAULT_MAX_REPEATS: u8 = 3;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            segments: Self::DEFAULT_SEGMENTS,
            max_repeats: Self::DEFAULT_MAX_REPEATS,
            delta_policy: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub topology: Topology,

    /// Overrides the global delta policy.
    pub delta_policy: Option<DeltaPolicy>,
}

impl SliderConfig {
    #[must_use]
    pub const fn new(topology: Topology) -> Self {
        Self {
            topology,
            delta_policy: None,
        }
    }

    #[must_use]
    pub const fn with_delta_policy(mut self, delta_policy: DeltaPolicy) -> Self {
        self.delta_policy = Some(delta_policy);
        self
    }
}

impl From<Topology> for SliderConfig {
    fn from(from: Topology) -> Self {
        Self::new(from)
    }
}

/// Configuration of a controller with modes `M`.
#[derive(Debug, Clone)]
pub struct ControllerConfig<M> {
    pub settings: Settings,

    /// One entry per slider, in the order of the sliders.
    pub sliders: Vec<SliderConfig>,

    /// Pressing this pad switches to the next mode.
    pub mode_switch_pad: Option<PadId>,

    pub initial_mode: M,

    /// Exactly one entry per mode.
    pub mode_bindings: Vec<(M, ModeBindings)>,
}

/// Per-slider parameters after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SliderParams {
    pub(crate) topology: Topology,
    pub(crate) delta_policy: DeltaPolicy,
}

#[derive(Debug)]
pub(crate) struct ValidatedConfig<M> {
    pub(crate) action_table: ActionTable<M>,
    pub(crate) sliders: Vec<SliderParams>,
    pub(crate) initial_mode: M,
}

fn validate_topology(topology: &Topology) -> Result<(), &'static str> {
    let Topology {
        sector_scale,
        phase_offset,
        ..
    } = *topology;
    if !sector_scale.is_finite() || sector_scale <= 0.0 {
        return Err("sector scale must be positive");
    }
    if topology.range_end() > 1.0 + RANGE_END_EPSILON {
        return Err("sectors exceed the full range");
    }
    if !(0.0..1.0).contains(&phase_offset) {
        return Err("phase offset must be in [0, 1)");
    }
    Ok(())
}

impl<M: Mode> ControllerConfig<M> {
    /// Validate the configuration against the available controls.
    pub(crate) fn validate(
        self,
        num_sliders: usize,
        num_pads: usize,
    ) -> Result<ValidatedConfig<M>, ConfigError> {
        let Self {
            settings,
            sliders,
            mode_switch_pad,
            initial_mode,
            mode_bindings,
        } = self;
        let segments = NonZeroU16::new(settings.segments).ok_or(ConfigError::ZeroSegments)?;
        let max_repeats = NonZeroU8::new(settings.max_repeats).ok_or(ConfigError::ZeroMaxRepeats)?;
        if M::VARIANTS.is_empty() {
            return Err(ConfigError::NoModes);
        }
        if sliders.len() != num_sliders {
            return Err(ConfigError::SliderCountMismatch {
                configured: sliders.len(),
                actual: num_sliders,
            });
        }
        let sliders = sliders
            .into_iter()
            .enumerate()
            .map(|(index, slider)| {
                validate_topology(&slider.topology).map_err(|reason| {
                    ConfigError::InvalidTopology {
                        slider_id: SliderId(index),
                        reason,
                    }
                })?;
                Ok(SliderParams {
                    topology: slider.topology,
                    delta_policy: slider.delta_policy.unwrap_or(settings.delta_policy),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(pad_id) = mode_switch_pad {
            if pad_id.0 >= num_pads {
                return Err(ConfigError::ModeSwitchPadOutOfRange {
                    pad_id,
                    pads: num_pads,
                });
            }
        }
        let mut ordered_bindings = vec![None; M::VARIANTS.len()];
        for (mode, bindings) in mode_bindings {
            let name = || mode.as_ref().to_owned();
            if bindings.buttons.len() > num_pads {
                return Err(ConfigError::TooManyButtonBindings {
                    mode: name(),
                    bindings: bindings.buttons.len(),
                    pads: num_pads,
                });
            }
            if bindings.sliders.len() > num_sliders {
                return Err(ConfigError::TooManySliderBindings {
                    mode: name(),
                    bindings: bindings.sliders.len(),
                    sliders: num_sliders,
                });
            }
            if let Some(pad_id) = mode_switch_pad {
                if bindings.button(pad_id).is_some() {
                    return Err(ConfigError::ModeSwitchPadBound {
                        pad_id,
                        mode: name(),
                    });
                }
            }
            let slot = &mut ordered_bindings[mode.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateModeBindings { mode: name() });
            }
            *slot = Some(bindings);
        }
        let bindings = ordered_bindings
            .into_iter()
            .zip(M::VARIANTS)
            .map(|(bindings, mode)| {
                bindings.ok_or_else(|| ConfigError::MissingModeBindings {
                    mode: mode.as_ref().to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let action_table = ActionTable::new(bindings, segments, max_repeats, mode_switch_pad);
        Ok(ValidatedConfig {
            action_table,
            sliders,
            initial_mode,
        })
    }
}
