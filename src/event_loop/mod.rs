// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Polling loop that turns pad readings into output commands.

use crate::{
    config::SliderParams, quantize::quantize_with_policy, ActionTable, ConfigError, Control,
    ControllerConfig, Direction, Indicator, LabelTarget, Mode, OutputCommand, OutputSink, PadId,
    ResolvedAction, SliderId, TouchPad, TouchSlider,
};

#[cfg(feature = "tick-thread")]
mod thread;
#[cfg(feature = "tick-thread")]
pub use self::thread::TickThread;

#[derive(Debug)]
struct SliderControl<P> {
    slider: TouchSlider<P>,
    params: SliderParams,
    last_value: Option<u16>,
}

#[derive(Debug)]
struct PadControl<P> {
    pad: P,
    pressed: bool,
}

/// Samples all controls once per tick and emits commands on changes.
///
/// Sliders are polled before button pads, both in ascending order.
/// Runtime errors are logged and never abort the loop.
#[allow(missing_debug_implementations)]
pub struct EventLoop<M, P, S, I> {
    action_table: ActionTable<M>,
    mode: M,
    sliders: Vec<SliderControl<P>>,
    pads: Vec<PadControl<P>>,
    output_sink: S,
    indicator: I,
}

impl<M, P, S, I> EventLoop<M, P, S, I>
where
    M: Mode,
    P: TouchPad,
    S: OutputSink,
    I: Indicator,
{
    /// Validate the configuration and set up the initial labels.
    pub fn new(
        config: ControllerConfig<M>,
        sliders: Vec<[P; 3]>,
        pads: Vec<P>,
        output_sink: S,
        indicator: I,
    ) -> Result<Self, ConfigError> {
        let config = config.validate(sliders.len(), pads.len())?;
        let sliders = sliders
            .into_iter()
            .zip(config.sliders)
            .map(|(pads, params)| SliderControl {
                slider: TouchSlider::new(pads, params.topology),
                params,
                last_value: None,
            })
            .collect();
        let pads = pads
            .into_iter()
            .map(|pad| PadControl {
                pad,
                pressed: false,
            })
            .collect();
        let mut event_loop = Self {
            action_table: config.action_table,
            mode: config.initial_mode,
            sliders,
            pads,
            output_sink,
            indicator,
        };
        log::info!("Starting in mode {mode:?}", mode = event_loop.mode);
        event_loop.refresh_labels();
        Ok(event_loop)
    }

    #[must_use]
    pub const fn mode(&self) -> M {
        self.mode
    }

    #[must_use]
    pub const fn action_table(&self) -> &ActionTable<M> {
        &self.action_table
    }

    #[must_use]
    pub const fn output_sink(&self) -> &S {
        &self.output_sink
    }

    pub fn output_sink_mut(&mut self) -> &mut S {
        &mut self.output_sink
    }

    #[must_use]
    pub const fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    #[must_use]
    pub fn num_sliders(&self) -> usize {
        self.sliders.len()
    }

    #[must_use]
    pub fn num_pads(&self) -> usize {
        self.pads.len()
    }

    /// Switch to another mode and refresh all labels.
    ///
    /// Forgets the last segments of all sliders, because the
    /// number of segments might differ between modes.
    pub fn set_mode(&mut self, mode: M) {
        log::info!("Switching mode from {old:?} to {mode:?}", old = self.mode);
        self.mode = mode;
        for control in &mut self.sliders {
            control.last_value = None;
        }
        self.refresh_labels();
    }

    pub fn switch_to_next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    /// Update the title and the labels of all controls for the current mode.
    ///
    /// Unlabeled controls get an empty label. The mode switch pad
    /// is skipped.
    pub fn refresh_labels(&mut self) {
        let Self {
            action_table,
            mode,
            sliders,
            pads,
            indicator,
            ..
        } = self;
        let mode = *mode;
        indicator.set_label(LabelTarget::Title, mode.as_ref());
        let bindings = action_table.mode_bindings(mode);
        for pad_id in (0..pads.len()).map(PadId) {
            if action_table.mode_switch_pad() == Some(pad_id) {
                continue;
            }
            let label = bindings
                .and_then(|bindings| bindings.button(pad_id))
                .and_then(|binding| binding.label.as_deref())
                .unwrap_or_default();
            indicator.set_label(LabelTarget::Pad(pad_id), label);
        }
        for slider_id in (0..sliders.len()).map(SliderId) {
            let label = bindings
                .and_then(|bindings| bindings.slider(slider_id))
                .and_then(|binding| binding.label.as_deref())
                .unwrap_or_default();
            indicator.set_label(LabelTarget::Slider(slider_id), label);
        }
    }

    /// Run a single polling cycle.
    pub fn run_tick(&mut self) {
        for slider_id in (0..self.sliders.len()).map(SliderId) {
            self.poll_slider(slider_id);
        }
        for pad_id in (0..self.pads.len()).map(PadId) {
            self.poll_pad(pad_id);
        }
    }

    fn poll_slider(&mut self, slider_id: SliderId) {
        let Self {
            action_table,
            mode,
            sliders,
            output_sink,
            indicator,
            ..
        } = self;
        let Some(control) = sliders.get_mut(slider_id.0) else {
            return;
        };
        let position = control.slider.read_position();
        indicator.set_position(slider_id, position);
        let Some(position) = position else {
            control.last_value = None;
            return;
        };
        let segments = action_table.segments(*mode, slider_id);
        let prev_value = control.last_value;
        let (value, delta) = quantize_with_policy(
            Some(position),
            segments,
            prev_value,
            control.params.delta_policy,
        );
        control.last_value = value;
        let Some(value) = value else {
            return;
        };
        log::debug!("slider {slider_id}: {position:.2} value {value} delta {delta}");
        if prev_value == Some(value) {
            return;
        }
        if let Some(command) = action_table.resolve_value(*mode, slider_id, value) {
            send_repeated(output_sink, &command, 1);
            return;
        }
        let Some(direction) = Direction::from_delta(delta) else {
            return;
        };
        emit(
            action_table,
            *mode,
            Control::Slider(slider_id, direction),
            delta.unsigned_abs(),
            output_sink,
        );
    }

    fn poll_pad(&mut self, pad_id: PadId) {
        let Some(control) = self.pads.get_mut(pad_id.0) else {
            return;
        };
        let pressed = control.pad.is_pressed();
        if pressed == control.pressed {
            return;
        }
        control.pressed = pressed;
        log::debug!("pad {pad_id}: {pressed}");
        self.indicator.set_pad(pad_id, pressed);
        if !pressed {
            return;
        }
        if self.action_table.mode_switch_pad() == Some(pad_id) {
            self.switch_to_next_mode();
            return;
        }
        emit(
            &self.action_table,
            self.mode,
            Control::Button(pad_id),
            1,
            &mut self.output_sink,
        );
    }
}

fn emit<M: Mode>(
    action_table: &ActionTable<M>,
    mode: M,
    control: Control,
    magnitude: u32,
    output_sink: &mut impl OutputSink,
) {
    let Some(ResolvedAction { command, repeats }) = action_table.resolve(mode, control, magnitude)
    else {
        return;
    };
    send_repeated(output_sink, command, repeats.get());
}

fn send_repeated(output_sink: &mut impl OutputSink, command: &OutputCommand, repeats: u8) {
    for _ in 0..repeats {
        if let Err(err) = output_sink.send_command(command) {
            log::warn!("Failed to send {command:?}: {err}");
            break;
        }
    }
}

#[cfg(test)]
mod tests;
