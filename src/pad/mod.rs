// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Capacitive touch pads.
//!
//! A pad reports a raw capacitance count that rises when a finger
//! approaches the electrode. The baseline threshold is the count of
//! the untouched pad plus some headroom for noise.

use std::{
    num::NonZeroU16,
    ops::{Deref, DerefMut},
};

/// Number of baseline samples that are averaged during calibration.
pub const DEFAULT_CALIBRATION_SAMPLES: NonZeroU16 = match NonZeroU16::new(16) {
    Some(num_samples) => num_samples,
    None => unreachable!(),
};

/// Headroom that is added on top of the measured baseline.
pub const DEFAULT_THRESHOLD_OFFSET: u16 = 100;

/// A single snapshot of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadReading {
    pub raw: u16,
    pub threshold: u16,
}

impl PadReading {
    #[must_use]
    pub const fn new(raw: u16, threshold: u16) -> Self {
        Self { raw, threshold }
    }

    /// Relative overshoot of the raw count above the threshold.
    ///
    /// Negative if the raw count is below the threshold. `None` for
    /// an uncalibrated pad with a zero threshold.
    #[must_use]
    pub fn overshoot(self) -> Option<f32> {
        if self.threshold == 0 {
            return None;
        }
        let raw = f32::from(self.raw);
        let threshold = f32::from(self.threshold);
        Some((raw - threshold) / threshold)
    }

    /// Boolean reading, strictly above the threshold.
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        self.raw > self.threshold
    }
}

/// Source of raw capacitance counts.
pub trait RawSensor {
    fn read_raw(&mut self) -> u16;
}

impl<F> RawSensor for F
where
    F: FnMut() -> u16,
{
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

/// A calibrated touch pad.
pub trait TouchPad {
    /// Sample the current raw count.
    fn read_raw(&mut self) -> u16;

    /// The calibrated baseline threshold.
    #[must_use]
    fn threshold(&self) -> u16;

    fn read(&mut self) -> PadReading {
        let raw = self.read_raw();
        PadReading {
            raw,
            threshold: self.threshold(),
        }
    }

    fn is_pressed(&mut self) -> bool {
        self.read().is_pressed()
    }
}

impl<D> TouchPad for D
where
    D: DerefMut,
    <D as Deref>::Target: TouchPad,
{
    fn read_raw(&mut self) -> u16 {
        self.deref_mut().read_raw()
    }

    fn threshold(&self) -> u16 {
        self.deref().threshold()
    }
}

/// A fixed reading that never changes.
impl TouchPad for PadReading {
    fn read_raw(&mut self) -> u16 {
        self.raw
    }

    fn threshold(&self) -> u16 {
        self.threshold
    }
}

/// Wraps a [`RawSensor`] with a baseline that is measured at startup.
///
/// The threshold is the averaged baseline plus an adjustable offset.
#[derive(Debug, Clone)]
pub struct CalibratedPad<S> {
    sensor: S,
    baseline: u16,
    offset: u16,
}

impl<S: RawSensor> CalibratedPad<S> {
    /// Measure the baseline by averaging `num_samples` raw readings.
    ///
    /// The pad must not be touched while calibrating.
    #[must_use]
    pub fn calibrate(sensor: S, num_samples: NonZeroU16, offset: u16) -> Self {
        let mut pad = Self {
            sensor,
            baseline: 0,
            offset,
        };
        pad.recalibrate(num_samples);
        pad
    }

    /// Use a known threshold instead of measuring it.
    #[must_use]
    pub const fn with_threshold(sensor: S, threshold: u16) -> Self {
        Self {
            sensor,
            baseline: threshold,
            offset: 0,
        }
    }

    pub fn recalibrate(&mut self, num_samples: NonZeroU16) {
        let sum = (0..num_samples.get())
            .map(|_| u32::from(self.sensor.read_raw()))
            .sum::<u32>();
        let baseline = sum / u32::from(num_samples.get());
        debug_assert!(baseline <= u16::MAX.into());
        self.baseline = u16::try_from(baseline).unwrap_or(u16::MAX);
        log::debug!(
            "Calibrated pad baseline {baseline} with offset {offset}",
            baseline = self.baseline,
            offset = self.offset
        );
    }

    #[must_use]
    pub const fn baseline(&self) -> u16 {
        self.baseline
    }

    #[must_use]
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: u16) {
        self.offset = offset;
    }

    /// Override the threshold, dropping the measured baseline.
    pub fn set_threshold(&mut self, threshold: u16) {
        self.baseline = threshold;
        self.offset = 0;
    }

    pub fn into_inner(self) -> S {
        self.sensor
    }
}

impl<S: RawSensor> TouchPad for CalibratedPad<S> {
    fn read_raw(&mut self) -> u16 {
        self.sensor.read_raw()
    }

    fn threshold(&self) -> u16 {
        self.baseline.saturating_add(self.offset)
    }
}
