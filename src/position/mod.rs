// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Touch position decoding for three interleaved pads.
//!
//! The three pads `A`, `B` and `C` are interleaved such that moving a finger
//! along the slider or wheel always covers at most two neighbouring pads.
//! Each pair of neighbours forms a sector and the relative overshoot of the
//! two pads interpolates the position within that sector:
//!
//! ```text
//!    sector 0      sector 1      sector 2 (wheel only)
//! |-- A / B --|-- B / C --|-- C / A --|
//! 0           s           2s          3s
//! ```
//!
//! A linear slider uses only the first two sectors and never wraps around.

use crate::{PadReading, TouchPad};

/// Consecutive positions further apart than this are reported as a jump.
const JUMP_THRESHOLD: f32 = 0.5;

/// Substitute for the overshoot of an uncalibrated pad, i.e. never active.
const INACTIVE_OVERSHOOT: f32 = -1.0;

/// Physical arrangement of the three pads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    /// Fraction of the full range covered by each two-pad sector.
    pub sector_scale: f32,

    /// Rotation that is added to the decoded position, in the interval [0, 1).
    pub phase_offset: f32,

    /// Whether the pad `C` is adjacent to pad `A`, i.e. a wheel.
    pub wrap: bool,
}

impl Topology {
    /// Rotary wheel covering the full circle with three sectors.
    pub const WHEEL: Self = Self {
        sector_scale: 0.333,
        phase_offset: 0.0,
        wrap: true,
    };

    /// Bounded linear slider with two sectors.
    pub const SLIDER: Self = Self {
        sector_scale: 0.5,
        phase_offset: 0.0,
        wrap: false,
    };

    #[must_use]
    pub const fn with_phase_offset(mut self, phase_offset: f32) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    /// Number of sectors that could be decoded.
    #[must_use]
    pub const fn num_sectors(&self) -> u8 {
        if self.wrap {
            3
        } else {
            2
        }
    }

    /// Upper bound of the position before applying the phase offset.
    #[must_use]
    pub fn range_end(&self) -> f32 {
        self.sector_scale * f32::from(self.num_sectors())
    }
}

/// Interpolated position of `hi` between two active pads.
fn sector_ratio(lo: f32, hi: f32) -> f32 {
    let sum = lo + hi;
    if sum > 0.0 {
        hi / sum
    } else {
        // Both pads exactly at their threshold
        0.5
    }
}

/// Decode the position from the relative overshoots of the pads `A`, `B`, `C`.
///
/// See [`decode()`].
#[must_use]
pub fn decode_overshoots(overshoots: [f32; 3], topology: &Topology) -> Option<f32> {
    let [a, b, c] = overshoots;
    log::trace!("Pad overshoots: {a:+1.2} {b:+1.2} {c:+1.2}");
    let scale = topology.sector_scale;
    let sector = |index: u8, lo: f32, hi: f32| scale * (f32::from(index) + sector_ratio(lo, hi));
    let mut pos = if a >= 0.0 && b >= 0.0 {
        sector(0, a, b)
    } else if b >= 0.0 && c >= 0.0 {
        sector(1, b, c)
    } else if c >= 0.0 && a >= 0.0 && topology.wrap {
        sector(2, c, a)
    } else if a > 0.0 && b <= 0.0 && c <= 0.0 {
        0.0
    } else if a <= 0.0 && b > 0.0 && c <= 0.0 {
        scale
    } else if a <= 0.0 && b <= 0.0 && c > 0.0 && topology.wrap {
        2.0 * scale
    } else {
        return None;
    };
    if !topology.wrap {
        // The end of a bounded range must not wrap around to 0.
        let end = topology.range_end();
        if pos >= end {
            pos = end - end * f32::EPSILON;
        }
    }
    let mut pos = (pos + topology.phase_offset).rem_euclid(1.0);
    if pos >= 1.0 {
        // Rounding of tiny negative values
        pos = 0.0;
    }
    Some(pos)
}

/// Decode the position from three pad readings.
///
/// Returns a position in the interval [0, 1) or `None` if untouched.
///
/// Exactly one of the following cases applies, tested in this order:
///
/// 1. `A` and `B` active: sector 0
/// 2. `B` and `C` active: sector 1
/// 3. `C` and `A` active: sector 2, wheel only
/// 4. Only `A` active: start of sector 0
/// 5. Only `B` active: start of sector 1
/// 6. Only `C` active: start of sector 2, wheel only
///
/// Pads with a zero threshold are never active.
#[must_use]
pub fn decode(a: PadReading, b: PadReading, c: PadReading, topology: &Topology) -> Option<f32> {
    decode_readings([a, b, c], topology)
}

#[must_use]
pub fn decode_readings(readings: [PadReading; 3], topology: &Topology) -> Option<f32> {
    let overshoots = readings.map(|reading| reading.overshoot().unwrap_or(INACTIVE_OVERSHOOT));
    decode_overshoots(overshoots, topology)
}

/// A slider or wheel made of three touch pads.
#[derive(Debug)]
pub struct TouchSlider<P> {
    pads: [P; 3],
    topology: Topology,
    last_position: Option<f32>,
}

impl<P: TouchPad> TouchSlider<P> {
    #[must_use]
    pub const fn new(pads: [P; 3], topology: Topology) -> Self {
        Self {
            pads,
            topology,
            last_position: None,
        }
    }

    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub const fn pads(&self) -> &[P; 3] {
        &self.pads
    }

    pub fn pads_mut(&mut self) -> &mut [P; 3] {
        &mut self.pads
    }

    /// The most recent touched position.
    ///
    /// Retained after the pads have been released.
    #[must_use]
    pub const fn last_position(&self) -> Option<f32> {
        self.last_position
    }

    /// Sample all three pads once.
    pub fn read(&mut self) -> [PadReading; 3] {
        self.pads.each_mut().map(|pad| pad.read())
    }

    /// Sample the pads and decode the current position.
    pub fn read_position(&mut self) -> Option<f32> {
        let readings = self.read();
        let position = decode_readings(readings, &self.topology)?;
        if let Some(last_position) = self.last_position {
            if (position - last_position).abs() > JUMP_THRESHOLD {
                log::debug!("Position jumped from {last_position:.2} to {position:.2}");
            }
        }
        self.last_position = Some(position);
        Some(position)
    }
}
