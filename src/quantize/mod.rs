// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Quantization of continuous positions into discrete segments.

use std::num::NonZeroU16;

/// Computation of the signed distance between two consecutive segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaPolicy {
    /// Plain difference of the segment indices.
    ///
    /// Crossing the 0/1 boundary of a wheel results in a large jump,
    /// e.g. from the last to the first segment.
    #[default]
    Raw,

    /// Shortest distance on a circle of segments.
    ///
    /// Deltas are mapped into the interval `[-segments/2, segments/2)`,
    /// i.e. crossing the 0/1 boundary results in a small delta.
    WrapAware,
}

/// Map a position onto a segment index.
///
/// The segment index decreases when the position increases,
/// i.e. the segment index for position 0 is `segments - 1`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn segment_value(position: f32, segments: NonZeroU16) -> u16 {
    let max_value = segments.get() - 1;
    let value = ((1.0 - position) * f32::from(segments.get())).floor();
    if value <= 0.0 {
        return 0;
    }
    if value >= f32::from(max_value) {
        return max_value;
    }
    value as u16
}

/// Signed distance from `prev_value` to `value`.
#[must_use]
pub fn segment_delta(
    value: u16,
    prev_value: u16,
    segments: NonZeroU16,
    policy: DeltaPolicy,
) -> i32 {
    let delta = i32::from(value) - i32::from(prev_value);
    match policy {
        DeltaPolicy::Raw => delta,
        DeltaPolicy::WrapAware => {
            let segments = i32::from(segments.get());
            let half = segments / 2;
            (delta + half).rem_euclid(segments) - half
        }
    }
}

/// Quantize a position and compute the delta to the previous segment.
///
/// Returns `(None, 0)` if untouched. The caller is responsible for
/// forgetting the previous segment in this case. The delta is 0 if
/// there is no previous segment.
#[must_use]
pub fn quantize(
    position: Option<f32>,
    segments: NonZeroU16,
    prev_value: Option<u16>,
) -> (Option<u16>, i32) {
    quantize_with_policy(position, segments, prev_value, DeltaPolicy::Raw)
}

/// Like [`quantize()`] with a custom [`DeltaPolicy`].
#[must_use]
pub fn quantize_with_policy(
    position: Option<f32>,
    segments: NonZeroU16,
    prev_value: Option<u16>,
    policy: DeltaPolicy,
) -> (Option<u16>, i32) {
    let Some(position) = position else {
        return (None, 0);
    };
    let value = segment_value(position, segments);
    let delta = prev_value.map_or(0, |prev_value| {
        segment_delta(value, prev_value, segments, policy)
    });
    (Some(value), delta)
}

#[cfg(test)]
mod tests;
