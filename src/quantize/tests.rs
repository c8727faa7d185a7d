// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

use super::*;

const TEN: NonZeroU16 = match NonZeroU16::new(10) {
    Some(segments) => segments,
    None => unreachable!(),
};

#[test]
fn untouched_has_no_value_and_no_delta() {
    assert_eq!((None, 0), quantize(None, TEN, None));
    assert_eq!((None, 0), quantize(None, TEN, Some(3)));
    assert_eq!(
        (None, 0),
        quantize_with_policy(None, NonZeroU16::MIN, Some(0), DeltaPolicy::WrapAware)
    );
}

#[test]
fn first_touch_has_no_delta() {
    for position in [0.0, 0.1, 0.5, 0.99] {
        let (value, delta) = quantize(Some(position), TEN, None);
        assert!(value.is_some());
        assert_eq!(0, delta);
    }
}

#[test]
fn quantize_sequence() {
    let mut prev_value = None;
    let mut values = Vec::new();
    let mut deltas = Vec::new();
    for position in [0.1, 0.3, 0.3, 0.9] {
        let (value, delta) = quantize(Some(position), TEN, prev_value);
        values.push(value.unwrap());
        deltas.push(delta);
        prev_value = value;
    }
    assert_eq!(vec![9, 7, 7, 1], values);
    assert_eq!(vec![0, -2, 0, -6], deltas);
}

#[test]
fn segment_value_is_clamped() {
    assert_eq!(9, segment_value(0.0, TEN));
    assert_eq!(0, segment_value(0.999, TEN));
    assert_eq!(0, segment_value(1.0, TEN));
    assert_eq!(9, segment_value(-0.5, TEN));
    assert_eq!(0, segment_value(0.5, NonZeroU16::MIN));
}

#[test]
fn segment_value_is_inverted() {
    let values = [0.05, 0.25, 0.45, 0.65, 0.85].map(|position| segment_value(position, TEN));
    assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn raw_delta_jumps_across_boundary() {
    assert_eq!(-8, segment_delta(1, 9, TEN, DeltaPolicy::Raw));
    assert_eq!(8, segment_delta(9, 1, TEN, DeltaPolicy::Raw));
}

#[test]
fn wrap_aware_delta_across_boundary() {
    assert_eq!(2, segment_delta(1, 9, TEN, DeltaPolicy::WrapAware));
    assert_eq!(-2, segment_delta(9, 1, TEN, DeltaPolicy::WrapAware));
    assert_eq!(-1, segment_delta(0, 1, TEN, DeltaPolicy::WrapAware));
    assert_eq!(1, segment_delta(0, 9, TEN, DeltaPolicy::WrapAware));
}

#[test]
fn wrap_aware_delta_within_range() {
    assert_eq!(-2, segment_delta(7, 9, TEN, DeltaPolicy::WrapAware));
    assert_eq!(4, segment_delta(5, 1, TEN, DeltaPolicy::WrapAware));
    // Half a revolution is ambiguous and resolved as negative
    assert_eq!(-5, segment_delta(6, 1, TEN, DeltaPolicy::WrapAware));
}

#[test]
fn wrap_aware_quantize() {
    let (value, delta) = quantize_with_policy(Some(0.95), TEN, Some(9), DeltaPolicy::WrapAware);
    assert_eq!(Some(0), value);
    assert_eq!(1, delta);
}
