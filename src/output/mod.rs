// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Discrete output commands and their sinks.

use std::{
    borrow::Cow,
    ops::{Deref, DerefMut},
};

use derive_more::From;
use strum::{AsRefStr, FromRepr};
use thiserror::Error;

#[cfg(feature = "midi")]
use crate::MidiCommand;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("disconnected")]
    Disconnected,
    #[error("unsupported command {command:?}")]
    Unsupported { command: OutputCommand },
    #[error("Send: {msg}")]
    Send { msg: Cow<'static, str> },
}

pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Keyboard key
///
/// Values are usage IDs of the USB HID keyboard/keypad page (0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, AsRefStr)]
#[repr(u8)]
pub enum Keycode {
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0a,
    H = 0x0b,
    I = 0x0c,
    J = 0x0d,
    K = 0x0e,
    L = 0x0f,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1a,
    X = 0x1b,
    Y = 0x1c,
    Z = 0x1d,
    One = 0x1e,
    Two = 0x1f,
    Three = 0x20,
    Four = 0x21,
    Five = 0x22,
    Six = 0x23,
    Seven = 0x24,
    Eight = 0x25,
    Nine = 0x26,
    Zero = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2a,
    Tab = 0x2b,
    Space = 0x2c,
    F1 = 0x3a,
    F2 = 0x3b,
    F3 = 0x3c,
    F4 = 0x3d,
    F5 = 0x3e,
    F6 = 0x3f,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    RightArrow = 0x4f,
    LeftArrow = 0x50,
    DownArrow = 0x51,
    UpArrow = 0x52,
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6a,
    F16 = 0x6b,
    F17 = 0x6c,
    F18 = 0x6d,
    F19 = 0x6e,
    F20 = 0x6f,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,
    LeftControl = 0xe0,
    LeftShift = 0xe1,
    LeftAlt = 0xe2,
    LeftGui = 0xe3,
    RightControl = 0xe4,
    RightShift = 0xe5,
    RightAlt = 0xe6,
    RightGui = 0xe7,
}

impl Keycode {
    #[must_use]
    pub const fn usage_id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_modifier(self) -> bool {
        self.usage_id() >= Self::LeftControl.usage_id()
    }
}

/// Keys that are pressed together and then released.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct KeyCombo(Vec<Keycode>);

impl KeyCombo {
    /// Maximum number of simultaneously pressed keys in a boot keyboard report.
    pub const MAX_KEYS: usize = 6;

    #[must_use]
    pub fn new(keys: impl Into<Vec<Keycode>>) -> Self {
        Self(keys.into())
    }

    /// A single key with the left control modifier.
    #[must_use]
    pub fn ctrl(key: Keycode) -> Self {
        Self(vec![Keycode::LeftControl, key])
    }

    #[must_use]
    pub fn keys(&self) -> &[Keycode] {
        &self.0
    }
}

impl From<Keycode> for KeyCombo {
    fn from(from: Keycode) -> Self {
        Self(vec![from])
    }
}

/// Consumer control usage
///
/// Values are usage IDs of the USB HID consumer page (0x0c).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct ConsumerControlCode(pub u16);

impl ConsumerControlCode {
    pub const BRIGHTNESS_INCREMENT: Self = Self(0x6f);
    pub const BRIGHTNESS_DECREMENT: Self = Self(0x70);
    pub const RECORD: Self = Self(0xb2);
    pub const FAST_FORWARD: Self = Self(0xb3);
    pub const REWIND: Self = Self(0xb4);
    pub const SCAN_NEXT_TRACK: Self = Self(0xb5);
    pub const SCAN_PREVIOUS_TRACK: Self = Self(0xb6);
    pub const STOP: Self = Self(0xb7);
    pub const EJECT: Self = Self(0xb8);
    pub const PLAY_PAUSE: Self = Self(0xcd);
    pub const MUTE: Self = Self(0xe2);
    pub const VOLUME_INCREMENT: Self = Self(0xe9);
    pub const VOLUME_DECREMENT: Self = Self(0xea);

    #[must_use]
    pub const fn usage_id(self) -> u16 {
        self.0
    }
}

/// An output command, tagged by the kind of output device.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum OutputCommand {
    /// Keyboard shortcut
    Keyboard(KeyCombo),
    /// Media and system control
    ConsumerControl(ConsumerControlCode),
    /// MIDI message(s)
    #[cfg(feature = "midi")]
    Midi(MidiCommand),
}

impl From<Keycode> for OutputCommand {
    fn from(from: Keycode) -> Self {
        Self::Keyboard(from.into())
    }
}

/// Receiver of output commands.
///
/// Commands must be transmitted in the order of submission.
pub trait OutputSink {
    fn send_command(&mut self, command: &OutputCommand) -> OutputResult<()>;
}

impl<D> OutputSink for D
where
    D: DerefMut,
    <D as Deref>::Target: OutputSink,
{
    fn send_command(&mut self, command: &OutputCommand) -> OutputResult<()> {
        self.deref_mut().send_command(command)
    }
}

/// Logs all commands instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn send_command(&mut self, command: &OutputCommand) -> OutputResult<()> {
        log::info!("Sending {command:?}");
        Ok(())
    }
}
