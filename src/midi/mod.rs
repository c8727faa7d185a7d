// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! MIDI output.

use crate::{OutputCommand, OutputError, OutputResult, OutputSink};

#[cfg(feature = "midir")]
pub mod midir;

const MIDI_CMD_NOTE_OFF: u8 = 0x80;
const MIDI_CMD_NOTE_ON: u8 = 0x90;
const MIDI_CMD_CC: u8 = 0xb0;

const U7_MASK: u8 = 0x7f;

/// Relative control change value for a single step up.
pub const RELATIVE_CC_INCREMENT: u8 = 0x01;

/// Relative control change value for a single step down (two's complement).
pub const RELATIVE_CC_DECREMENT: u8 = 0x7f;

/// MIDI channel
///
/// Stored as the 0-based index that is encoded in the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MidiChannel(u8);

impl MidiChannel {
    pub const MAX_INDEX: u8 = 15;

    /// Channel from its 0-based index `0..=15`.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index > Self::MAX_INDEX {
            return None;
        }
        Some(Self(index))
    }

    /// Channel from its 1-based number `1..=16` as shown to users.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        if number == 0 {
            return None;
        }
        Self::from_index(number - 1)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

/// A single channel voice message.
///
/// Data bytes are truncated to 7 bits when encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOff {
        channel: MidiChannel,
        note: u8,
        velocity: u8,
    },
    NoteOn {
        channel: MidiChannel,
        note: u8,
        velocity: u8,
    },
    ControlChange {
        channel: MidiChannel,
        control: u8,
        value: u8,
    },
}

impl MidiMessage {
    #[must_use]
    pub const fn channel(self) -> MidiChannel {
        match self {
            Self::NoteOff { channel, .. }
            | Self::NoteOn { channel, .. }
            | Self::ControlChange { channel, .. } => channel,
        }
    }

    /// Encode the message into its 3-byte wire format.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 3] {
        let (cmd, data1, data2) = match self {
            Self::NoteOff { note, velocity, .. } => (MIDI_CMD_NOTE_OFF, note, velocity),
            Self::NoteOn { note, velocity, .. } => (MIDI_CMD_NOTE_ON, note, velocity),
            Self::ControlChange { control, value, .. } => (MIDI_CMD_CC, control, value),
        };
        [
            cmd | self.channel().index(),
            data1 & U7_MASK,
            data2 & U7_MASK,
        ]
    }
}

/// A MIDI output command that might expand into multiple messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiCommand {
    /// A single message.
    Message(MidiMessage),

    /// Note on, immediately followed by the corresponding note off.
    NoteTrigger {
        channel: MidiChannel,
        note: u8,
        velocity: u8,
    },
}

impl MidiCommand {
    #[must_use]
    pub const fn control_change(channel: MidiChannel, control: u8, value: u8) -> Self {
        Self::Message(MidiMessage::ControlChange {
            channel,
            control,
            value,
        })
    }

    /// A single step of a relative controller.
    #[must_use]
    pub const fn relative_control_change(
        channel: MidiChannel,
        control: u8,
        increment: bool,
    ) -> Self {
        let value = if increment {
            RELATIVE_CC_INCREMENT
        } else {
            RELATIVE_CC_DECREMENT
        };
        Self::control_change(channel, control, value)
    }

    /// The messages in order of transmission.
    pub fn messages(self) -> impl Iterator<Item = MidiMessage> {
        let (first, second) = match self {
            Self::Message(message) => (message, None),
            Self::NoteTrigger {
                channel,
                note,
                velocity,
            } => (
                MidiMessage::NoteOn {
                    channel,
                    note,
                    velocity,
                },
                Some(MidiMessage::NoteOff {
                    channel,
                    note,
                    velocity: 0,
                }),
            ),
        };
        std::iter::once(first).chain(second)
    }
}

/// A controller that receives absolute values.
///
/// Values beyond the 7-bit range are saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbsoluteControlChange {
    pub channel: MidiChannel,
    pub control: u8,
}

impl AbsoluteControlChange {
    #[must_use]
    pub const fn new(channel: MidiChannel, control: u8) -> Self {
        Self { channel, control }
    }

    #[must_use]
    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
    pub const fn command(self, value: u16) -> MidiCommand {
        let value = if value > U7_MASK as u16 {
            U7_MASK
        } else {
            value as u8
        };
        MidiCommand::control_change(self.channel, self.control, value)
    }
}

impl From<MidiMessage> for MidiCommand {
    fn from(from: MidiMessage) -> Self {
        Self::Message(from)
    }
}

impl From<MidiMessage> for OutputCommand {
    fn from(from: MidiMessage) -> Self {
        Self::Midi(from.into())
    }
}

/// Byte-level MIDI transport.
pub trait MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()>;
}

/// Sends MIDI commands through an attached connection.
///
/// Keyboard and consumer control commands are rejected.
#[allow(missing_debug_implementations)]
pub struct MidiOutputGateway<C> {
    midi_output_connection: Option<C>,
}

impl<C> Default for MidiOutputGateway<C> {
    fn default() -> Self {
        Self {
            midi_output_connection: None,
        }
    }
}

impl<C: MidiOutputConnection> MidiOutputGateway<C> {
    #[must_use]
    pub const fn new(midi_output_connection: C) -> Self {
        Self {
            midi_output_connection: Some(midi_output_connection),
        }
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.midi_output_connection.is_some()
    }

    pub fn attach_midi_output_connection(&mut self, midi_output_connection: C) {
        debug_assert!(self.midi_output_connection.is_none());
        self.midi_output_connection = Some(midi_output_connection);
    }

    pub fn detach_midi_output_connection(&mut self) -> Option<C> {
        self.midi_output_connection.take()
    }
}

impl<C: MidiOutputConnection> OutputSink for MidiOutputGateway<C> {
    fn send_command(&mut self, command: &OutputCommand) -> OutputResult<()> {
        let OutputCommand::Midi(midi_command) = command else {
            return Err(OutputError::Unsupported {
                command: command.clone(),
            });
        };
        let Some(midi_output_connection) = &mut self.midi_output_connection else {
            return Err(OutputError::Disconnected);
        };
        for message in midi_command.messages() {
            midi_output_connection.send_midi_output(&message.to_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
