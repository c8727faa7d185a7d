// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

use crate::{ConsumerControlCode, Keycode};

use super::*;

#[derive(Debug, Default)]
struct RecordingConnection {
    sent: Vec<Vec<u8>>,
}

impl MidiOutputConnection for RecordingConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        self.sent.push(output.to_vec());
        Ok(())
    }
}

fn channel(number: u8) -> MidiChannel {
    MidiChannel::from_number(number).unwrap()
}

#[test]
fn channel_numbers() {
    assert_eq!(None, MidiChannel::from_number(0));
    assert_eq!(None, MidiChannel::from_number(17));
    assert_eq!(None, MidiChannel::from_index(16));
    assert_eq!(0, channel(1).index());
    assert_eq!(16, channel(16).number());
    assert_eq!(MidiChannel::default(), channel(1));
}

#[test]
fn encode_messages() {
    assert_eq!(
        [0x90, 34, 127],
        MidiMessage::NoteOn {
            channel: channel(1),
            note: 34,
            velocity: 127,
        }
        .to_bytes()
    );
    assert_eq!(
        [0x85, 24, 0],
        MidiMessage::NoteOff {
            channel: channel(6),
            note: 24,
            velocity: 0,
        }
        .to_bytes()
    );
    assert_eq!(
        [0xbf, 73, 0x7f],
        MidiMessage::ControlChange {
            channel: channel(16),
            control: 73,
            value: 0x7f,
        }
        .to_bytes()
    );
}

#[test]
fn data_bytes_are_truncated() {
    let message = MidiMessage::ControlChange {
        channel: channel(1),
        control: 0x81,
        value: 0xff,
    };
    assert_eq!([0xb0, 0x01, 0x7f], message.to_bytes());
}

#[test]
fn relative_control_change() {
    assert_eq!(
        MidiCommand::control_change(channel(1), 72, 1),
        MidiCommand::relative_control_change(channel(1), 72, true)
    );
    assert_eq!(
        MidiCommand::control_change(channel(1), 72, 127),
        MidiCommand::relative_control_change(channel(1), 72, false)
    );
}

#[test]
fn note_trigger_expands_into_note_on_and_off() {
    let command = MidiCommand::NoteTrigger {
        channel: channel(1),
        note: 41,
        velocity: 100,
    };
    let bytes = command
        .messages()
        .map(MidiMessage::to_bytes)
        .collect::<Vec<_>>();
    assert_eq!(vec![[0x90, 41, 100], [0x80, 41, 0]], bytes);
}

#[test]
fn gateway_sends_messages_in_order() {
    let mut gateway = MidiOutputGateway::new(RecordingConnection::default());
    let commands = [
        OutputCommand::Midi(MidiCommand::relative_control_change(channel(1), 1, true)),
        OutputCommand::Midi(MidiCommand::NoteTrigger {
            channel: channel(1),
            note: 34,
            velocity: 127,
        }),
    ];
    for command in &commands {
        gateway.send_command(command).unwrap();
    }
    let connection = gateway.detach_midi_output_connection().unwrap();
    assert_eq!(
        vec![vec![0xb0, 1, 1], vec![0x90, 34, 127], vec![0x80, 34, 0]],
        connection.sent
    );
    assert!(!gateway.is_attached());
}

#[test]
fn gateway_rejects_hid_commands() {
    let mut gateway = MidiOutputGateway::new(RecordingConnection::default());
    assert!(matches!(
        gateway.send_command(&Keycode::F1.into()),
        Err(OutputError::Unsupported { .. })
    ));
    assert!(matches!(
        gateway.send_command(&ConsumerControlCode::MUTE.into()),
        Err(OutputError::Unsupported { .. })
    ));
    let connection = gateway.detach_midi_output_connection().unwrap();
    assert!(connection.sent.is_empty());
}

#[test]
fn detached_gateway_is_disconnected() {
    let mut gateway = MidiOutputGateway::<RecordingConnection>::default();
    assert!(!gateway.is_attached());
    let command = MidiMessage::NoteOn {
        channel: channel(1),
        note: 34,
        velocity: 127,
    }
    .into();
    assert!(matches!(
        gateway.send_command(&command),
        Err(OutputError::Disconnected)
    ));
    gateway.attach_midi_output_connection(RecordingConnection::default());
    assert!(gateway.send_command(&command).is_ok());
}

#[test]
fn absolute_control_change_saturates() {
    let channel = MidiChannel::from_number(3).unwrap();
    let control_change = AbsoluteControlChange::new(channel, 74);
    assert_eq!(
        [0xb2, 74, 0],
        control_change.command(0).messages().next().unwrap().to_bytes()
    );
    assert_eq!(
        [0xb2, 74, 127],
        control_change.command(127).messages().next().unwrap().to_bytes()
    );
    assert_eq!(
        [0xb2, 74, 127],
        control_change.command(128).messages().next().unwrap().to_bytes()
    );
}
