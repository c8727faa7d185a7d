// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Host MIDI transport driven by [`midir`].

use midir::{ConnectError, InitError, MidiOutput, MidiOutputConnection, SendError};
use thiserror::Error;

use crate::{OutputError, OutputResult};

#[derive(Debug, Error)]
pub enum MidiPortError {
    #[error("no output port with name prefix \"{port_name_prefix}\"")]
    NotFound { port_name_prefix: String },
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    ConnectOutput(#[from] ConnectError<MidiOutput>),
}

impl From<SendError> for OutputError {
    fn from(err: SendError) -> Self {
        OutputError::Send {
            msg: err.to_string().into(),
        }
    }
}

/// Names of all available output ports.
pub fn output_port_names(client_name: &str) -> Result<Vec<String>, MidiPortError> {
    let output = MidiOutput::new(client_name)?;
    Ok(output
        .ports()
        .iter()
        .filter_map(|port| output.port_name(port).ok())
        .collect())
}

/// Connect to the first output port whose name starts with `port_name_prefix`.
pub fn connect_output_port(
    client_name: &str,
    port_name_prefix: &str,
) -> Result<MidiOutputConnection, MidiPortError> {
    let output = MidiOutput::new(client_name)?;
    let found = output.ports().into_iter().find_map(|port| {
        let port_name = output.port_name(&port).ok()?;
        if !port_name.starts_with(port_name_prefix) {
            log::debug!("Skipping output port \"{port_name}\"");
            return None;
        }
        Some((port_name, port))
    });
    let Some((port_name, port)) = found else {
        return Err(MidiPortError::NotFound {
            port_name_prefix: port_name_prefix.to_owned(),
        });
    };
    log::info!("Connecting to output port \"{port_name}\"");
    output.connect(&port, &port_name).map_err(Into::into)
}

impl super::MidiOutputConnection for MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        self.send(output).map_err(Into::into)
    }
}
