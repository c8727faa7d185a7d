// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

//! Sends absolute MIDI control changes from a simulated fader sweep on a
//! dedicated tick thread.
//!
//! Usage: `midi-sliders <output port name prefix>`
//!
//! Lists the available output ports if no prefix is given.

use std::{
    sync::{
        atomic::{AtomicU16, Ordering},
        Arc,
    },
    time::Duration,
};

use strum::EnumCount as _;
use touchslider::{
    devices::picoslidertoy::{
        midi::{midi_config, DEFAULT_CHANNEL},
        Slider, NUM_PADS,
    },
    midi::midir::{connect_output_port, output_port_names},
    EventLoop, MidiOutputGateway, NoIndicator, TickThread, TouchPad,
};

const CLIENT_NAME: &str = "touchslider";
const THRESHOLD: u16 = 1000;
const TICK_PERIOD: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Default)]
struct SharedPad(Arc<AtomicU16>);

impl TouchPad for SharedPad {
    fn read_raw(&mut self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    fn threshold(&self) -> u16 {
        THRESHOLD
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(port_name_prefix) = std::env::args().nth(1) else {
        let port_names =
            output_port_names(CLIENT_NAME).map_err(|err| anyhow::anyhow!("{err}"))?;
        println!("Available output ports:");
        for port_name in port_names {
            println!("  {port_name}");
        }
        return Ok(());
    };
    let connection = connect_output_port(CLIENT_NAME, &port_name_prefix)
        .map_err(|err| anyhow::anyhow!("{err}"))?;

    let fader = [(); 3].map(|()| SharedPad::default());
    let mut sliders = vec![fader.clone()];
    sliders.resize_with(Slider::COUNT, Default::default);
    let pads = (0..NUM_PADS).map(|_| SharedPad::default()).collect();

    let event_loop = EventLoop::new(
        midi_config(DEFAULT_CHANNEL),
        sliders,
        pads,
        MidiOutputGateway::new(connection),
        NoIndicator,
    )?;
    let tick_thread = TickThread::spawn(event_loop, TICK_PERIOD);

    // Sweep across the first sector of fader A
    let [pad_a, pad_b, _] = &fader;
    for step in 0..=100_u16 {
        pad_a.0.store(THRESHOLD + 8 * (100 - step), Ordering::Relaxed);
        pad_b.0.store(THRESHOLD + 8 * step, Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(20));
    }
    pad_a.0.store(0, Ordering::Relaxed);
    pad_b.0.store(0, Ordering::Relaxed);
    std::thread::sleep(Duration::from_millis(100));

    tick_thread.abort_and_join()
}
