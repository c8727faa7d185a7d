// SPDX-FileCopyrightText: The touchslider authors
// SPDX-License-Identifier: MPL-2.0

use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable, Aborted};

use super::EventLoop;
use crate::{Indicator, Mode, OutputSink, TouchPad};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Dedicated thread that runs an [`EventLoop`] periodically.
#[derive(Debug)]
pub struct TickThread {
    abort_handle: AbortHandle,
    os_thread: std::thread::JoinHandle<()>,
}

impl TickThread {
    /// Run a tick every `period` until aborted.
    ///
    /// Periods shorter than 1 ms are raised to 1 ms.
    #[must_use]
    pub fn spawn<M, P, S, I>(mut event_loop: EventLoop<M, P, S, I>, period: Duration) -> Self
    where
        M: Mode + Send,
        P: TouchPad + Send + 'static,
        S: OutputSink + Send + 'static,
        I: Indicator + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let tick_task = async move {
            let mut interval = tokio::time::interval(period);
            // Delay the next tick instead of catching up with a burst of ticks.
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                // The first tick arrives immediately
                interval.tick().await;
                event_loop.run_tick();
            }
        };
        let abortable_task = Abortable::new(tick_task, abort_registration);
        let os_thread = std::thread::spawn(move || {
            log::info!("Entering tick thread");
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("Failed to create Tokio runtime: {err}");
                    return;
                }
            };
            runtime.block_on(async move {
                log::info!("Running tick task");
                match abortable_task.await {
                    Ok(()) => {
                        log::info!("Tick task terminated");
                    }
                    Err(Aborted) => {
                        log::info!("Tick task aborted");
                    }
                }
            });
            log::info!("Exiting tick thread");
        });
        Self {
            abort_handle,
            os_thread,
        }
    }

    pub fn abort_and_join(self) -> anyhow::Result<()> {
        let Self {
            abort_handle,
            os_thread,
        } = self;
        abort_handle.abort();
        os_thread
            .join()
            .map_err(|err| anyhow::anyhow!("Tick thread panicked: {err:?}"))
    }
}
