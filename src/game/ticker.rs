use std::{ops::ControlFlow, time::Duration};

use log::{debug, error};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

/// Fixed-period driver for the game loop. Each period runs the callback
/// exactly once; a slow callback delays the next tick instead of overlapping
/// it. Dropping the ticker stops it.
pub struct Ticker {
    period: Duration,
    task:   Option<JoinHandle<()>>,
}

impl Ticker {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Starts calling `on_tick` once per period, the first call one period
    /// from now. Returning [`ControlFlow::Break`] stops the ticker. Starting
    /// a running ticker replaces its callback.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        self.stop();

        let period = self.period;
        debug!("ticking every {} ms", period.as_millis());

        self.task = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits until the callback breaks out of the loop.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!("tick callback panicked: {}", e);
                }
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
