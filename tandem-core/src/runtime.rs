//! Async command driver
//!
//! Drives a command from an embassy [`Ticker`] instead of a blocking
//! [`ControlClock`](crate::ControlClock). Same contract as
//! [`Runner::run`](crate::Runner::run): `execute` once, then `update` once
//! per tick while the command is running.

use embassy_time::{Duration, Instant, Ticker};

use crate::command::{Command, CommandError, Progress};

/// Run a command to completion, one update per `period`
///
/// Time passed to the command is milliseconds since this call started.
pub async fn run_async(command: &mut dyn Command, period: Duration) -> Result<(), CommandError> {
    info!("async run {}", command.name());

    let mut ticker = Ticker::every(period);
    let start = Instant::now();

    let mut progress = command.execute(0)?;
    while progress == Progress::Running {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        progress = command.update(now_ms)?;
    }

    debug!("async run {} complete", command.name());
    Ok(())
}
