//! Check scheduling
//!
//! One check at startup, one at the next :01/:31 boundary, then every 30
//! minutes. Every wait races the shutdown future; a check that has started
//! always runs to completion.

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};

use crate::error::Result;
use crate::logging::get_logger;
use crate::monitor::{CheckOutcome, PriceMonitor};
use crate::slot::{CHECK_INTERVAL, next_boundary, wait_until_next_boundary};

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Startup,
    ImmediateCheck,
    WaitForBoundary,
    Ticking,
    ShutdownRequested,
}

/// Drives a [`PriceMonitor`] on the slot schedule
pub struct Scheduler {
    monitor: PriceMonitor,
    state: SchedulerState,
    checks_run: u64,
    logger: crate::logging::StructuredLogger,
}

impl Scheduler {
    pub fn new(monitor: PriceMonitor) -> Self {
        Self {
            monitor,
            state: SchedulerState::Startup,
            checks_run: 0,
            logger: get_logger("scheduler"),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn checks_run(&self) -> u64 {
        self.checks_run
    }

    pub fn monitor(&self) -> &PriceMonitor {
        &self.monitor
    }

    /// Run until `shutdown` resolves
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.transition(SchedulerState::ImmediateCheck);
        self.logger.info("Running initial price check...");
        self.check().await;

        self.transition(SchedulerState::WaitForBoundary);
        let now = self.monitor.clock().now();
        let next = next_boundary(now);
        let wait = wait_until_next_boundary(now);
        let tz = self.monitor.timezone();
        self.logger.info(&format!(
            "Next check at {} ({}) (in {})",
            tz.format(next, "%H:%M"),
            tz,
            format_wait(wait)
        ));

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                self.transition(SchedulerState::ShutdownRequested);
                return;
            }
            _ = sleep(wait) => {}
        }

        self.check().await;

        self.transition(SchedulerState::Ticking);
        let mut ticker = interval_at(Instant::now() + CHECK_INTERVAL, CHECK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    self.transition(SchedulerState::ShutdownRequested);
                    return;
                }
                _ = ticker.tick() => {
                    self.check().await;
                }
            }
        }
    }

    async fn check(&mut self) -> CheckOutcome {
        let outcome = self.monitor.run_check().await;
        self.checks_run += 1;
        self.logger
            .debug(&format!("Check #{} finished: {:?}", self.checks_run, outcome));
        outcome
    }

    fn transition(&mut self, next: SchedulerState) {
        self.logger
            .trace(&format!("Scheduler {:?} -> {:?}", self.state, next));
        if next == SchedulerState::ShutdownRequested {
            self.logger.info("Shutdown requested, stopping scheduler");
        }
        self.state = next;
    }
}

/// Termination signals, registered when constructed so a signal that
/// arrives during the startup check is queued instead of killing the process
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    logger: crate::logging::StructuredLogger,
}

impl ShutdownSignal {
    /// Install the SIGINT and SIGTERM handlers. Must be called inside the runtime.
    pub fn install() -> Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
                logger: get_logger("scheduler"),
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {
                logger: get_logger("scheduler"),
            })
        }
    }

    /// Resolves on the first SIGINT (Ctrl+C) or SIGTERM
    #[cfg(unix)]
    pub async fn recv(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => self.logger.info("Received SIGINT, shutting down"),
            _ = self.terminate.recv() => self.logger.info("Received SIGTERM, shutting down"),
        }
    }

    /// Resolves on Ctrl+C
    #[cfg(not(unix))]
    pub async fn recv(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => self.logger.info("Received Ctrl+C, shutting down"),
            Err(e) => {
                self.logger
                    .error(&format!("Failed to listen for Ctrl+C: {}", e));
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Compact duration for log lines, e.g. `21m4s`
pub fn format_wait(wait: Duration) -> String {
    let secs = wait.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}
