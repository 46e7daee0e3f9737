//! Periodic timer service.
//!
//! Two timers, A and B, each fire a handler every `period` once started. A
//! handler may only post to a `WakeSignal`; the type of `TimerConfig::handler`
//! makes anything else (blocking, I/O) unrepresentable.
//!
//! `PeriodicTimer::run` is meant to be spawned on an interrupt-priority
//! executor so that handlers preempt the cooperative tasks they wake.

use embassy_time::{Duration, Ticker};

use crate::error::{Error, Result};
use crate::signal::WakeSignal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    A,
    B,
}

impl TimerId {
    const fn index(self) -> usize {
        match self {
            TimerId::A => 0,
            TimerId::B => 1,
        }
    }
}

/// Immutable once accepted by `TimerService::configure`.
#[derive(Clone, Copy)]
pub struct TimerConfig<'a> {
    pub id: TimerId,
    pub period: Duration,
    pub handler: &'a WakeSignal,
}

impl<'a> TimerConfig<'a> {
    /// Validates raw startup parameters. A zero period or a missing handler
    /// is a configuration error.
    pub fn new(id: TimerId, period: Duration, handler: Option<&'a WakeSignal>) -> Result<Self> {
        if period.as_ticks() == 0 {
            return Err(Error::ZeroPeriod(id));
        }
        let handler = handler.ok_or(Error::MissingHandler(id))?;
        Ok(Self {
            id,
            period,
            handler,
        })
    }
}

#[derive(Clone, Copy)]
enum Slot<'a> {
    Empty,
    Configured(TimerConfig<'a>),
    Started,
}

/// Startup-time registry for the two timers.
///
/// `configure` and `start` are called from `main` only. A timer must not be
/// started until the task behind its handler is spawned and parked on the
/// signal, or the first wake can be lost.
pub struct TimerService<'a> {
    slots: [Slot<'a>; 2],
}

impl<'a> TimerService<'a> {
    pub const fn new() -> Self {
        Self {
            slots: [Slot::Empty, Slot::Empty],
        }
    }

    pub fn configure(
        &mut self,
        id: TimerId,
        period: Duration,
        handler: Option<&'a WakeSignal>,
    ) -> Result<()> {
        let slot = &mut self.slots[id.index()];
        if matches!(slot, Slot::Started) {
            return Err(Error::AlreadyStarted(id));
        }
        *slot = Slot::Configured(TimerConfig::new(id, period, handler)?);
        Ok(())
    }

    /// Arms a configured timer. The returned `PeriodicTimer` starts firing as
    /// soon as its `run` future is polled.
    pub fn start(&mut self, id: TimerId) -> Result<PeriodicTimer<'a>> {
        let slot = &mut self.slots[id.index()];
        match *slot {
            Slot::Empty => Err(Error::NotConfigured(id)),
            Slot::Started => Err(Error::AlreadyStarted(id)),
            Slot::Configured(config) => {
                *slot = Slot::Started;
                info!("timer {:?} armed, period {} ms", id, config.period.as_millis());
                Ok(PeriodicTimer { config })
            }
        }
    }
}

impl Default for TimerService<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// An armed timer.
pub struct PeriodicTimer<'a> {
    config: TimerConfig<'a>,
}

impl<'a> PeriodicTimer<'a> {
    pub fn id(&self) -> TimerId {
        self.config.id
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    /// Handler body: post and return.
    pub fn on_interrupt(&self) {
        self.config.handler.post();
    }

    pub async fn run(self) -> ! {
        let mut ticker = Ticker::every(self.config.period);
        loop {
            ticker.next().await;
            self.on_interrupt();
        }
    }
}
