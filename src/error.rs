use thiserror::Error;

use crate::timer::TimerId;

/// Startup configuration errors. Every variant is fatal: the firmware must
/// not proceed past `main` when one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("timer {0:?} configured with a zero period")]
    ZeroPeriod(TimerId),

    #[error("timer {0:?} has no handler")]
    MissingHandler(TimerId),

    #[error("timer {0:?} started before it was configured")]
    NotConfigured(TimerId),

    #[error("timer {0:?} is already running")]
    AlreadyStarted(TimerId),
}

pub type Result<T> = core::result::Result<T, Error>;
