use chrono::{Local, NaiveDateTime};

use crate::ports::clock::ClockPort;

/// Local wall clock of the host
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
