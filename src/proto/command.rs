use crate::measurement::{Mode, Speed};

/// SCPI commands understood by the XDM1xxx.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    /// Identification query (`*IDN?`)
    Idn,
    /// Select measurement function (`CONF:<function>`), no reply
    Configure(Mode),
    /// Select measurement speed (`RATE <speed>`), no reply
    SetRate(Speed),
    /// Single reading in the current function (`MEAS?`)
    Measure,
}
