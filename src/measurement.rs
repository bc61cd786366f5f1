use std::fmt;
use std::str::FromStr;

use crate::proto::ProtoError;

/// Measurement functions of the XDM1xxx, selected with `CONF:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mode {
    /// DC voltage
    VDC,
    /// AC voltage
    VAC,
    /// DC current
    IDC,
    /// AC current
    IAC,
    /// Resistance
    RES,
    /// Capacitance
    CAP,
    /// Frequency
    FREQ,
}

impl Mode {
    /// All functions, in front panel order.
    pub const ALL: [Mode; 7] = [
        Mode::VDC,
        Mode::VAC,
        Mode::IDC,
        Mode::IAC,
        Mode::RES,
        Mode::CAP,
        Mode::FREQ,
    ];

    /// SCPI function token, the part after `CONF:`.
    pub fn scpi(&self) -> &'static str {
        match self {
            Mode::VDC => "VOLT:DC",
            Mode::VAC => "VOLT:AC",
            Mode::IDC => "CURR:DC",
            Mode::IAC => "CURR:AC",
            Mode::RES => "RES",
            Mode::CAP => "CAP",
            Mode::FREQ => "FREQ",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::VDC => f.write_str("VDC"),
            Mode::VAC => f.write_str("VAC"),
            Mode::IDC => f.write_str("IDC"),
            Mode::IAC => f.write_str("IAC"),
            Mode::RES => f.write_str("RES"),
            Mode::CAP => f.write_str("CAP"),
            Mode::FREQ => f.write_str("FREQ"),
        }
    }
}

impl FromStr for Mode {
    type Err = ProtoError;

    /// Accepts the short mnemonics and the full SCPI tokens,
    /// case-insensitive and whitespace-trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VDC" | "VOLT:DC" => Ok(Mode::VDC),
            "VAC" | "VOLT:AC" => Ok(Mode::VAC),
            "IDC" | "CURR:DC" => Ok(Mode::IDC),
            "IAC" | "CURR:AC" => Ok(Mode::IAC),
            "RES" | "OHM" => Ok(Mode::RES),
            "CAP" | "C" => Ok(Mode::CAP),
            "FREQ" | "F" => Ok(Mode::FREQ),
            _ => Err(ProtoError::UnknownMode(s.to_string())),
        }
    }
}

/// Measurement speed, set with `RATE`. Slower rates integrate longer
/// and give more stable readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Medium,
    Slow,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Fast, Speed::Medium, Speed::Slow];

    /// SCPI rate token used with `RATE`.
    pub fn scpi(&self) -> &'static str {
        match self {
            Speed::Fast => "F",
            Speed::Medium => "M",
            Speed::Slow => "S",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Fast => f.write_str("FAST"),
            Speed::Medium => f.write_str("MEDIUM"),
            Speed::Slow => f.write_str("SLOW"),
        }
    }
}

impl FromStr for Speed {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" | "FAST" => Ok(Speed::Fast),
            "M" | "MID" | "MEDIUM" => Ok(Speed::Medium),
            // "L" is a historic alias for the slowest rate.
            "S" | "SLOW" | "L" => Ok(Speed::Slow),
            _ => Err(ProtoError::UnknownRate(s.to_string())),
        }
    }
}
