pub mod codec;
pub mod command;
pub mod response;

#[cfg(test)]
pub mod fake;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("I/O error: {:?}", _0)]
    Io(#[from] std::io::Error),

    #[error("Serial I/O error: {:?}", _0)]
    Serial(#[from] tokio_serial::Error),

    #[error("No OWON XDM1xxx instrument found")]
    NoDevice,
    #[error("Timed out waiting for a reply")]
    Timeout,
    #[error("Connection was closed")]
    Abort,
    #[error("Device sent an empty reply")]
    EmptyReply,
    #[error("Device sent a non-numeric reply: {:?}", _0)]
    NonNumeric(String),
    #[error("Unknown measurement mode token: {:?}", _0)]
    UnknownMode(String),
    #[error("Unknown measurement rate token: {:?}", _0)]
    UnknownRate(String),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
