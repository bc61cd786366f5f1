use bytes::BytesMut;
use std::{
    fmt::{self, Write},
    io,
};
use tokio_util::codec::{Decoder, Encoder};

use crate::proto::command::Command;

/// Line-oriented SCPI codec.
///
/// Commands go out as ASCII terminated by CRLF; the instrument answers
/// queries with a single text line. Replies are uniform, so no per-command
/// decoding state is needed.
#[derive(Default)]
pub struct ScpiCodec;

impl Decoder for ScpiCodec {
    type Item = String;
    // We use io::Error here instead of our own Error type because for the
    // low level protocol, an odd reply line is still decoded successfully.
    // Deciding if it should be returned as an error is up to a higher level.
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let pos = match src.as_ref().iter().position(|b| *b == b'\n') {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let line = src.split_to(pos + 1);
        // The instrument occasionally emits stray non-ASCII bytes on
        // power-up, so decode leniently instead of failing the stream.
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}

fn write_fmt_guarded(dst: &mut BytesMut, args: fmt::Arguments<'_>) -> Result<(), io::Error> {
    dst.write_fmt(args)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

impl Encoder<Command> for ScpiCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match &item {
            Command::Idn => write_fmt_guarded(dst, format_args!("*IDN?"))?,
            Command::Configure(mode) => {
                write_fmt_guarded(dst, format_args!("CONF:{}", mode.scpi()))?
            }
            Command::SetRate(speed) => {
                write_fmt_guarded(dst, format_args!("RATE {}", speed.scpi()))?
            }
            Command::Measure => write_fmt_guarded(dst, format_args!("MEAS?"))?,
        }
        dst.write_str("\r\n")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{Mode, Speed};

    fn encoded(cmd: Command) -> BytesMut {
        let mut buf = BytesMut::new();
        ScpiCodec.encode(cmd, &mut buf).expect("encode");
        buf
    }

    #[test]
    fn encode_commands() {
        assert_eq!(&encoded(Command::Idn)[..], b"*IDN?\r\n");
        assert_eq!(&encoded(Command::Configure(Mode::VDC))[..], b"CONF:VOLT:DC\r\n");
        assert_eq!(&encoded(Command::Configure(Mode::CAP))[..], b"CONF:CAP\r\n");
        assert_eq!(&encoded(Command::SetRate(Speed::Slow))[..], b"RATE S\r\n");
        assert_eq!(&encoded(Command::Measure)[..], b"MEAS?\r\n");
    }

    #[test]
    fn decode_waits_for_complete_line() {
        let mut codec = ScpiCodec;
        let mut buf = BytesMut::from(&b"1.23"[..]);
        assert_eq!(codec.decode(&mut buf).expect("decode"), None);

        buf.extend_from_slice(b"4E+00\r\n5");
        assert_eq!(
            codec.decode(&mut buf).expect("decode").as_deref(),
            Some("1.234E+00")
        );
        // The start of the next line stays buffered.
        assert_eq!(&buf[..], b"5");
    }

    #[test]
    fn decode_strips_line_ending_and_whitespace() {
        let mut codec = ScpiCodec;

        let mut buf = BytesMut::from(&b"  OWON,XDM1041,2102231,V4.3.0 \r\n"[..]);
        assert_eq!(
            codec.decode(&mut buf).expect("decode").as_deref(),
            Some("OWON,XDM1041,2102231,V4.3.0")
        );

        // Bare LF works too.
        let mut buf = BytesMut::from(&b"2.5E-03\n"[..]);
        assert_eq!(
            codec.decode(&mut buf).expect("decode").as_deref(),
            Some("2.5E-03")
        );
    }

    #[test]
    fn decode_empty_line() {
        let mut codec = ScpiCodec;
        let mut buf = BytesMut::from(&b"\r\n"[..]);
        assert_eq!(codec.decode(&mut buf).expect("decode").as_deref(), Some(""));
    }
}
