use futures::{SinkExt, StreamExt};
use std::{pin::Pin, time::Duration};
use tokio::time;
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt};
use tokio_util::codec::Decoder;

use crate::measurement::{Mode, Speed};
use crate::proto::{codec::ScpiCodec, command::Command, response::Ident, ProtoError, Result};
use crate::DEFAULT_TIMEOUT;

trait AsyncReadWrite<S>: futures::Sink<S> + futures::Stream {}

impl<T, S> AsyncReadWrite<S> for T where T: futures::Sink<S> + futures::Stream {}

/// Delay after `CONF:` until input relays and ADC have settled.
pub const MODE_SETTLE_DELAY: Duration = Duration::from_secs(3);
/// Delay after `RATE` until the new integration time is active.
pub const RATE_SETTLE_DELAY: Duration = Duration::from_millis(500);
// The instrument drops commands that arrive back-to-back.
const WRITE_GUARD_DELAY: Duration = Duration::from_millis(50);
// Discarded MEAS? readings after a mode change.
const WARMUP_READINGS: usize = 2;
const WARMUP_PAUSE: Duration = Duration::from_millis(100);

#[allow(clippy::type_complexity)]
pub struct Device {
    stream: Pin<
        Box<
            dyn AsyncReadWrite<
                Command,
                Error = std::io::Error,
                Item = std::result::Result<String, std::io::Error>,
            >,
        >,
    >,
    read_timeout: Duration,
    ident: Option<Ident>,
    mode: Option<Mode>,
}

impl Device {
    /// Open a serial connection with the default read timeout.
    pub fn new(com: impl AsRef<str>, baudrate: u32) -> Result<Self> {
        Self::with_timeout(com, baudrate, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(com: impl AsRef<str>, baudrate: u32, timeout: Duration) -> Result<Self> {
        let mut port = tokio_serial::new(com.as_ref(), baudrate).open_native_async()?;

        #[cfg(unix)]
        port.set_exclusive(false)?;

        // Drop anything the instrument pushed before we attached.
        port.clear(ClearBuffer::Input)?;

        let stream = ScpiCodec::default().framed(port);

        Ok(Self {
            stream: Box::pin(stream),
            read_timeout: timeout,
            ident: None,
            mode: None,
        })
    }

    #[cfg(test)]
    pub fn new_faked(port: crate::proto::fake::FakePort) -> Self {
        Self {
            stream: Box::pin(ScpiCodec::default().framed(port)),
            read_timeout: DEFAULT_TIMEOUT,
            ident: None,
            mode: None,
        }
    }

    /// Identification from the most recent `*IDN?` query, if any.
    pub fn identity(&self) -> Option<&Ident> {
        self.ident.as_ref()
    }

    /// Measurement function selected through [`Device::set_mode`].
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    async fn send(&mut self, cmd: Command) -> Result<()> {
        log::debug!("send({:?})", cmd);
        self.stream.send(cmd).await?;
        time::sleep(WRITE_GUARD_DELAY).await;
        Ok(())
    }

    async fn query(&mut self, cmd: Command) -> Result<String> {
        self.send(cmd).await?;
        match time::timeout(self.read_timeout, self.stream.next()).await {
            Ok(Some(Ok(line))) => {
                log::debug!("recv({:?})", line);
                Ok(line)
            }
            Ok(Some(Err(ioerr))) => Err(ioerr.into()),
            Ok(None) => Err(ProtoError::Abort),
            Err(_elapsed) => Err(ProtoError::Timeout),
        }
    }

    /// Query device identification and cache it on the handle.
    pub async fn ident(&mut self) -> Result<Ident> {
        let line = self.query(Command::Idn).await?;
        let ident = Ident::try_from(line.as_str())?;
        self.ident = Some(ident.clone());
        Ok(ident)
    }

    /// Select the measurement function.
    ///
    /// Sends `CONF:<function>`, waits for the input relays to settle and
    /// discards two warm-up readings, so the first regular
    /// [`Device::measure`] afterwards is already stable.
    pub async fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.send(Command::Configure(mode)).await?;
        time::sleep(MODE_SETTLE_DELAY).await;

        for _ in 0..WARMUP_READINGS {
            // Warm-up failures are ignored.
            let _ = self.measure().await;
            time::sleep(WARMUP_PAUSE).await;
        }

        self.mode = Some(mode);
        Ok(())
    }

    /// Select the measurement speed.
    pub async fn set_rate(&mut self, speed: Speed) -> Result<()> {
        self.send(Command::SetRate(speed)).await?;
        time::sleep(RATE_SETTLE_DELAY).await;
        Ok(())
    }

    /// Take a single reading in the current function via `MEAS?`.
    ///
    /// Does not reconfigure the instrument, so the display keeps showing
    /// the live measurement without flicker.
    pub async fn measure(&mut self) -> Result<f64> {
        let line = self.query(Command::Measure).await?;
        if line.is_empty() {
            return Err(ProtoError::EmptyReply);
        }
        line.parse::<f64>().map_err(|_| ProtoError::NonNumeric(line))
    }
}
