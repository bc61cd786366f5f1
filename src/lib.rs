//!
//! This library provides communication with OWON XDM1xxx series bench
//! multimeters over their serial port, using SCPI text commands.
//!
//! <br>
//!
//! # Details
//!
//! - The instrument shows up as a regular USB serial port, no adapter
//!   needed.
//!
//! - Basic setup and connection
//!
//!   ```no_run
//!   use xdm1ctrl::{Device, Mode, DEFAULT_BAUDRATE};
//!   #[tokio::main]
//!   async fn main() -> xdm1ctrl::Result<()> {
//!       let path = "/dev/ttyUSB0".to_string();
//!       let mut device = Device::new(&path, DEFAULT_BAUDRATE)?;
//!       eprintln!("Connected to: {}\n", device.ident().await?.model);
//!       device.set_mode(Mode::VDC).await?;
//!       println!("{} V", device.measure().await?);
//!       Ok(())
//!   }
//!   ```
//!
//! - Auto-discovery, optionally filtered by serial number suffix
//!
//!   ```no_run
//!   use xdm1ctrl::discover;
//!   #[tokio::main]
//!   async fn main() -> xdm1ctrl::Result<()> {
//!       let mut device = discover(Some("1543")).await?;
//!       println!("{}", device.measure().await?);
//!       Ok(())
//!   }
//!   ```
//!
//! # Supported devices
//!
//!  * OWON XDM1041
//!  * OWON XDM1141
//!

pub mod device;
pub mod discovery;
pub mod measurement;
pub mod proto;

pub use device::Device;
pub use discovery::{discover, discover_with};
pub use measurement::{Mode, Speed};
pub use proto::Result;

use std::time::Duration;

#[cfg(unix)]
pub const DEFAULT_TTY: &str = "/dev/ttyUSB0";
#[cfg(windows)]
pub const DEFAULT_TTY: &str = "COM1";

/// Default Baudrate for the XDM1xxx series.
pub const DEFAULT_BAUDRATE: u32 = 115200;

/// Default read timeout for a single reply line.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
