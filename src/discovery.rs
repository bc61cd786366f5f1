use std::time::Duration;
use tokio::time;

use crate::device::Device;
use crate::proto::{response::Ident, ProtoError, Result};
use crate::{DEFAULT_BAUDRATE, DEFAULT_TIMEOUT};

// Pause after opening a port before the instrument accepts commands.
const WAKEUP_DELAY: Duration = Duration::from_millis(300);

/// Find the first OWON XDM1xxx on any serial port.
///
/// Every available port is probed with `*IDN?`; ports that cannot be
/// opened or answer with something else are skipped. With a
/// `serial_suffix`, only instruments whose serial number contains that
/// substring match. The matching connection is returned as the live
/// handle, identification already cached.
pub async fn discover(serial_suffix: Option<&str>) -> Result<Device> {
    discover_with(serial_suffix, DEFAULT_BAUDRATE, DEFAULT_TIMEOUT).await
}

/// [`discover`] with explicit baudrate and read timeout.
pub async fn discover_with(
    serial_suffix: Option<&str>,
    baudrate: u32,
    timeout: Duration,
) -> Result<Device> {
    for info in tokio_serial::available_ports()? {
        log::debug!("probing {}", info.port_name);

        let mut device = match Device::with_timeout(&info.port_name, baudrate, timeout) {
            Ok(device) => device,
            Err(err) => {
                log::debug!("skipping {}: {}", info.port_name, err);
                continue;
            }
        };

        time::sleep(WAKEUP_DELAY).await;

        let ident = match device.ident().await {
            Ok(ident) => ident,
            Err(err) => {
                log::debug!("skipping {}: {}", info.port_name, err);
                continue;
            }
        };

        if is_match(&ident, serial_suffix) {
            log::debug!(
                "found {} {} on {}",
                ident.model,
                ident.serial,
                info.port_name
            );
            return Ok(device);
        }
    }

    Err(ProtoError::NoDevice)
}

fn is_match(ident: &Ident, serial_suffix: Option<&str>) -> bool {
    if !ident.is_xdm1xxx() {
        return false;
    }
    match serial_suffix {
        Some(suffix) => ident.serial.contains(suffix),
        None => true,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn ident(manufacturer: &str, model: &str, serial: &str) -> Ident {
        Ident {
            manufacturer: manufacturer.to_string(),
            model: model.to_string(),
            serial: serial.to_string(),
            firmware: String::new(),
        }
    }

    #[test]
    fn matches_any_xdm1xxx_without_suffix() {
        assert!(is_match(&ident("OWON", "XDM1041", "2102231"), None));
        assert!(is_match(&ident("OWON", "XDM1141", "1943252"), None));
    }

    #[test]
    fn suffix_filters_on_serial_number() {
        let id = ident("OWON", "XDM1041", "21450145");
        assert!(is_match(&id, Some("0145")));
        assert!(!is_match(&id, Some("9999")));
    }

    #[test]
    fn foreign_instruments_never_match() {
        assert!(!is_match(&ident("FLUKE", "289", "95210071"), None));
        assert!(!is_match(&ident("OWON", "XDM2041", "2102231"), None));
        assert!(!is_match(&ident("FLUKE", "289", "95210071"), Some("0071")));
    }
}
