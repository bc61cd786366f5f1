use std::time::Duration;

use xdm1ctrl::{Device, Mode, DEFAULT_BAUDRATE, DEFAULT_TTY};

#[tokio::main]
async fn main() -> xdm1ctrl::Result<()> {
    let mut device = Device::new(DEFAULT_TTY, DEFAULT_BAUDRATE)?;
    device.set_mode(Mode::VDC).await?;

    loop {
        println!("Value: {}", device.measure().await?);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
