//! Sweep all modes and speeds on the first available XDM1xxx and print
//! three readings for each combination.

use std::time::Duration;

use xdm1ctrl::{discover, Mode, Speed};

#[tokio::main]
async fn main() -> xdm1ctrl::Result<()> {
    eprintln!("Searching for first OWON XDM1xxx instrument...\n");

    let mut device = discover(None).await?;
    if let Some(ident) = device.identity() {
        eprintln!(
            "Connected to: {} {} (SN {}, FW {})\n",
            ident.manufacturer, ident.model, ident.serial, ident.firmware
        );
    }

    for mode in Mode::ALL {
        println!("=== MODE: {} (CONF:{}) ===", mode, mode.scpi());
        device.set_mode(mode).await?;

        for speed in Speed::ALL {
            println!("  RATE: {} ({})", speed, speed.scpi());
            device.set_rate(speed).await?;

            for i in 0..3 {
                match device.measure().await {
                    Ok(value) => println!("    Measurement {}: {}", i + 1, value),
                    Err(err) => println!("    Measurement {} FAILED: {}", i + 1, err),
                }
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
        }
        println!();
    }

    Ok(())
}
