#![deny(clippy::unwrap_used)]

use clap::{arg, command, value_parser};
use std::io::ErrorKind;
use std::process::exit;
use std::time::Duration;

use xdm1ctrl::measurement::{Mode, Speed};
use xdm1ctrl::proto::ProtoError;
use xdm1ctrl::{discover_with, Device, Result, DEFAULT_BAUDRATE, DEFAULT_TIMEOUT};

#[tokio::main]
async fn main() -> tokio_serial::Result<()> {
    env_logger::init();

    let matches = command!() // requires `cargo` feature
        .arg(
            arg!(
                -p --device <PORT> "Serial port of the instrument (skips auto-discovery)"
            )
            .required(false),
        )
        .arg(
            arg!(
                -s --serial <SUFFIX> "Select the instrument by serial number suffix"
            )
            .required(false),
        )
        .arg(
            arg!(
                -b --baudrate <BAUDRATE> "Baudrate"
            )
            .default_value(DEFAULT_BAUDRATE.to_string())
            .value_parser(value_parser!(u32)),
        )
        .subcommand(clap::Command::new("list").about("List available serial ports"))
        .subcommand(clap::Command::new("ident").about("Device identification"))
        .subcommand(
            clap::Command::new("mode")
                .about("Measurement function")
                .arg(
                    arg!(<mode> "VDC, VAC, IDC, IAC, RES, CAP or FREQ")
                        .value_parser(value_parser!(Mode)),
                ),
        )
        .subcommand(
            clap::Command::new("rate")
                .about("Measurement speed")
                .arg(arg!(<speed> "FAST, MEDIUM or SLOW").value_parser(value_parser!(Speed))),
        )
        .subcommand(
            clap::Command::new("measure")
                .about("Take readings in the current mode")
                .arg(
                    arg!([count] "Number of readings")
                        .default_value("1")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    arg!(--interval <MS> "Pause between readings in milliseconds")
                        .default_value("1000")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    match handle_args(&matches).await {
        Ok(()) => {}
        Err(e) => {
            let port = matches
                .get_one::<String>("device")
                .cloned()
                .unwrap_or_else(|| String::from("auto"));
            match e {
                ProtoError::Serial(err) => {
                    if err.kind() == tokio_serial::ErrorKind::NoDevice
                        || matches!(err.kind(), tokio_serial::ErrorKind::Io(ErrorKind::NotFound))
                    {
                        eprintln!("{}: File not found", port);
                    } else {
                        eprintln!("I/O Error: {} [device: {}]", err, port);
                    }
                    exit(-1);
                }
                ProtoError::Io(err) => {
                    if err.kind() == ErrorKind::NotFound {
                        eprintln!("{}: File not found", port);
                    } else {
                        eprintln!("I/O Error: {} [device: {}]", err, port);
                    }
                    exit(-1);
                }
                ProtoError::NoDevice => {
                    eprintln!("No OWON XDM1xxx instrument found, is it powered on?");
                    exit(-1);
                }
                ProtoError::Timeout => {
                    eprintln!("Device did not answer in time, aborting!");
                    exit(-1);
                }
                ProtoError::Abort => {
                    eprintln!("Failed to communicate with device, aborting!");
                    exit(-1);
                }
                ProtoError::EmptyReply | ProtoError::NonNumeric(_) => {
                    eprintln!("Received an unexpected reply from device: {}", e);
                    exit(-1);
                }
                ProtoError::UnknownMode(_) | ProtoError::UnknownRate(_) => {
                    eprintln!("{}", e);
                    exit(-1);
                }
            }
        }
    }

    Ok(())
}

async fn handle_args(matches: &clap::ArgMatches) -> Result<()> {
    // `list` works without an instrument attached.
    if let Some(("list", _args)) = matches.subcommand() {
        return list_ports();
    }

    let baudrate = matches
        .get_one::<u32>("baudrate")
        .copied()
        .unwrap_or(DEFAULT_BAUDRATE);

    let mut device = match matches.get_one::<String>("device") {
        Some(port) => {
            let device = Device::new(port, baudrate)?;
            eprintln!("Connected to: {}\n", port);
            device
        }
        None => {
            let suffix = matches.get_one::<String>("serial").map(String::as_str);
            let device = discover_with(suffix, baudrate, DEFAULT_TIMEOUT).await?;
            if let Some(ident) = device.identity() {
                eprintln!(
                    "Connected to: {} {} (SN {})\n",
                    ident.manufacturer, ident.model, ident.serial
                );
            }
            device
        }
    };

    match matches.subcommand() {
        // Device ID
        Some(("ident", _args)) => {
            let ident = device.ident().await?;
            println!("Manufacturer: {}", ident.manufacturer);
            println!("Model: {}", ident.model);
            println!("Serial: {}", ident.serial);
            println!("Firmware: {}", ident.firmware);
        }
        // Measurement function
        Some(("mode", args)) => {
            if let Some(mode) = args.get_one::<Mode>("mode") {
                device.set_mode(*mode).await?;
                println!("OK");
            }
        }
        // Measurement speed
        Some(("rate", args)) => {
            if let Some(speed) = args.get_one::<Speed>("speed") {
                device.set_rate(*speed).await?;
                println!("OK");
            }
        }
        // Readings
        Some(("measure", args)) => {
            let count = args.get_one::<u32>("count").copied().unwrap_or(1);
            let interval = args.get_one::<u64>("interval").copied().unwrap_or(1000);
            for i in 0..count {
                if i > 0 {
                    tokio::time::sleep(Duration::from_millis(interval)).await;
                }
                println!("{}", device.measure().await?);
            }
        }
        _ => {
            unreachable!("subcommand required")
        }
    }

    Ok(())
}

fn list_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }
    for info in ports {
        match info.port_type {
            tokio_serial::SerialPortType::UsbPort(usb) => {
                println!(
                    "{}: USB {:04x}:{:04x} {}",
                    info.port_name,
                    usb.vid,
                    usb.pid,
                    usb.product.as_deref().unwrap_or("-")
                );
            }
            _ => println!("{}", info.port_name),
        }
    }
    Ok(())
}
