use xdm1ctrl::discover;

#[tokio::main]
async fn main() -> xdm1ctrl::Result<()> {
    let device = discover(None).await?;
    if let Some(ident) = device.identity() {
        eprintln!(
            "Connected to: {} {} (SN {}, FW {})",
            ident.manufacturer, ident.model, ident.serial, ident.firmware
        );
    }
    Ok(())
}
