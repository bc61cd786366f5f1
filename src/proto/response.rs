use std::io;

/// Identification reply to `*IDN?`.
///
/// The XDM1xxx answers with four comma-separated fields, e.g.
/// `OWON,XDM1041,2102231,V4.3.0`. Older firmware omits the version field.
#[derive(Debug, Clone)]
pub struct Ident {
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub firmware: String,
}

impl Ident {
    /// True for instruments of the OWON XDM1xxx family.
    pub fn is_xdm1xxx(&self) -> bool {
        self.manufacturer.to_ascii_uppercase().contains("OWON")
            && self.model.to_ascii_uppercase().contains("XDM1")
    }
}

impl TryFrom<&str> for Ident {
    type Error = io::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let values: Vec<&str> = value.split(',').map(str::trim).collect();
        if values.len() < 3 {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Invalid data for *IDN? response: {}", value),
            ));
        }
        Ok(Self {
            manufacturer: String::from(values[0]),
            model: String::from(values[1]),
            serial: String::from(values[2]),
            firmware: values.get(3).map(|s| String::from(*s)).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_ident() {
        let ident = Ident::try_from("OWON,XDM1041,2102231,V4.3.0").expect("ident");
        assert_eq!(ident.manufacturer, "OWON");
        assert_eq!(ident.model, "XDM1041");
        assert_eq!(ident.serial, "2102231");
        assert_eq!(ident.firmware, "V4.3.0");
        assert!(ident.is_xdm1xxx());
    }

    #[test]
    fn parse_ident_without_firmware() {
        let ident = Ident::try_from("OWON,XDM1141,1943252").expect("ident");
        assert_eq!(ident.serial, "1943252");
        assert_eq!(ident.firmware, "");
        assert!(ident.is_xdm1xxx());
    }

    #[test]
    fn reject_short_ident() {
        assert!(Ident::try_from("XDM1041,2102231").is_err());
        assert!(Ident::try_from("").is_err());
    }

    #[test]
    fn foreign_instruments_are_not_xdm1xxx() {
        let fluke = Ident::try_from("FLUKE,289,95210071,1.00").expect("ident");
        assert!(!fluke.is_xdm1xxx());

        let xdm2 = Ident::try_from("OWON,XDM2041,2102231,V1.0").expect("ident");
        assert!(!xdm2.is_xdm1xxx());
    }
}
