use serde::{Deserialize, Serialize};

/// Formatos de símbolo aceptados por el scanner JS
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum BarcodeFormat {
    #[serde(rename = "qr_code")]
    QrCode,
    #[serde(rename = "code_128")]
    Code128,
    #[serde(rename = "code_39")]
    Code39,
    #[serde(rename = "code_93")]
    Code93,
    #[serde(rename = "codabar")]
    Codabar,
    #[serde(rename = "ean_13")]
    Ean13,
    #[serde(rename = "ean_8")]
    Ean8,
    #[serde(rename = "upc_a")]
    UpcA,
    #[serde(rename = "upc_e")]
    UpcE,
    #[serde(rename = "itf")]
    Itf,
}

impl BarcodeFormat {
    pub const ALL: [BarcodeFormat; 10] = [
        BarcodeFormat::QrCode,
        BarcodeFormat::Code128,
        BarcodeFormat::Code39,
        BarcodeFormat::Code93,
        BarcodeFormat::Codabar,
        BarcodeFormat::Ean13,
        BarcodeFormat::Ean8,
        BarcodeFormat::UpcA,
        BarcodeFormat::UpcE,
        BarcodeFormat::Itf,
    ];

    /// Nombre tal como lo espera `BarcodeDetector`
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeFormat::QrCode => "qr_code",
            BarcodeFormat::Code128 => "code_128",
            BarcodeFormat::Code39 => "code_39",
            BarcodeFormat::Code93 => "code_93",
            BarcodeFormat::Codabar => "codabar",
            BarcodeFormat::Ean13 => "ean_13",
            BarcodeFormat::Ean8 => "ean_8",
            BarcodeFormat::UpcA => "upc_a",
            BarcodeFormat::UpcE => "upc_e",
            BarcodeFormat::Itf => "itf",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

/// Configuración saliente hacia el colaborador de cámara/decodificación
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ScannerConfig {
    pub formats: Vec<BarcodeFormat>,
}

impl ScannerConfig {
    pub fn new(formats: Vec<BarcodeFormat>) -> Self {
        Self { formats }
    }

    pub fn format_names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.as_str()).collect()
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            formats: BarcodeFormat::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_lists_qr_and_1d_formats() {
        let names = ScannerConfig::default().format_names();
        assert_eq!(
            names,
            vec!["qr_code", "code_128", "code_39", "code_93", "codabar", "ean_13", "ean_8", "upc_a", "upc_e", "itf"]
        );
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for format in BarcodeFormat::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format.as_str()));
            assert_eq!(BarcodeFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(BarcodeFormat::parse("aztec"), None);
    }
}
