use serde::{Deserialize, Serialize};

/// Registro de un escaneo en el historial.
/// Formato persistido: `{ "id": number, "result": string, "timestamp": string }`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ScanRecord {
    pub id: i64,             // Timestamp de creación en ms, creciente dentro de la sesión
    pub result: String,      // Payload decodificado (rawValue)
    pub timestamp: String,   // Hora legible de captura
}

impl ScanRecord {
    pub fn new(id: i64, result: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id,
            result: result.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Modo de escaneo elegido por el usuario
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Un solo código y vuelve a idle
    Single,
    /// Escaneo continuo hasta "Stop"
    Multi,
}

/// Código detectado tal como lo entrega el scanner JS (`{ rawValue }`)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct DetectedCode {
    #[serde(rename = "rawValue")]
    pub raw_value: String,
}

impl DetectedCode {
    pub fn new(raw_value: impl Into<String>) -> Self {
        Self { raw_value: raw_value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_storage_field_names() {
        let record = ScanRecord::new(1700000000000, "ABC123", "11/14/2023, 10:13:20 PM");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 1700000000000i64);
        assert_eq!(json["result"], "ABC123");
        assert_eq!(json["timestamp"], "11/14/2023, 10:13:20 PM");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_detected_code_reads_raw_value() {
        let code: DetectedCode = serde_json::from_str(r#"{"rawValue":"https://example.com","format":"qr_code"}"#).unwrap();
        assert_eq!(code.raw_value, "https://example.com");
    }
}
