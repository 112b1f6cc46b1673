use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Response shape an endpoint commits to.
///
/// Fixed per endpoint by configuration; never chosen from request content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// Audio buffer returned from memory
    #[default]
    DirectBytes,
    /// Audio written to a temporary file and streamed from disk
    FileBacked,
    /// Base64 audio inside a JSON body
    JsonEnvelope,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::DirectBytes => "direct-bytes",
            DeliveryMode::FileBacked => "file-backed",
            DeliveryMode::JsonEnvelope => "json-envelope",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "direct-bytes" | "direct" | "bytes" => Ok(DeliveryMode::DirectBytes),
            "file-backed" | "file" | "stream" => Ok(DeliveryMode::FileBacked),
            "json-envelope" | "json" | "base64" => Ok(DeliveryMode::JsonEnvelope),
            other => Err(format!(
                "Unknown delivery mode '{other}'. Expected one of: direct-bytes, file-backed, json-envelope"
            )),
        }
    }
}
