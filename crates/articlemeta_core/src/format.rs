use std::fmt;
use std::str::FromStr;

/// Serialization requested from the document endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XmlFormat {
    /// Citation-index format; dumps ship with its XSD.
    #[default]
    XmlWos,
    XmlRsps,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown xml format {0:?} (expected xmlwos or xmlrsps)")]
pub struct UnknownFormat(pub String);

impl XmlFormat {
    pub const ALL: [XmlFormat; 2] = [XmlFormat::XmlWos, XmlFormat::XmlRsps];

    /// Value of the `format` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            XmlFormat::XmlWos => "xmlwos",
            XmlFormat::XmlRsps => "xmlrsps",
        }
    }

    pub fn ships_schema(self) -> bool {
        matches!(self, XmlFormat::XmlWos)
    }
}

impl fmt::Display for XmlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XmlFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        XmlFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
