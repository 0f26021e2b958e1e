//! Protocol-tagged card record

use derive_more::Display;

use crate::mf_classic::MfClassicData;
use crate::mf_ultralight::MfUltralightData;
use crate::nfca::NfcAData;

/// Card protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NfcProtocol {
    /// Mifare Ultralight and NTAG, page addressed
    #[display("Mifare Ultralight")]
    MfUltralight,
    /// Mifare Classic, block addressed
    #[display("Mifare Classic")]
    MfClassic,
}

/// Memory image of a card, tagged by protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfcDeviceData {
    /// Ultralight family image
    MfUltralight(Box<MfUltralightData>),
    /// Classic family image
    MfClassic(Box<MfClassicData>),
}

impl Default for NfcDeviceData {
    fn default() -> Self {
        Self::MfUltralight(Box::default())
    }
}

impl NfcDeviceData {
    /// Protocol of the carried image
    pub const fn protocol(&self) -> NfcProtocol {
        match self {
            Self::MfUltralight(_) => NfcProtocol::MfUltralight,
            Self::MfClassic(_) => NfcProtocol::MfClassic,
        }
    }

    /// Anticollision identity of the card
    pub fn nfca(&self) -> &NfcAData {
        match self {
            Self::MfUltralight(data) => &data.nfca,
            Self::MfClassic(data) => &data.nfca,
        }
    }

    /// Card memory as a flat byte slice
    pub fn memory(&self) -> &[u8] {
        match self {
            Self::MfUltralight(data) => data.memory(),
            Self::MfClassic(data) => data.memory(),
        }
    }

    /// Ultralight image, if this is one
    pub fn as_mf_ultralight(&self) -> Option<&MfUltralightData> {
        match self {
            Self::MfUltralight(data) => Some(data),
            Self::MfClassic(_) => None,
        }
    }

    /// Classic image, if this is one
    pub fn as_mf_classic(&self) -> Option<&MfClassicData> {
        match self {
            Self::MfClassic(data) => Some(data),
            Self::MfUltralight(_) => None,
        }
    }
}

impl From<MfUltralightData> for NfcDeviceData {
    fn from(data: MfUltralightData) -> Self {
        Self::MfUltralight(Box::new(data))
    }
}

impl From<MfClassicData> for NfcDeviceData {
    fn from(data: MfClassicData) -> Self {
        Self::MfClassic(Box::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mf_classic::MfClassicType;

    #[test]
    fn test_protocol_tag() {
        let data = NfcDeviceData::default();
        assert_eq!(data.protocol(), NfcProtocol::MfUltralight);
        assert!(data.as_mf_classic().is_none());
        assert!(data.memory().is_empty());

        let data = NfcDeviceData::from(MfClassicData::new(MfClassicType::Mini));
        assert_eq!(data.protocol(), NfcProtocol::MfClassic);
        assert_eq!(data.memory().len(), 320);
        assert!(data.as_mf_ultralight().is_none());
    }
}
