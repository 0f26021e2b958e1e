//! ISO/IEC 14443-3A identity shared by every NFC-A card

use std::fmt;

/// Maximum UID length handled by the data model (triple size UID)
pub const UID_MAX_LEN: usize = 10;

/// Single size UID length
pub const UID_SINGLE_LEN: usize = 4;

/// Double size UID length
pub const UID_DOUBLE_LEN: usize = 7;

/// Cascade tag prepended to the first UID fragment of a double size UID
pub const CASCADE_TAG: u8 = 0x88;

/// NXP Semiconductors IC manufacturer code (ISO/IEC 7816-6)
pub const NXP_MANUFACTURER_ID: u8 = 0x04;

/// Anticollision identity of an NFC-A card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NfcAData {
    /// UID storage, only the first `uid_len` bytes are meaningful
    pub uid: [u8; UID_MAX_LEN],
    /// Number of valid UID bytes
    pub uid_len: u8,
    /// Answer to request, type A
    pub atqa: [u8; 2],
    /// Select acknowledge
    pub sak: u8,
}

impl NfcAData {
    /// Create an identity from a UID, ATQA and SAK
    ///
    /// # Panics
    ///
    /// Panics if `uid` is neither a single (4) nor a double (7) size UID.
    pub fn new(uid: &[u8], atqa: [u8; 2], sak: u8) -> Self {
        let mut data = Self {
            atqa,
            sak,
            ..Self::default()
        };
        data.set_uid(uid);
        data
    }

    /// The valid part of the UID
    pub fn uid(&self) -> &[u8] {
        &self.uid[..self.uid_len as usize]
    }

    /// Replace the UID, clearing any bytes left over from a longer one
    ///
    /// # Panics
    ///
    /// Panics if `uid` is neither a single (4) nor a double (7) size UID.
    pub fn set_uid(&mut self, uid: &[u8]) {
        assert!(
            uid.len() == UID_SINGLE_LEN || uid.len() == UID_DOUBLE_LEN,
            "invalid UID length {}",
            uid.len()
        );
        self.uid = [0; UID_MAX_LEN];
        self.uid[..uid.len()].copy_from_slice(uid);
        self.uid_len = uid.len() as u8;
    }
}

impl fmt::Display for NfcAData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UID: {} ATQA: {} SAK: {:02X}",
            hex::encode_upper(self.uid()),
            hex::encode_upper(self.atqa),
            self.sak
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_set_uid_lengths() {
        let mut data = NfcAData::default();
        data.set_uid(&hex!("04112233"));
        assert_eq!(data.uid(), &hex!("04112233"));

        data.set_uid(&hex!("04112233445566"));
        assert_eq!(data.uid_len, 7);
        assert_eq!(data.uid[0], NXP_MANUFACTURER_ID);
    }

    #[test]
    #[should_panic(expected = "invalid UID length 2")]
    fn test_set_uid_rejects_short_uid() {
        NfcAData::default().set_uid(&hex!("0411"));
    }

    #[test]
    fn test_shorter_uid_clears_tail() {
        let mut data = NfcAData::default();
        data.set_uid(&hex!("04112233445566"));
        data.set_uid(&hex!("04AABBCC"));
        assert_eq!(&data.uid[4..], &[0; 6]);
    }

    #[test]
    fn test_display() {
        let data = NfcAData::new(&hex!("04A1B2C3"), [0x44, 0x00], 0x08);
        assert_eq!(data.to_string(), "UID: 04A1B2C3 ATQA: 4400 SAK: 08");
    }
}
