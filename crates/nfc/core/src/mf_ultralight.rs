//! Mifare Ultralight and NTAG page memory
//!
//! The whole Ultralight family shares a page-oriented memory of 4-byte pages. Pages 0-2
//! mirror the UID and its check bytes, page 3 holds the capability container on NFC
//! Forum tags, and EV1/NTAG parts keep their configuration pages at the end of memory.

use derive_more::Display;

use crate::nfca::NfcAData;
use crate::{Error, Result};

/// Bytes per page
pub const PAGE_SIZE: usize = 4;

/// Page capacity of a record, large enough for the NTAG I2C Plus 2k
pub const MAX_PAGE_NUM: usize = 510;

/// Length of the GET_VERSION response
pub const VERSION_SIZE: usize = 8;

/// Length of the originality signature
pub const SIGNATURE_SIZE: usize = 32;

/// Number of one-way counters
pub const COUNTER_NUM: usize = 3;

/// Number of tearing flags, one per counter
pub const TEARING_FLAG_NUM: usize = 3;

/// Tearing flag value of a counter that was never torn
pub const TEARING_FLAG_DEFAULT: u8 = 0xBD;

/// A single 4-byte page
pub type MfUltralightPage = [u8; PAGE_SIZE];

/// Ultralight family member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum MfUltralightType {
    /// Original Ultralight, or any part that does not answer GET_VERSION
    #[default]
    #[display("Mifare Ultralight")]
    Unknown,
    /// NTAG203
    #[display("NTAG203")]
    Ntag203,
    /// NTAG213
    #[display("NTAG213")]
    Ntag213,
    /// NTAG215
    #[display("NTAG215")]
    Ntag215,
    /// NTAG216
    #[display("NTAG216")]
    Ntag216,
    /// Ultralight EV1 with 48 bytes of user memory
    #[display("Mifare Ultralight 11")]
    Ul11,
    /// Ultralight EV1 with 128 bytes of user memory
    #[display("Mifare Ultralight 21")]
    Ul21,
    /// NTAG I2C 1k
    #[display("NTAG I2C 1K")]
    NtagI2c1K,
    /// NTAG I2C 2k
    #[display("NTAG I2C 2K")]
    NtagI2c2K,
    /// NTAG I2C Plus 1k
    #[display("NTAG I2C Plus 1K")]
    NtagI2cPlus1K,
    /// NTAG I2C Plus 2k
    #[display("NTAG I2C Plus 2K")]
    NtagI2cPlus2K,
}

impl MfUltralightType {
    /// Whether this is one of the NTAG I2C or I2C Plus parts
    pub const fn is_ntag_i2c(&self) -> bool {
        matches!(
            self,
            Self::NtagI2c1K | Self::NtagI2c2K | Self::NtagI2cPlus1K | Self::NtagI2cPlus2K
        )
    }
}

/// GET_VERSION response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MfUltralightVersion {
    /// Fixed header
    pub header: u8,
    /// Vendor ID
    pub vendor_id: u8,
    /// Product type
    pub prod_type: u8,
    /// Product subtype
    pub prod_subtype: u8,
    /// Major product version
    pub prod_ver_major: u8,
    /// Minor product version
    pub prod_ver_minor: u8,
    /// Storage size code
    pub storage_size: u8,
    /// Protocol type
    pub protocol_type: u8,
}

impl MfUltralightVersion {
    /// Encode as the 8-byte GET_VERSION response
    pub const fn to_bytes(&self) -> [u8; VERSION_SIZE] {
        [
            self.header,
            self.vendor_id,
            self.prod_type,
            self.prod_subtype,
            self.prod_ver_major,
            self.prod_ver_minor,
            self.storage_size,
            self.protocol_type,
        ]
    }
}

impl From<[u8; VERSION_SIZE]> for MfUltralightVersion {
    fn from(bytes: [u8; VERSION_SIZE]) -> Self {
        Self {
            header: bytes[0],
            vendor_id: bytes[1],
            prod_type: bytes[2],
            prod_subtype: bytes[3],
            prod_ver_major: bytes[4],
            prod_ver_minor: bytes[5],
            storage_size: bytes[6],
            protocol_type: bytes[7],
        }
    }
}

/// Memory image of an Ultralight family tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfUltralightData {
    /// Anticollision identity
    pub nfca: NfcAData,
    /// Family member
    pub kind: MfUltralightType,
    /// GET_VERSION response
    pub version: MfUltralightVersion,
    /// Originality signature
    pub signature: [u8; SIGNATURE_SIZE],
    /// One-way counters
    pub counter: [u32; COUNTER_NUM],
    /// Tearing flags, one per counter
    pub tearing_flag: [u8; TEARING_FLAG_NUM],
    /// Page storage, only the first `pages_total` pages belong to the tag
    pub page: [MfUltralightPage; MAX_PAGE_NUM],
    /// Number of pages holding known contents
    pub pages_read: u16,
    /// Number of pages on the tag
    pub pages_total: u16,
}

impl Default for MfUltralightData {
    fn default() -> Self {
        Self {
            nfca: NfcAData::default(),
            kind: MfUltralightType::default(),
            version: MfUltralightVersion::default(),
            signature: [0; SIGNATURE_SIZE],
            counter: [0; COUNTER_NUM],
            tearing_flag: [0; TEARING_FLAG_NUM],
            page: [[0; PAGE_SIZE]; MAX_PAGE_NUM],
            pages_read: 0,
            pages_total: 0,
        }
    }
}

impl MfUltralightData {
    /// Create an all-zero record
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages that belong to the tag
    pub fn pages(&self) -> &[MfUltralightPage] {
        &self.page[..self.pages_total as usize]
    }

    /// Page at `index`, if the tag has it
    pub fn page(&self, index: u16) -> Result<&MfUltralightPage> {
        self.pages()
            .get(index as usize)
            .ok_or(Error::PageOutOfRange(index))
    }

    /// Tag memory as a flat byte slice
    pub fn memory(&self) -> &[u8] {
        self.pages().as_flattened()
    }

    /// Write `bytes` contiguously starting at the first byte of page `start`
    ///
    /// # Panics
    ///
    /// Panics if the write runs past the last page of the tag.
    pub fn write_pages(&mut self, start: u16, bytes: &[u8]) {
        let offset = start as usize * PAGE_SIZE;
        let end = offset + bytes.len();
        assert!(
            end <= self.pages_total as usize * PAGE_SIZE,
            "write of {} bytes at page {start} runs past page {}",
            bytes.len(),
            self.pages_total
        );
        self.page.as_flattened_mut()[offset..end].copy_from_slice(bytes);
    }

    /// Whether every page of the tag holds known contents
    pub const fn is_all_pages_read(&self) -> bool {
        self.pages_read == self.pages_total
    }
}
