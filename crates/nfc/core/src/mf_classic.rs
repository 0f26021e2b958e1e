//! Mifare Classic block memory
//!
//! Memory is split into 16-byte blocks grouped in sectors. The first 32 sectors hold
//! 4 blocks each; on the 4K the remaining 8 sectors hold 16 blocks each. The last block
//! of every sector is the sector trailer carrying both keys and the access bits.

use derive_more::Display;

use crate::nfca::NfcAData;
use crate::{Error, Result};

/// Bytes per block
pub const BLOCK_SIZE: usize = 16;

/// Block capacity of a record, large enough for the 4K
pub const TOTAL_BLOCKS_MAX: usize = 256;

/// Sector capacity of a record, large enough for the 4K
pub const TOTAL_SECTORS_MAX: usize = 40;

/// Key length
pub const KEY_SIZE: usize = 6;

/// Access bits length, including the general purpose byte
pub const ACCESS_BYTES_SIZE: usize = 4;

/// Factory default key for both key A and key B
pub const DEFAULT_KEY: u64 = 0xFFFF_FFFF_FFFF;

/// Factory default access bits, transport configuration
pub const DEFAULT_ACCESS_BITS: [u8; ACCESS_BYTES_SIZE] = [0xFF, 0x07, 0x80, 0x69];

/// First block of the 16-block sectors on the 4K
const LARGE_SECTOR_START_BLOCK: u16 = 128;

/// Sectors preceding the 16-block sectors
const SMALL_SECTOR_NUM: u8 = 32;

/// A single 16-byte block
pub type MfClassicBlock = [u8; BLOCK_SIZE];

/// Mifare Classic variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum MfClassicType {
    /// Mifare Mini, 320 bytes
    #[display("Mifare Mini")]
    Mini,
    /// Mifare Classic 1K
    #[default]
    #[display("Mifare Classic 1K")]
    Classic1k,
    /// Mifare Classic 4K
    #[display("Mifare Classic 4K")]
    Classic4k,
}

impl MfClassicType {
    /// Number of sectors
    pub const fn total_sectors(&self) -> u8 {
        match self {
            Self::Mini => 5,
            Self::Classic1k => 16,
            Self::Classic4k => 40,
        }
    }

    /// Number of blocks
    pub const fn total_blocks(&self) -> u16 {
        match self {
            Self::Mini => 20,
            Self::Classic1k => 64,
            Self::Classic4k => 256,
        }
    }
}

/// Key slot in a sector trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MfClassicKeyType {
    /// Key A, bytes 0-5 of the trailer
    #[display("A")]
    A,
    /// Key B, bytes 10-15 of the trailer
    #[display("B")]
    B,
}

/// 48-bit sector key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MfClassicKey(pub [u8; KEY_SIZE]);

impl From<u64> for MfClassicKey {
    fn from(key: u64) -> Self {
        let mut bytes = [0; KEY_SIZE];
        bytes.copy_from_slice(&key.to_be_bytes()[8 - KEY_SIZE..]);
        Self(bytes)
    }
}

/// Decoded sector trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MfClassicSectorTrailer {
    /// Key A
    pub key_a: MfClassicKey,
    /// Access bits and general purpose byte
    pub access_bits: [u8; ACCESS_BYTES_SIZE],
    /// Key B
    pub key_b: MfClassicKey,
}

impl From<&MfClassicBlock> for MfClassicSectorTrailer {
    fn from(block: &MfClassicBlock) -> Self {
        let mut trailer = Self {
            key_a: MfClassicKey::default(),
            access_bits: [0; ACCESS_BYTES_SIZE],
            key_b: MfClassicKey::default(),
        };
        trailer.key_a.0.copy_from_slice(&block[..6]);
        trailer.access_bits.copy_from_slice(&block[6..10]);
        trailer.key_b.0.copy_from_slice(&block[10..]);
        trailer
    }
}

/// Whether `block` is the last block of its sector
pub const fn is_sector_trailer(block: u16) -> bool {
    if block < LARGE_SECTOR_START_BLOCK {
        (block + 1) % 4 == 0
    } else {
        (block + 1) % 16 == 0
    }
}

/// Sector containing `block`
pub const fn sector_by_block(block: u16) -> u8 {
    if block < LARGE_SECTOR_START_BLOCK {
        (block / 4) as u8
    } else {
        SMALL_SECTOR_NUM + ((block - LARGE_SECTOR_START_BLOCK) / 16) as u8
    }
}

/// Number of blocks in `sector`
pub const fn blocks_in_sector(sector: u8) -> u16 {
    if sector < SMALL_SECTOR_NUM { 4 } else { 16 }
}

/// First block of `sector`
pub const fn first_block_of_sector(sector: u8) -> u16 {
    if sector < SMALL_SECTOR_NUM {
        sector as u16 * 4
    } else {
        LARGE_SECTOR_START_BLOCK + (sector - SMALL_SECTOR_NUM) as u16 * 16
    }
}

/// Trailer block of `sector`
pub const fn sector_trailer_block(sector: u8) -> u16 {
    first_block_of_sector(sector) + blocks_in_sector(sector) - 1
}

/// Memory image of a Mifare Classic card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfClassicData {
    /// Anticollision identity
    pub nfca: NfcAData,
    /// Card variant
    pub kind: MfClassicType,
    /// Block storage, only the first `kind.total_blocks()` blocks belong to the card
    pub block: [MfClassicBlock; TOTAL_BLOCKS_MAX],
    /// Sectors whose key A is known, one bit per sector
    pub key_a_mask: u64,
    /// Sectors whose key B is known, one bit per sector
    pub key_b_mask: u64,
    /// Blocks holding known contents, one bit per block
    pub block_read_mask: [u32; TOTAL_BLOCKS_MAX / 32],
}

impl Default for MfClassicData {
    fn default() -> Self {
        Self {
            nfca: NfcAData::default(),
            kind: MfClassicType::default(),
            block: [[0; BLOCK_SIZE]; TOTAL_BLOCKS_MAX],
            key_a_mask: 0,
            key_b_mask: 0,
            block_read_mask: [0; TOTAL_BLOCKS_MAX / 32],
        }
    }
}

impl MfClassicData {
    /// Create an all-zero record for `kind`
    pub fn new(kind: MfClassicType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Blocks that belong to the card
    pub fn blocks(&self) -> &[MfClassicBlock] {
        &self.block[..self.kind.total_blocks() as usize]
    }

    /// Block at `index`, if the card has it
    pub fn block(&self, index: u16) -> Result<&MfClassicBlock> {
        self.blocks()
            .get(index as usize)
            .ok_or(Error::BlockOutOfRange {
                block: index,
                total: self.kind.total_blocks(),
            })
    }

    /// Card memory as a flat byte slice
    pub fn memory(&self) -> &[u8] {
        self.blocks().as_flattened()
    }

    /// Mark `block` as holding known contents
    ///
    /// # Panics
    ///
    /// Panics if `block` is beyond the block capacity of the record.
    pub fn set_block_read(&mut self, block: u16) {
        let block = block as usize;
        self.block_read_mask[block / 32] |= 1u32 << (block % 32);
    }

    /// Whether `block` holds known contents
    pub fn is_block_read(&self, block: u16) -> bool {
        let block = block as usize;
        self.block_read_mask
            .get(block / 32)
            .is_some_and(|mask| mask & (1u32 << (block % 32)) != 0)
    }

    /// Number of blocks holding known contents
    pub fn blocks_read(&self) -> u16 {
        self.block_read_mask
            .iter()
            .map(|mask| mask.count_ones() as u16)
            .sum()
    }

    /// Record `key` as the known key of type `key_type` for `sector` and store it in the
    /// sector trailer
    ///
    /// # Panics
    ///
    /// Panics if `sector` is beyond the sector capacity of the record.
    pub fn set_key_found(&mut self, sector: u8, key_type: MfClassicKeyType, key: u64) {
        let key = MfClassicKey::from(key);
        let trailer = &mut self.block[sector_trailer_block(sector) as usize];
        match key_type {
            MfClassicKeyType::A => {
                trailer[..6].copy_from_slice(&key.0);
                self.key_a_mask |= 1u64 << sector;
            }
            MfClassicKeyType::B => {
                trailer[10..].copy_from_slice(&key.0);
                self.key_b_mask |= 1u64 << sector;
            }
        }
    }

    /// Whether the key of type `key_type` for `sector` is known
    pub const fn is_key_found(&self, sector: u8, key_type: MfClassicKeyType) -> bool {
        if sector as usize >= TOTAL_SECTORS_MAX {
            return false;
        }
        let mask = match key_type {
            MfClassicKeyType::A => self.key_a_mask,
            MfClassicKeyType::B => self.key_b_mask,
        };
        mask & (1u64 << sector) != 0
    }

    /// Known key of type `key_type` for `sector`
    pub fn key(&self, sector: u8, key_type: MfClassicKeyType) -> Option<MfClassicKey> {
        if !self.is_key_found(sector, key_type) {
            return None;
        }
        let trailer = self.sector_trailer(sector).ok()?;
        Some(match key_type {
            MfClassicKeyType::A => trailer.key_a,
            MfClassicKeyType::B => trailer.key_b,
        })
    }

    /// Decoded trailer of `sector`
    pub fn sector_trailer(&self, sector: u8) -> Result<MfClassicSectorTrailer> {
        let total = self.kind.total_sectors();
        if sector >= total {
            return Err(Error::SectorOutOfRange { sector, total });
        }
        self.block(sector_trailer_block(sector))
            .map(MfClassicSectorTrailer::from)
    }
}
