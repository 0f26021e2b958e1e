//! Error types for the card data model

/// Result type for data model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when addressing the card data model out of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Page index beyond the page capacity of an Ultralight record
    #[error("Page {0} out of range")]
    PageOutOfRange(u16),

    /// Block index beyond the block count of a Classic card
    #[error("Block {block} out of range for {total} blocks")]
    BlockOutOfRange {
        /// Requested block
        block: u16,
        /// Blocks available on the card
        total: u16,
    },

    /// Sector index beyond the sector count of a Classic card
    #[error("Sector {sector} out of range for {total} sectors")]
    SectorOutOfRange {
        /// Requested sector
        sector: u8,
        /// Sectors available on the card
        total: u8,
    },
}
