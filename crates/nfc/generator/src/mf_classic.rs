//! Factory images for Mifare Classic Mini, 1K and 4K

use nexum_nfc_core::mf_classic::{
    BLOCK_SIZE, DEFAULT_ACCESS_BITS, DEFAULT_KEY, MfClassicBlock, is_sector_trailer,
    sector_by_block,
};
use nexum_nfc_core::nfca::{UID_DOUBLE_LEN, UID_SINGLE_LEN};
use nexum_nfc_core::{MfClassicData, MfClassicKeyType, MfClassicType};
use rand::RngCore;
use tracing::trace;

use crate::uid::{calc_bcc4, generate_uid};

/// ATQA shared by every variant
pub const ATQA: [u8; 2] = [0x44, 0x00];

/// SAK reported by a variant
pub const fn sak(kind: MfClassicType) -> u8 {
    match kind {
        MfClassicType::Mini => 0x09,
        MfClassicType::Classic1k => 0x08,
        MfClassicType::Classic4k => 0x18,
    }
}

/// Write the factory sector trailer at `block`
///
/// Chips ship with both keys set to `FFFFFFFFFFFF` and access bits `FF0780`, followed
/// by the general purpose byte `69`.
fn write_sector_trailer(data: &mut MfClassicData, block: u16) {
    data.block[block as usize][6..10].copy_from_slice(&DEFAULT_ACCESS_BITS);
    data.set_block_read(block);

    let sector = sector_by_block(block);
    data.set_key_found(sector, MfClassicKeyType::A, DEFAULT_KEY);
    data.set_key_found(sector, MfClassicKeyType::B, DEFAULT_KEY);
}

/// Complete block 0 after the UID: check byte, SAK, ATQA and `FF` padding
///
/// A single size UID is followed by its check byte. A double size UID takes the check
/// byte's slot, so the manufacturer data starts one byte later than the UID would
/// suggest.
///
/// # Panics
///
/// Panics if `uid_len` is neither 4 nor 7.
pub fn finalize_block_zero(block: &mut MfClassicBlock, uid_len: usize, sak: u8, atqa: [u8; 2]) {
    assert!(
        uid_len == UID_SINGLE_LEN || uid_len == UID_DOUBLE_LEN,
        "invalid UID length {uid_len}"
    );

    let end = if uid_len == UID_SINGLE_LEN {
        block[uid_len] = calc_bcc4(&[block[0], block[1], block[2], block[3]]);
        uid_len
    } else {
        uid_len - 1
    };

    block[end + 1] = sak;
    block[end + 2..end + 4].copy_from_slice(&atqa);
    block[end + 4..].fill(0xFF);
}

/// Mifare Classic with a single (4) or double (7) size UID
///
/// # Panics
///
/// Panics if `uid_len` is neither 4 nor 7.
pub fn generate_mf_classic<R: RngCore + ?Sized>(
    rng: &mut R,
    uid_len: usize,
    kind: MfClassicType,
) -> MfClassicData {
    assert!(
        uid_len == UID_SINGLE_LEN || uid_len == UID_DOUBLE_LEN,
        "invalid UID length {uid_len}"
    );

    let mut data = MfClassicData::new(kind);
    generate_uid(rng, &mut data.block[0][..uid_len]);
    data.nfca.set_uid(&data.block[0][..uid_len]);
    data.nfca.atqa = ATQA;
    data.set_block_read(0);

    let total_blocks = kind.total_blocks();
    for block in 1..total_blocks {
        if is_sector_trailer(block) {
            write_sector_trailer(&mut data, block);
        } else {
            data.block[block as usize] = [0xFF; BLOCK_SIZE];
        }
        data.set_block_read(block);
    }
    trace!(%kind, total_blocks, "blocks initialized");

    data.nfca.sak = sak(kind);
    let (sak, atqa) = (data.nfca.sak, data.nfca.atqa);
    finalize_block_zero(&mut data.block[0], uid_len, sak, atqa);
    data
}
