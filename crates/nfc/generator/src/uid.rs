//! UID generation and check bytes

use nexum_nfc_core::nfca::{CASCADE_TAG, NXP_MANUFACTURER_ID, UID_DOUBLE_LEN, UID_SINGLE_LEN};
use rand::RngCore;

/// Fill `uid` with an NXP UID: the manufacturer code followed by random bytes
pub fn generate_uid<R: RngCore + ?Sized>(rng: &mut R, uid: &mut [u8]) {
    let Some((manufacturer, rest)) = uid.split_first_mut() else {
        return;
    };
    *manufacturer = NXP_MANUFACTURER_ID;
    rng.fill_bytes(rest);
}

/// Generate a double size UID the way Ultralight family parts ship
///
/// Factory parts have been observed to always carry `8` in the upper nibble of the
/// last UID byte; the lower nibble stays random.
pub fn generate_mf_ultralight_uid<R: RngCore + ?Sized>(rng: &mut R) -> [u8; UID_DOUBLE_LEN] {
    let mut uid = [0; UID_DOUBLE_LEN];
    generate_uid(rng, &mut uid);
    uid[6] = (uid[6] & 0x0F) | 0x80;
    uid
}

/// Check bytes of a double size UID as stored in Ultralight pages 0-2
///
/// `BCC0` covers the cascade tag and the first three UID bytes, `BCC1` the last four.
pub const fn calc_bcc(uid: &[u8; UID_DOUBLE_LEN]) -> (u8, u8) {
    let bcc0 = CASCADE_TAG ^ uid[0] ^ uid[1] ^ uid[2];
    let bcc1 = uid[3] ^ uid[4] ^ uid[5] ^ uid[6];
    (bcc0, bcc1)
}

/// Check byte of a single size UID as stored in Classic block 0
pub const fn calc_bcc4(uid: &[u8; UID_SINGLE_LEN]) -> u8 {
    uid[0] ^ uid[1] ^ uid[2] ^ uid[3]
}
