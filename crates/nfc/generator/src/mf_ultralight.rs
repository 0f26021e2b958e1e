//! Factory images for the Mifare Ultralight and NTAG family
//!
//! Every member starts from the same blank record carrying a random double size UID.
//! Most members then mirror the UID and its check bytes into pages 0-2, and EV1/NTAG21x
//! parts additionally carry configuration pages in the last four pages of memory.
//! Per-model differences live in the model tables below.

use nexum_nfc_core::mf_ultralight::{PAGE_SIZE, TEARING_FLAG_DEFAULT, TEARING_FLAG_NUM};
use nexum_nfc_core::nfca::UID_DOUBLE_LEN;
use nexum_nfc_core::{MfUltralightData, MfUltralightType, NfcAData};
use rand::RngCore;
use tracing::trace;

use crate::uid::{calc_bcc, generate_mf_ultralight_uid};

/// ATQA shared by the whole family
pub const ATQA: [u8; 2] = [0x44, 0x00];

/// SAK shared by the whole family
pub const SAK: u8 = 0x00;

/// GET_VERSION response of the Ultralight EV1 (MF0ULx1)
pub const VERSION_MF0ULX1: [u8; 8] = [0x00, 0x04, 0x03, 0x00, 0x01, 0x00, 0x00, 0x03];

/// GET_VERSION response of the NTAG21x
pub const VERSION_NTAG21X: [u8; 8] = [0x00, 0x04, 0x04, 0x02, 0x01, 0x00, 0x00, 0x03];

/// GET_VERSION response of the NTAG I2C
pub const VERSION_NTAG_I2C: [u8; 8] = [0x00, 0x04, 0x04, 0x05, 0x02, 0x00, 0x00, 0x03];

/// Pages 3-5 of a blank NTAG203: lock bytes, capability container and an empty NDEF TLV
pub const DEFAULT_DATA_NTAG203: [u8; 12] = [
    0xE1, 0x10, 0x12, 0x00, 0x01, 0x03, 0xA0, 0x10, 0x44, 0x03, 0x00, 0xFE,
];

/// User memory of a blank NTAG213 starting at page 4
pub const DEFAULT_DATA_NTAG213: [u8; 8] = [0x01, 0x03, 0xA0, 0x0C, 0x34, 0x03, 0x00, 0xFE];

/// User memory of a blank NTAG215/216 starting at page 4
pub const DEFAULT_DATA_NTAG215_216: [u8; 3] = [0x03, 0x00, 0xFE];

/// Capability container and empty NDEF TLV of a blank NTAG I2C starting at page 3
pub const DEFAULT_DATA_NTAG_I2C: [u8; 7] = [0xE1, 0x10, 0x00, 0x00, 0x03, 0x00, 0xFE];

/// Default value of both NTAG I2C register blocks
pub const DEFAULT_CONFIG_NTAG_I2C: [u8; 8] = [0x01, 0x00, 0xF8, 0x48, 0x08, 0x01, 0x00, 0x00];

/// NFC Forum Type 2 capability container magic and version
pub const CC_MAGIC_VERSION: [u8; 2] = [0xE1, 0x10];

/// Internal byte in page 2 on NTAG parts
const NTAG_INTERNAL_BYTE: u8 = 0x48;

/// STRG_MOD_EN bit of the MIRROR/ACCESS configuration byte
const STRG_MOD_EN: u8 = 0x04;

/// AUTH0 value leaving every page unprotected
const AUTH0_DISABLED: u8 = 0xFF;

/// Virtual card type identifier
const VCTID: u8 = 0x05;

/// Default password
const DEFAULT_PWD: [u8; PAGE_SIZE] = [0xFF; PAGE_SIZE];

/// AUTH0 configuration page of the NTAG I2C Plus
const NTAG_I2C_PLUS_AUTH0_PAGE: usize = 227;

/// Password page of the NTAG I2C Plus
const NTAG_I2C_PLUS_PWD_PAGE: usize = 229;

/// Ultralight EV1 variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ev1Model {
    /// Family member
    pub kind: MfUltralightType,
    /// Pages on the tag
    pub pages_total: u16,
    /// Product subtype, `0x01` for 17 pF and `0x02` for 50 pF parts
    pub prod_subtype: u8,
    /// Storage size code
    pub storage_size: u8,
}

impl Ev1Model {
    /// Low capacitance parts have no STRG_MOD_EN bit
    pub const fn has_strg_mod_en(&self) -> bool {
        self.prod_subtype != 0x01
    }
}

/// MF0UL11
pub const UL_EV1_11: Ev1Model = Ev1Model {
    kind: MfUltralightType::Ul11,
    pages_total: 20,
    prod_subtype: 0x01,
    storage_size: 0x0B,
};

/// MF0ULH11
pub const UL_EV1_H11: Ev1Model = Ev1Model {
    kind: MfUltralightType::Ul11,
    pages_total: 20,
    prod_subtype: 0x02,
    storage_size: 0x0B,
};

/// MF0UL21
pub const UL_EV1_21: Ev1Model = Ev1Model {
    kind: MfUltralightType::Ul21,
    pages_total: 41,
    prod_subtype: 0x01,
    storage_size: 0x0E,
};

/// MF0ULH21
pub const UL_EV1_H21: Ev1Model = Ev1Model {
    kind: MfUltralightType::Ul21,
    pages_total: 41,
    prod_subtype: 0x02,
    storage_size: 0x0E,
};

/// NTAG21x variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ntag21xModel {
    /// Family member
    pub kind: MfUltralightType,
    /// Pages on the tag
    pub pages_total: u16,
    /// Storage size code
    pub storage_size: u8,
    /// Data area size byte of the capability container
    pub cc_size: u8,
    /// User memory contents from page 4
    pub default_data: &'static [u8],
}

/// NTAG213
pub const NTAG213: Ntag21xModel = Ntag21xModel {
    kind: MfUltralightType::Ntag213,
    pages_total: 45,
    storage_size: 0x0F,
    cc_size: 0x12,
    default_data: &DEFAULT_DATA_NTAG213,
};

/// NTAG215
pub const NTAG215: Ntag21xModel = Ntag21xModel {
    kind: MfUltralightType::Ntag215,
    pages_total: 135,
    storage_size: 0x11,
    cc_size: 0x3E,
    default_data: &DEFAULT_DATA_NTAG215_216,
};

/// NTAG216
pub const NTAG216: Ntag21xModel = Ntag21xModel {
    kind: MfUltralightType::Ntag216,
    pages_total: 231,
    storage_size: 0x13,
    cc_size: 0x6D,
    default_data: &DEFAULT_DATA_NTAG215_216,
};

/// NTAG I2C or I2C Plus variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtagI2cModel {
    /// Family member
    pub kind: MfUltralightType,
    /// Pages on the tag
    pub pages_total: u16,
    /// Minor product version, `0x01` for I2C and `0x02` for I2C Plus
    pub prod_ver_minor: u8,
    /// Storage size code
    pub storage_size: u8,
    /// Data area size byte of the capability container, plain I2C parts only
    pub cc_size: Option<u8>,
}

/// NT3H1101
pub const NTAG_I2C_1K: NtagI2cModel = NtagI2cModel {
    kind: MfUltralightType::NtagI2c1K,
    pages_total: 231,
    prod_ver_minor: 0x01,
    storage_size: 0x13,
    cc_size: Some(0x6D),
};

/// NT3H1201
pub const NTAG_I2C_2K: NtagI2cModel = NtagI2cModel {
    kind: MfUltralightType::NtagI2c2K,
    pages_total: 485,
    prod_ver_minor: 0x01,
    storage_size: 0x15,
    cc_size: Some(0xEA),
};

/// NT3H2111
pub const NTAG_I2C_PLUS_1K: NtagI2cModel = NtagI2cModel {
    kind: MfUltralightType::NtagI2cPlus1K,
    pages_total: 236,
    prod_ver_minor: 0x02,
    storage_size: 0x13,
    cc_size: None,
};

/// NT3H2211
pub const NTAG_I2C_PLUS_2K: NtagI2cModel = NtagI2cModel {
    kind: MfUltralightType::NtagI2cPlus2K,
    pages_total: 492,
    prod_ver_minor: 0x02,
    storage_size: 0x15,
    cc_size: None,
};

/// Location of the NTAG I2C configuration and session registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtagI2cRegisters {
    /// First page of the configuration registers
    pub config_page: u16,
    /// First page of the session registers
    pub session_page: u16,
}

/// Register pages of an NTAG I2C part
///
/// # Panics
///
/// Panics if `kind` is not an NTAG I2C or I2C Plus type.
pub fn ntag_i2c_registers(kind: MfUltralightType) -> NtagI2cRegisters {
    if !kind.is_ntag_i2c() {
        unreachable!("{kind} has no NTAG I2C registers");
    }
    let (config_page, session_page) = match kind {
        MfUltralightType::NtagI2c1K => (227, 229),
        MfUltralightType::NtagI2c2K => (481, 483),
        _ => (232, 234),
    };
    NtagI2cRegisters {
        config_page,
        session_page,
    }
}

/// Blank record with a fresh UID, ATQA and SAK
fn common_start<R: RngCore + ?Sized>(rng: &mut R) -> MfUltralightData {
    let uid = generate_mf_ultralight_uid(rng);
    MfUltralightData {
        nfca: NfcAData::new(&uid, ATQA, SAK),
        ..MfUltralightData::new()
    }
}

const fn set_pages_total(data: &mut MfUltralightData, pages_total: u16) {
    data.pages_total = pages_total;
    data.pages_read = pages_total;
}

fn uid(data: &MfUltralightData) -> [u8; UID_DOUBLE_LEN] {
    let mut uid = [0; UID_DOUBLE_LEN];
    uid.copy_from_slice(&data.nfca.uid[..UID_DOUBLE_LEN]);
    uid
}

/// Mirror the UID and both check bytes into pages 0-2
fn copy_uid_with_bcc(data: &mut MfUltralightData) {
    let uid = uid(data);
    let (bcc0, bcc1) = calc_bcc(&uid);
    data.page[0][..3].copy_from_slice(&uid[..3]);
    data.page[0][3] = bcc0;
    data.page[1].copy_from_slice(&uid[3..]);
    data.page[2][0] = bcc1;
}

/// Original Ultralight (MF0ICU1), 16 pages
pub fn generate_mf_ultralight<R: RngCore + ?Sized>(rng: &mut R) -> MfUltralightData {
    let mut data = common_start(rng);
    data.kind = MfUltralightType::Unknown;
    set_pages_total(&mut data, 16);
    copy_uid_with_bcc(&mut data);
    // Page 2 internal byte is undocumented and left at zero, page 4 contents are a
    // placeholder
    data.page[4] = [0xFF; PAGE_SIZE];
    data
}

/// Blank record for a part with configuration pages at the end of memory
fn with_config_common<R: RngCore + ?Sized>(rng: &mut R, pages_total: u16) -> MfUltralightData {
    let mut data = common_start(rng);
    set_pages_total(&mut data, pages_total);
    copy_uid_with_bcc(&mut data);

    let config = pages_total as usize - 4;
    data.page[config][0] = STRG_MOD_EN;
    data.page[config][3] = AUTH0_DISABLED;
    data.page[config + 1][1] = VCTID;
    data.page[config + 2] = DEFAULT_PWD;
    if pages_total > 20 {
        data.page[config - 1][3] = TEARING_FLAG_DEFAULT;
    }
    trace!(config_page = config, pages_total, "configuration pages set");
    data
}

/// Ultralight EV1
pub fn generate_mf_ultralight_ev1<R: RngCore + ?Sized>(
    rng: &mut R,
    model: &Ev1Model,
) -> MfUltralightData {
    let mut data = with_config_common(rng, model.pages_total);
    data.kind = model.kind;
    data.version = VERSION_MF0ULX1.into();
    data.version.prod_subtype = model.prod_subtype;
    data.version.storage_size = model.storage_size;
    data.tearing_flag = [TEARING_FLAG_DEFAULT; TEARING_FLAG_NUM];
    if !model.has_strg_mod_en() {
        data.page[model.pages_total as usize - 4][0] = 0x00;
    }
    data
}

/// NTAG203, 42 pages, no GET_VERSION
pub fn generate_ntag203<R: RngCore + ?Sized>(rng: &mut R) -> MfUltralightData {
    let mut data = common_start(rng);
    data.kind = MfUltralightType::Ntag203;
    set_pages_total(&mut data, 42);
    copy_uid_with_bcc(&mut data);
    data.page[2][1] = NTAG_INTERNAL_BYTE;
    data.write_pages(3, &DEFAULT_DATA_NTAG203);
    data
}

/// NTAG213, NTAG215 or NTAG216
pub fn generate_ntag21x<R: RngCore + ?Sized>(
    rng: &mut R,
    model: &Ntag21xModel,
) -> MfUltralightData {
    let mut data = with_config_common(rng, model.pages_total);
    data.kind = model.kind;
    data.version = VERSION_NTAG21X.into();
    data.version.storage_size = model.storage_size;
    data.page[2][1] = NTAG_INTERNAL_BYTE;
    data.page[3] = [CC_MAGIC_VERSION[0], CC_MAGIC_VERSION[1], model.cc_size, 0x00];
    data.write_pages(4, model.default_data);
    data
}

/// Blank NTAG I2C record with registers at their default values
fn ntag_i2c_common<R: RngCore + ?Sized>(
    rng: &mut R,
    kind: MfUltralightType,
    pages_total: u16,
) -> MfUltralightData {
    let mut data = common_start(rng);
    data.kind = kind;
    data.version = VERSION_NTAG_I2C.into();
    set_pages_total(&mut data, pages_total);

    // The I2C parts expose the UID, SAK and ATQA in pages 0-2 instead of check bytes
    let uid = uid(&data);
    data.write_pages(0, &uid);
    data.page[1][3] = data.nfca.sak;
    data.page[2][..2].copy_from_slice(&data.nfca.atqa);

    let registers = ntag_i2c_registers(kind);
    trace!(
        config_page = registers.config_page,
        session_page = registers.session_page,
        "NTAG I2C register pages"
    );
    data.write_pages(registers.config_page, &DEFAULT_CONFIG_NTAG_I2C);
    data.write_pages(registers.session_page, &DEFAULT_CONFIG_NTAG_I2C);
    data
}

/// NTAG I2C or NTAG I2C Plus
///
/// # Panics
///
/// Panics if `model.kind` is not an NTAG I2C or I2C Plus type.
pub fn generate_ntag_i2c<R: RngCore + ?Sized>(
    rng: &mut R,
    model: &NtagI2cModel,
) -> MfUltralightData {
    let mut data = ntag_i2c_common(rng, model.kind, model.pages_total);
    data.version.prod_ver_minor = model.prod_ver_minor;
    data.version.storage_size = model.storage_size;

    match model.kind {
        MfUltralightType::NtagI2cPlus1K | MfUltralightType::NtagI2cPlus2K => {
            data.page[NTAG_I2C_PLUS_AUTH0_PAGE][3] = AUTH0_DISABLED;
            data.page[NTAG_I2C_PLUS_PWD_PAGE] = DEFAULT_PWD;
        }
        _ => {}
    }

    if let Some(cc_size) = model.cc_size {
        data.write_pages(3, &DEFAULT_DATA_NTAG_I2C);
        data.page[3][2] = cc_size;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use nexum_nfc_core::nfca::NXP_MANUFACTURER_ID;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EED)
    }

    fn assert_uid_mirror(data: &MfUltralightData) {
        let uid = uid(data);
        let (bcc0, bcc1) = calc_bcc(&uid);
        assert_eq!(&data.page[0][..3], &uid[..3]);
        assert_eq!(data.page[0][3], bcc0);
        assert_eq!(&data.page[1], &uid[3..]);
        assert_eq!(data.page[2][0], bcc1);
    }

    #[test]
    fn test_mf_ultralight() {
        let data = generate_mf_ultralight(&mut rng());
        assert_eq!(data.kind, MfUltralightType::Unknown);
        assert_eq!(data.pages_total, 16);
        assert!(data.is_all_pages_read());
        assert_eq!(data.nfca.uid_len, 7);
        assert_eq!(data.nfca.uid[0], NXP_MANUFACTURER_ID);
        assert_eq!(data.nfca.atqa, ATQA);
        assert_uid_mirror(&data);
        // Known-approximate: placeholder contents
        assert_eq!(data.page[4], [0xFF; 4]);
        assert_eq!(data.page[2][1], 0x00);
    }

    #[test]
    fn test_ev1_config_pages() {
        let data = generate_mf_ultralight_ev1(&mut rng(), &UL_EV1_H11);
        assert_eq!(data.pages_total, 20);
        assert_uid_mirror(&data);
        assert_eq!(data.page[16], hex!("040000FF"));
        assert_eq!(data.page[17], hex!("00050000"));
        assert_eq!(data.page[18], hex!("FFFFFFFF"));
        // 20-page parts have no tearing byte before the configuration
        assert_eq!(data.page[15], hex!("00000000"));
        assert_eq!(data.version.to_bytes(), hex!("0004030201000B03"));
        assert_eq!(data.tearing_flag, [TEARING_FLAG_DEFAULT; 3]);
    }

    #[test]
    fn test_ev1_low_capacitance_clears_strg_mod_en() {
        let data = generate_mf_ultralight_ev1(&mut rng(), &UL_EV1_21);
        assert_eq!(data.kind, MfUltralightType::Ul21);
        assert_eq!(data.pages_total, 41);
        assert_eq!(data.page[37], hex!("000000FF"));
        assert_eq!(data.page[36][3], TEARING_FLAG_DEFAULT);
        assert_eq!(data.version.prod_subtype, 0x01);
        assert_eq!(data.version.storage_size, 0x0E);

        let data = generate_mf_ultralight_ev1(&mut rng(), &UL_EV1_H21);
        assert_eq!(data.page[37][0], STRG_MOD_EN);
    }

    #[test]
    fn test_ev1_11_config_pages() {
        let data = generate_mf_ultralight_ev1(&mut rng(), &UL_EV1_11);
        assert_eq!(data.kind, MfUltralightType::Ul11);
        assert_eq!(data.page[16], hex!("000000FF"));
        assert_eq!(data.page[17], hex!("00050000"));
        assert_eq!(data.page[18], hex!("FFFFFFFF"));
        assert_eq!(data.version.to_bytes(), hex!("0004030101000B03"));
    }

    #[test]
    fn test_ntag203() {
        let data = generate_ntag203(&mut rng());
        assert_eq!(data.pages_total, 42);
        assert_uid_mirror(&data);
        assert_eq!(data.page[2][1], 0x48);
        assert_eq!(data.page[3], hex!("E1101200"));
        assert_eq!(data.page[4], hex!("0103A010"));
        assert_eq!(data.page[5], hex!("440300FE"));
        assert_eq!(data.version.to_bytes(), [0; 8]);
    }

    #[test]
    fn test_ntag21x() {
        for (model, cc) in [
            (NTAG213, hex!("E1101200")),
            (NTAG215, hex!("E1103E00")),
            (NTAG216, hex!("E1106D00")),
        ] {
            let data = generate_ntag21x(&mut rng(), &model);
            assert_eq!(data.kind, model.kind);
            assert_eq!(data.pages().len(), model.pages_total as usize);
            assert_eq!(data.page[3], cc);
            assert_eq!(data.page[2][1], 0x48);
            assert_eq!(data.version.storage_size, model.storage_size);
            assert_eq!(data.version.prod_type, 0x04);
            let config = model.pages_total as usize - 4;
            assert_eq!(data.page[config - 1][3], TEARING_FLAG_DEFAULT);
            assert_eq!(data.page[config + 2], [0xFF; 4]);
        }

        let data = generate_ntag21x(&mut rng(), &NTAG213);
        assert_eq!(&data.memory()[16..24], &DEFAULT_DATA_NTAG213);
        let data = generate_ntag21x(&mut rng(), &NTAG216);
        assert_eq!(data.page[4], hex!("0300FE00"));
    }

    #[test]
    fn test_ntag_i2c() {
        let data = generate_ntag_i2c(&mut rng(), &NTAG_I2C_2K);
        assert_eq!(data.pages_total, 485);
        assert_eq!(&data.memory()[..7], &data.nfca.uid[..7]);
        assert_eq!(data.page[1][3], SAK);
        assert_eq!(&data.page[2][..2], &ATQA);
        assert_eq!(data.page[3], hex!("E110EA00"));
        assert_eq!(data.page[4], hex!("0300FE00"));
        assert_eq!(&data.memory()[481 * 4..485 * 4], &[DEFAULT_CONFIG_NTAG_I2C; 2].concat()[..]);
        assert_eq!(data.version.to_bytes(), hex!("0004040502011503"));
    }

    #[test]
    fn test_ntag_i2c_1k() {
        let data = generate_ntag_i2c(&mut rng(), &NTAG_I2C_1K);
        assert_eq!(data.kind, MfUltralightType::NtagI2c1K);
        assert_eq!(data.pages_total, 231);
        assert_eq!(data.page[3], hex!("E1106D00"));
        assert_eq!(data.page[4], hex!("0300FE00"));
        assert_eq!(data.page[227], hex!("0100F848"));
        assert_eq!(data.page[228], hex!("08010000"));
        assert_eq!(data.page[229], hex!("0100F848"));
        assert_eq!(data.page[230], hex!("08010000"));
        assert_eq!(data.version.to_bytes(), hex!("0004040502011303"));
    }

    #[test]
    fn test_ntag_i2c_plus_2k() {
        let data = generate_ntag_i2c(&mut rng(), &NTAG_I2C_PLUS_2K);
        assert_eq!(data.kind, MfUltralightType::NtagI2cPlus2K);
        assert_eq!(data.pages_total, 492);
        assert_eq!(data.page[227], hex!("000000FF"));
        assert_eq!(data.page[229], hex!("FFFFFFFF"));
        assert_eq!(data.page[232], hex!("0100F848"));
        assert_eq!(data.page[233], hex!("08010000"));
        assert_eq!(data.page[234], hex!("0100F848"));
        assert_eq!(data.page[235], hex!("08010000"));
        assert_eq!(data.page[3], [0; 4]);
        assert_eq!(data.version.to_bytes(), hex!("0004040502021503"));
    }

    #[test]
    fn test_ntag_i2c_plus() {
        let data = generate_ntag_i2c(&mut rng(), &NTAG_I2C_PLUS_1K);
        assert_eq!(data.pages_total, 236);
        assert_eq!(data.page[227], hex!("000000FF"));
        assert_eq!(data.page[229], hex!("FFFFFFFF"));
        assert_eq!(data.page[232], hex!("0100F848"));
        assert_eq!(data.page[235], hex!("08010000"));
        // No default NDEF content on the Plus parts
        assert_eq!(data.page[3], [0; 4]);
        assert_eq!(data.version.prod_ver_minor, 0x02);
    }

    #[test]
    fn test_ntag_i2c_registers() {
        assert_eq!(
            ntag_i2c_registers(MfUltralightType::NtagI2c1K),
            NtagI2cRegisters {
                config_page: 227,
                session_page: 229
            }
        );
        assert_eq!(
            ntag_i2c_registers(MfUltralightType::NtagI2cPlus2K).config_page,
            232
        );
    }

    #[test]
    #[should_panic(expected = "has no NTAG I2C registers")]
    fn test_ntag_i2c_registers_unknown_type() {
        ntag_i2c_registers(MfUltralightType::Ntag216);
    }
}
