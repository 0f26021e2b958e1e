//! Generator table
//!
//! Maps every supported chip model to its display name and to the builder producing
//! its factory image.

use std::fmt;
use std::str::FromStr;

use nexum_nfc_core::{MfClassicType, NfcDeviceData};
use rand::RngCore;
use tracing::{debug, instrument};

use crate::mf_classic::generate_mf_classic;
use crate::mf_ultralight::{
    NTAG_I2C_1K, NTAG_I2C_2K, NTAG_I2C_PLUS_1K, NTAG_I2C_PLUS_2K, NTAG213, NTAG215, NTAG216,
    UL_EV1_11, UL_EV1_21, UL_EV1_H11, UL_EV1_H21, generate_mf_ultralight,
    generate_mf_ultralight_ev1, generate_ntag_i2c, generate_ntag21x, generate_ntag203,
};
use crate::{Error, Result};

/// Supported chip models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum GeneratorType {
    /// Mifare Ultralight
    MfUltralight,
    /// Mifare Ultralight EV1, 48 bytes, 17 pF
    MfUltralightEv1_11,
    /// Mifare Ultralight EV1, 48 bytes, 50 pF
    MfUltralightEv1_H11,
    /// Mifare Ultralight EV1, 128 bytes, 17 pF
    MfUltralightEv1_21,
    /// Mifare Ultralight EV1, 128 bytes, 50 pF
    MfUltralightEv1_H21,
    /// NTAG203
    Ntag203,
    /// NTAG213
    Ntag213,
    /// NTAG215
    Ntag215,
    /// NTAG216
    Ntag216,
    /// NTAG I2C 1k
    NtagI2c1k,
    /// NTAG I2C 2k
    NtagI2c2k,
    /// NTAG I2C Plus 1k
    NtagI2cPlus1k,
    /// NTAG I2C Plus 2k
    NtagI2cPlus2k,
    /// Mifare Mini
    MfClassicMini,
    /// Mifare Classic 1k with a 4-byte UID
    MfClassic1k4b,
    /// Mifare Classic 1k with a 7-byte UID
    MfClassic1k7b,
    /// Mifare Classic 4k with a 4-byte UID
    MfClassic4k4b,
    /// Mifare Classic 4k with a 7-byte UID
    MfClassic4k7b,
}

impl GeneratorType {
    /// Every generator, in table order
    pub const ALL: [Self; 18] = [
        Self::MfUltralight,
        Self::MfUltralightEv1_11,
        Self::MfUltralightEv1_H11,
        Self::MfUltralightEv1_21,
        Self::MfUltralightEv1_H21,
        Self::Ntag203,
        Self::Ntag213,
        Self::Ntag215,
        Self::Ntag216,
        Self::NtagI2c1k,
        Self::NtagI2c2k,
        Self::NtagI2cPlus1k,
        Self::NtagI2cPlus2k,
        Self::MfClassicMini,
        Self::MfClassic1k4b,
        Self::MfClassic1k7b,
        Self::MfClassic4k4b,
        Self::MfClassic4k7b,
    ];

    /// Human readable model name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MfUltralight => "Mifare Ultralight",
            Self::MfUltralightEv1_11 => "Mifare Ultralight EV1 11",
            Self::MfUltralightEv1_H11 => "Mifare Ultralight EV1 H11",
            Self::MfUltralightEv1_21 => "Mifare Ultralight EV1 21",
            Self::MfUltralightEv1_H21 => "Mifare Ultralight EV1 H21",
            Self::Ntag203 => "NTAG203",
            Self::Ntag213 => "NTAG213",
            Self::Ntag215 => "NTAG215",
            Self::Ntag216 => "NTAG216",
            Self::NtagI2c1k => "NTAG I2C 1k",
            Self::NtagI2c2k => "NTAG I2C 2k",
            Self::NtagI2cPlus1k => "NTAG I2C Plus 1k",
            Self::NtagI2cPlus2k => "NTAG I2C Plus 2k",
            Self::MfClassicMini => "Mifare Mini",
            Self::MfClassic1k4b => "Mifare Classic 1k 4byte UID",
            Self::MfClassic1k7b => "Mifare Classic 1k 7byte UID",
            Self::MfClassic4k4b => "Mifare Classic 4k 4byte UID",
            Self::MfClassic4k7b => "Mifare Classic 4k 7byte UID",
        }
    }

    /// Short command-line friendly identifier
    pub const fn id(&self) -> &'static str {
        match self {
            Self::MfUltralight => "mf-ultralight",
            Self::MfUltralightEv1_11 => "mf-ultralight-ev1-11",
            Self::MfUltralightEv1_H11 => "mf-ultralight-ev1-h11",
            Self::MfUltralightEv1_21 => "mf-ultralight-ev1-21",
            Self::MfUltralightEv1_H21 => "mf-ultralight-ev1-h21",
            Self::Ntag203 => "ntag203",
            Self::Ntag213 => "ntag213",
            Self::Ntag215 => "ntag215",
            Self::Ntag216 => "ntag216",
            Self::NtagI2c1k => "ntag-i2c-1k",
            Self::NtagI2c2k => "ntag-i2c-2k",
            Self::NtagI2cPlus1k => "ntag-i2c-plus-1k",
            Self::NtagI2cPlus2k => "ntag-i2c-plus-2k",
            Self::MfClassicMini => "mf-mini",
            Self::MfClassic1k4b => "mf-classic-1k-4b",
            Self::MfClassic1k7b => "mf-classic-1k-7b",
            Self::MfClassic4k4b => "mf-classic-4k-4b",
            Self::MfClassic4k7b => "mf-classic-4k-7b",
        }
    }

    /// Build the factory image for this model
    pub fn generate_with_rng<R: RngCore + ?Sized>(&self, rng: &mut R) -> NfcDeviceData {
        match self {
            Self::MfUltralight => generate_mf_ultralight(rng).into(),
            Self::MfUltralightEv1_11 => generate_mf_ultralight_ev1(rng, &UL_EV1_11).into(),
            Self::MfUltralightEv1_H11 => generate_mf_ultralight_ev1(rng, &UL_EV1_H11).into(),
            Self::MfUltralightEv1_21 => generate_mf_ultralight_ev1(rng, &UL_EV1_21).into(),
            Self::MfUltralightEv1_H21 => generate_mf_ultralight_ev1(rng, &UL_EV1_H21).into(),
            Self::Ntag203 => generate_ntag203(rng).into(),
            Self::Ntag213 => generate_ntag21x(rng, &NTAG213).into(),
            Self::Ntag215 => generate_ntag21x(rng, &NTAG215).into(),
            Self::Ntag216 => generate_ntag21x(rng, &NTAG216).into(),
            Self::NtagI2c1k => generate_ntag_i2c(rng, &NTAG_I2C_1K).into(),
            Self::NtagI2c2k => generate_ntag_i2c(rng, &NTAG_I2C_2K).into(),
            Self::NtagI2cPlus1k => generate_ntag_i2c(rng, &NTAG_I2C_PLUS_1K).into(),
            Self::NtagI2cPlus2k => generate_ntag_i2c(rng, &NTAG_I2C_PLUS_2K).into(),
            Self::MfClassicMini => generate_mf_classic(rng, 4, MfClassicType::Mini).into(),
            Self::MfClassic1k4b => generate_mf_classic(rng, 4, MfClassicType::Classic1k).into(),
            Self::MfClassic1k7b => generate_mf_classic(rng, 7, MfClassicType::Classic1k).into(),
            Self::MfClassic4k4b => generate_mf_classic(rng, 4, MfClassicType::Classic4k).into(),
            Self::MfClassic4k7b => generate_mf_classic(rng, 7, MfClassicType::Classic4k).into(),
        }
    }

    /// Build the factory image for this model with the thread-local random source
    pub fn generate(&self) -> NfcDeviceData {
        self.generate_with_rng(&mut rand::rng())
    }
}

impl fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for GeneratorType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidGeneratorId(value))
    }
}

impl FromStr for GeneratorType {
    type Err = Error;

    /// Accepts either the identifier (`ntag215`) or the display name (`NTAG215`),
    /// ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|generator| {
                generator.id().eq_ignore_ascii_case(s) || generator.name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| Error::UnknownGenerator(s.to_string()))
    }
}

/// Display name of a generator
pub const fn get_name(generator: GeneratorType) -> &'static str {
    generator.name()
}

/// Overwrite `data` with a fresh factory image for `generator`
pub fn fill_data(generator: GeneratorType, data: &mut NfcDeviceData) {
    fill_data_with_rng(generator, data, &mut rand::rng());
}

/// Overwrite `data` with a fresh factory image for `generator`, drawing the UID from
/// `rng`
#[instrument(level = "debug", skip(data, rng), fields(name = generator.name()))]
pub fn fill_data_with_rng<R: RngCore + ?Sized>(
    generator: GeneratorType,
    data: &mut NfcDeviceData,
    rng: &mut R,
) {
    *data = generator.generate_with_rng(rng);
    debug!(protocol = %data.protocol(), nfca = %data.nfca(), "factory image generated");
}
