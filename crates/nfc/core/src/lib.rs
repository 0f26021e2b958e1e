//! Card data model for NFC-A tags
//!
//! This crate describes the memory of NXP contactless tags as plain, fixed-capacity
//! records that an emulator can serve reader commands from:
//!
//! - [`NfcAData`]: the ISO/IEC 14443-3A anticollision identity (UID, ATQA, SAK)
//! - [`MfUltralightData`]: page memory of Mifare Ultralight, EV1, NTAG and NTAG I2C tags
//! - [`MfClassicData`]: block memory, sector trailers and key store of Mifare Classic cards
//! - [`NfcDeviceData`]: a record tagged by [`NfcProtocol`] carrying one of the above
//!
//! Records have a fixed capacity large enough for the biggest member of each family,
//! the model fields (`pages_total`, `kind`) say how much of it the tag actually has.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod device;
pub mod error;
pub mod mf_classic;
pub mod mf_ultralight;
pub mod nfca;

pub use device::{NfcDeviceData, NfcProtocol};
pub use error::{Error, Result};
pub use mf_classic::{MfClassicData, MfClassicKey, MfClassicKeyType, MfClassicType};
pub use mf_ultralight::{MfUltralightData, MfUltralightType, MfUltralightVersion};
pub use nfca::NfcAData;

/// Prelude module containing commonly used types
pub mod prelude {
    pub use crate::{Error, Result};

    pub use crate::NfcAData;
    pub use crate::nfca::NXP_MANUFACTURER_ID;

    pub use crate::{NfcDeviceData, NfcProtocol};

    pub use crate::{MfUltralightData, MfUltralightType, MfUltralightVersion};

    pub use crate::mf_classic::MfClassicSectorTrailer;
    pub use crate::{MfClassicData, MfClassicKey, MfClassicKeyType, MfClassicType};
}
