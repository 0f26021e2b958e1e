//! Factory-default memory images for NXP contactless tags
//!
//! Emulating a "blank" tag requires the exact contents a never-programmed chip ships
//! with: its UID and check bytes, version response, capability container, configuration
//! registers and, for Mifare Classic, the transport sector trailers. This crate builds
//! those images for:
//!
//! - Mifare Ultralight and Ultralight EV1 (11, H11, 21, H21)
//! - NTAG203, NTAG213, NTAG215, NTAG216
//! - NTAG I2C 1k/2k and NTAG I2C Plus 1k/2k
//! - Mifare Mini, Mifare Classic 1k and 4k with 4- or 7-byte UIDs
//!
//! ## Usage
//!
//! ```
//! use nexum_nfc_core::{NfcDeviceData, NfcProtocol};
//! use nexum_nfc_generator::{GeneratorType, fill_data, get_name};
//!
//! let mut data = NfcDeviceData::default();
//! fill_data(GeneratorType::Ntag215, &mut data);
//!
//! assert_eq!(get_name(GeneratorType::Ntag215), "NTAG215");
//! assert_eq!(data.protocol(), NfcProtocol::MfUltralight);
//! assert_eq!(data.memory().len(), 135 * 4);
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod generator;
pub mod mf_classic;
pub mod mf_ultralight;
pub mod uid;

pub use error::{Error, Result};
pub use generator::{GeneratorType, fill_data, fill_data_with_rng, get_name};
