//! Text rendering of generated images

use std::fmt;

use nexum_nfc_core::NfcDeviceData;
use nexum_nfc_core::mf_classic::sector_by_block;

use crate::config::OutputFormat;

/// A generated image paired with the format it is printed in
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dump<'a> {
    data: &'a NfcDeviceData,
    format: OutputFormat,
}

impl<'a> Dump<'a> {
    pub(crate) const fn new(data: &'a NfcDeviceData, format: OutputFormat) -> Self {
        Self { data, format }
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let protocol = self.data.protocol();
        match self.data {
            NfcDeviceData::MfUltralight(ul) => {
                writeln!(f, "{protocol} ({}, {} pages)", ul.kind, ul.pages_total)?;
                writeln!(f, "{}", ul.nfca)?;
                if ul.version != Default::default() {
                    writeln!(f, "Version: {}", hex::encode_upper(ul.version.to_bytes()))?;
                }
            }
            NfcDeviceData::MfClassic(mfc) => {
                writeln!(
                    f,
                    "{protocol} ({}, {} blocks)",
                    mfc.kind,
                    mfc.kind.total_blocks()
                )?;
                writeln!(f, "{}", mfc.nfca)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        match (self.format, self.data) {
            (OutputFormat::Hex, data) => writeln!(f, "{}", hex::encode_upper(data.memory())),
            (OutputFormat::Table, NfcDeviceData::MfUltralight(data)) => {
                for (index, page) in data.pages().iter().enumerate() {
                    writeln!(f, "Page {index:3}: {}", hex::encode_upper(page))?;
                }
                Ok(())
            }
            (OutputFormat::Table, NfcDeviceData::MfClassic(data)) => {
                for (index, block) in data.blocks().iter().enumerate() {
                    let sector = sector_by_block(index as u16);
                    writeln!(
                        f,
                        "Sector {sector:2} Block {index:3}: {}",
                        hex::encode_upper(block)
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexum_nfc_generator::GeneratorType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(generator: GeneratorType) -> NfcDeviceData {
        generator.generate_with_rng(&mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_hex_dump() {
        let data = generate(GeneratorType::Ntag213);
        let out = Dump::new(&data, OutputFormat::Hex).to_string();
        let lines: Vec<_> = out.lines().collect();

        assert!(lines[0].contains("NTAG213"));
        assert!(lines[0].contains("45 pages"));
        assert!(lines[1].starts_with("UID: 04"));
        assert_eq!(lines[2], "Version: 0004040201000F03");
        assert_eq!(lines[3].len(), 45 * 4 * 2);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_ultralight_table() {
        let data = generate(GeneratorType::Ntag215);
        let out = Dump::new(&data, OutputFormat::Table).to_string();
        assert!(out.contains("Page   3: E1103E00\n"));
        assert_eq!(out.lines().filter(|l| l.starts_with("Page")).count(), 135);
    }

    #[test]
    fn test_classic_table() {
        let data = generate(GeneratorType::MfClassic4k4b);
        let out = Dump::new(&data, OutputFormat::Table).to_string();
        let rows: Vec<_> = out.lines().filter(|l| l.starts_with("Sector")).collect();

        assert_eq!(rows.len(), 256);
        assert_eq!(rows[3], "Sector  0 Block   3: FFFFFFFFFFFFFF078069FFFFFFFFFFFF");
        assert_eq!(rows[255], "Sector 39 Block 255: FFFFFFFFFFFFFF078069FFFFFFFFFFFF");
        assert!(!out.contains("Version"));
    }
}
