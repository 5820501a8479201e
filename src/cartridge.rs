//! A minimal NROM (mapper 0) cartridge loader: enough to get PRG-ROM bytes
//! onto the bus for the demo binary and test fixtures. No CHR-ROM, no
//! battery-backed RAM, no bank switching.

use crate::bus::SharedBus;
use crate::constants::InterruptVectors;
use crate::error::CartridgeError;

const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A]; // "NES\x1A"
const HEADER_LEN: usize = 16;
const PRG_BANK_LEN: usize = 16 * 1024;
const PRG_LOAD_ADDRESS: u16 = 0x8000;

/// A loaded cartridge: just the PRG-ROM bytes once mirroring has already
/// been resolved. Out of scope: CHR-ROM, mappers beyond NROM, save RAM.
#[derive(Debug)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
}

impl Cartridge {
    /// Parses an iNES image: 16-byte header, PRG-ROM banks, (ignored)
    /// CHR-ROM banks. A single 16 KiB PRG bank is mirrored to fill
    /// $8000-$FFFF; two banks are used as-is.
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Cartridge, CartridgeError> {
        if bytes.len() < HEADER_LEN || bytes[0..4] != INES_MAGIC {
            return Err(CartridgeError::InvalidMagic);
        }

        let mapper_low_nibble = bytes[6] >> 4;
        let mapper_high_nibble = bytes[7] & 0xF0;
        let mapper = mapper_high_nibble | mapper_low_nibble;
        if mapper != 0 {
            return Err(CartridgeError::UnsupportedMapper(mapper));
        }

        let prg_bank_count = bytes[4] as usize;
        let expected = prg_bank_count * PRG_BANK_LEN;
        let available = bytes.len().saturating_sub(HEADER_LEN);
        if available < expected {
            return Err(CartridgeError::TruncatedPrg {
                expected,
                actual: available,
            });
        }

        let prg_rom = bytes[HEADER_LEN..HEADER_LEN + expected].to_vec();
        Ok(Cartridge { prg_rom })
    }

    /// Builds a cartridge directly from a flat PRG-ROM image, with no iNES
    /// header: used by tests and the demo binary's "raw binary" mode.
    pub fn from_flat_prg(prg_rom: Vec<u8>) -> Cartridge {
        Cartridge { prg_rom }
    }

    /// Copies PRG-ROM into $8000-$FFFF, mirroring a single 16 KiB bank to
    /// fill both halves, and points the RESET vector into the loaded image.
    pub fn load_into(&self, bus: &SharedBus, reset_entry_point: Option<u16>) {
        let mut bus = bus.borrow_mut();
        if self.prg_rom.len() <= PRG_BANK_LEN {
            bus.write_range(PRG_LOAD_ADDRESS, &self.prg_rom);
            bus.write_range(PRG_LOAD_ADDRESS + PRG_BANK_LEN as u16, &self.prg_rom);
        } else {
            bus.write_range(PRG_LOAD_ADDRESS, &self.prg_rom);
        }

        if let Some(entry_point) = reset_entry_point {
            bus.write_u16(InterruptVectors::Reset as u16, entry_point);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bus::Bus;

    fn ines_header(prg_banks: u8) -> Vec<u8> {
        let mut header = vec![0u8; HEADER_LEN];
        header[0..4].copy_from_slice(&INES_MAGIC);
        header[4] = prg_banks;
        header
    }

    #[test]
    fn test_rejects_missing_magic() {
        let bytes = vec![0u8; 32];
        assert_eq!(
            Cartridge::from_ines_bytes(&bytes).unwrap_err(),
            CartridgeError::InvalidMagic
        );
    }

    #[test]
    fn test_rejects_unsupported_mapper() {
        let mut bytes = ines_header(1);
        bytes[6] = 0x10; // mapper 1, low nibble
        bytes.extend(vec![0u8; PRG_BANK_LEN]);
        assert_eq!(
            Cartridge::from_ines_bytes(&bytes).unwrap_err(),
            CartridgeError::UnsupportedMapper(1)
        );
    }

    #[test]
    fn test_rejects_truncated_prg() {
        let mut bytes = ines_header(2);
        bytes.extend(vec![0u8; PRG_BANK_LEN]); // promised 2 banks, only gave 1
        assert_eq!(
            Cartridge::from_ines_bytes(&bytes).unwrap_err(),
            CartridgeError::TruncatedPrg {
                expected: PRG_BANK_LEN * 2,
                actual: PRG_BANK_LEN,
            }
        );
    }

    #[test]
    fn test_single_bank_is_mirrored_across_both_halves() {
        let mut bytes = ines_header(1);
        let mut prg = vec![0u8; PRG_BANK_LEN];
        prg[0] = 0xEA;
        bytes.extend(prg);

        let cartridge = Cartridge::from_ines_bytes(&bytes).unwrap();
        let bus = Bus::new_shared();
        cartridge.load_into(&bus, Some(0x8000));

        assert_eq!(bus.borrow().read_u8(0x8000), 0xEA);
        assert_eq!(bus.borrow().read_u8(0xC000), 0xEA);
        assert_eq!(bus.borrow().read_u16(InterruptVectors::Reset as u16), 0x8000);
    }
}
