//! SMBIOS entry point pipeline.

use memory::MemoryBus;

use crate::alloc::{pages_for, MemoryKind, TableAllocator, TABLE_MAX_ADDRESS};
use crate::checksum::{checksum8, pad8};
use crate::locate::{scan_u32, SMBIOS_WINDOW};
use crate::registry::{ConfigTableId, ConfigTableRegistry};
use crate::TableError;

/// `"_SM_"` as one little-endian wide word.
pub const SMBIOS_SIGNATURE: u32 = u32::from_le_bytes(*b"_SM_");

// Entry point structure fields.
const EPS_ENTRY_LENGTH: u64 = 0x05;
const EPS_INTERMEDIATE_CHECKSUM: u64 = 0x15;
const EPS_TABLE_LENGTH: u64 = 0x16; // u16
const EPS_TABLE_ADDRESS: u64 = 0x18; // u32
const EPS_BCD_REVISION: u64 = 0x1E;

/// Entry length mandated for BCD revision 2.1 structures, whose own length
/// field is unreliable.
const EPS_V21_LEN: u64 = 0x1F;

/// The intermediate checksum covers the `_DMI_` half of the entry point,
/// starting after the anchor area.
const EPS_INTERMEDIATE_START: u64 = 0x10;

const RELOCATE_LO: u64 = 0x000F_0000;
const RELOCATE_HI: u64 = 0x0010_0000;

/// Scan for the SMBIOS entry point. Unlike ACPI and MP, only the F segment
/// is searched; entry points are documented to live there.
pub fn find_smbios_entry(mem: &impl MemoryBus) -> Option<u64> {
    scan_u32(mem, SMBIOS_WINDOW, SMBIOS_SIGNATURE)
}

/// Relocate the entry point and its structure table out of the F segment.
///
/// Null or out-of-range addresses are a no-op: the original address remains
/// the one to publish.
pub fn relocate_smbios_table(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    eps: u64,
) -> Result<u64, TableError> {
    if eps == 0 || !(RELOCATE_LO..=RELOCATE_HI).contains(&eps) {
        return Ok(eps);
    }

    let entry_len = if mem.read_u8(eps + EPS_BCD_REVISION) == 0x21 {
        EPS_V21_LEN
    } else {
        u64::from(mem.read_u8(eps + EPS_ENTRY_LENGTH))
    };
    let table_len = u64::from(mem.read_u16(eps + EPS_TABLE_LENGTH));
    let table_addr = u64::from(mem.read_u32(eps + EPS_TABLE_ADDRESS));

    let table_off = entry_len + pad8(entry_len);
    let total = table_off + table_len;

    let new = alloc.allocate_max_address(TABLE_MAX_ADDRESS, pages_for(total), MemoryKind::AcpiNvs)?;

    let mut table = vec![0u8; table_len as usize];
    mem.read_physical(table_addr, &mut table);
    mem.write_physical(new + table_off, &table);

    let mut entry = vec![0u8; entry_len as usize];
    mem.read_physical(eps, &mut entry);
    entry[EPS_TABLE_ADDRESS as usize..][..4]
        .copy_from_slice(&((new + table_off) as u32).to_le_bytes());
    // Only the intermediate checksum is recomputed; the anchor checksum over
    // the first 16 bytes is left exactly as the boot stage wrote it.
    entry[EPS_INTERMEDIATE_CHECKSUM as usize] = 0;
    entry[EPS_INTERMEDIATE_CHECKSUM as usize] =
        checksum8(&entry[EPS_INTERMEDIATE_START as usize..]);
    mem.write_physical(new, &entry);

    Ok(new)
}

/// Locate, relocate, and publish the SMBIOS entry point.
pub fn add_smbios_table(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    registry: &mut impl ConfigTableRegistry,
) -> Result<Option<u64>, TableError> {
    let Some(found) = find_smbios_entry(mem) else {
        return Ok(None);
    };
    let addr = relocate_smbios_table(mem, alloc, found)?;
    registry.install(ConfigTableId::SmbiosTable, addr);
    Ok(Some(addr))
}
