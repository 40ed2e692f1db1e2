//! ACPI root pointer (RSDP) pipeline.

use memory::MemoryBus;

use crate::alloc::{pages_for, MemoryKind, TableAllocator, TABLE_MAX_ADDRESS};
use crate::locate::{ebda_window, scan_u64, OPTION_ROM_WINDOW};
use crate::registry::{ConfigTableId, ConfigTableRegistry};
use crate::TableError;

/// `"RSD PTR "` as one little-endian wide word.
pub const RSDP_SIGNATURE: u64 = u64::from_le_bytes(*b"RSD PTR ");

/// Byte length of a revision-0 (ACPI 1.0) RSDP, which carries no length
/// field of its own.
pub const RSDP_V1_LEN: u64 = 20;

const RSDP_REVISION: u64 = 15;
const RSDP_LENGTH: u64 = 20;

/// Scan the option-ROM window, then the EBDA, for the RSDP.
pub fn find_rsd_ptr(mem: &impl MemoryBus) -> Option<u64> {
    scan_u64(mem, OPTION_ROM_WINDOW, RSDP_SIGNATURE)
        .or_else(|| scan_u64(mem, ebda_window(mem), RSDP_SIGNATURE))
}

fn table_len(mem: &impl MemoryBus, rsdp: u64) -> Result<u64, TableError> {
    match mem.read_u8(rsdp + RSDP_REVISION) {
        0 => Ok(RSDP_V1_LEN),
        rev if rev >= 2 => Ok(u64::from(mem.read_u32(rsdp + RSDP_LENGTH))),
        rev => Err(TableError::UnsupportedRevision(rev)),
    }
}

/// Copy the RSDP out of the E/F segment if that is where the boot stage left
/// it; anywhere else it is accepted in place.
///
/// The RSDP's payload is the descriptor itself; nothing in it points back
/// into the copied range, so the bytes are taken verbatim and no checksum
/// changes.
pub fn relocate_rsd_ptr(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    rsdp: u64,
) -> Result<u64, TableError> {
    let len = table_len(mem, rsdp)?;
    if !(rsdp > OPTION_ROM_WINDOW.base && rsdp < OPTION_ROM_WINDOW.limit) {
        return Ok(rsdp);
    }

    let new = alloc.allocate_max_address(TABLE_MAX_ADDRESS, pages_for(len), MemoryKind::AcpiNvs)?;
    let mut bytes = vec![0u8; len as usize];
    mem.read_physical(rsdp, &mut bytes);
    mem.write_physical(new, &bytes);
    Ok(new)
}

/// Locate, relocate, and publish the ACPI root pointer.
///
/// Returns the published address, or `None` when no RSDP exists. The address
/// is registered under both the ACPI 2.0 identifier and the legacy one.
pub fn add_acpi_tables(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    registry: &mut impl ConfigTableRegistry,
) -> Result<Option<u64>, TableError> {
    let Some(found) = find_rsd_ptr(mem) else {
        return Ok(None);
    };
    let addr = relocate_rsd_ptr(mem, alloc, found)?;
    registry.install(ConfigTableId::AcpiTables20, addr);
    registry.install(ConfigTableId::AcpiTables, addr);
    Ok(Some(addr))
}
