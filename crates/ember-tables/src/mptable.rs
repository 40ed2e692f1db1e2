//! MP floating pointer and base configuration table pipeline.
//!
//! The most involved relocation of the three kinds: up to three nested blobs
//! (floating pointer, base + extended configuration table, OEM table), two
//! pointer rewrites, two checksum recomputations.

use memory::MemoryBus;

use crate::alloc::{pages_for, MemoryKind, TableAllocator, TABLE_MAX_ADDRESS};
use crate::checksum::{checksum8, pad8};
use crate::locate::{ebda_window, scan_u32, OPTION_ROM_WINDOW};
use crate::registry::{ConfigTableId, ConfigTableRegistry};
use crate::TableError;

/// `"_MP_"` as one little-endian wide word.
pub const MP_FLOATING_SIGNATURE: u32 = u32::from_le_bytes(*b"_MP_");

// Floating pointer structure fields.
const FP_PHYSICAL_ADDRESS: u64 = 4; // u32, base configuration table
const FP_LENGTH: u64 = 8; // in 16-byte units
const FP_CHECKSUM: u64 = 10;

// Base configuration table header fields.
const BASE_TABLE_LENGTH: u64 = 4; // u16
const BASE_CHECKSUM: u64 = 7;
const BASE_OEM_TABLE_POINTER: u64 = 28; // u32
const BASE_OEM_TABLE_SIZE: u64 = 32; // u16
const BASE_EXT_TABLE_LENGTH: u64 = 40; // u16

// Floating pointers inside this range (inclusive on both ends) are moved out
// of the way; anywhere else the structure stays put.
const RELOCATE_LO: u64 = 0x000F_0000;
const RELOCATE_HI: u64 = 0x0010_0000;

/// Scan the option-ROM window, then the EBDA, for the MP floating pointer.
pub fn find_mp_floating_pointer(mem: &impl MemoryBus) -> Option<u64> {
    scan_u32(mem, OPTION_ROM_WINDOW, MP_FLOATING_SIGNATURE)
        .or_else(|| scan_u32(mem, ebda_window(mem), MP_FLOATING_SIGNATURE))
}

/// Relocate the floating pointer and everything it owns out of the F segment.
///
/// No-op paths (address out of range, or no base configuration table to
/// move) return the original address: the unrelocated structure stays valid
/// and is what gets published.
pub fn relocate_mp_table(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    fp: u64,
) -> Result<u64, TableError> {
    if !(RELOCATE_LO..=RELOCATE_HI).contains(&fp) {
        return Ok(fp);
    }

    let fp_len = u64::from(mem.read_u8(fp + FP_LENGTH)) * 16;
    let base = u64::from(mem.read_u32(fp + FP_PHYSICAL_ADDRESS));
    if base == 0 {
        return Ok(fp);
    }

    let base_len = u64::from(mem.read_u16(base + BASE_TABLE_LENGTH));
    let ext_len = u64::from(mem.read_u16(base + BASE_EXT_TABLE_LENGTH));
    let oem_ptr = u64::from(mem.read_u32(base + BASE_OEM_TABLE_POINTER));
    let oem_size = u64::from(mem.read_u16(base + BASE_OEM_TABLE_SIZE));

    // New-region layout: floating pointer, then the base + extended table as
    // one contiguous blob, then the OEM table, each sub-blob starting at the
    // next 8-byte boundary.
    let base_off = fp_len + pad8(fp_len);
    let mut total = base_off + base_len + ext_len;
    let oem_off = if oem_ptr != 0 && oem_size != 0 {
        let off = total + pad8(total);
        total = off + oem_size;
        Some(off)
    } else {
        None
    };

    let new = alloc.allocate_max_address(TABLE_MAX_ADDRESS, pages_for(total), MemoryKind::AcpiNvs)?;

    let mut fp_bytes = vec![0u8; fp_len as usize];
    mem.read_physical(fp, &mut fp_bytes);

    let mut table_bytes = vec![0u8; (base_len + ext_len) as usize];
    mem.read_physical(base, &mut table_bytes);

    if let Some(off) = oem_off {
        let mut oem_bytes = vec![0u8; oem_size as usize];
        mem.read_physical(oem_ptr, &mut oem_bytes);
        mem.write_physical(new + off, &oem_bytes);
        table_bytes[BASE_OEM_TABLE_POINTER as usize..][..4]
            .copy_from_slice(&((new + off) as u32).to_le_bytes());
    }

    // The base-table checksum covers the first `base_len` bytes only; the
    // extended table carries its own checksum and is excluded.
    table_bytes[BASE_CHECKSUM as usize] = 0;
    table_bytes[BASE_CHECKSUM as usize] = checksum8(&table_bytes[..base_len as usize]);
    mem.write_physical(new + base_off, &table_bytes);

    fp_bytes[FP_PHYSICAL_ADDRESS as usize..][..4]
        .copy_from_slice(&((new + base_off) as u32).to_le_bytes());
    fp_bytes[FP_CHECKSUM as usize] = 0;
    fp_bytes[FP_CHECKSUM as usize] = checksum8(&fp_bytes);
    mem.write_physical(new, &fp_bytes);

    Ok(new)
}

/// Locate, relocate, and publish the MP floating pointer.
pub fn add_mps_table(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    registry: &mut impl ConfigTableRegistry,
) -> Result<Option<u64>, TableError> {
    let Some(found) = find_mp_floating_pointer(mem) else {
        return Ok(None);
    };
    let addr = relocate_mp_table(mem, alloc, found)?;
    registry.install(ConfigTableId::MpsTable, addr);
    Ok(Some(addr))
}
