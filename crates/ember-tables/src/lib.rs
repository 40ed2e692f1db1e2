//! Republishes the legacy BIOS platform tables for an OS loader.
//!
//! A preceding boot stage leaves the ACPI root pointer, the MP floating
//! pointer, and the SMBIOS entry point somewhere in low memory. This crate
//! runs three independent pipelines, one per table kind:
//!
//! 1. **Locate**: scan the conventional signature windows.
//! 2. **Relocate**: if the structure sits in the legacy E/F segment, copy it
//!    (and the subordinate tables it owns) into freshly allocated reserved
//!    memory, rewriting internal pointers and recomputing checksums.
//! 3. **Publish**: register the final address in the configuration-table
//!    registry under the kind's well-known identifier.
//!
//! A failure in one pipeline never blocks the other two. All memory access
//! goes through [`memory::MemoryBus`], so the whole engine runs against
//! `VecMemory` in host tests.

pub mod acpi;
pub mod alloc;
pub mod checksum;
pub mod locate;
pub mod mptable;
pub mod registry;
pub mod smbios;

use memory::MemoryBus;
use thiserror::Error;

use crate::alloc::{AllocError, TableAllocator};
use crate::registry::ConfigTableRegistry;

/// Failure of a single table kind's pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The ACPI root pointer carries a revision marker this engine does not
    /// understand (neither legacy 0 nor 2+).
    #[error("unsupported ACPI root pointer revision {0}")]
    UnsupportedRevision(u8),

    #[error(transparent)]
    Allocation(#[from] AllocError),
}

/// Run all three table pipelines.
///
/// Each failure is logged and confined to its own kind; an OS loader simply
/// sees that kind's configuration table missing.
pub fn install_platform_tables(
    mem: &mut impl MemoryBus,
    alloc: &mut impl TableAllocator,
    registry: &mut impl ConfigTableRegistry,
) {
    if let Err(err) = acpi::add_acpi_tables(mem, alloc, registry) {
        log::warn!("ACPI tables not published: {err}");
    }
    if let Err(err) = mptable::add_mps_table(mem, alloc, registry) {
        log::warn!("MP table not published: {err}");
    }
    if let Err(err) = smbios::add_smbios_table(mem, alloc, registry) {
        log::warn!("SMBIOS table not published: {err}");
    }
}
