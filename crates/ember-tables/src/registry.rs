//! Configuration-table registry seam.

use std::collections::BTreeMap;

/// Well-known identifiers under which platform tables are published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTableId {
    /// ACPI root pointer, original identifier.
    AcpiTables,
    /// ACPI 2.0+ alias. Published alongside [`ConfigTableId::AcpiTables`]
    /// with the same address so consumers using either identifier find
    /// identical data.
    AcpiTables20,
    /// MP floating pointer.
    MpsTable,
    /// SMBIOS entry point.
    SmbiosTable,
}

/// Registry a later OS loader consults to find platform tables.
pub trait ConfigTableRegistry {
    /// Register `address` under `id`. Re-installing an identifier overwrites
    /// the previous registration; the payload is not validated.
    fn install(&mut self, id: ConfigTableId, address: u64);
}

/// Map-backed registry.
#[derive(Debug, Default)]
pub struct ConfigTableSet {
    entries: BTreeMap<ConfigTableId, u64>,
}

impl ConfigTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address_of(&self, id: ConfigTableId) -> Option<u64> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigTableRegistry for ConfigTableSet {
    fn install(&mut self, id: ConfigTableId, address: u64) {
        self.entries.insert(id, address);
    }
}
