use ember_tables::alloc::TopDownAllocator;
use ember_tables::checksum::{checksum8, sum8};
use ember_tables::registry::{ConfigTableId, ConfigTableSet};
use ember_tables::smbios::{add_smbios_table, find_smbios_entry, relocate_smbios_table};
use memory::{MemoryBus, VecMemory};

const MEM_SIZE: usize = 0x20_0000;
const ALLOC_FLOOR: u64 = 0x10_0000;
const ALLOC_TOP: u64 = 0x20_0000;

fn setup() -> (VecMemory, TopDownAllocator, ConfigTableSet) {
    (
        VecMemory::new(MEM_SIZE),
        TopDownAllocator::new(ALLOC_FLOOR, ALLOC_TOP),
        ConfigTableSet::new(),
    )
}

/// SMBIOS 2.x entry point with the given stated entry length and BCD
/// revision, pointing at a structure table elsewhere in memory.
fn write_entry_point(
    mem: &mut VecMemory,
    addr: u64,
    entry_len: u8,
    bcd_revision: u8,
    table_addr: u32,
    table_len: u16,
) {
    let buf_len = usize::from(entry_len).max(0x1F);
    let mut eps = vec![0u8; buf_len];
    eps[..4].copy_from_slice(b"_SM_");
    eps[5] = entry_len;
    eps[6] = 2;
    eps[7] = 4;
    eps[8..10].copy_from_slice(&64u16.to_le_bytes());
    eps[16..21].copy_from_slice(b"_DMI_");
    eps[22..24].copy_from_slice(&table_len.to_le_bytes());
    eps[24..28].copy_from_slice(&table_addr.to_le_bytes());
    eps[28..30].copy_from_slice(&9u16.to_le_bytes());
    eps[30] = bcd_revision;
    eps[21] = checksum8(&eps[16..usize::from(entry_len).min(buf_len)]);
    eps[4] = checksum8(&eps[..usize::from(entry_len).min(buf_len)]);
    mem.write_physical(addr, &eps);
}

fn write_structure_table(mem: &mut VecMemory, addr: u64, len: u16) {
    let bytes: Vec<u8> = (0..len).map(|i| (i ^ 0x5A) as u8).collect();
    mem.write_physical(addr, &bytes);
}

#[test]
fn entry_point_in_f_segment_is_relocated_with_its_table() {
    let (mut mem, mut alloc, mut registry) = setup();
    write_entry_point(&mut mem, 0xF_0C00, 0x1F, 0x24, 0xF_1000, 0x40);
    write_structure_table(&mut mem, 0xF_1000, 0x40);

    let mut original = [0u8; 0x1F];
    mem.read_physical(0xF_0C00, &mut original);

    let new = add_smbios_table(&mut mem, &mut alloc, &mut registry)
        .unwrap()
        .expect("entry point should be found");
    assert_ne!(new, 0xF_0C00);
    assert_eq!(registry.address_of(ConfigTableId::SmbiosTable), Some(new));

    let mut entry = [0u8; 0x1F];
    mem.read_physical(new, &mut entry);
    assert_eq!(&entry[..4], b"_SM_");

    // Structure table lands at the next 8-byte boundary after the entry
    // point (0x1F -> 0x20) and the pointer field follows it there.
    let new_table_addr = u32::from_le_bytes(entry[24..28].try_into().unwrap());
    assert_eq!(u64::from(new_table_addr), new + 0x20);
    let mut table = vec![0u8; 0x40];
    mem.read_physical(u64::from(new_table_addr), &mut table);
    let mut original_table = vec![0u8; 0x40];
    mem.read_physical(0xF_1000, &mut original_table);
    assert_eq!(table, original_table);

    // Intermediate checksum makes the _DMI_ half sum to zero; the anchor
    // checksum is carried over untouched.
    assert_eq!(sum8(&entry[0x10..]), 0);
    assert_eq!(entry[4], original[4]);

    // Original entry point unmodified.
    let mut after = [0u8; 0x1F];
    mem.read_physical(0xF_0C00, &mut after);
    assert_eq!(after, original);
}

#[test]
fn bcd_revision_21_forces_entry_length() {
    let (mut mem, mut alloc, mut registry) = setup();
    // Stated length 0x30 must be overridden to 0x1F for revision 2.1.
    write_entry_point(&mut mem, 0xF_0C00, 0x30, 0x21, 0xF_1000, 0x20);
    write_structure_table(&mut mem, 0xF_1000, 0x20);

    let new = add_smbios_table(&mut mem, &mut alloc, &mut registry)
        .unwrap()
        .unwrap();

    // With the forced 0x1F entry length the table offset is 0x20, not 0x30.
    let new_table_addr = u64::from(mem.read_u32(new + 24));
    assert_eq!(new_table_addr, new + 0x20);
}

#[test]
fn other_revisions_use_stated_entry_length() {
    let (mut mem, mut alloc, mut registry) = setup();
    write_entry_point(&mut mem, 0xF_0C00, 0x28, 0x24, 0xF_1000, 0x20);
    write_structure_table(&mut mem, 0xF_1000, 0x20);

    let new = add_smbios_table(&mut mem, &mut alloc, &mut registry)
        .unwrap()
        .unwrap();

    // 0x28 is already 8-byte aligned: the table sits right after the entry.
    let new_table_addr = u64::from(mem.read_u32(new + 24));
    assert_eq!(new_table_addr, new + 0x28);
}

#[test]
fn entry_point_below_scan_window_is_never_found() {
    let (mut mem, mut alloc, mut registry) = setup();
    write_entry_point(&mut mem, 0x5_0000, 0x1F, 0x24, 0x5_1000, 0x20);
    write_structure_table(&mut mem, 0x5_1000, 0x20);

    assert_eq!(find_smbios_entry(&mem), None);
    let out = add_smbios_table(&mut mem, &mut alloc, &mut registry).unwrap();
    assert_eq!(out, None);
    assert!(registry.is_empty());
}

#[test]
fn out_of_range_addresses_are_left_in_place() {
    let (mut mem, mut alloc, _) = setup();
    write_entry_point(&mut mem, 0xE_0000, 0x1F, 0x24, 0xF_1000, 0x20);
    write_entry_point(&mut mem, 0x10_0010, 0x1F, 0x24, 0xF_1000, 0x20);

    assert_eq!(
        relocate_smbios_table(&mut mem, &mut alloc, 0xE_0000).unwrap(),
        0xE_0000
    );
    assert_eq!(
        relocate_smbios_table(&mut mem, &mut alloc, 0x10_0010).unwrap(),
        0x10_0010
    );
    assert_eq!(relocate_smbios_table(&mut mem, &mut alloc, 0).unwrap(), 0);
    assert!(alloc.allocations().is_empty());
}
