/// Abstraction for physical memory access.
///
/// Reads take `&self`: in the boot phase this crate serves, table memory is
/// plain RAM and reading it has no side effects. All widened accessors are
/// little-endian.
pub trait MemoryBus {
    fn read_u8(&self, paddr: u64) -> u8;
    fn write_u8(&mut self, paddr: u64, value: u8);

    fn read_physical(&self, paddr: u64, buf: &mut [u8]) {
        for (i, out) in buf.iter_mut().enumerate() {
            *out = self.read_u8(paddr + i as u64);
        }
    }

    fn write_physical(&mut self, paddr: u64, buf: &[u8]) {
        for (i, &b) in buf.iter().enumerate() {
            self.write_u8(paddr + i as u64, b);
        }
    }

    fn read_u16(&self, paddr: u64) -> u16 {
        let mut buf = [0u8; 2];
        self.read_physical(paddr, &mut buf);
        u16::from_le_bytes(buf)
    }

    fn read_u32(&self, paddr: u64) -> u32 {
        let mut buf = [0u8; 4];
        self.read_physical(paddr, &mut buf);
        u32::from_le_bytes(buf)
    }

    /// 8-byte read, used for signature matching with a single wide compare.
    fn read_u64(&self, paddr: u64) -> u64 {
        let mut buf = [0u8; 8];
        self.read_physical(paddr, &mut buf);
        u64::from_le_bytes(buf)
    }

    fn write_u16(&mut self, paddr: u64, value: u16) {
        self.write_physical(paddr, &value.to_le_bytes());
    }

    fn write_u32(&mut self, paddr: u64, value: u32) {
        self.write_physical(paddr, &value.to_le_bytes());
    }
}
