#![forbid(unsafe_code)]

//! Byte-addressed physical memory access for boot-time firmware code.
//!
//! The table engine reads legacy BIOS structures out of low memory and writes
//! relocated copies into allocator-provided memory. Everything goes through
//! [`MemoryBus`] so the engine can run against [`VecMemory`] in tests instead
//! of real physical memory.

mod bus;
mod vec;


pub use bus::MemoryBus;
pub use vec::VecMemory;
