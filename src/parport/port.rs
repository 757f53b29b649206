#![allow(unsafe_code)]

/// Byte-wide output to an I/O port.
///
/// The data and control registers are treated as write-only; nothing in
/// the driver reads a port back.
pub trait PortWrite: Send {
    /// Writes `value` to the I/O address `port`.
    fn write_u8(&mut self, port: u16, value: u8);
}

impl<P: PortWrite + ?Sized> PortWrite for &mut P {
    #[inline]
    fn write_u8(&mut self, port: u16, value: u8) {
        (**self).write_u8(port, value)
    }
}

/// x86 port-mapped I/O through the `out` instruction.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Debug)]
pub struct IoPort {
    _private: (),
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl IoPort {
    /// # Safety
    /// The caller must run with I/O privilege for the parallel port range
    /// (ring 0, or `ioperm`/`iopl` granted) and must own those ports: no
    /// other code may drive the data or control register.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl PortWrite for IoPort {
    #[inline]
    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nomem, nostack, preserves_flags)
            );
        }
    }
}
