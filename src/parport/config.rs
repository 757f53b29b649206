use crate::parport::{
    registry::{self, LEDS, LedDescriptor},
    types::Register,
};

/// I/O base of the first legacy parallel port (LPT1).
pub const DEFAULT_BASE: u16 = 0x378;

/// Control register offset from the base address.
pub const CONTROL_OFFSET: u16 = 2;

/// Highest base address whose control register is still addressable.
pub const MAX_BASE: u16 = u16::MAX - CONTROL_OFFSET;

/// Platform driver name.
pub const DRIVER_NAME: &str = "leds-parport";

/// Prefix of every LED name exposed to the host.
pub const NAME_PREFIX: &str = "parport:";

/// Compile-time port configuration: base address plus LED table.
#[derive(Debug, Clone, Copy)]
pub struct PortConfig {
    base: u16,
    table: &'static [LedDescriptor],
}

impl PortConfig {
    /// Built-in LED table at a custom base address.
    ///
    /// # Panics
    /// Panics if the control register would fall outside the 16-bit I/O
    /// space.
    pub const fn new(base: u16) -> Self {
        assert!(base <= MAX_BASE, "port base leaves no room for the control register");
        Self { base, table: &LEDS }
    }

    /// Replaces the LED table.
    ///
    /// # Panics
    /// Panics if the table fails [`registry::validate`]. A malformed table
    /// is a build error, not a runtime condition.
    pub const fn with_table(self, table: &'static [LedDescriptor]) -> Self {
        if registry::validate(table).is_err() {
            panic!("invalid led table");
        }
        Self { table, ..self }
    }

    #[inline]
    pub const fn base(&self) -> u16 {
        self.base
    }

    #[inline]
    pub const fn table(&self) -> &'static [LedDescriptor] {
        self.table
    }

    /// I/O address of `register`.
    #[inline]
    pub const fn port_of(&self, register: Register) -> u16 {
        self.base + register.offset()
    }

    /// Byte placing every LED of `register` in its off state.
    #[inline]
    pub const fn idle_value(&self, register: Register) -> u8 {
        registry::idle_value(self.table, register)
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}
