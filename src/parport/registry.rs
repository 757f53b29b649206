//! The static LED table.
//!
//! Every LED is one bit of one of the two port registers. The table is
//! plain data: all LEDs behave identically apart from their register,
//! bit mask and polarity.

use crate::parport::{
    config::{NAME_PREFIX, PortConfig},
    error::ConfigError,
    types::{Brightness, Register},
};

/// Number of LEDs on the port.
pub const LED_COUNT: usize = 12;

/// Immutable description of a single LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedDescriptor {
    id: &'static str,
    name: &'static str,
    register: Register,
    mask: u8,
    inverted: bool,
}

impl LedDescriptor {
    /// Creates a descriptor. `name` is the identifier exposed to the host.
    pub const fn new(
        id: &'static str,
        name: &'static str,
        register: Register,
        mask: u8,
        inverted: bool,
    ) -> Self {
        Self {
            id,
            name,
            register,
            mask,
            inverted,
        }
    }

    #[inline]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// External name, e.g. `parport:D0`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn register(&self) -> Register {
        self.register
    }

    #[inline]
    pub const fn register_index(&self) -> usize {
        self.register.index()
    }

    #[inline]
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// True when "on" means the bit is cleared.
    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// I/O address of the register holding this LED's bit.
    #[inline]
    pub const fn port_address(&self, config: &PortConfig) -> u16 {
        config.port_of(self.register)
    }

    /// Physical bit value that represents `level`.
    #[inline]
    pub const fn bit_for(&self, level: Brightness) -> bool {
        level.is_on() != self.inverted
    }

    /// Returns `shadow` with this LED's bit driven to `level`.
    ///
    /// All other bits are left untouched.
    #[inline]
    pub const fn apply(&self, shadow: u8, level: Brightness) -> u8 {
        if self.bit_for(level) {
            shadow | self.mask
        } else {
            shadow & !self.mask
        }
    }

    /// Logical level encoded in `shadow` for this LED.
    #[inline]
    pub const fn level_in(&self, shadow: u8) -> Brightness {
        let bit = shadow & self.mask != 0;
        if bit != self.inverted {
            Brightness::On
        } else {
            Brightness::Off
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedDescriptor {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=str} ({}, mask {=u8:#x}, inverted {=bool})",
            self.name,
            self.register,
            self.mask,
            self.inverted
        )
    }
}

macro_rules! polarity {
    (active_high) => {
        false
    };
    (active_low) => {
        true
    };
}

/// Generates one `LED_<ID>` constant per entry plus the ordered table.
macro_rules! led_table {
    ($($id:ident => $reg:ident[$bit:literal], $polarity:ident;)+) => {
        paste::paste! {
            $(
                #[doc = "The `parport:" $id "` LED."]
                pub const [<LED_ $id:upper>]: LedDescriptor = LedDescriptor::new(
                    stringify!($id),
                    concat!("parport:", stringify!($id)),
                    Register::$reg,
                    1 << $bit,
                    polarity!($polarity),
                );
            )+

            const TABLE: [LedDescriptor; LED_COUNT] = [$([<LED_ $id:upper>]),+];
        }
    };
}

led_table! {
    D0 => Data[0], active_high;
    D1 => Data[1], active_high;
    D2 => Data[2], active_high;
    D3 => Data[3], active_high;
    D4 => Data[4], active_high;
    D5 => Data[5], active_high;
    D6 => Data[6], active_high;
    D7 => Data[7], active_high;
    // nStrobe, nAutoLF and nSelectIn are inverted by the port hardware.
    Strobe => Control[0], active_low;
    LF => Control[1], active_low;
    Init => Control[2], active_high;
    Select => Control[3], active_low;
}

const _: () = assert!(validate(&TABLE).is_ok(), "invalid parport led table");

/// Every LED of the port, in registration order.
pub static LEDS: [LedDescriptor; LED_COUNT] = TABLE;

/// Returns the ordered LED table.
pub fn list() -> &'static [LedDescriptor] {
    &LEDS
}

/// Looks up a descriptor by id (`"D0"`, `"Strobe"`, ...).
pub fn find(id: &str) -> Option<&'static LedDescriptor> {
    LEDS.iter().find(|led| led.id == id)
}

/// Looks up a descriptor by external name (`"parport:D0"`, ...).
pub fn find_by_name(name: &str) -> Option<&'static LedDescriptor> {
    LEDS.iter().find(|led| led.name == name)
}

/// Table position of the LED with the given id.
pub fn index_of(id: &str) -> Option<usize> {
    LEDS.iter().position(|led| led.id == id)
}

/// OR of every mask in `table` that lives in `register`.
pub const fn register_mask(table: &[LedDescriptor], register: Register) -> u8 {
    let mut mask = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i].register.index() == register.index() {
            mask |= table[i].mask;
        }
        i += 1;
    }
    mask
}

/// Register value that puts every LED of `register` in its off state.
///
/// Bits not owned by any LED stay cleared.
pub const fn idle_value(table: &[LedDescriptor], register: Register) -> u8 {
    let mut value = 0;
    let mut i = 0;
    while i < table.len() {
        let led = &table[i];
        if led.register.index() == register.index() {
            value = led.apply(value, Brightness::Off);
        }
        i += 1;
    }
    value
}

/// Checks that masks are single bits, that no two LEDs of a register
/// share a bit, that every name is `parport:<id>`, and that ids are unique.
pub const fn validate(table: &[LedDescriptor]) -> Result<(), ConfigError> {
    let mut i = 0;
    while i < table.len() {
        let led = &table[i];
        if !is_prefixed(led.name, NAME_PREFIX, led.id) {
            return Err(ConfigError::NameMismatch { id: led.id });
        }
        if led.mask == 0 {
            return Err(ConfigError::EmptyMask { id: led.id });
        }
        if !led.mask.is_power_of_two() {
            return Err(ConfigError::MultipleBits { id: led.id });
        }

        let mut j = i + 1;
        while j < table.len() {
            let other = &table[j];
            if str_eq(led.id, other.id) {
                return Err(ConfigError::DuplicateId { id: other.id });
            }
            if led.register.index() == other.register.index() && led.mask & other.mask != 0 {
                return Err(ConfigError::Overlap {
                    first: led.id,
                    second: other.id,
                });
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

/// True if `name` is exactly `prefix` followed by `id`.
const fn is_prefixed(name: &str, prefix: &str, id: &str) -> bool {
    let (name, prefix, id) = (name.as_bytes(), prefix.as_bytes(), id.as_bytes());
    if name.len() != prefix.len() + id.len() {
        return false;
    }
    let mut i = 0;
    while i < name.len() {
        let expected = if i < prefix.len() {
            prefix[i]
        } else {
            id[i - prefix.len()]
        };
        if name[i] != expected {
            return false;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
