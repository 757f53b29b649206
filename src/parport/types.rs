/// Logical LED level. Only on and off are meaningful on a port line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Brightness {
    #[default]
    Off,
    On,
}

impl Brightness {
    /// Returns true for [`Brightness::On`].
    #[inline]
    pub const fn is_on(self) -> bool {
        matches!(self, Brightness::On)
    }
}

/// Host LED classes pass a 0..=255 level; anything but zero lights the LED.
impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        if value == 0 {
            Brightness::Off
        } else {
            Brightness::On
        }
    }
}

impl From<bool> for Brightness {
    fn from(on: bool) -> Self {
        if on { Brightness::On } else { Brightness::Off }
    }
}

impl core::ops::Not for Brightness {
    type Output = Brightness;

    fn not(self) -> Self::Output {
        match self {
            Brightness::Off => Brightness::On,
            Brightness::On => Brightness::Off,
        }
    }
}

/// One of the two write-only port registers carrying LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Data register at the base address (`D0`..`D7`).
    Data,
    /// Control register at base + 2 (`Strobe`, `LF`, `Init`, `Select`).
    Control,
}

impl Register {
    pub const ALL: [Register; 2] = [Register::Data, Register::Control];

    /// Shadow slot of this register.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Register::Data => 0,
            Register::Control => 1,
        }
    }

    /// Offset of this register from the port base address.
    #[inline]
    pub const fn offset(self) -> u16 {
        match self {
            Register::Data => 0,
            Register::Control => crate::parport::config::CONTROL_OFFSET,
        }
    }

    /// Maps a raw shadow slot back to a register.
    pub const fn from_index(index: usize) -> Option<Register> {
        match index {
            0 => Some(Register::Data),
            1 => Some(Register::Control),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Brightness {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Brightness::Off => defmt::write!(fmt, "Off"),
            Brightness::On => defmt::write!(fmt, "On"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Register {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Register::Data => defmt::write!(fmt, "Data"),
            Register::Control => defmt::write!(fmt, "Control"),
        }
    }
}
