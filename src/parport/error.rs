/// Errors found while validating an LED descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A descriptor has no bit set in its mask.
    EmptyMask { id: &'static str },
    /// A descriptor owns more than one bit.
    MultipleBits { id: &'static str },
    /// Two descriptors own the same bit of the same register.
    Overlap {
        first: &'static str,
        second: &'static str,
    },
    /// Two descriptors share an id.
    DuplicateId { id: &'static str },
    /// A descriptor's name is not `parport:<id>`.
    NameMismatch { id: &'static str },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyMask { id } => write!(f, "led {id} has an empty bit mask"),
            ConfigError::MultipleBits { id } => write!(f, "led {id} owns more than one bit"),
            ConfigError::Overlap { first, second } => {
                write!(f, "leds {first} and {second} share a register bit")
            }
            ConfigError::DuplicateId { id } => write!(f, "led id {id} is used twice"),
            ConfigError::NameMismatch { id } => {
                write!(f, "led {id} is not named {}{id}", crate::parport::config::NAME_PREFIX)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Errors returned by [`ParportLeds::probe`](crate::parport::ParportLeds::probe).
///
/// `E` is the host LED class error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError<E> {
    /// The driver already holds registered LEDs.
    AlreadyBound,
    /// The handle store cannot hold every LED of the table.
    TooManyLeds,
    /// The host rejected a registration. Earlier registrations were undone.
    Register { led: &'static str, source: E },
}

impl<E: core::fmt::Display> core::fmt::Display for ProbeError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProbeError::AlreadyBound => write!(f, "driver is already bound"),
            ProbeError::TooManyLeds => write!(f, "led table exceeds handle capacity"),
            ProbeError::Register { led, source } => {
                write!(f, "failed to register {led}: {source}")
            }
        }
    }
}

impl<E: core::fmt::Debug + core::fmt::Display> core::error::Error for ProbeError<E> {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::EmptyMask { id } => defmt::write!(fmt, "EmptyMask({=str})", id),
            ConfigError::MultipleBits { id } => defmt::write!(fmt, "MultipleBits({=str})", id),
            ConfigError::Overlap { first, second } => {
                defmt::write!(fmt, "Overlap({=str}, {=str})", first, second)
            }
            ConfigError::DuplicateId { id } => defmt::write!(fmt, "DuplicateId({=str})", id),
            ConfigError::NameMismatch { id } => defmt::write!(fmt, "NameMismatch({=str})", id),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ProbeError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ProbeError::AlreadyBound => defmt::write!(fmt, "AlreadyBound"),
            ProbeError::TooManyLeds => defmt::write!(fmt, "TooManyLeds"),
            ProbeError::Register { led, source } => {
                defmt::write!(fmt, "Register {{ led: {=str}, source: {} }}", led, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::Overlap {
                first: "D0",
                second: "D1"
            }
            .to_string(),
            "leds D0 and D1 share a register bit"
        );
        assert_eq!(
            ProbeError::Register {
                led: "parport:D6",
                source: "no memory"
            }
            .to_string(),
            "failed to register parport:D6: no memory"
        );
        assert_eq!(
            ConfigError::NameMismatch { id: "D0" }.to_string(),
            "led D0 is not named parport:D0"
        );
        assert_eq!(
            ProbeError::<&str>::AlreadyBound.to_string(),
            "driver is already bound"
        );
    }
}
