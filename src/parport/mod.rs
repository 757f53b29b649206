#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod host;
pub mod port;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{CONTROL_OFFSET, DEFAULT_BASE, DRIVER_NAME, MAX_BASE, NAME_PREFIX, PortConfig};
pub use controller::RegisterController;
pub use driver::ParportLeds;
pub use error::{ConfigError, ProbeError};
pub use host::{BrightnessSet, LedClass};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use port::IoPort;
pub use port::PortWrite;
pub use registry::{
    LED_COUNT, LED_D0, LED_D1, LED_D2, LED_D3, LED_D4, LED_D5, LED_D6, LED_D7, LED_INIT, LED_LF,
    LED_SELECT, LED_STROBE, LEDS, LedDescriptor,
};
pub use types::{Brightness, Register};

pub mod prelude {
    pub use super::{
        Brightness, BrightnessSet, ConfigError, LED_D0, LED_D1, LED_D2, LED_D3, LED_D4, LED_D5,
        LED_D6, LED_D7, LED_INIT, LED_LF, LED_SELECT, LED_STROBE, LEDS, LedClass, LedDescriptor,
        ParportLeds, PortConfig, PortWrite, ProbeError, Register, RegisterController,
    };
}
