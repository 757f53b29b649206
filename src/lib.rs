//! A `no_std`, no-alloc driver exposing parallel port lines as LEDs.
//!
//! The eight data lines (`D0`..`D7`) and four of the control lines
//! (`Strobe`, `LF`, `Init`, `Select`) of a PC parallel port are presented
//! as twelve independent on/off LEDs.
//!
//! # Architecture
//!
//! The port only supports whole-byte writes and is never read back, so
//! the driver keeps a shadow copy of both registers and performs every
//! update as a locked read-modify-write on that shadow:
//!
//! ```text
//! ┌──────────────────┐  brightness_set  ┌──────────────────────────┐
//! │ Host LED class   │─────────────────▶│ RegisterController       │
//! │ (any context)    │                  │  critical section        │
//! │                  │                  │  shadow[reg] ^ mask      │──▶ outb(shadow, port)
//! └──────────────────┘                  └──────────────────────────┘
//!          ▲                                        ▲
//!          │ register / unregister                  │ init()
//!          │                                        │
//! ┌──────────────────┐                              │
//! │ ParportLeds      │──────────────────────────────┘
//! │ probe / remove   │
//! └──────────────────┘
//! ```
//!
//! - **Registry**: the static table of [`LedDescriptor`](parport::LedDescriptor)s
//!   (register, bit mask, polarity)
//! - **Controller**: the only owner of the shadow bytes and the only writer
//!   of the port
//! - **Driver**: registers every LED with the host, unwinding on failure
//!
//! # Example
//!
//! ```rust,no_run
//! use parport_leds::prelude::*;
//!
//! struct Stdout;
//!
//! impl PortWrite for Stdout {
//!     fn write_u8(&mut self, port: u16, value: u8) {
//!         let _ = (port, value);
//!     }
//! }
//!
//! let controller = RegisterController::new(PortConfig::default(), Stdout);
//! controller.init();
//!
//! controller.set_brightness(&LED_D3, Brightness::On);
//! controller.set_brightness(&LED_STROBE, Brightness::On);
//!
//! assert_eq!(controller.shadow(Register::Data), 0b0000_1000);
//! assert_eq!(controller.shadow(Register::Control), 0b0000_1010);
//! ```

#![deny(unsafe_code)]
#![no_std]

#[cfg(test)]
extern crate std;

pub mod parport;

pub mod prelude {
    pub use crate::parport::prelude::*;
}
