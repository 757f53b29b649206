//! Seams towards the host LED subsystem.

use crate::parport::{
    controller::RegisterController, port::PortWrite, registry::LedDescriptor, types::Brightness,
};

/// Callback the host invokes whenever a user or trigger changes an LED.
///
/// Implementations must be callable from any context, including one
/// that has preemption disabled.
pub trait BrightnessSet: Sync {
    fn brightness_set(&self, led: &LedDescriptor, level: Brightness);
}

impl<P: PortWrite> BrightnessSet for RegisterController<P> {
    #[inline]
    fn brightness_set(&self, led: &LedDescriptor, level: Brightness) {
        self.set_brightness(led, level)
    }
}

/// Host LED class registry.
///
/// The host enumerates registered LEDs under [`LedDescriptor::name`] and
/// routes level changes to a [`BrightnessSet`] implementation.
pub trait LedClass {
    /// Token identifying one registration.
    type Handle;
    type Error;

    /// Registers `led` with the host.
    fn register(&mut self, led: &'static LedDescriptor) -> Result<Self::Handle, Self::Error>;

    /// Removes a registration. Never fails.
    fn unregister(&mut self, handle: Self::Handle);
}
