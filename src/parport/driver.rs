use crate::parport::{
    config::PortConfig,
    controller::RegisterController,
    error::ProbeError,
    host::LedClass,
    port::PortWrite,
    registry::LED_COUNT,
    types::Brightness,
};

/// Platform driver binding the LED table to a host LED class.
///
/// `H` is the host's registration handle type. Only registered LEDs reach
/// the port; the `registered` bitmap is what host dispatch checks.
pub struct ParportLeds<P: PortWrite, H> {
    controller: RegisterController<P>,
    handles: heapless::Vec<(usize, H), LED_COUNT>,
    registered: bitmaps::Bitmap<LED_COUNT>,
}

impl<P: PortWrite, H> core::fmt::Debug for ParportLeds<P, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParportLeds")
            .field("controller", &self.controller)
            .field("registered", &self.registered.len())
            .finish_non_exhaustive()
    }
}

impl<P: PortWrite, H> ParportLeds<P, H> {
    pub fn new(config: PortConfig, port: P) -> Self {
        Self {
            controller: RegisterController::new(config, port),
            handles: heapless::Vec::new(),
            registered: bitmaps::Bitmap::new(),
        }
    }

    /// Registers every LED of the table with `class`, then initialises the
    /// port registers.
    ///
    /// Registration is all or nothing: when the host rejects an LED, the
    /// LEDs registered so far are unregistered in reverse order and the
    /// port is left untouched.
    pub fn probe<C>(&mut self, class: &mut C) -> Result<(), ProbeError<C::Error>>
    where
        C: LedClass<Handle = H>,
    {
        if self.is_bound() {
            return Err(ProbeError::AlreadyBound);
        }

        let table = self.controller.config().table();
        for (index, led) in table.iter().enumerate() {
            let handle = match class.register(led) {
                Ok(handle) => handle,
                Err(source) => {
                    warn!("{}: registration failed, unwinding", led.name());
                    self.unwind(class);
                    return Err(ProbeError::Register {
                        led: led.name(),
                        source,
                    });
                }
            };

            if let Err((_, handle)) = self.handles.push((index, handle)) {
                class.unregister(handle);
                self.unwind(class);
                return Err(ProbeError::TooManyLeds);
            }
            self.registered.set(index, true);
        }

        self.controller.init();
        info!(
            "{=str}: {=usize} leds at {=u16:#x}",
            crate::parport::config::DRIVER_NAME,
            self.registered.len(),
            self.controller.config().base()
        );
        Ok(())
    }

    /// Unregisters every LED. Calling it on an unbound driver does nothing.
    ///
    /// The port keeps its last written values.
    pub fn remove<C>(&mut self, class: &mut C)
    where
        C: LedClass<Handle = H>,
    {
        let count = self.registered.len();
        self.unwind(class);
        debug!("removed {=usize} leds", count);
    }

    fn unwind<C>(&mut self, class: &mut C)
    where
        C: LedClass<Handle = H>,
    {
        while let Some((index, handle)) = self.handles.pop() {
            class.unregister(handle);
            self.registered.set(index, false);
        }
    }

    /// True while LEDs are registered with the host.
    pub fn is_bound(&self) -> bool {
        !self.registered.is_empty()
    }

    /// True if the LED at table position `index` is registered.
    pub fn is_registered(&self, index: usize) -> bool {
        index < LED_COUNT && self.registered.get(index)
    }

    /// Number of registered LEDs.
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    pub fn controller(&self) -> &RegisterController<P> {
        &self.controller
    }

    /// Host dispatch for LEDs addressed by table position.
    ///
    /// Requests for an LED that is not registered are dropped, so an
    /// unbound driver never writes to the port.
    ///
    /// # Panics
    /// Panics if `index` is outside the LED table.
    pub fn brightness_set(&self, index: usize, level: Brightness) {
        let led = &self.controller.config().table()[index];
        if !self.is_registered(index) {
            trace!("{}: not registered, ignoring", led.name());
            return;
        }
        self.controller.set_brightness(led, level)
    }

    /// Consumes the driver. Registrations still held are dropped without
    /// being unregistered, so call [`Self::remove`] first.
    pub fn into_controller(self) -> RegisterController<P> {
        self.controller
    }
}
