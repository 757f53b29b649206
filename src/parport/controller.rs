use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};

use crate::parport::{
    config::PortConfig,
    port::PortWrite,
    registry::LedDescriptor,
    types::{Brightness, Register},
};

/// Shadow bytes of both registers plus the port they mirror.
struct Registers<P> {
    shadow: [u8; 2],
    port: P,
}

impl<P: PortWrite> Registers<P> {
    fn store(&mut self, config: &PortConfig, register: Register, value: u8) {
        self.shadow[register.index()] = value;
        self.port.write_u8(config.port_of(register), value);
    }
}

/// Sole owner of the parallel port registers.
///
/// Every update is a read-modify-write of the in-memory shadow followed by
/// a whole-byte write of that shadow to the port. A single critical
/// section guards both registers, so concurrent updates to LEDs sharing a
/// register are totally ordered and none is lost.
pub struct RegisterController<P: PortWrite> {
    config: PortConfig,
    registers: Mutex<RefCell<Registers<P>>>,
}

impl<P: PortWrite> core::fmt::Debug for RegisterController<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterController")
            .field("base", &self.config.base())
            .finish_non_exhaustive()
    }
}

impl<P: PortWrite> RegisterController<P> {
    /// Creates a controller with both shadows at their idle values.
    ///
    /// No I/O is performed until [`Self::init`].
    pub fn new(config: PortConfig, port: P) -> Self {
        Self {
            config,
            registers: Mutex::new(RefCell::new(Registers {
                shadow: Register::ALL.map(|reg| config.idle_value(reg)),
                port,
            })),
        }
    }

    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    /// Turns every LED off and writes both registers.
    ///
    /// The data register is written first, then the control register.
    pub fn init(&self) {
        critical_section::with(|cs| {
            let mut regs = self.registers.borrow_ref_mut(cs);
            for reg in Register::ALL {
                regs.store(&self.config, reg, self.config.idle_value(reg));
            }
        });
        debug!("parport {=u16:#x}: registers initialised", self.config.base());
    }

    /// Drives `led` to `level`, leaving every other bit of its register as
    /// it was last written.
    pub fn set_brightness(&self, led: &LedDescriptor, level: Brightness) {
        critical_section::with(|cs| self.set_brightness_in(cs, led, level))
    }

    /// Same as [`Self::set_brightness`] for callers already inside a
    /// critical section.
    ///
    /// # Panics
    /// Panics if called re-entrantly from the port writer of this
    /// controller.
    pub fn set_brightness_in(
        &self,
        cs: CriticalSection<'_>,
        led: &LedDescriptor,
        level: Brightness,
    ) {
        let mut regs = self.registers.borrow_ref_mut(cs);
        let register = led.register();
        let value = led.apply(regs.shadow[register.index()], level);
        regs.store(&self.config, register, value);
        drop(regs);

        trace!("{}: {} -> {=u8:#x}", led.name(), level, value);
    }

    /// Drives every LED of the configured table to `level` with one write
    /// per register.
    pub fn set_all(&self, level: Brightness) {
        critical_section::with(|cs| {
            let mut regs = self.registers.borrow_ref_mut(cs);
            for reg in Register::ALL {
                let value = self
                    .config
                    .table()
                    .iter()
                    .filter(|led| led.register() == reg)
                    .fold(regs.shadow[reg.index()], |shadow, led| {
                        led.apply(shadow, level)
                    });
                regs.store(&self.config, reg, value);
            }
        });
    }

    /// Last value written to `register`.
    pub fn shadow(&self, register: Register) -> u8 {
        critical_section::with(|cs| self.registers.borrow_ref(cs).shadow[register.index()])
    }

    /// Logical level of `led` according to the shadow.
    pub fn brightness(&self, led: &LedDescriptor) -> Brightness {
        led.level_in(self.shadow(led.register()))
    }

    /// Consumes the controller, handing back the port writer.
    pub fn into_port(self) -> P {
        self.registers.into_inner().into_inner().port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parport::{
        registry::{LED_D0, LED_D3, LED_D7, LED_INIT, LED_LF, LED_SELECT, LED_STROBE, list},
        test_support::{CONTROL, DATA, RecordingPort, test_controller},
    };

    #[test]
    fn new_starts_idle_without_io() {
        let ctrl = test_controller();
        assert_eq!(ctrl.shadow(Register::Data), 0x00);
        assert_eq!(ctrl.shadow(Register::Control), 0x0B);
        assert!(ctrl.into_port().writes().is_empty());
    }

    #[test]
    fn init_writes_idle_values() {
        let ctrl = test_controller();
        ctrl.init();
        assert_eq!(ctrl.into_port().writes(), &[(DATA, 0x00), (CONTROL, 0x0B)]);
    }

    #[test]
    fn init_resets_after_use() {
        let ctrl = test_controller();
        ctrl.set_brightness(&LED_D3, Brightness::On);
        ctrl.set_brightness(&LED_SELECT, Brightness::On);
        ctrl.init();
        assert_eq!(ctrl.shadow(Register::Data), 0x00);
        assert_eq!(ctrl.shadow(Register::Control), 0x0B);
    }

    #[test]
    fn non_inverted_on_sets_bit() {
        let ctrl = test_controller();
        ctrl.set_brightness(&LED_D7, Brightness::On);
        assert_eq!(ctrl.shadow(Register::Data), 0x80);
        ctrl.set_brightness(&LED_INIT, Brightness::On);
        assert_eq!(ctrl.shadow(Register::Control), 0x0F);
        ctrl.set_brightness(&LED_INIT, Brightness::Off);
        assert_eq!(ctrl.shadow(Register::Control), 0x0B);
    }

    #[test]
    fn inverted_on_clears_bit() {
        let ctrl = test_controller();
        ctrl.set_brightness(&LED_STROBE, Brightness::On);
        assert_eq!(ctrl.shadow(Register::Control), 0x0A);
        ctrl.set_brightness(&LED_LF, Brightness::On);
        assert_eq!(ctrl.shadow(Register::Control), 0x08);
        ctrl.set_brightness(&LED_STROBE, Brightness::Off);
        assert_eq!(ctrl.shadow(Register::Control), 0x09);
    }

    #[test]
    fn each_call_writes_full_byte_once() {
        let ctrl = test_controller();
        ctrl.set_brightness(&LED_D0, Brightness::On);
        ctrl.set_brightness(&LED_D3, Brightness::On);
        ctrl.set_brightness(&LED_SELECT, Brightness::On);
        assert_eq!(
            ctrl.into_port().writes(),
            &[(DATA, 0x01), (DATA, 0x09), (CONTROL, 0x03)]
        );
    }

    #[test]
    fn on_then_off_restores_shadow() {
        let ctrl = test_controller();
        ctrl.set_brightness(&LED_D3, Brightness::On);
        ctrl.set_brightness(&LED_LF, Brightness::On);

        for led in list() {
            ctrl.set_brightness(led, Brightness::Off);
            let before = ctrl.shadow(led.register());
            ctrl.set_brightness(led, Brightness::On);
            ctrl.set_brightness(led, Brightness::Off);
            assert_eq!(ctrl.shadow(led.register()), before, "{}", led.id());
        }
    }

    #[test]
    fn setting_one_led_never_moves_another() {
        let ctrl = test_controller();
        for (i, led) in list().iter().enumerate() {
            for other in list().iter().skip(i + 1) {
                if other.register() != led.register() {
                    continue;
                }
                for level in [Brightness::On, Brightness::Off] {
                    let before = ctrl.shadow(other.register()) & other.mask();
                    ctrl.set_brightness(led, level);
                    let after = ctrl.shadow(other.register()) & other.mask();
                    assert_eq!(before, after, "{} moved {}", led.id(), other.id());
                }
            }
        }
    }

    #[test]
    fn brightness_reads_back_logical_level() {
        let ctrl = test_controller();
        for led in list() {
            assert_eq!(ctrl.brightness(led), Brightness::Off);
            ctrl.set_brightness(led, Brightness::On);
            assert_eq!(ctrl.brightness(led), Brightness::On);
        }
        assert_eq!(ctrl.shadow(Register::Data), 0xFF);
        assert_eq!(ctrl.shadow(Register::Control), 0x04);
    }

    #[test]
    fn set_all_writes_once_per_register() {
        let ctrl = test_controller();
        ctrl.set_all(Brightness::On);
        ctrl.set_all(Brightness::Off);
        assert_eq!(
            ctrl.into_port().writes(),
            &[(DATA, 0xFF), (CONTROL, 0x04), (DATA, 0x00), (CONTROL, 0x0B)]
        );
    }

    #[test]
    fn usable_inside_existing_critical_section() {
        let ctrl = test_controller();
        critical_section::with(|cs| {
            ctrl.set_brightness_in(cs, &LED_D0, Brightness::On);
            ctrl.set_brightness_in(cs, &LED_D7, Brightness::On);
        });
        assert_eq!(ctrl.shadow(Register::Data), 0x81);
    }

    #[test]
    fn custom_base_address() {
        let ctrl = RegisterController::new(PortConfig::new(0x278), RecordingPort::new());
        ctrl.set_brightness(&LED_SELECT, Brightness::On);
        assert_eq!(ctrl.into_port().writes(), &[(0x27A, 0x03)]);
    }

    #[test]
    fn concurrent_updates_to_shared_register_are_not_lost() {
        let ctrl = test_controller();

        std::thread::scope(|s| {
            for led in list() {
                let ctrl = &ctrl;
                s.spawn(move || {
                    for i in 0..500 {
                        let level = if i % 2 == 0 {
                            Brightness::Off
                        } else {
                            Brightness::On
                        };
                        ctrl.set_brightness(led, level);
                    }
                });
            }
        });

        // Every thread ends on On.
        assert_eq!(ctrl.shadow(Register::Data), 0xFF);
        assert_eq!(ctrl.shadow(Register::Control), 0x04);

        let port = ctrl.into_port();
        assert_eq!(port.writes().len(), 12 * 500);
        assert_eq!(port.last(DATA), Some(0xFF));
        assert_eq!(port.last(CONTROL), Some(0x04));
    }

    #[test]
    fn two_back_to_back_updates_both_land() {
        let ctrl = test_controller();
        std::thread::scope(|s| {
            s.spawn(|| ctrl.set_brightness(&LED_D0, Brightness::On));
            s.spawn(|| ctrl.set_brightness(&LED_D7, Brightness::On));
        });
        assert_eq!(ctrl.shadow(Register::Data), 0x81);
        assert_eq!(ctrl.into_port().last(DATA), Some(0x81));
    }
}
