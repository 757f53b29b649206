//! Blink example: a simulated host driving the port LEDs from two threads
//!
//! This example demonstrates:
//! - Probing the driver against a host LED class
//! - Host callbacks arriving concurrently for LEDs sharing a register
//! - The shadow bytes after every LED has been toggled
//! - Removing the driver again

use parport_leds::prelude::*;
use std::thread;
use std::time::Duration;

/// Prints every port write instead of touching hardware.
struct TracePort;

impl PortWrite for TracePort {
    fn write_u8(&mut self, port: u16, value: u8) {
        println!("  outb(0x{value:02X}, 0x{port:03X})  {value:08b}");
    }
}

/// Minimal host LED class handing out the descriptor as the handle.
#[derive(Default)]
struct SimHost {
    leds: Vec<&'static LedDescriptor>,
}

impl LedClass for SimHost {
    type Handle = &'static str;
    type Error = core::convert::Infallible;

    fn register(&mut self, led: &'static LedDescriptor) -> Result<Self::Handle, Self::Error> {
        println!("register {}", led.name());
        self.leds.push(led);
        Ok(led.name())
    }

    fn unregister(&mut self, handle: Self::Handle) {
        println!("unregister {handle}");
        self.leds.retain(|led| led.name() != handle);
    }
}

fn main() {
    println!("=== Parallel Port LED Example ===\n");

    let mut host = SimHost::default();
    let mut driver = ParportLeds::new(PortConfig::default(), TracePort);
    driver.probe(&mut host).unwrap();

    let leds = host.leds.clone();
    let controller: &dyn BrightnessSet = driver.controller();

    println!("\nBlinking data and control lines from two threads");
    thread::scope(|s| {
        let (data, control): (Vec<&LedDescriptor>, Vec<&LedDescriptor>) = leds
            .iter()
            .copied()
            .partition(|led| led.register() == Register::Data);

        for group in [data, control] {
            s.spawn(move || {
                for round in 0..2u8 {
                    for led in &group {
                        controller.brightness_set(led, Brightness::from(round == 0));
                        thread::sleep(Duration::from_millis(5));
                    }
                }
            });
        }
    });

    let ctrl = driver.controller();
    println!(
        "\nshadow: data={:08b} control={:08b}",
        ctrl.shadow(Register::Data),
        ctrl.shadow(Register::Control)
    );

    driver.remove(&mut host);
    println!("\nDone - {} leds still registered", host.leds.len());
}
