//! Test support utilities - only compiled in test builds.

use std::vec::Vec;

use crate::parport::{
    config::PortConfig, controller::RegisterController, driver::ParportLeds, host::LedClass,
    port::PortWrite, registry::LedDescriptor,
};

/// Data register address of the default config.
pub const DATA: u16 = 0x378;
/// Control register address of the default config.
pub const CONTROL: u16 = 0x37A;

/// Port writer that records every byte written.
#[derive(Debug, Default)]
pub struct RecordingPort {
    writes: Vec<(u16, u8)>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    /// Last value written to `port`.
    pub fn last(&self, port: u16) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(addr, _)| *addr == port)
            .map(|(_, value)| *value)
    }
}

impl PortWrite for RecordingPort {
    fn write_u8(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
    }
}

/// Controller on the default config with a recording port.
pub fn test_controller() -> RegisterController<RecordingPort> {
    RegisterController::new(PortConfig::default(), RecordingPort::new())
}

/// Driver on the default config with a recording port.
pub fn test_driver() -> ParportLeds<RecordingPort, MockHandle> {
    ParportLeds::new(PortConfig::default(), RecordingPort::new())
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockHandle(&'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    NoMemory,
}

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "out of memory")
    }
}

/// Host LED class keeping track of live registrations.
#[derive(Debug, Default)]
pub struct MockLedClass {
    fail_at: Option<usize>,
    calls: usize,
    live: Vec<&'static str>,
    unregistered: Vec<&'static str>,
}

impl MockLedClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the registration with zero-based call number `call`.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Names currently registered, in registration order.
    pub fn live(&self) -> &[&'static str] {
        &self.live
    }

    /// Names unregistered so far, in unregistration order.
    pub fn unregistered(&self) -> &[&'static str] {
        &self.unregistered
    }

    pub fn register_calls(&self) -> usize {
        self.calls
    }
}

impl LedClass for MockLedClass {
    type Handle = MockHandle;
    type Error = MockError;

    fn register(&mut self, led: &'static LedDescriptor) -> Result<MockHandle, MockError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(MockError::NoMemory);
        }
        self.live.push(led.name());
        Ok(MockHandle(led.name()))
    }

    fn unregister(&mut self, handle: MockHandle) {
        let pos = self
            .live
            .iter()
            .position(|name| *name == handle.0)
            .expect("unregistering an unknown handle");
        self.live.remove(pos);
        self.unregistered.push(handle.0);
    }
}
