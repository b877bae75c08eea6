//! Recording bus, pin and transport doubles for tests
//!
//! All doubles append to one shared [`Log`], so tests can assert on the
//! exact interleaving of pin changes, delays and bus writes.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use st75256_hal::{DelayMs, I2cBus, OutputPin, SpiBus};

use crate::command::Command;
use crate::error::{DisplayError, PinRole};
use crate::interface::Transport;

/// Something observable on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// One I2C transaction (address, bytes)
    I2c(u8, Vec<u8>),
    /// One SPI write
    Spi(Vec<u8>),
    /// Pin driven to a level
    Pin(PinRole, bool),
    /// Blocking delay (ms)
    Delay(u32),
    /// Transport-level command
    Command(u8, Vec<u8>),
    /// Transport-level data block
    Data(Vec<u8>),
}

/// Shared, ordered event log
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<BusEvent>>>);

impl Log {
    pub fn push(&self, event: BusEvent) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Allows `budget` successful writes, then fails every write
struct Budget(Option<usize>);

impl Budget {
    fn spend(&mut self) -> Result<(), ()> {
        match &mut self.0 {
            None => Ok(()),
            Some(0) => Err(()),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
        }
    }
}

pub struct MockI2c {
    log: Log,
    budget: Budget,
}

impl MockI2c {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(None),
        }
    }

    pub fn failing_after(log: &Log, writes: usize) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(Some(writes)),
        }
    }
}

impl I2cBus for MockI2c {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        self.budget.spend()?;
        self.log.push(BusEvent::I2c(address, data.to_vec()));
        Ok(())
    }

    fn write_sequence(&mut self, address: u8, parts: [&[u8]; 2]) -> Result<(), ()> {
        self.budget.spend()?;
        self.log.push(BusEvent::I2c(address, parts.concat()));
        Ok(())
    }
}

pub struct MockSpi {
    log: Log,
    budget: Budget,
}

impl MockSpi {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(None),
        }
    }

    pub fn failing_after(log: &Log, writes: usize) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(Some(writes)),
        }
    }
}

impl SpiBus for MockSpi {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        self.budget.spend()?;
        self.log.push(BusEvent::Spi(data.to_vec()));
        Ok(())
    }
}

pub struct MockPin {
    log: Log,
    role: PinRole,
    fail: bool,
}

impl MockPin {
    pub fn new(log: &Log, role: PinRole) -> Self {
        Self {
            log: log.clone(),
            role,
            fail: false,
        }
    }

    pub fn failing(log: &Log, role: PinRole) -> Self {
        Self {
            log: log.clone(),
            role,
            fail: true,
        }
    }

    pub fn role(&self) -> PinRole {
        self.role
    }

    fn drive(&mut self, high: bool) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.log.push(BusEvent::Pin(self.role, high));
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = ();

    fn set_high(&mut self) -> Result<(), ()> {
        self.drive(true)
    }

    fn set_low(&mut self) -> Result<(), ()> {
        self.drive(false)
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayMs for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.push(BusEvent::Delay(ms));
    }
}

/// Transport recording commands and data blocks as whole units
pub struct MockTransport {
    log: Log,
    budget: Budget,
}

impl MockTransport {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(None),
        }
    }

    pub fn failing_after(log: &Log, sends: usize) -> Self {
        Self {
            log: log.clone(),
            budget: Budget(Some(sends)),
        }
    }
}

impl Transport for MockTransport {
    type BusError = ();

    fn send_command(&mut self, command: Command<'_>) -> Result<(), DisplayError<()>> {
        self.budget.spend().map_err(DisplayError::Bus)?;
        self.log
            .push(BusEvent::Command(command.opcode, command.params.to_vec()));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError<()>> {
        self.budget.spend().map_err(DisplayError::Bus)?;
        self.log.push(BusEvent::Data(data.to_vec()));
        Ok(())
    }
}
