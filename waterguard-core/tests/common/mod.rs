//! Shared test rig for integration tests
//!
//! Provides journaled fakes for every piece of hardware the controller
//! touches, all writing into one ordered journal:
//! - `MockLine`: output line recording level changes
//! - `MockDelay`: delay recording holds instead of sleeping
//! - `ScriptedClock`: clock replaying canned readings
//!
//! Replaying the journal tells which channel was addressed whenever the
//! signal line moved.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use waterguard_core::{
    time::{ClockFields, TimePoint},
    ClockSource, RelayBank,
};

/// Physical line of the actuation bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    S0,
    S1,
    S2,
    S3,
    Sig,
}

/// Everything the hardware saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwEvent {
    Write(Line, bool),
    Hold { ms: u32 },
    ClockRead,
}

pub type Journal = Rc<RefCell<Vec<HwEvent>>>;

/// Output line writing into the journal
pub struct MockLine {
    line: Line,
    journal: Journal,
    broken: Rc<Cell<bool>>,
}

impl ErrorType for MockLine {
    type Error = ErrorKind;
}

impl MockLine {
    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.broken.get() {
            return Err(ErrorKind::Other);
        }
        self.journal.borrow_mut().push(HwEvent::Write(self.line, high));
        Ok(())
    }
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

/// Delay that records holds and can break the lines after N of them
pub struct MockDelay {
    journal: Journal,
    broken: Rc<Cell<bool>>,
    break_after: Option<usize>,
    holds: usize,
}

impl MockDelay {
    pub fn breaking_lines_after(mut self, holds: usize) -> Self {
        self.break_after = Some(holds);
        self
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.borrow_mut().push(HwEvent::Hold { ms });
        self.holds += 1;
        if self.break_after == Some(self.holds) {
            self.broken.set(true);
        }
    }
}

/// Clock replaying readings, repeating the last one when exhausted
pub struct ScriptedClock {
    journal: Journal,
    frames: VecDeque<Vec<u16>>,
    last: Vec<u16>,
}

impl ScriptedClock {
    pub fn push(&mut self, frame: &[u16]) {
        self.frames.push_back(frame.to_vec());
    }
}

impl ClockSource for ScriptedClock {
    fn read_fields(&mut self) -> ClockFields {
        self.journal.borrow_mut().push(HwEvent::ClockRead);
        if let Some(next) = self.frames.pop_front() {
            self.last = next;
        }
        ClockFields::from_slice(&self.last).expect("frame fits")
    }
}

/// Owner of the shared journal
pub struct Rig {
    journal: Journal,
    broken: Rc<Cell<bool>>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            journal: Rc::new(RefCell::new(Vec::new())),
            broken: Rc::new(Cell::new(false)),
        }
    }

    fn line(&self, line: Line) -> MockLine {
        MockLine {
            line,
            journal: self.journal.clone(),
            broken: self.broken.clone(),
        }
    }

    pub fn bank(&self) -> RelayBank<MockLine> {
        RelayBank::new(
            [
                self.line(Line::S0),
                self.line(Line::S1),
                self.line(Line::S2),
                self.line(Line::S3),
            ],
            self.line(Line::Sig),
        )
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            journal: self.journal.clone(),
            broken: self.broken.clone(),
            break_after: None,
            holds: 0,
        }
    }

    pub fn clock(&self, frames: &[&[u16]]) -> ScriptedClock {
        ScriptedClock {
            journal: self.journal.clone(),
            frames: frames.iter().map(|f| f.to_vec()).collect(),
            last: Vec::new(),
        }
    }

    pub fn events(&self) -> Vec<HwEvent> {
        self.journal.borrow().clone()
    }

    pub fn clear(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn break_lines(&self) {
        self.broken.set(true);
    }
}

/// Replay writes, yielding `(addressed channel, signal level)` per signal write
pub fn signal_writes(events: &[HwEvent]) -> Vec<(u8, bool)> {
    let mut select = [false; 4];
    let mut out = Vec::new();
    for event in events {
        match event {
            HwEvent::Write(Line::S0, high) => select[0] = *high,
            HwEvent::Write(Line::S1, high) => select[1] = *high,
            HwEvent::Write(Line::S2, high) => select[2] = *high,
            HwEvent::Write(Line::S3, high) => select[3] = *high,
            HwEvent::Write(Line::Sig, high) => {
                let channel = select
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (bit, on)| acc | (u8::from(*on) << bit));
                out.push((channel, *high));
            }
            _ => {}
        }
    }
    out
}

/// All holds in order
pub fn holds(events: &[HwEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            HwEvent::Hold { ms } => Some(*ms),
            _ => None,
        })
        .collect()
}

/// Reading in `localtime()` order
pub fn reading(day: u16, hour: u16, minute: u16, second: u16) -> [u16; 8] {
    TimePoint {
        year: 2024,
        month: 6,
        day,
        hour,
        minute,
        second,
        weekday: 5,
        yearday: 152 + day,
    }
    .to_fields()
}
