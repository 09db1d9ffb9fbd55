//! Test commands that record what the scheduler does to them

use core::cell::RefCell;

use crate::command::{Command, CommandError, Progress};

/// Something a recorder observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start(char, u32),
    Done(char, u32),
    Fail(char, u32),
}

/// Command that needs a fixed number of updates and logs its lifecycle
pub struct Recorder<'l> {
    id: char,
    needed: u32,
    remaining: u32,
    fail: Option<CommandError>,
    log: &'l RefCell<Vec<Event>>,
    pub executes: u32,
    pub updates: u32,
}

impl<'l> Recorder<'l> {
    pub fn new(id: char, needed: u32, log: &'l RefCell<Vec<Event>>) -> Self {
        Self {
            id,
            needed,
            remaining: needed,
            fail: None,
            log,
            executes: 0,
            updates: 0,
        }
    }

    /// Fail with `CommandError::Failed` instead of completing
    pub fn failing(self) -> Self {
        self.failing_with(CommandError::Failed)
    }

    pub fn failing_with(mut self, error: CommandError) -> Self {
        self.fail = Some(error);
        self
    }

    fn finish(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        if self.remaining > 0 {
            return Ok(Progress::Running);
        }
        match self.fail {
            Some(e) => {
                self.log.borrow_mut().push(Event::Fail(self.id, now_ms));
                Err(e)
            }
            None => {
                self.log.borrow_mut().push(Event::Done(self.id, now_ms));
                Ok(Progress::Complete)
            }
        }
    }
}

impl Command for Recorder<'_> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.executes += 1;
        self.remaining = self.needed;
        self.log.borrow_mut().push(Event::Start(self.id, now_ms));
        self.finish(now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        assert!(self.remaining > 0, "update after completion");
        self.updates += 1;
        self.remaining -= 1;
        self.finish(now_ms)
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
