//! One-shot idle tasks
//!
//! Tasks posted here run on the application loop once no events are pending,
//! one task per loop turn, in posting order.

use std::collections::VecDeque;
use std::path::PathBuf;

/// Work deferred until the loop is idle
#[derive(Debug, Clone, PartialEq)]
pub enum IdleTask {
    /// Start a game unless one is already running
    StartGame(PathBuf),
}

#[derive(Debug, Default)]
pub struct IdleQueue {
    tasks: VecDeque<IdleTask>,
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, task: IdleTask) {
        self.tasks.push_back(task);
    }

    /// Take the next task; it will not run again
    pub fn pop(&mut self) -> Option<IdleTask> {
        self.tasks.pop_front()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
