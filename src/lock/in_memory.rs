use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard};

use super::{Lock, LockError};

/// In-process lock backed by `Mutex<bool>` + `Condvar`.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    fn held(&self) -> Result<MutexGuard<'_, bool>, LockError> {
        self.state.lock().map_err(poisoned)
    }
}

fn poisoned<E: fmt::Display>(err: E) -> LockError {
    LockError::Poisoned(err.to_string())
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let held = self.held()?;
        let mut held = self.wake.wait_while(held, |held| *held).map_err(poisoned)?;
        *held = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut held = self.held()?;
        if std::mem::take(&mut *held) {
            self.wake.notify_one();
        }
        Ok(())
    }
}
