use std::{cell::Cell, path::PathBuf, rc::Rc, sync::{Arc, RwLock}};

use crate::eval::prelude::SyntaxError;
use super::error::Error;

/// Where soft errors go. The driver prints them, tests collect them.
pub trait ErrorEmitterIO {
    fn emit_error(&self, error: Error);
}

#[derive(Debug, Clone, Copy)]
pub struct NullErrorEmitterIO;

impl ErrorEmitterIO for NullErrorEmitterIO {
    fn emit_error(&self, _error: Error) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorErrorEmitterIO {
    pub errors: Arc<RwLock<Vec<Error>>>
}

impl VectorErrorEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Error> {
        let mut errors = self.write_lock();
        std::mem::take(&mut *errors)
    }

    pub fn len(&self) -> usize {
        self.errors.read().expect("Vector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Error>> {
        self.errors.write().expect("Vector lock poisoned")
    }
}

impl ErrorEmitterIO for VectorErrorEmitterIO {
    fn emit_error(&self, error: Error) {
        self.write_lock().push(error);
    }
}

/// Wraps syntax errors with the source they were found in and counts them.
pub struct ErrorEmitter {
    path: PathBuf,
    count: Cell<usize>,
    emitter: Rc<dyn ErrorEmitterIO>
}

impl ErrorEmitter {
    pub fn new(path: PathBuf, emitter: Rc<dyn ErrorEmitterIO>) -> Self {
        Self {
            path,
            count: Cell::new(0),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(PathBuf::new(), Rc::new(NullErrorEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn emit(&self, src: &str, error: SyntaxError) {
        self.count.set(self.count.get() + 1);
        self.emitter.emit_error(Error::Syntax {
            path: self.path.clone(),
            src: src.to_string(),
            error,
        });
    }
}
