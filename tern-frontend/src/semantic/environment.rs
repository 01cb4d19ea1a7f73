//! Lexically scoped binding environment
//!
//! Frames are kept on a stack; index 0 is the global frame. Each frame
//! remembers which of its bindings are speculative so they can be dropped
//! when the frame is popped.

use crate::types::TypeId;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tern_common::{ErrorKind, Symbol};

/// Opaque value the backend attaches to a binding after typechecking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub ty: TypeId,
    pub handle: Option<ValueHandle>,
}

#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: HashMap<Symbol, Binding>,
    false_bindings: Vec<Symbol>,
}

#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Number of frames, including the global one
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_global(&self) -> bool {
        self.frames.len() == 1
    }

    fn current(&self) -> &Frame {
        self.frames.last().expect("environment always has a global frame")
    }

    fn current_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("environment always has a global frame")
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
        debug!("push scope (depth {})", self.frames.len());
    }

    /// Discard the current frame, unbinding its false bindings first
    pub fn pop_scope(&mut self) {
        assert!(!self.is_global(), "popped the global scope");

        let false_bindings = std::mem::take(&mut self.current_mut().false_bindings);
        for symbol in false_bindings {
            self.unbind_variable(symbol);
        }

        self.frames.pop();
        debug!("pop scope (depth {})", self.frames.len());
    }

    /// Bind in the current frame. Shadowing an outer frame is allowed.
    pub fn bind_variable(
        &mut self,
        symbol: Symbol,
        ty: TypeId,
        handle: Option<ValueHandle>,
    ) -> Result<(), ErrorKind> {
        let frame = self.current_mut();
        if frame.bindings.contains_key(&symbol) {
            return Err(ErrorKind::NameAlreadyBoundInScope);
        }

        trace!("bind {} : #{}", symbol, ty.index());
        frame.bindings.insert(symbol, Binding { ty, handle });
        Ok(())
    }

    /// Bind speculatively; the binding is removed when the frame is popped
    pub fn false_bind_variable(&mut self, symbol: Symbol, ty: TypeId) -> Result<(), ErrorKind> {
        self.bind_variable(symbol, ty, None)?;
        self.current_mut().false_bindings.push(symbol);
        Ok(())
    }

    /// Nearest binding, searching from the current frame outwards
    pub fn lookup_variable(&self, symbol: Symbol) -> Result<Binding, ErrorKind> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(&symbol).copied())
            .ok_or(ErrorKind::NameNotBoundInScope)
    }

    /// Binding in the current frame only
    pub fn lookup_local_variable(&self, symbol: Symbol) -> Option<Binding> {
        self.current().bindings.get(&symbol).copied()
    }

    /// Remove a binding from the current frame.
    ///
    /// # Panics
    /// If `symbol` is not bound in the current frame.
    pub fn unbind_variable(&mut self, symbol: Symbol) {
        let frame = self.current_mut();
        if frame.bindings.remove(&symbol).is_none() {
            panic!("unbinding {} which is not bound in the current scope", symbol);
        }
        frame.false_bindings.retain(|s| *s != symbol);
        trace!("unbind {}", symbol);
    }

    /// Attach a backend handle to the nearest binding of `symbol`
    pub fn set_handle(&mut self, symbol: Symbol, handle: ValueHandle) -> Result<(), ErrorKind> {
        let binding = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.bindings.get_mut(&symbol))
            .ok_or(ErrorKind::NameNotBoundInScope)?;
        binding.handle = Some(handle);
        Ok(())
    }

    /// Symbols bound speculatively in the current frame
    pub fn false_bindings(&self) -> &[Symbol] {
        &self.current().false_bindings
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
