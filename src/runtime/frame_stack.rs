//! Variable frames.
//!
//! Each frame maps variable URIs to shared slots. Two frames that hold the
//! same slot see each other's writes, which is how captured and aliased
//! variables work.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::value::Value;
use crate::base::Stack;
use crate::terms::SemanticUri;

pub type Slot = Rc<RefCell<Value>>;

type Frame = FxHashMap<SemanticUri, Slot>;

#[derive(Debug, Clone)]
pub struct FrameStack {
    frames: Stack<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self {
            frames: Stack::new(Frame::default()),
        }
    }
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an empty frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Push a frame sharing every slot of the current one.
    pub fn push_inheriting(&mut self) {
        self.frames.repush();
    }

    pub fn pop(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The value bound to `uri` in the top frame, or `unspecified`.
    pub fn get(&self, uri: &SemanticUri) -> Value {
        self.frames
            .top()
            .get(uri)
            .map(|slot| slot.borrow().clone())
            .unwrap_or(Value::Unspecified)
    }

    /// Store through an existing slot, or bind a new one in the top frame.
    pub fn set(&mut self, uri: &SemanticUri, value: Value) {
        match self.frames.top().get(uri) {
            Some(slot) => *slot.borrow_mut() = value,
            None => {
                self.frames
                    .top_mut()
                    .insert(uri.clone(), Rc::new(RefCell::new(value)));
            }
        }
    }

    pub fn slot(&self, uri: &SemanticUri) -> Option<Slot> {
        self.frames.top().get(uri).cloned()
    }

    /// Bind `uri` in the top frame to an existing slot.
    pub fn bind(&mut self, uri: SemanticUri, slot: Slot) {
        self.frames.top_mut().insert(uri, slot);
    }
}
