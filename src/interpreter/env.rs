use std::collections::HashMap;

use crate::typeck::TypeAnnotation;
use crate::value::Value;

/// Handle to a frame in the arena. The generation guards against a released
/// slot being reused by a later frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId {
    index: usize,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub value: Value,
    pub declared: TypeAnnotation,
}

#[derive(Debug)]
struct Frame {
    bindings: HashMap<String, Binding>,
    parent: Option<FrameId>,
    generation: u64,
}

/// Lexical scope frames, allocated and released in stack order.
#[derive(Debug)]
pub struct Scopes {
    frames: Vec<Frame>,
    next_generation: u64,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    pub fn new() -> Self {
        let global = Frame { bindings: HashMap::new(), parent: None, generation: 0 };
        Self { frames: vec![global], next_generation: 1 }
    }

    pub fn global(&self) -> FrameId {
        FrameId { index: 0, generation: 0 }
    }

    pub fn push(&mut self, parent: FrameId) -> FrameId {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.frames.push(Frame { bindings: HashMap::new(), parent: Some(parent), generation });
        FrameId { index: self.frames.len() - 1, generation }
    }

    /// Release `id` and every frame allocated after it. The global frame is never released.
    pub fn release(&mut self, id: FrameId) {
        if id.index > 0 && self.is_live(id) {
            self.frames.truncate(id.index);
        }
    }

    pub fn is_live(&self, id: FrameId) -> bool {
        self.frames.get(id.index).is_some_and(|f| f.generation == id.generation)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in `frame`, shadowing any outer binding of the same name.
    pub fn define(&mut self, frame: FrameId, name: impl Into<String>, binding: Binding) {
        if let Some(f) = self.frame_mut(frame) {
            f.bindings.insert(name.into(), binding);
        }
    }

    pub fn lookup(&self, frame: FrameId, name: &str) -> Option<&Binding> {
        let owner = self.resolve(frame, name)?;
        self.frames[owner.index].bindings.get(name)
    }

    /// The frame on the parent chain of `frame` that binds `name`.
    pub fn resolve(&self, frame: FrameId, name: &str) -> Option<FrameId> {
        let mut current = Some(frame);
        while let Some(id) = current {
            let f = self.frame(id)?;
            if f.bindings.contains_key(name) {
                return Some(id);
            }
            current = f.parent;
        }
        None
    }

    /// Overwrite the value of an existing binding in `owner`.
    pub fn store(&mut self, owner: FrameId, name: &str, value: Value) -> bool {
        match self.frame_mut(owner).and_then(|f| f.bindings.get_mut(name)) {
            Some(binding) => {
                binding.value = value;
                true
            }
            None => false,
        }
    }

    fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.index).filter(|f| f.generation == id.generation)
    }

    fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(id.index).filter(|f| f.generation == id.generation)
    }
}
