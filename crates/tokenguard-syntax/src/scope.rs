//! Per-file scope frames holding constant string bindings.
//!
//! Frames are stored in an arena and linked outward through parent indices.
//! The arena is filled once while lowering and is read-only afterwards.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeFrame {
    pub parent: Option<ScopeId>,
    pub bindings: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeArena {
    frames: Vec<ScopeFrame>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// Creates an arena containing only the root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.frames.push(ScopeFrame {
            parent: Some(parent),
            bindings: BTreeMap::new(),
        });
        ScopeId(self.frames.len() - 1)
    }

    /// Records `name = literal` in a frame. The first declaration wins.
    pub fn bind(&mut self, scope: ScopeId, name: &str, literal: &str) {
        if let Some(frame) = self.frames.get_mut(scope.0) {
            frame
                .bindings
                .entry(name.to_string())
                .or_insert_with(|| literal.to_string());
        }
    }

    pub fn frame(&self, scope: ScopeId) -> Option<&ScopeFrame> {
        self.frames.get(scope.0)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Looks `name` up from `scope` outward. Unknown names and dangling ids
    /// resolve to `None`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&str> {
        let mut current = Some(scope);
        let mut hops = 0;
        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if let Some(value) = frame.bindings.get(name) {
                return Some(value);
            }
            current = frame.parent;
            hops += 1;
            if hops > self.frames.len() {
                return None;
            }
        }
        None
    }
}
