use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::container::injector::CircularDependencyError;

/// The aliases currently being resolved by a container, one stack per
/// resolving thread.
pub struct DependencyTraces {
    stacks: Mutex<HashMap<ThreadId, Vec<String>>>,
}

impl DependencyTraces {
    pub fn new() -> Self {
        Self {
            stacks: Mutex::new(HashMap::new()),
        }
    }

    /// Pushes `alias` onto the current thread's stack. The alias is popped
    /// when the returned guard is dropped.
    pub fn enter(&self, alias: &str) -> Result<TraceGuard<'_>, CircularDependencyError> {
        let on_thread = thread::current().id();
        let mut stacks = self.stacks.lock();
        let stack = stacks.entry(on_thread).or_default();

        if stack.iter().any(|entered| entered == alias) {
            let mut path = stack.clone();
            path.push(alias.to_owned());
            return Err(CircularDependencyError::new(path));
        }

        stack.push(alias.to_owned());
        Ok(TraceGuard {
            traces: self,
            on_thread,
        })
    }

    /// Returns true if `alias` is being resolved by the current thread.
    pub fn contains(&self, alias: &str) -> bool {
        let stacks = self.stacks.lock();
        stacks
            .get(&thread::current().id())
            .is_some_and(|stack| stack.iter().any(|entered| entered == alias))
    }

    /// Renders the current thread's stack as a dot-separated path.
    pub fn path(&self) -> String {
        let stacks = self.stacks.lock();
        stacks
            .get(&thread::current().id())
            .map(|stack| stack.join("."))
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        let stacks = self.stacks.lock();
        stacks.get(&thread::current().id()).map_or(0, Vec::len)
    }

    fn leave(&self, on_thread: ThreadId) {
        let mut stacks = self.stacks.lock();
        if let Some(stack) = stacks.get_mut(&on_thread) {
            stack.pop();
            if stack.is_empty() {
                stacks.remove(&on_thread);
            }
        }
    }
}

#[must_use]
pub struct TraceGuard<'a> {
    traces: &'a DependencyTraces,
    on_thread: ThreadId,
}

impl Drop for TraceGuard<'_> {
    fn drop(&mut self) {
        self.traces.leave(self.on_thread);
    }
}
