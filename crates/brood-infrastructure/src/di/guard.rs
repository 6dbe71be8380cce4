//! Circular dependency detection
//!
//! Every resolution pushes a `(root id, service key)` frame onto a
//! thread-local stack for as long as its factory runs. Re-entering a frame
//! that is already on the stack is a cycle. The stack is shared by every
//! provider on the thread, so cycles that pass through child containers and
//! back into the parent are caught too.

use brood_domain::constants::CHILD_CONTAINER_PATH_PREFIX;
use brood_domain::error::{Error, Result};
use brood_domain::value_objects::{ChildId, ServiceKey};
use std::cell::RefCell;
use std::marker::PhantomData;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Frame {
    Service { root: u64, key: ServiceKey },
    ChildBuild(ChildId),
}

impl Frame {
    fn describe(&self) -> String {
        match self {
            Self::Service { key, .. } => key.type_name().to_string(),
            Self::ChildBuild(id) => format!("{CHILD_CONTAINER_PATH_PREFIX}{id}"),
        }
    }
}

thread_local! {
    static RESOLVING: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Marks a frame as in progress until dropped
///
/// Not `Send`: the frame belongs to the thread that pushed it.
pub(crate) struct ResolutionGuard {
    _thread_bound: PhantomData<*const ()>,
}

impl ResolutionGuard {
    /// Enter the resolution of `key` within the root identified by `root`
    pub(crate) fn enter(root: u64, key: ServiceKey) -> Result<Self> {
        Self::push(Frame::Service { root, key })
    }

    /// Enter the construction of a child container
    pub(crate) fn enter_child_build(id: ChildId) -> Result<Self> {
        Self::push(Frame::ChildBuild(id))
    }

    fn push(frame: Frame) -> Result<Self> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(start) = stack.iter().position(|f| *f == frame) {
                let path = stack[start..]
                    .iter()
                    .chain(std::iter::once(&frame))
                    .map(Frame::describe);
                return Err(Error::circular_dependency(path));
            }
            stack.push(frame);
            Ok(Self {
                _thread_bound: PhantomData,
            })
        })
    }

    /// Depth of the current thread's resolution stack
    #[cfg(test)]
    pub(crate) fn depth() -> usize {
        RESOLVING.with(|stack| stack.borrow().len())
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}
