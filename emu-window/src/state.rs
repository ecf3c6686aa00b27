use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

use crate::context::Framebuffer;

/// Lifecycle of the host-owned graphics context as seen by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// No context has ever been created.
    Uninitialized,
    Ready { framebuffer: Framebuffer },
    /// A context existed and was destroyed.
    Lost,
}

impl ContextState {
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            Self::Uninitialized => Lifecycle::Uninitialized,
            Self::Ready { .. } => Lifecycle::Ready,
            Self::Lost => Lifecycle::Lost,
        }
    }

    pub fn framebuffer(&self) -> Option<Framebuffer> {
        match self {
            Self::Ready { framebuffer } => Some(*framebuffer),
            _ => None,
        }
    }
}

/// [`ContextState`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    Lost,
}

/// One-shot cell: set by a swap, consumed by exactly one reader.
#[derive(Debug, Default)]
pub struct FrameSignal {
    submitted: AtomicBool,
}

impl FrameSignal {
    pub fn submit(&self) {
        self.submitted.store(true, Ordering::Release);
    }

    pub fn take(&self) -> bool {
        self.submitted.swap(false, Ordering::AcqRel)
    }

    pub fn peek(&self) -> bool {
        self.submitted.load(Ordering::Acquire)
    }
}

#[derive(Debug, Default)]
pub struct ClearFlag {
    pending: AtomicBool,
}

impl ClearFlag {
    pub fn request(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn acknowledge(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// Which thread the context is currently bound to.
///
/// Binding is recorded by `make_current` and dropped by `done_current`.
/// Operations that touch GL check in debug builds that no other thread
/// holds the binding; release builds trust the caller.
#[derive(Debug, Default)]
pub struct Affinity {
    owner: Option<ThreadId>,
}

impl Affinity {
    pub fn bind(&mut self) {
        let current = thread::current().id();
        if let Some(owner) = self.owner {
            if owner != current {
                log::warn!("Context rebound from {:?} to {:?}", owner, current);
            }
        }
        self.owner = Some(current);
    }

    pub fn release(&mut self) {
        self.owner = None;
    }

    pub fn owner(&self) -> Option<ThreadId> {
        self.owner
    }

    pub fn is_current_thread(&self) -> bool {
        self.owner == Some(thread::current().id())
    }

    /// Whether the calling thread may issue GL calls for this context.
    pub fn permits_current_thread(&self) -> bool {
        self.owner.map_or(true, |owner| owner == thread::current().id())
    }

    pub fn debug_check(&self, op: &'static str) {
        debug_assert!(
            self.permits_current_thread(),
            "`{}` called from {:?} while the context is bound to {:?}",
            op,
            thread::current().id(),
            self.owner
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_signal_is_one_shot() {
        let signal = FrameSignal::default();
        assert!(!signal.take());
        signal.submit();
        signal.submit();
        assert!(signal.peek());
        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn affinity_tracks_binding_thread() {
        let mut affinity = Affinity::default();
        assert!(affinity.permits_current_thread());
        assert!(!affinity.is_current_thread());

        affinity.bind();
        assert!(affinity.is_current_thread());

        let other = thread::spawn(move || {
            let permitted = affinity.permits_current_thread();
            (affinity, permitted)
        });
        let (mut affinity, permitted) = other.join().unwrap();
        assert!(!permitted);

        affinity.release();
        assert!(affinity.owner().is_none());
    }
}
