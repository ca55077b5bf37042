//! GPU backend binding state machine.
//!
//! ```text
//!              on_graphics_create            on_graphics_destroy
//!   Unbound ──────────────────────► Bound ──────────────────────► Unbound
//!      ▲  on_graphics_create: no-op   │    on_graphics_destroy: no-op  │
//!      │                              │                                │
//!      └──── ensure_bound (render) ◄──┘                                │
//!                                     drop while Bound: forced shutdown
//! ```
//!
//! Transitions are driven by the host's graphics-context notifications, not
//! by the widget's own lifetime. Repeated notifications in either direction
//! are idempotent, and a binding dropped while still bound shuts its backend
//! down first.

use crate::backend::GpuBackend;

/// Whether the backend currently holds GPU resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No GPU resources; no live graphics context is assumed.
    Unbound,
    /// Backend initialized against a live graphics context.
    Bound,
}

/// Outcome of a lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed.
    Changed,
    /// The notification was redundant and ignored.
    Unchanged,
    /// The backend failed to initialize; the binding stays unbound.
    Failed,
}

/// A [`GpuBackend`] plus the state saying whether it is initialized.
#[derive(Debug)]
pub struct BackendBinding<B: GpuBackend> {
    backend: B,
    state: BindingState,
}

impl<B: GpuBackend> BackendBinding<B> {
    /// Wrap an uninitialized backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: BindingState::Unbound,
        }
    }

    /// Current state.
    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Whether the backend is initialized.
    pub fn is_bound(&self) -> bool {
        self.state == BindingState::Bound
    }

    /// Shared access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exclusive access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The host created a graphics context.
    pub fn on_graphics_create(&mut self) -> Transition {
        if self.is_bound() {
            tracing::warn!("graphics context created while GPU backend already bound; ignoring");
            return Transition::Unchanged;
        }
        self.bind()
    }

    /// The host is about to destroy its graphics context.
    pub fn on_graphics_destroy(&mut self) -> Transition {
        if !self.is_bound() {
            tracing::trace!("graphics context destroyed with GPU backend unbound");
            return Transition::Unchanged;
        }
        self.backend.shutdown();
        self.state = BindingState::Unbound;
        tracing::debug!("GPU backend unbound");
        Transition::Changed
    }

    /// Bind now if unbound. Used on the render path when the create
    /// notification raced the first frame or never came.
    pub fn ensure_bound(&mut self) -> bool {
        if !self.is_bound() {
            tracing::debug!("GPU backend unbound at render time; binding lazily");
            self.bind();
        }
        self.is_bound()
    }

    fn bind(&mut self) -> Transition {
        match self.backend.init() {
            Ok(()) => {
                self.state = BindingState::Bound;
                tracing::debug!("GPU backend bound");
                Transition::Changed
            }
            Err(e) => {
                tracing::warn!("GPU backend init failed: {e}");
                Transition::Failed
            }
        }
    }
}

impl<B: GpuBackend> Drop for BackendBinding<B> {
    fn drop(&mut self) {
        if self.is_bound() {
            tracing::warn!(
                "GPU backend still bound at teardown (graphics context destroy never delivered); forcing shutdown"
            );
            self.backend.shutdown();
            self.state = BindingState::Unbound;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, DrawData};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counts {
        init: Cell<usize>,
        shutdown: Cell<usize>,
    }

    struct CountingBackend {
        counts: Rc<Counts>,
        fail_init: bool,
    }

    impl GpuBackend for CountingBackend {
        fn init(&mut self) -> Result<(), BackendError> {
            self.counts.init.set(self.counts.init.get() + 1);
            if self.fail_init {
                Err(BackendError::NoContext)
            } else {
                Ok(())
            }
        }

        fn shutdown(&mut self) {
            self.counts.shutdown.set(self.counts.shutdown.get() + 1);
        }

        fn render_draw_data(&mut self, _draw_data: &DrawData) {}
    }

    fn binding(fail_init: bool) -> (BackendBinding<CountingBackend>, Rc<Counts>) {
        let counts = Rc::new(Counts::default());
        let backend = CountingBackend {
            counts: Rc::clone(&counts),
            fail_init,
        };
        (BackendBinding::new(backend), counts)
    }

    #[test]
    fn starts_unbound() {
        let (binding, counts) = binding(false);
        assert_eq!(binding.state(), BindingState::Unbound);
        assert_eq!(counts.init.get(), 0);
    }

    #[test]
    fn duplicate_create_initializes_once() {
        let (mut binding, counts) = binding(false);
        assert_eq!(binding.on_graphics_create(), Transition::Changed);
        assert_eq!(binding.on_graphics_create(), Transition::Unchanged);
        assert_eq!(counts.init.get(), 1);
        assert!(binding.is_bound());
    }

    #[test]
    fn repeated_destroy_shuts_down_once() {
        let (mut binding, counts) = binding(false);
        binding.on_graphics_create();
        assert_eq!(binding.on_graphics_destroy(), Transition::Changed);
        assert_eq!(binding.on_graphics_destroy(), Transition::Unchanged);
        assert_eq!(counts.shutdown.get(), 1);
        assert!(!binding.is_bound());
    }

    #[test]
    fn destroy_without_create_is_noop() {
        let (mut binding, counts) = binding(false);
        assert_eq!(binding.on_graphics_destroy(), Transition::Unchanged);
        assert_eq!(counts.shutdown.get(), 0);
    }

    #[test]
    fn failed_init_stays_unbound() {
        let (mut binding, counts) = binding(true);
        assert_eq!(binding.on_graphics_create(), Transition::Failed);
        assert!(!binding.is_bound());
        assert!(!binding.ensure_bound());
        assert_eq!(counts.init.get(), 2);
        drop(binding);
        assert_eq!(counts.shutdown.get(), 0);
    }

    #[test]
    fn ensure_bound_binds_lazily_once() {
        let (mut binding, counts) = binding(false);
        assert!(binding.ensure_bound());
        assert!(binding.ensure_bound());
        assert_eq!(counts.init.get(), 1);
    }

    #[test]
    fn drop_while_bound_forces_shutdown() {
        let (mut binding, counts) = binding(false);
        binding.on_graphics_create();
        drop(binding);
        assert_eq!(counts.shutdown.get(), 1);
    }

    #[test]
    fn drop_after_destroy_does_not_shut_down_again() {
        let (mut binding, counts) = binding(false);
        binding.on_graphics_create();
        binding.on_graphics_destroy();
        drop(binding);
        assert_eq!(counts.shutdown.get(), 1);
    }

    #[test]
    fn rebind_after_destroy() {
        let (mut binding, counts) = binding(false);
        binding.on_graphics_create();
        binding.on_graphics_destroy();
        assert_eq!(binding.on_graphics_create(), Transition::Changed);
        assert_eq!(counts.init.get(), 2);
        assert!(binding.is_bound());
    }
}
