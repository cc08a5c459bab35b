//! Per-control request gating.
//!
//! Each interactive control admits at most one outstanding request. While a
//! request is in flight the control is disabled and shows a busy label; the
//! prior state is restored on every exit path (success, failure, or
//! cancellation of the wrapped future) through a drop guard, not manual
//! bookkeeping. The gate protects a single control against re-entrant
//! submission; it provides no ordering across different controls.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// State of one interactive control, shared with the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    label: String,
    enabled: bool,
}

impl Control {
    /// Create an enabled control with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    /// Current label (the busy indicator while a request is outstanding).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the control accepts a new submission.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Shared handle to a control, cloned between the gate and the view.
/// Single event-loop thread, so `Rc<RefCell<_>>` suffices.
pub type ControlHandle = Rc<RefCell<Control>>;

/// Create a fresh control handle.
pub fn control(label: impl Into<String>) -> ControlHandle {
    Rc::new(RefCell::new(Control::new(label)))
}

/// Run `action` with the control held busy.
///
/// Returns `None` without running `action` when the control is already busy —
/// a re-entrant trigger on a disabled control is a no-op. Otherwise the
/// control is disabled, relabelled with `busy_label`, and unconditionally
/// restored when `action` settles.
pub async fn run<F, T>(control: &ControlHandle, busy_label: &str, action: F) -> Option<T>
where
    F: Future<Output = T>,
{
    if !control.borrow().is_enabled() {
        tracing::debug!(label = %control.borrow().label(), "control busy, submission suppressed");
        return None;
    }
    let _held = Acquired::new(control.clone(), busy_label);
    Some(action.await)
}

/// Scoped acquisition of a control. Restores label and enablement on drop.
struct Acquired {
    control: ControlHandle,
    saved_label: String,
}

impl Acquired {
    fn new(control: ControlHandle, busy_label: &str) -> Self {
        let saved_label = {
            let mut state = control.borrow_mut();
            state.enabled = false;
            std::mem::replace(&mut state.label, busy_label.to_string())
        };
        Self {
            control,
            saved_label,
        }
    }
}

impl Drop for Acquired {
    fn drop(&mut self) {
        let mut state = self.control.borrow_mut();
        state.enabled = true;
        state.label = std::mem::take(&mut self.saved_label);
    }
}
