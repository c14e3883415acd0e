//! Per-thread node-name context for marshalling operations.
//!
//! Marshaller implementations occasionally need to know which node the
//! message they are processing belongs to (log enrichment, decode-failure
//! diagnostics), but the marshalling call signatures predate that need and
//! do not carry the name. The name lives in a per-thread slot instead:
//! [`NodeNameScope`] installs it for the duration of one operation and
//! restores the previous state when dropped.
//!
//! The slot is `thread_local!`. Each OS thread owns an independent slot and
//! only that thread ever reads or mutates it, so no locking is involved.
//! The slot does not cross thread boundaries: work handed to another worker
//! must be given the node name explicitly by the caller.

use std::cell::RefCell;

/// Contents of the per-thread node-name slot.
///
/// `Unset` (nothing was ever installed on this thread) and `Set(None)` (a
/// scope was entered for the default, unnamed node) are distinct states.
/// Both must survive a save/restore cycle unchanged, which is why the slot
/// holds this enum rather than a bare `Option<String>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeNameState {
    /// No scope has installed a name on this thread.
    #[default]
    Unset,
    /// A scope is active; `None` means the default, unnamed node.
    Set(Option<String>),
}

thread_local! {
    static NODE_NAME: RefCell<NodeNameState> = const { RefCell::new(NodeNameState::Unset) };
}

/// Returns the slot's current state. No side effects.
#[must_use]
pub fn node_name_state() -> NodeNameState {
    NODE_NAME.with(|slot| slot.borrow().clone())
}

/// Unconditionally overwrites the slot with `state`.
///
/// No validation is performed and the write cannot fail. Callers should
/// normally prefer [`NodeNameScope`], which pairs the overwrite with a
/// guaranteed restore.
pub fn set_node_name_state(state: NodeNameState) {
    NODE_NAME.with(|slot| *slot.borrow_mut() = state);
}

/// Returns the node name installed by the innermost active scope.
///
/// `None` both when no scope is active and when the active scope is for the
/// default, unnamed node. Intended for log enrichment, where the two cases
/// read the same.
#[must_use]
pub fn current_node_name() -> Option<String> {
    NODE_NAME.with(|slot| match &*slot.borrow() {
        NodeNameState::Set(name) => name.clone(),
        NodeNameState::Unset => None,
    })
}

/// Guard that scopes a node name to one marshalling operation.
///
/// [`NodeNameScope::enter`] snapshots the slot and installs the given name;
/// dropping the guard writes the snapshot back. Restoration runs on every
/// exit path (normal return, early `?` return, unwinding), so nested scopes
/// always leave the slot exactly as they found it.
#[derive(Debug)]
pub struct NodeNameScope {
    saved: NodeNameState,
}

impl NodeNameScope {
    /// Installs `name` as the current node name and returns the guard that
    /// restores the previous state.
    ///
    /// The write happens even when `name` matches the value already
    /// installed; the overwrite is observably identical to skipping it.
    #[must_use = "dropping the scope immediately restores the previous state"]
    pub fn enter(name: Option<&str>) -> Self {
        let installed = NodeNameState::Set(name.map(str::to_owned));
        let saved = NODE_NAME.with(|slot| slot.replace(installed));
        NodeNameScope { saved }
    }
}

impl Drop for NodeNameScope {
    fn drop(&mut self) {
        let saved = std::mem::take(&mut self.saved);
        NODE_NAME.with(|slot| *slot.borrow_mut() = saved);
    }
}
