//! Action Dispatch Protocol
//!
//! An [`Action`] is a serializable intent attached to an interactive node.
//! The engine never runs business logic: when an interaction fires, the
//! component hands `(action, args)` to the single [`ActionHandler`] given to
//! the render pass. The host owns the switch over action names.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ action, args?, stopPropagation? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,

    #[serde(default, rename = "stopPropagation", skip_serializing_if = "is_false")]
    pub stop_propagation: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Action {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            args: Vec::new(),
            stop_propagation: false,
        }
    }

    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    /// Hand this intent to the host, passing `args` through untouched
    pub fn dispatch(&self, handler: &dyn ActionHandler) {
        handler.on_action(&self.action, &self.args);
    }

    /// Dispatch with the interaction value appended as the last argument
    pub fn dispatch_with(&self, handler: &dyn ActionHandler, value: Value) {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.extend(self.args.iter().cloned());
        args.push(value);
        handler.on_action(&self.action, &args);
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The single host-supplied interpreter of action intents
pub trait ActionHandler: Send + Sync {
    fn on_action(&self, action: &str, args: &[Value]);
}

impl<F> ActionHandler for F
where
    F: Fn(&str, &[Value]) + Send + Sync,
{
    fn on_action(&self, action: &str, args: &[Value]) {
        self(action, args)
    }
}

pub type SharedActionHandler = Arc<dyn ActionHandler>;

// ═══════════════════════════════════════════════════════════════
// Recording handler
// ═══════════════════════════════════════════════════════════════

/// One dispatched intent, as recorded by [`ActionLog`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchedAction {
    /// Monotonic sequence ID (for ordering)
    pub seq: u64,
    pub action: String,
    pub args: Vec<Value>,
}

/// Thread-safe, append-only log of dispatched actions
#[derive(Clone, Default)]
pub struct ActionLog {
    entries: Arc<RwLock<Vec<DispatchedAction>>>,
    next_seq: Arc<AtomicU64>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// This log as a shareable handler for a render pass
    pub fn handler(&self) -> SharedActionHandler {
        Arc::new(self.clone())
    }

    pub fn entries(&self) -> Vec<DispatchedAction> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn last(&self) -> Option<DispatchedAction> {
        self.entries.read().last().cloned()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<DispatchedAction> {
        std::mem::take(&mut *self.entries.write())
    }
}

impl ActionHandler for ActionLog {
    fn on_action(&self, action: &str, args: &[Value]) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(seq, action, args = args.len(), "action dispatched");
        self.entries.write().push(DispatchedAction {
            seq,
            action: action.to_string(),
            args: args.to_vec(),
        });
    }
}

// ═══════════════════════════════════════════════════════════════
// Host-side switch
// ═══════════════════════════════════════════════════════════════

type Route = Box<dyn Fn(&[Value]) + Send + Sync>;

/// Name → closure table for hosts that prefer registration over a `match`
///
/// Unknown action names hit the default branch: a debug log and nothing else.
#[derive(Default)]
pub struct ActionRouter {
    routes: HashMap<String, Route>,
}

impl ActionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, action: impl Into<String>, route: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.routes.insert(action.into(), Box::new(route));
        self
    }

    pub fn handles(&self, action: &str) -> bool {
        self.routes.contains_key(action)
    }
}

impl ActionHandler for ActionRouter {
    fn on_action(&self, action: &str, args: &[Value]) {
        match self.routes.get(action) {
            Some(route) => route(args),
            None => tracing::debug!(action, "no route for action, ignoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_action_serde_shape() {
        let action = Action::new("cloneTask").arg(7).stop_propagation();
        assert_eq!(
            action.to_value(),
            json!({"action": "cloneTask", "args": [7], "stopPropagation": true})
        );

        let bare: Action = serde_json::from_value(json!({"action": "logout"})).unwrap();
        assert!(bare.args.is_empty());
        assert!(!bare.stop_propagation);
        assert_eq!(bare.to_value(), json!({"action": "logout"}));
    }

    #[test]
    fn test_dispatch_passes_args_through_once() {
        let log = ActionLog::new();
        let action = Action::new("foo").with_args([1, 2]);

        action.dispatch(&log);

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "foo");
        assert_eq!(entries[0].args, vec![json!(1), json!(2)]);
        assert_eq!(action.args, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_dispatch_with_appends_value() {
        let log = ActionLog::new();
        Action::new("navigate").arg("main").dispatch_with(&log, json!("archive"));
        assert_eq!(log.last().unwrap().args, vec![json!("main"), json!("archive")]);
    }

    #[test]
    fn test_closure_is_a_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let handler: SharedActionHandler = Arc::new(move |action: &str, _args: &[Value]| {
            assert_eq!(action, "ping");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Action::new("ping").dispatch(handler.as_ref());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_sequence_and_take() {
        let log = ActionLog::new();
        log.on_action("a", &[]);
        log.on_action("b", &[]);

        let taken = log.take();
        assert_eq!(taken.iter().map(|e| e.seq).collect::<Vec<_>>(), vec![0, 1]);
        assert!(log.is_empty());

        log.on_action("c", &[]);
        assert_eq!(log.last().unwrap().seq, 2);
    }

    #[test]
    fn test_router_default_branch_is_noop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = ActionRouter::new().on("known", move |args| {
            counter.fetch_add(args.len(), Ordering::SeqCst);
        });

        router.on_action("known", &[json!(1), json!(2)]);
        router.on_action("unknown", &[json!(1)]);

        assert!(router.handles("known"));
        assert!(!router.handles("unknown"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
