use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Registration handle for one per-frame callback.
///
/// Not `Clone`: the holder is the only party that can deregister it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TickerToken(u64);

impl TickerToken {
    /// Raw token id, for logs.
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct LoopInner {
    next: u64,
    frame: u64,
    registered: BTreeMap<u64, String>,
}

/// Shared render loop registry.
///
/// Scene lifecycles register exactly one callback per Active period and remove it on
/// teardown. [`RenderLoop::live`] therefore equals the number of Active scenes; anything else
/// is a leak.
#[derive(Clone, Debug, Default)]
pub struct RenderLoop {
    inner: Rc<RefCell<LoopInner>>,
}

impl RenderLoop {
    /// Create an empty loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under `label`.
    pub fn add(&self, label: &str) -> TickerToken {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next;
        inner.next = inner.next.saturating_add(1);
        inner.registered.insert(id, label.to_owned());
        TickerToken(id)
    }

    /// Deregister a callback. Returns `false` if it was not registered.
    pub fn remove(&self, token: TickerToken) -> bool {
        self.inner.borrow_mut().registered.remove(&token.0).is_some()
    }

    /// `true` while `token` is registered.
    pub fn is_registered(&self, token: &TickerToken) -> bool {
        self.inner.borrow().registered.contains_key(&token.0)
    }

    /// Number of registered callbacks.
    pub fn live(&self) -> usize {
        self.inner.borrow().registered.len()
    }

    /// Labels of registered callbacks, in registration order.
    pub fn labels(&self) -> Vec<String> {
        self.inner.borrow().registered.values().cloned().collect()
    }

    /// Advance the host frame number. Returns the new value.
    pub fn begin_frame(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.frame = inner.frame.saturating_add(1);
        inner.frame
    }

    /// Host frames started so far.
    pub fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }
}
