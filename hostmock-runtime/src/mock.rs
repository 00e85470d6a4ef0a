//! Call-recording functions and the mock factory.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;

/// An implementation backing a member.
pub type Impl = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Mock functions keyed by member name, in selection order.
pub type MockObject = IndexMap<String, MockFn>;

/// Shared across every mock so orders are comparable between functions.
static INVOCATION_ORDER: AtomicU64 = AtomicU64::new(1);

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub args: Vec<Value>,
    /// Process-wide, strictly increasing.
    pub order: u64,
    pub result: Value,
}

#[derive(Default)]
struct State {
    implementation: Option<Impl>,
    calls: Vec<Call>,
}

/// A call-recording function.
///
/// Clones share the same recording, so a handle kept by a test observes calls
/// made through an installed object.
#[derive(Clone)]
pub struct MockFn {
    name: Arc<str>,
    state: Arc<Mutex<State>>,
}

impl MockFn {
    /// A recording no-op that returns `null`.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn with_implementation(name: impl AsRef<str>, implementation: Impl) -> Self {
        let mock = Self::new(name);
        mock.state.lock().implementation = Some(implementation);
        mock
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the mock, recording arguments, order and result.
    pub fn call(&self, args: &[Value]) -> Value {
        let order = INVOCATION_ORDER.fetch_add(1, Ordering::Relaxed);
        // the lock is not held while the implementation runs, so it may call
        // back into this mock
        let implementation = self.state.lock().implementation.clone();
        let result = match implementation {
            Some(f) => f(args),
            None => Value::Null,
        };
        tracing::trace!(name = %self.name, order, "mock called");

        self.state.lock().calls.push(Call {
            args: args.to_vec(),
            order,
            result: result.clone(),
        });
        result
    }

    /// Arguments of every call, oldest first.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.state.lock().calls.iter().map(|c| c.args.clone()).collect()
    }

    /// Full call records, oldest first.
    pub fn history(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn last_call(&self) -> Option<Vec<Value>> {
        self.state.lock().calls.last().map(|c| c.args.clone())
    }

    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// True if any call received exactly `args`.
    pub fn was_called_with(&self, args: &[Value]) -> bool {
        self.state.lock().calls.iter().any(|c| c.args == args)
    }

    pub fn invocation_order(&self) -> Vec<u64> {
        self.state.lock().calls.iter().map(|c| c.order).collect()
    }

    pub fn results(&self) -> Vec<Value> {
        self.state.lock().calls.iter().map(|c| c.result.clone()).collect()
    }

    /// Replace the implementation; recorded calls are kept.
    pub fn mock_implementation<F>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.state.lock().implementation = Some(Arc::new(f));
        self
    }

    /// Make every later call return `value`.
    pub fn mock_return_value(&self, value: Value) -> &Self {
        self.mock_implementation(move |_| value.clone())
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.state.lock().calls.clear();
    }

    /// Forget recorded calls and the implementation.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.implementation = None;
    }
}

impl fmt::Debug for MockFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockFn")
            .field("name", &self.name)
            .field("implemented", &state.implementation.is_some())
            .field("calls", &state.calls.len())
            .finish()
    }
}

/// Default implementations keyed by member name.
#[derive(Clone, Default)]
pub struct Impls {
    map: IndexMap<String, Impl>,
}

impl Impls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an implementation for `name`.
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.insert(name, f);
        self
    }

    /// Add an implementation for `name` that always returns `value`.
    pub fn returning(self, name: impl Into<String>, value: Value) -> Self {
        self.with(name, move |_| value.clone())
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.map.insert(name.into(), Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&Impl> {
        self.map.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Impls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// Build one mock per selected name.
///
/// A supplied implementation is wrapped so calls are still recorded; the
/// rest become recording no-ops. Implementations for names that were not
/// selected are ignored.
pub fn create_mock<I>(names: I, impls: &Impls) -> MockObject
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut object = MockObject::new();
    for name in names {
        let name = name.as_ref();
        let mock = match impls.get(name) {
            Some(f) => MockFn::with_implementation(name, Arc::clone(f)),
            None => MockFn::new(name),
        };
        object.insert(name.to_string(), mock);
    }

    for ignored in impls.names().filter(|n| !object.contains_key(*n)) {
        tracing::debug!(name = ignored, "implementation ignored; member not selected");
    }
    object
}
