//! Per-test registry of installed API objects.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::{ApiObject, Impls, RuntimeError, create_mock};

/// Stand-in for the host's global scope.
///
/// Code under test looks its API up here instead of in a process global, so
/// every test owns its bindings. Clones share the same bindings.
#[derive(Debug, Clone, Default)]
pub struct ApiContext {
    bindings: Arc<RwLock<IndexMap<String, ApiObject>>>,
}

impl ApiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `object` under `namespace`, returning whatever it replaced.
    pub fn install(&self, namespace: impl Into<String>, object: ApiObject) -> Option<ApiObject> {
        let namespace = namespace.into();
        tracing::debug!(%namespace, members = object.len(), "installing api object");
        self.bindings.write().insert(namespace, object)
    }

    /// The object bound under `namespace`, if any.
    pub fn binding(&self, namespace: &str) -> Option<ApiObject> {
        self.bindings.read().get(namespace).cloned()
    }

    /// Like [`binding`](Self::binding) but an absent binding is an error.
    pub fn api(&self, namespace: &str) -> Result<ApiObject, RuntimeError> {
        self.binding(namespace).ok_or_else(|| RuntimeError::NotInstalled {
            namespace: namespace.to_string(),
        })
    }

    /// Call `member` on the object bound under `namespace`.
    pub fn call(&self, namespace: &str, member: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        // clone out so the implementation runs without the registry lock
        self.api(namespace)?.call(member, args)
    }

    pub fn uninstall(&self, namespace: &str) -> Option<ApiObject> {
        self.bindings.write().shift_remove(namespace)
    }

    /// Drop every binding.
    pub fn reset(&self) {
        let mut bindings = self.bindings.write();
        tracing::debug!(count = bindings.len(), "resetting api context");
        bindings.clear();
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.bindings.read().keys().cloned().collect()
    }
}

/// Mock `names`, layer the mock over `extra` and install the result.
///
/// The merged object replaces any previous binding under `namespace`; mocks
/// win over same-named entries of `extra`.
pub fn setup_global<I>(
    ctx: &ApiContext,
    namespace: &str,
    names: I,
    impls: &Impls,
    extra: Option<ApiObject>,
) -> ApiObject
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mock = ApiObject::from(create_mock(names, impls));
    let merged = extra.unwrap_or_default().merged_with(mock);
    if ctx.install(namespace, merged.clone()).is_some() {
        tracing::debug!(namespace, "replaced previous binding");
    }
    merged
}
