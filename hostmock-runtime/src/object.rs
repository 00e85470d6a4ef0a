//! Installed API objects: mocks, real functions and plain values side by side.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{Impl, MockFn, MockObject, RuntimeError};

/// One entry of an [`ApiObject`].
#[derive(Clone)]
pub enum Member {
    Mock(MockFn),
    /// A real implementation supplied through a partial object.
    Function(Impl),
    Value(Value),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock(mock) => f.debug_tuple("Mock").field(mock).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// An ordered name → member map standing in for a host namespace object.
#[derive(Debug, Clone, Default)]
pub struct ApiObject {
    members: IndexMap<String, Member>,
}

impl ApiObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a member; a replaced member keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.members.insert(name.into(), member)
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, Member::Value(value));
        self
    }

    pub fn with_function<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.insert(name, Member::Function(Arc::new(f)));
        self
    }

    pub fn with_mock(mut self, mock: MockFn) -> Self {
        self.insert(mock.name().to_string(), Member::Mock(mock));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Call a member by name.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        match self.members.get(name) {
            Some(Member::Mock(mock)) => Ok(mock.call(args)),
            Some(Member::Function(f)) => Ok(f(args)),
            Some(Member::Value(_)) => Err(RuntimeError::NotCallable {
                name: name.to_string(),
            }),
            None => Err(RuntimeError::UnknownMember {
                name: name.to_string(),
            }),
        }
    }

    /// The mock behind `name`, if that member is mocked.
    pub fn mock(&self, name: &str) -> Option<&MockFn> {
        match self.members.get(name)? {
            Member::Mock(mock) => Some(mock),
            _ => None,
        }
    }

    /// The plain value behind `name`, if that member is a value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.members.get(name)? {
            Member::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn mocks(&self) -> impl Iterator<Item = &MockFn> {
        self.members.values().filter_map(|m| match m {
            Member::Mock(mock) => Some(mock),
            _ => None,
        })
    }

    /// Forget the calls recorded by every mocked member.
    pub fn clear_mocks(&self) {
        self.mocks().for_each(MockFn::clear);
    }

    /// Forget calls and implementations of every mocked member.
    pub fn reset_mocks(&self) {
        self.mocks().for_each(MockFn::reset);
    }

    /// Layer `top` over `self`: on a shared name the entry from `top` wins.
    pub fn merged_with(mut self, top: ApiObject) -> Self {
        self.members.extend(top.members);
        self
    }
}

impl From<MockObject> for ApiObject {
    fn from(mocks: MockObject) -> Self {
        Self {
            members: mocks
                .into_iter()
                .map(|(name, mock)| (name, Member::Mock(mock)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_call_dispatch() {
        let object = ApiObject::new()
            .with_mock(MockFn::new("Mocked"))
            .with_function("Real", |args| json!(args.len()))
            .with_value("VERSION", json!("1.0"));

        assert_eq!(object.call("Mocked", &[]).unwrap(), Value::Null);
        assert_eq!(object.call("Real", &[json!(1), json!(2)]).unwrap(), json!(2));
        assert_eq!(
            object.call("VERSION", &[]).unwrap_err(),
            RuntimeError::NotCallable {
                name: "VERSION".into()
            }
        );
        assert_eq!(
            object.call("Missing", &[]).unwrap_err(),
            RuntimeError::UnknownMember {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn test_typed_accessors() {
        let object = ApiObject::new()
            .with_mock(MockFn::new("Mocked"))
            .with_value("VERSION", json!(3));

        assert!(object.mock("Mocked").is_some());
        assert!(object.mock("VERSION").is_none());
        assert_eq!(object.value("VERSION"), Some(&json!(3)));
        assert!(object.value("Mocked").is_none());
    }

    #[test]
    fn test_merge_top_wins_and_keeps_order() {
        let base = ApiObject::new()
            .with_value("a", json!(1))
            .with_value("b", json!(2));
        let top = ApiObject::new()
            .with_mock(MockFn::new("b"))
            .with_mock(MockFn::new("c"));

        let merged = base.merged_with(top);
        assert_eq!(merged.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(merged.mock("b").is_some());
        assert_eq!(merged.value("a"), Some(&json!(1)));
    }

    #[test]
    fn test_clear_and_reset_mocks() {
        let mock = MockFn::new("f");
        mock.mock_return_value(json!(1));
        let object = ApiObject::new().with_mock(mock.clone());
        object.call("f", &[]).unwrap();

        object.clear_mocks();
        assert_eq!(mock.call_count(), 0);
        assert_eq!(object.call("f", &[]).unwrap(), json!(1));

        object.reset_mocks();
        assert_eq!(object.call("f", &[]).unwrap(), Value::Null);
    }
}
