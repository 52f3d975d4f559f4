//! Declared parameters and resolved arguments of a widget's `run` entry point.

use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A service instance handed out by a dependency pool.
pub type Service = Arc<dyn Any + Send + Sync>;

/// One parameter declared by [`Widget::parameters`](super::Widget::parameters).
///
/// Parameters are matched by position: explicit call-site arguments fill the first
/// positions, the rest are resolved according to their kind.
#[derive(Debug, Clone)]
pub enum Parameter {
    /// Plain value parameter, optionally with a default used when the call site omits it.
    Value {
        name: &'static str,
        default: Option<Value>,
    },
    /// Typed parameter resolved from the dependency pool when not passed explicitly.
    Service {
        name: &'static str,
        type_id: TypeId,
        type_name: &'static str,
    },
}

impl Parameter {
    /// Value parameter without a default.
    pub fn required(name: &'static str) -> Self {
        Self::Value {
            name,
            default: None,
        }
    }

    /// Value parameter falling back to `default`.
    pub fn optional(name: &'static str, default: impl Into<Value>) -> Self {
        Self::Value {
            name,
            default: Some(default.into()),
        }
    }

    /// Parameter of type `T` injected from the dependency pool.
    pub fn service<T: Any + Send + Sync>(name: &'static str) -> Self {
        Self::Service {
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Value {
                name,
                ..
            }
            | Self::Service {
                name,
                ..
            } => name,
        }
    }
}

/// A resolved argument.
#[derive(Clone)]
pub enum Argument {
    Value(Value),
    Service(Service),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Service(_) => f.write_str("Service(..)"),
        }
    }
}

/// Positional arguments the invoker passes to [`Widget::run`](super::Widget::run).
#[derive(Debug, Clone, Default)]
pub struct RunArguments {
    args: Vec<Argument>,
}

impl RunArguments {
    pub fn new(args: Vec<Argument>) -> Self {
        Self {
            args,
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    /// Value argument at `index`, if that position holds a value.
    pub fn value(&self, index: usize) -> Option<&Value> {
        match self.args.get(index) {
            Some(Argument::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn str(&self, index: usize) -> Option<&str> {
        self.value(index).and_then(Value::as_str)
    }

    /// Service argument at `index`, downcast to `T`.
    pub fn service<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
        match self.args.get(index) {
            Some(Argument::Service(service)) => Arc::clone(service).downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }
}
