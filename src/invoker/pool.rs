//! Dependency pools used to inject typed `run` parameters.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::widget::Service;

/// Collaborator able to produce a value for a requested type.
pub trait DependencyPool: Send + Sync {
    /// Produce an instance of the type identified by `type_id`, or `None` when the pool
    /// cannot build one.
    fn make(&self, type_id: TypeId, type_name: &str) -> Option<Service>;
}

/// Pool that resolves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyPool;

impl DependencyPool for EmptyPool {
    fn make(&self, _type_id: TypeId, _type_name: &str) -> Option<Service> {
        None
    }
}

type Binding = Arc<dyn Fn() -> Service + Send + Sync>;

/// Type-keyed pool of shared instances and factories.
///
/// ```rust
/// use widget_render::invoker::{DependencyPool, ServicePool};
/// use std::any::TypeId;
///
/// struct Clock;
///
/// let pool = ServicePool::new().with_instance(Clock);
/// assert!(pool.make(TypeId::of::<Clock>(), "Clock").is_some());
/// ```
#[derive(Default, Clone)]
pub struct ServicePool {
    bindings: HashMap<TypeId, Binding>,
}

impl ServicePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share one instance of `T` with every widget that asks for it.
    pub fn instance<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        let shared: Service = Arc::new(value);
        self.bindings.insert(TypeId::of::<T>(), Arc::new(move || Arc::clone(&shared)));
        self
    }

    /// Build a new `T` on every request.
    pub fn bind<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.bindings.insert(TypeId::of::<T>(), Arc::new(move || Arc::new(factory()) as Service));
        self
    }

    #[must_use]
    pub fn with_instance<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.instance(value);
        self
    }

    #[must_use]
    pub fn with_binding<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.bind(factory);
        self
    }
}

impl DependencyPool for ServicePool {
    fn make(&self, type_id: TypeId, type_name: &str) -> Option<Service> {
        let service = self.bindings.get(&type_id).map(|binding| binding());
        if service.is_none() {
            tracing::debug!("No binding for {} in service pool", type_name);
        }
        service
    }
}
