//! Widget invocation with dependency injection.
//!
//! The [`Invoker`] builds a widget from the registry and calls its `run` entry point.
//! Arguments are assembled position by position:
//!
//! 1. explicit call-site arguments fill the leading positions, whatever the declared kind;
//! 2. remaining [`Parameter::Service`] positions are requested from the [`DependencyPool`];
//! 3. remaining [`Parameter::Value`] positions take their declared default.
//!
//! A position that none of these can fill fails with
//! [`WidgetError::UnresolvableDependency`] before the widget runs.

mod pool;

pub use pool::{DependencyPool, EmptyPool, ServicePool};

use serde_json::Value;
use std::sync::Arc;

use crate::core::{Result, WidgetError};
use crate::resolver::{WidgetClass, WidgetRegistry};
use crate::widget::{Argument, Parameter, RunArguments, Widget, WidgetConfig};

/// Calls widget entry points, resolving missing arguments from a dependency pool.
#[derive(Clone)]
pub struct Invoker {
    registry: Arc<WidgetRegistry>,
    pool: Arc<dyn DependencyPool>,
}

impl Invoker {
    pub fn new(registry: Arc<WidgetRegistry>, pool: Arc<dyn DependencyPool>) -> Self {
        Self {
            registry,
            pool,
        }
    }

    /// Construct `class` with `config`, run it and return the raw markup.
    pub fn invoke(
        &self,
        class: &WidgetClass,
        config: WidgetConfig,
        runtime_args: &[Value],
    ) -> Result<String> {
        let widget = self.instantiate(class, config)?;
        self.call(class, widget.as_ref(), runtime_args)
    }

    /// Construct a fresh widget instance.
    pub fn instantiate(&self, class: &WidgetClass, config: WidgetConfig) -> Result<Box<dyn Widget>> {
        self.registry.instantiate(class, config).ok_or_else(|| WidgetError::InvalidWidgetClass {
            name: class.short_name().to_string(),
            class: class.to_string(),
            suggestions: self.registry.similar(class.as_str()),
        })
    }

    /// Run an already constructed widget.
    pub fn call(&self, class: &WidgetClass, widget: &dyn Widget, runtime_args: &[Value]) -> Result<String> {
        let args = self.resolve_arguments(class, &widget.parameters(), runtime_args)?;

        widget.run(&args).map_err(|source| WidgetError::RenderFailed {
            class: class.to_string(),
            source,
        })
    }

    fn resolve_arguments(
        &self,
        class: &WidgetClass,
        parameters: &[Parameter],
        runtime_args: &[Value],
    ) -> Result<RunArguments> {
        let mut args: Vec<Argument> = runtime_args.iter().cloned().map(Argument::Value).collect();

        for parameter in parameters.iter().skip(runtime_args.len()) {
            let argument = match parameter {
                Parameter::Service {
                    name,
                    type_id,
                    type_name,
                } => {
                    let service = self.pool.make(*type_id, type_name).ok_or_else(|| {
                        WidgetError::UnresolvableDependency {
                            widget: class.to_string(),
                            parameter: (*name).to_string(),
                            type_name: (*type_name).to_string(),
                        }
                    })?;
                    tracing::debug!("Injected {} into {}::run", type_name, class);
                    Argument::Service(service)
                }
                Parameter::Value {
                    name,
                    default,
                } => match default {
                    Some(value) => Argument::Value(value.clone()),
                    None => {
                        return Err(WidgetError::UnresolvableDependency {
                            widget: class.to_string(),
                            parameter: (*name).to_string(),
                            type_name: "value".to_string(),
                        });
                    }
                },
            };
            args.push(argument);
        }

        Ok(RunArguments::new(args))
    }
}
