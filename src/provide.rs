//! Provider capability and the registration pass.
//!
//! A component that supplies dependencies implements [`Provider`] to list
//! its provisions explicitly: each [`Provision`] pairs a product type with
//! a zero-argument producer reading the provider instance. The
//! registration pass invokes every producer in declaration order and
//! stores the products in the [`Registry`], keyed by product type.
//!
//! Registration is eager and fail-fast: a producer that returns `None` and
//! a product type that is already registered both abort start-up with a
//! [`WiringError`].

use std::sync::Arc;

use crate::registry::{Registry, Shared, TypeKey, WiringError};

/// Capability of a component instance that supplies dependency values.
///
/// Most implementations are generated with
/// [`provide_methods!`](crate::provide_methods) from a list of
/// `fn name(&self) -> Option<Product>` methods. Hand-written impls are
/// useful when a producer hands out an `Arc` it retains itself (see
/// [`Provision::shared`]).
pub trait Provider {
    /// Name reported in logs and errors, conventionally the component's
    /// type name.
    fn provider_name(&self) -> &'static str;

    /// The provisions this instance declares, in declaration order.
    fn provisions(&self) -> Vec<Provision<'_>>;
}

/// One declared provision: the product type key plus the producer invoked
/// during registration.
pub struct Provision<'a> {
    key: TypeKey,
    produce: Box<dyn FnOnce() -> Option<Shared> + 'a>,
}

impl<'a> Provision<'a> {
    /// A provision producing an owned value; registration wraps it into
    /// the canonical shared instance.
    pub fn new<T, F>(produce: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Option<T> + 'a,
    {
        Self {
            key: TypeKey::of::<T>(),
            produce: Box::new(move || produce().map(|value| Arc::new(value) as Shared)),
        }
    }

    /// A provision producing an already-shared value, for providers that
    /// keep a handle to their own product.
    pub fn shared<T, F>(produce: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Option<Arc<T>> + 'a,
    {
        Self {
            key: TypeKey::of::<T>(),
            produce: Box::new(move || produce().map(|value| value as Shared)),
        }
    }
}

/// Runs the provisions of a single provider against the registry.
///
/// Producers run in declaration order. The first empty or duplicate
/// provision aborts with the corresponding [`WiringError`] and leaves the
/// registry partially populated; callers must treat it as unusable.
pub fn register(registry: &mut Registry, provider: &dyn Provider) -> Result<(), WiringError> {
    let provider_name = provider.provider_name();
    for Provision { key, produce } in provider.provisions() {
        let Some(value) = produce() else {
            return Err(WiringError::EmptyProvision {
                provider: provider_name,
                dependency: key.name,
            });
        };
        if !registry.insert(key.id, value) {
            return Err(WiringError::DuplicateProvision {
                provider: provider_name,
                dependency: key.name,
            });
        }
        tracing::info!("Registered {} from {}", key.name, provider_name);
    }
    Ok(())
}

/// Builds a fresh registry from every provider-capable component instance.
///
/// The registry comes back by value only once fully built, so injection
/// can never observe it half-populated.
pub fn build_registry<'a, I>(providers: I) -> Result<Registry, WiringError>
where
    I: IntoIterator<Item = &'a dyn Provider>,
{
    let mut registry = Registry::default();
    for provider in providers {
        register(&mut registry, provider)?;
    }
    Ok(registry)
}
