//! Type-keyed storage for provided dependency instances.
//!
//! The registry is populated once by the registration pass and only read
//! afterwards. It is an explicit value with clear ownership: the
//! application entry point builds it, passes it by reference to the
//! injection routines and drops it once start-up is complete. There is no
//! process-wide container.

use std::any::{Any, TypeId};
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Shared handle to a type-erased dependency instance.
pub type Shared = Arc<dyn Any + Send + Sync>;

/// A registry key paired with the display name used in logs and errors.
///
/// Keys are captured at compile time by the typed constructors
/// ([`Provision::new`](crate::Provision::new),
/// [`Member::field`](crate::Member::field), ...), never inferred by
/// runtime inspection.
#[derive(Debug, Clone)]
pub struct TypeKey {
    pub(crate) id: TypeId,
    pub(crate) name: String,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name(std::any::type_name::<T>()),
        }
    }
}

/// Strips the module path from every segment of a type name, generic
/// arguments included; dependency names read the way integrators wrote
/// them, not as full paths.
fn short_name(full: &str) -> String {
    let separator = |c: char| !c.is_alphanumeric() && c != '_' && c != ':';
    let mut out = String::with_capacity(full.len());
    for piece in full.split_inclusive(separator) {
        let (path, sep) = match piece.char_indices().last() {
            Some((idx, last)) if separator(last) => piece.split_at(idx),
            _ => (piece, ""),
        };
        match path.rfind("::") {
            Some(idx) => out.push_str(&path[idx + 2..]),
            None => out.push_str(path),
        }
        out.push_str(sep);
    }
    out
}

pub(crate) fn downcast<T: Send + Sync + 'static>(value: Shared) -> Arc<T> {
    value
        .downcast()
        .expect("registry values always match their type key")
}

/// Errors raised while wiring dependencies.
///
/// Every variant is a configuration error detected eagerly at start-up;
/// none is retried or recovered. The first error aborts the whole pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WiringError {
    /// A provide operation produced no value.
    #[error("Provider {provider} returned no value for {dependency}")]
    EmptyProvision {
        provider: &'static str,
        dependency: String,
    },
    /// A provision declared a product type that is already registered.
    #[error("Duplicate provision of {dependency} from {provider}")]
    DuplicateProvision {
        provider: &'static str,
        dependency: String,
    },
    /// A field member's type has no registry entry.
    #[error("Failed to resolve {dependency} for {target}")]
    UnresolvedField {
        target: &'static str,
        dependency: String,
    },
    /// At least one parameter of a method member has no registry entry.
    #[error("Failed to resolve parameters for {target}.{method}")]
    UnresolvedMethod {
        target: &'static str,
        method: &'static str,
    },
}

/// The type-keyed store of provided dependency instances.
///
/// Holds exactly one shared instance per type. Resolution is a plain point
/// lookup on the declared type; there is no supertype or trait-object
/// matching.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, Shared>,
}

impl Registry {
    /// Looks up the instance registered for `T`.
    ///
    /// The returned `Arc` is a clone of the registered one, so repeated
    /// resolutions and injected values are all reference-identical.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .map(downcast::<T>)
    }

    /// Whether an instance is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered dependency types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts into a vacant key only; the registration pass reports an
    /// occupied key as a duplicate-provision error.
    pub(crate) fn insert(&mut self, key: TypeId, value: Shared) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                true
            }
        }
    }

    pub(crate) fn resolve_id(&self, key: TypeId) -> Option<Shared> {
        self.entries.get(&key).cloned()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
