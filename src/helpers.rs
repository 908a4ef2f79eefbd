use std::fmt;
use std::sync::{Arc, RwLock};

/// Interior-mutability cell backing an injectable field.
///
/// Components declare their injectable fields as `Slot<T>` and expose them
/// through [`Member::field`](crate::Member::field), usually via
/// [`inject_fields!`](crate::inject_fields). The injector fills the slot
/// with the registry's shared instance; reading it back yields a clone of
/// that `Arc`. A later injection pass overwrites the slot.
pub struct Slot<T>(RwLock<Option<Arc<T>>>);

impl<T> Slot<T> {
    /// An unfilled slot.
    pub const fn empty() -> Self {
        Slot(RwLock::new(None))
    }

    /// The injected instance, or `None` before injection has run.
    pub fn get(&self) -> Option<Arc<T>> {
        self.0.read().unwrap().clone()
    }

    pub(crate) fn fill(&self, value: Arc<T>) {
        *self.0.write().unwrap() = Some(value);
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.read() {
            Ok(guard) if guard.is_some() => f.write_str("Slot(filled)"),
            Ok(_) => f.write_str("Slot(empty)"),
            Err(_) => f.write_str("Slot(poisoned)"),
        }
    }
}

/// Declare the provide operations of a component.
///
/// This macro implements [`Provider`](crate::Provider) for the component
/// from a list of its methods. Each listed method must have the shape
/// of a ```fn $method(&self) -> Option<$product>```; the listed product
/// type pins the registry key at compile time, and a ```None``` return
/// aborts start-up as an empty provision.
#[macro_export]
macro_rules! provide_methods {
    ($provider:ident $(, $method:ident -> $product:ty)+ $(,)?) => {
        impl $crate::Provider for $provider {
            fn provider_name(&self) -> &'static str {
                stringify!($provider)
            }

            fn provisions(&self) -> ::std::vec::Vec<$crate::Provision<'_>> {
                ::std::vec![$($crate::Provision::new::<$product, _>(|| self.$method())),+]
            }
        }
    };
}

/// Declare the slot-backed injectable fields of a component.
///
/// This macro implements [`Injectable`](crate::Injectable) for the
/// component; every listed field must be a [`Slot`]. Targets mixing in
/// method members implement [`Injectable`](crate::Injectable) by hand with
/// [`Member::method`](crate::Member::method).
#[macro_export]
macro_rules! inject_fields {
    ($target:ident $(, $field:ident)+ $(,)?) => {
        impl $crate::Injectable for $target {
            fn target_name(&self) -> &'static str {
                stringify!($target)
            }

            fn members(&self) -> ::std::vec::Vec<$crate::Member<'_>> {
                ::std::vec![$($crate::Member::field(&self.$field)),+]
            }
        }
    };
}
