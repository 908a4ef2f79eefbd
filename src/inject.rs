use std::sync::Arc;

use crate::helpers::Slot;
use crate::provide::{build_registry, Provider};
use crate::registry::{downcast, Registry, Shared, TypeKey, WiringError};

/// Capability of a component instance that declares injectable members.
///
/// Field-only targets are usually generated with
/// [`inject_fields!`](crate::inject_fields); targets with method members
/// or custom setters implement the trait by hand.
pub trait Injectable {
    /// Name reported in logs and errors, conventionally the component's
    /// type name.
    fn target_name(&self) -> &'static str;

    /// The injectable members this instance declares, in declaration
    /// order.
    fn members(&self) -> Vec<Member<'_>>;
}

/// One declared injectable member of a target instance.
///
/// Built with [`Member::field`], [`Member::field_with`] or
/// [`Member::method`]. The injector applies all field members before any
/// method member, whatever the declaration order.
pub struct Member<'a> {
    kind: MemberKind<'a>,
}

enum MemberKind<'a> {
    Field(FieldMember<'a>),
    Method(MethodMember<'a>),
}

struct FieldMember<'a> {
    key: TypeKey,
    assign: Box<dyn FnOnce(Shared) + 'a>,
}

struct MethodMember<'a> {
    name: &'static str,
    params: Vec<TypeKey>,
    invoke: Box<dyn FnOnce(Vec<Shared>) + 'a>,
}

impl<'a> Member<'a> {
    /// A field member backed by a [`Slot`].
    pub fn field<T: Send + Sync + 'static>(slot: &'a Slot<T>) -> Self {
        Self::field_with(move |value| slot.fill(value))
    }

    /// A field member applied through an arbitrary setter.
    pub fn field_with<T, F>(assign: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce(Arc<T>) + 'a,
    {
        Member {
            kind: MemberKind::Field(FieldMember {
                key: TypeKey::of::<T>(),
                assign: Box::new(move |value| assign(downcast(value))),
            }),
        }
    }

    /// A method member. Parameters are declared by the closure's argument
    /// types and resolved positionally; the body runs once, after the
    /// target's field members, and only if every parameter resolved.
    pub fn method<Args, F>(name: &'static str, body: F) -> Self
    where
        Args: ParamList + 'a,
        F: Callable<Args> + 'a,
    {
        Member {
            kind: MemberKind::Method(MethodMember {
                name,
                params: Args::keys(),
                invoke: Box::new(move |values| body.call(Args::from_values(values))),
            }),
        }
    }
}

/// Injects a single target instance.
///
/// Field members are resolved and assigned first, then method members are
/// resolved and invoked, each set in declaration order. The first
/// unresolved dependency aborts with a [`WiringError`]; members already
/// applied stay applied, the remaining ones are left untouched.
pub fn inject(registry: &Registry, target: &dyn Injectable) -> Result<(), WiringError> {
    let target_name = target.target_name();

    let mut fields = Vec::new();
    let mut methods = Vec::new();
    for member in target.members() {
        match member.kind {
            MemberKind::Field(field) => fields.push(field),
            MemberKind::Method(method) => methods.push(method),
        }
    }

    for FieldMember { key, assign } in fields {
        let Some(value) = registry.resolve_id(key.id) else {
            return Err(WiringError::UnresolvedField {
                target: target_name,
                dependency: key.name,
            });
        };
        assign(value);
        tracing::info!("Field Injected {} into {}", key.name, target_name);
    }

    for MethodMember {
        name,
        params,
        invoke,
    } in methods
    {
        let mut values = Vec::with_capacity(params.len());
        for param in &params {
            let Some(value) = registry.resolve_id(param.id) else {
                return Err(WiringError::UnresolvedMethod {
                    target: target_name,
                    method: name,
                });
            };
            values.push(value);
        }
        invoke(values);
        tracing::info!("Method Injected {} into {}", name, target_name);
    }

    Ok(())
}

/// Injects every target instance in turn. The first failure aborts the
/// whole pass; later targets are left untouched.
pub fn inject_all<'a, I>(registry: &Registry, targets: I) -> Result<(), WiringError>
where
    I: IntoIterator<Item = &'a dyn Injectable>,
{
    for target in targets {
        inject(registry, target)?;
    }
    Ok(())
}

/// Explicit composition root for the two start-up passes.
///
/// The host enumerates its live component instances and sorts them into
/// the provider and target sets; [`run`](Startup::run) builds the
/// [`Registry`] from every provision and then injects every target,
/// handing the registry back to the caller. Component instances stay
/// owned by the host, `Startup` only borrows them.
///
/// The whole pass runs once, synchronously, before dependent components
/// begin their own initialization. Running a second pass over the same
/// targets re-invokes provisions and overwrites injected state.
#[derive(Default)]
pub struct Startup<'a> {
    providers: Vec<&'a dyn Provider>,
    targets: Vec<&'a dyn Injectable>,
}

impl<'a> Startup<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider-capable instance.
    pub fn provider(mut self, provider: &'a dyn Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds an injection target. An instance with both capabilities is
    /// added to both sets.
    pub fn target(mut self, target: &'a dyn Injectable) -> Self {
        self.targets.push(target);
        self
    }

    /// Builds the registry, then injects every target.
    pub fn run(self) -> Result<Registry, WiringError> {
        let registry = build_registry(self.providers)?;
        inject_all(&registry, self.targets)?;
        Ok(registry)
    }
}

/*
 * The following adapts plain closures over Arc-wrapped parameters into
 * method members, for methods of up to 10 parameters.
 */

/// A Callable adapts a method body to a single tuple argument, so method
/// members can be declared with ordinary ```FnOnce(Arc<A>, Arc<B>, ...)```
/// closures.
pub trait Callable<Args> {
    fn call(self, args: Args);
}

/// An ordered method parameter list: the keys to resolve and the
/// positional reconstruction of the resolved values.
///
/// This trait is implemented for tuples of ```Arc<T>``` up to arity 10.
pub trait ParamList: Sized {
    fn keys() -> Vec<TypeKey>;
    fn from_values(values: Vec<Shared>) -> Self;
}

macro_rules! param_list ({ $($param:ident)* } => {
    impl<Func, $($param: Send + Sync + 'static,)*> Callable<($(Arc<$param>,)*)> for Func
    where
        Func: FnOnce($(Arc<$param>),*),
    {
        #[inline]
        #[allow(non_snake_case)]
        fn call(self, ($($param,)*): ($(Arc<$param>,)*)) {
            (self)($($param,)*)
        }
    }

    // Rebuild the declared tuple from the positionally resolved values
    #[allow(clippy::unused_unit)]
    #[allow(unused_mut, unused_variables)]
    impl<$($param: Send + Sync + 'static,)*> ParamList for ($(Arc<$param>,)*) {
        fn keys() -> Vec<TypeKey> {
            vec![$(TypeKey::of::<$param>()),*]
        }

        fn from_values(values: Vec<Shared>) -> Self {
            let mut values = values.into_iter();
            ($(downcast::<$param>(
                values.next().expect("one resolved value per declared parameter"),
            ),)*)
        }
    }
});

param_list! {}
param_list! { A }
param_list! { A B }
param_list! { A B C }
param_list! { A B C D }
param_list! { A B C D E }
param_list! { A B C D E F }
param_list! { A B C D E F G }
param_list! { A B C D E F G H }
param_list! { A B C D E F G H I }
param_list! { A B C D E F G H I J }
