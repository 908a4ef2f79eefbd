//! Minimal two-phase dependency wiring for component-based applications.
//!
//! # Simple use case
//!
//! ```
//! use ikebana::{inject_fields, provide_methods, Slot, Startup};
//!
//! // A dependency and the component supplying it
//! struct Clock {
//!     tick: u64,
//! }
//!
//! struct TimeKeeper;
//!
//! impl TimeKeeper {
//!     fn clock(&self) -> Option<Clock> {
//!         Some(Clock { tick: 0 })
//!     }
//! }
//!
//! provide_methods!(TimeKeeper, clock -> Clock);
//!
//! // A component consuming the dependency through a slot-backed field
//! #[derive(Default)]
//! struct Hud {
//!     clock: Slot<Clock>,
//! }
//!
//! inject_fields!(Hud, clock);
//!
//! # fn main() -> Result<(), ikebana::WiringError> {
//! // Wire everything once at start-up
//! let keeper = TimeKeeper;
//! let hud = Hud::default();
//!
//! let registry = Startup::new().provider(&keeper).target(&hud).run()?;
//!
//! assert_eq!(hud.clock.get().unwrap().tick, 0);
//! assert!(registry.contains::<Clock>());
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! Wiring happens in two explicit passes, run once at start-up before the
//! components begin their own initialization. Nothing is discovered by
//! runtime introspection: the host enumerates its component instances and
//! each component declares its capabilities.
//!
//! * The ```Provider``` trait lists a component's provisions, each pairing
//!   a product type with a zero-argument producer. The registration pass
//!   invokes every producer and stores the products in the ```Registry```,
//!   keyed by product type, exactly one shared instance per type.
//! * The ```Injectable``` trait lists a component's injectable members,
//!   either slot-backed fields or methods whose parameters are resolved
//!   positionally. The injection pass resolves every member against the
//!   finished registry, fields before methods.
//! * The ```Startup``` builder is the composition root tying both passes
//!   together and handing the ```Registry``` back to the entry point,
//!   which owns it; there is no process-wide container.
//!
//! Every wiring problem is fatal and surfaces on the first occurrence as
//! a ```WiringError```: a provision producing nothing, a second provision
//! of an already-registered type, or an unresolvable member. Entry points
//! are expected to propagate these with ```?``` and terminate.

mod helpers;
mod inject;
mod provide;
mod registry;

pub use helpers::Slot;
pub use inject::{inject, inject_all, Callable, Injectable, Member, ParamList, Startup};
pub use provide::{build_registry, register, Provider, Provision};
pub use registry::{Registry, Shared, TypeKey, WiringError};
