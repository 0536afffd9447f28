//! Presenter discovery: declarations, records and lookup strategies.
//!
//! Declarations are made by explicit registration calls at startup; nothing is
//! discovered by scanning types.

pub mod discovery;
pub mod record;
pub mod registry;

pub use discovery::{
    ChainedDiscovery, ConventionDiscovery, DeclaredBindingDiscovery, DiscoveryStrategy,
};
pub use record::BindingRecord;
pub use registry::{global_registry, BindingDeclaration, BindingRegistry, RegistryError};
