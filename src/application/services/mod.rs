//! Application services
//!
//! Concrete services that orchestrate the domain walks for one request.
//! They depend on the collaborator traits in `infrastructure::traits`
//! but are themselves concrete structs, not traits.

mod context;
mod resolver;

pub use context::{Collaborators, DescendantQuery, NavigationContext, NavigationOptions};
pub use resolver::AttributeResolver;
