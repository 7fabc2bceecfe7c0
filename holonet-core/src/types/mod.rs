//! Domain types for Holonet.
//!
//! - [`EntityKind`]: the four upstream categories
//! - [`Character`], [`Planet`], [`Starship`], [`Film`]: full entities
//! - [`CharacterSummary`] and friends: reduced projections for lists
//! - [`UpstreamPage`]: one raw listing page
//! - [`Paginated`]: a page of our own responses

/// Implements [`crate::Record`] for structs with a plain `id` field.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::traits::Record for $ty {
                fn id(&self) -> $crate::types::EntityId {
                    self.id
                }

                fn set_id(&mut self, id: $crate::types::EntityId) {
                    self.id = id;
                }
            }
        )+
    };
}

mod kind;
mod character;
mod planet;
mod starship;
mod film;
mod page;

pub use kind::*;
pub use character::*;
pub use planet::*;
pub use starship::*;
pub use film::*;
pub use page::*;
