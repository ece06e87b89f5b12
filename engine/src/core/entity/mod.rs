//! Entity-Component System (ECS) functionality
//!
//! Scene-graph nodes ("game objects") are hecs entities carrying a [`Name`]
//! and a [`Transform`]; rendering components live in [`crate::scene`].

pub mod components;
pub mod world;

// Re-export commonly used types
pub use components::{Name, Transform};
pub use world::World;

// Re-export hecs types that users will need
pub use hecs::Entity;
