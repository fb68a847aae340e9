//! Demo applications.

pub mod icons;
pub mod todo;

pub use icons::IconsDemo;
pub use todo::{TodoDemo, TodoLayout};
