//! View-facing orchestration. Everything here returns typed outcomes; the
//! presentation layer decides what a redirect or a message looks like.

pub mod list;
pub mod navigation;

pub use list::{Activation, ListState, MutationOutcome, ResourceListController};
pub use navigation::{gate, Route, Surface};
