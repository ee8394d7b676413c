#![warn(missing_docs)]
//! Rendering collaborator interface and an in-memory backend.
//!
//! The simulation only talks to the graphics library through
//! [`SceneBackend`]: it creates tree groups, tilts and removes them, asks for
//! ray intersections and requests frames.

mod environment;
mod headless;
mod scene;
mod tree_shape;

pub use environment::Environment;
pub use headless::HeadlessScene;
pub use scene::{SceneBackend, SceneHit, TreeVisual, VisualHandle};
pub use tree_shape::TreeShape;

