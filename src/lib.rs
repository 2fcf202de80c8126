#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod circle;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hull;
pub mod id_generator;
pub mod input;
pub mod renderer;
pub mod scene;

pub use app::HullApp;
pub use circle::{Circle, CircleQuery, CircleRole, HullCircle, NotchPair};
pub use config::EditorConfig;
pub use error::{HullError, HullResult};
pub use export::SvgExporter;
pub use geometry::{GeometryProvider, TangentHullProvider, TangentPoint};
pub use hull::{Hull, HullPath};
pub use id_generator::{CircleId, HullId};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use renderer::Renderer;
pub use scene::{CircleHome, InteractionState, Scene, SceneSnapshot, SharedScene};
