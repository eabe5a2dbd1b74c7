pub mod renderer;

pub use renderer::{Renderer, TrainingHud};
