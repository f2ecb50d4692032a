pub mod plan_stage;
pub use plan_stage::*;

pub mod plan_visualizer;
pub use plan_visualizer::*;
