pub mod predict;
pub mod rank;
pub mod weight;
