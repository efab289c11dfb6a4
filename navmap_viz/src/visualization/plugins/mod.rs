pub mod input;
pub mod scene;
pub mod sources;
pub mod tracking;
