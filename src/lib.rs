pub mod compute;
pub mod entities;
pub mod geometry;
pub mod levels;
pub mod presenter;
pub mod scene;
