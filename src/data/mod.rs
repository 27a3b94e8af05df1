pub mod annotation;
pub mod life_config;
pub mod persistence;

pub use annotation::{AnnotationStore, CellKey, PlaceholderStore};
pub use life_config::LifeConfig;
