pub mod edo;
pub mod error;
pub mod family;
pub mod fraction;
pub mod generator;
pub mod hardness;
pub mod math;
pub mod modes;
pub mod monzo;
pub mod names;
pub mod pattern;
pub mod scale;
pub mod word;

pub use error::{MosError, MosResult};
