pub mod scale;

pub use scale::LinearScale;
