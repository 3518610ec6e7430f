pub mod driver;
pub mod navigate;
pub mod pipeline;
pub mod scripts;
