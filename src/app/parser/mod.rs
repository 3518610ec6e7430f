pub mod assemble;
pub mod calendar;
pub mod normalize;
pub mod table;
