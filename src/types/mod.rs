pub mod palette;
pub mod track;
pub mod unit;
pub mod view;
