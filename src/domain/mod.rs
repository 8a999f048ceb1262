pub mod price;
pub mod selection;
