pub mod price;
pub mod selection;
pub mod snapshot;
pub mod view;
