mod common;
mod meal;
mod recipe;
mod settings;

pub use common::*;
pub use meal::*;
pub use recipe::*;
pub use settings::*;
