//! Domain models for the AgriPredict dashboard

mod disease;
mod market;
mod notification;
mod profit;
mod weather;

pub use disease::*;
pub use market::*;
pub use notification::*;
pub use profit::*;
pub use weather::*;
