pub mod card;
pub mod price;
pub mod set;

pub use card::{CardData, Identifiers};
pub use price::{PriceList, PricePoints, RetailPrices};
pub use set::{SetData, SetMeta};
