mod client;
pub mod hvakosterstrommen;
mod price_provider;
pub mod zaptec;

pub use self::price_provider::PriceProvider;
