pub mod exchangerate_api;
pub mod exchangerate_host;
pub mod util;

pub use exchangerate_api::ExchangeRateApiProvider;
pub use exchangerate_host::ExchangeRateHostProvider;
