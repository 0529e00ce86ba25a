pub mod errors;
pub mod lookup;
pub mod models;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod validation;
