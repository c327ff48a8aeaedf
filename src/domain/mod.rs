// Domain layer: quote models and the transport port. No HTTP client code here.

pub mod model;
pub mod ports;
