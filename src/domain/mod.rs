// Domain layer: request/result models, affordability bands and the reference data port.

pub mod insight;
pub mod model;
pub mod ports;
