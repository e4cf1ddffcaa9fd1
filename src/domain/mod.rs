// Domain layer: core models, wire shapes and ports (interfaces).

pub mod model;
pub mod ports;
pub mod wire;
