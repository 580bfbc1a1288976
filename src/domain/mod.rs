// Domain layer: models, the selection set and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod selection;
