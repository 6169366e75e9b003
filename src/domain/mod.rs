// Domain layer: records, parsed fields, output rows and the ports the pipelines talk through.

pub mod model;
pub mod ports;
