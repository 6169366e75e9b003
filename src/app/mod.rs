// Application layer: the concrete review and email pipelines.

pub mod pipelines;
