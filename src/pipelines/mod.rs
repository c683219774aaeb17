//! Render pipelines. The viewer draws everything with the lighting pipeline.

pub mod lighting;
