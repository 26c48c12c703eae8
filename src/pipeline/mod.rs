pub mod export;
pub mod geo;
pub mod ingest;
pub mod metrics;
pub mod parse;
pub mod prepare;
pub mod process;
pub mod rasterize;
pub mod render;
