mod batch;
mod classifier;
mod common;
mod routing;
