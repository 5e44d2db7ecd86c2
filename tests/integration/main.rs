//! Integration tests for procmet
//!
//! `sources_test` reads fabricated proc trees and the live proc filesystem;
//! `sampler_test` drives the sampling loop with scripted sources;
//! `cli_test` runs the built binary.

mod common;
mod sources_test;
