//! Typed client for the page resolver HTTP API.

mod client;

pub use client::{
    ClientError, Component, ResolveResponse, ResolvedPage, ResolverClient,
};
