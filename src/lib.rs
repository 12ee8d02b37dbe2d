//! Host-side tooling for the sUSD contracts: deployment configuration shared
//! by the livenet deploy binary.

pub mod config;
