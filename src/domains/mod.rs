//! Domains module containing business logic organized by bounded contexts.
//!
//! The request tools are the only domain of this server; everything else
//! (executor, transports, config) is core infrastructure.

pub mod tools;
