//! Runtime orchestration for gacha draws.
//!
//! This crate wires oracle access, state repositories, and per-key locking
//! into a cohesive service API. Hosts embed [`GachaService`] to run batch
//! draws for a user and banner and to read back their records.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the orchestrator and builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`locks`] serializes read-modify-write sessions per (user, banner)
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod locks;
pub mod oracle;
pub mod repository;
pub mod service;

pub use api::{Result, RuntimeError};
pub use locks::{BannerGuard, BannerLocks};
pub use oracle::OracleManager;
pub use repository::{FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository};
pub use service::{DrawOutcome, GachaService, ServiceBuilder, ServiceConfig, stream_seed};
