//! Provider Implementations - ERP Pricing Bridge
//!
//! Concrete implementations of the domain ports:
//!
//! - **erp** - ERP clients: the reqwest-based production adapter and a
//!   null client for testing and disabled wiring
//! - **tenant_config** - tenant configuration sources: an in-memory
//!   snapshot provider for tests and embedded wiring
//! - **health_store** - health result stores: an in-memory capture store
//!   for tests and embedded wiring
//!
//! Production deployments supply their own configuration and storage
//! providers backed by the platform's database; those live outside this
//! workspace and only need to implement the `epb-domain` ports.

pub mod erp;
pub mod health_store;
pub mod tenant_config;

pub use erp::{ErpHttpConfig, HttpErpClient, NullErpClient};
pub use health_store::InMemoryHealthResultStore;
pub use tenant_config::InMemoryTenantConfigProvider;
