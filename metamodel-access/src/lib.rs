//! Cached, project-wide access to the declaration meta-model.
//!
//! - [`DocumentProvider`]: where declaration documents come from
//! - [`Collector`]: snapshots the document set and loads documents
//! - [`MetaModelAccess`]: serves the merged model, rebuilding it in the
//!   background whenever the document set changes
//!
//! # Example
//!
//! ```no_run
//! use metamodel_access::{AccessConfig, InMemoryDocumentProvider, MetaModelAccess};
//! use metamodel_engine::MetaItem;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), metamodel_access::AccessError> {
//! let provider = Arc::new(InMemoryDocumentProvider::new());
//! let access = MetaModelAccess::new(provider, AccessConfig::default());
//!
//! let model = access.model_when_ready().await?;
//! let product = model.find::<MetaItem>("Product");
//! # let _ = product;
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod error;
mod provider;
mod service;

pub use collector::{Collection, Collector};
pub use config::AccessConfig;
pub use error::{AccessError, AccessResult, NotReadyReason, ProviderError, ProviderResult};
pub use provider::{DocumentEntry, DocumentProvider, InMemoryDocumentProvider};
pub use service::{MetaModelAccess, ModelState};
