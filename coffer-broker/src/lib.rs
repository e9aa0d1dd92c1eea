//! Request-side of the coffer secrets service: the abstract request/response
//! model, the verb dispatcher, and the secrets resource.
//!
//! The wire transport is a collaborator, not part of this crate: it parses a
//! request into a [`Request`], hands it to a [`Dispatcher`], and serializes
//! the resulting [`Response`]. Authentication happens before dispatch; the
//! request only carries the already-established caller identity.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod policy;
pub mod request;
pub mod secrets;
pub mod telemetry;

pub use config::{bind_store, BrokerConfig};
pub use dispatch::{Dispatcher, Resource, Verb};
pub use error::HandlerError;
pub use policy::{NamespacePolicy, SelfNamespace};
pub use request::{Body, Request, Response};
pub use secrets::Secrets;
