//! Everything that talks to, or reasons about, the dashboard API: the HTTP
//! client, wire models, pod normalization, derived display values, list
//! filtering, websocket streams and the playground request builder.

pub mod client;
pub mod derive;
pub mod listing;
pub mod models;
pub mod normalize;
pub mod playground;
pub mod stream;

pub use client::ApiClient;
pub use listing::LoadState;
pub use models::{Cluster, Deployment, Ingress, Namespace, Node, Service};
pub use normalize::Pod;
