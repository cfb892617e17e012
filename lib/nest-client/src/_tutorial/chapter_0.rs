//! # Chapter 0: Getting Started
//!
//! ## What You'll Learn
//!
//! - Bind a model to a resource with [`CrudService`](crate::CrudService)
//! - List a collection and read documents by id
//! - Create, update and delete documents
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nest-client = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First Service
//!
//! ```ignore
//! use nest_client::prelude::*;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! pub struct Beer {
//!     #[serde(rename = "_id")]
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> nest_client::Result<()> {
//!     let beers = CrudService::<Beer, _>::builder("api.example.com", "beers")
//!         .build(HyperClient::new());
//!
//!     let all = beers.read().fetch().await?;
//!     let one = beers.read_one("5f1d").fetch().await?;
//!     let some = beers.read_many(["5f1d", "5f1e"]).fetch().await?;
//!     println!("{} beers, first is {one:?}, {} picked", all.len(), some.len());
//!     Ok(())
//! }
//! ```
//!
//! Every call returns an unsent [`RequestBuilder`](crate::RequestBuilder).
//! [`fetch`](crate::RequestBuilder::fetch) sends it and hands back the
//! decoded model.
//!
//! ## Writing
//!
//! ```ignore
//! let created = beers.create(&beer)?.fetch().await?;
//! let updated = beers.update(&created)?.fetch().await?;
//! beers.delete(&updated.id).fetch().await?;
//! ```
//!
//! Bodies are sent as JSON. `update` sends a `PUT` to the collection URL; the
//! backend finds the document by the id inside the model.
//!
//! ## Local Backends
//!
//! ```ignore
//! let beers = CrudService::<Beer, _>::builder("localhost:3000", "beers")
//!     .insecure(true)
//!     .build(HyperClient::new());
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 1: Query Options][super::chapter_1]
