//! Functional core of the catalog service.
//!
//! - [`product`]: the product entity, request payloads and validation.
//! - [`storage`]: store-facing traits, error taxonomy, CQL statement text and
//!   validated connection settings.
//!
//! Nothing in this crate performs I/O; drivers live in the `catalog` binary.

pub mod product;
pub mod storage;
