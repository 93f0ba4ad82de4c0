//! Implementation modules for `access_gate`.
//!
//! `src/access_gate.rs` is the stable facade; role and ownership checks live
//! in `policy`, store-side steps in `store`, and `run` chains them.

pub(crate) mod policy;
pub(crate) mod run;
pub(crate) mod store;
