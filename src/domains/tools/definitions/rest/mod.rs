//! REST request tools, one file per HTTP verb.

pub(crate) mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::{RestDeleteParams, RestDeleteTool};
pub use get::{RestGetParams, RestGetTool};
pub use post::{RestPostParams, RestPostTool};
pub use put::{RestPutParams, RestPutTool};
