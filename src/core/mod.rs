// src/core/mod.rs

pub mod form;
pub mod html;
pub mod net;
pub mod sanitize;

pub use form::FormData;
pub use net::{HttpTransport, Transport};
