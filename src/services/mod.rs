//! Service layer for business logic
//!
//! The HTTP handlers are thin wrappers around [`RedirectService`].

mod redirect_service;

pub use redirect_service::*;
