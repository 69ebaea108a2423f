//! Interceptor metadata scanner and descriptor cache.
//!
//! Given an interceptor class, the [`InterceptorScanner`] answers which
//! methods run in each lifecycle and invocation [`Phase`], and in what order.
//! Discovery results can be primed into a [`DescriptorCache`] so deploying the
//! same class again copies a template instead of walking the class hierarchy.
//!
//! # Example
//!
//! ```ignore
//! use interceptor_scan::{interceptor, InterceptorScanner, Phase};
//!
//! pub struct AuditInterceptor;
//!
//! #[interceptor]
//! impl AuditInterceptor {
//!     #[around_invoke]
//!     fn audit(&self) {}
//! }
//!
//! let scanner = InterceptorScanner::shared();
//! scanner.cache_scan_type::<AuditInterceptor>()?;
//! let data = scanner.scan_type::<AuditInterceptor>()?;
//! assert_eq!(data.methods_for(Phase::Business).len(), 1);
//! ```

// Lets `#[interceptor]` expansions resolve `::interceptor_scan` inside this crate
extern crate self as interceptor_scan;

pub mod cache;
pub mod category;
pub mod class;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod method;
pub mod phase;
pub mod scanner;

pub use cache::DescriptorCache;
pub use category::Category;
pub use class::{Class, ClassBuilder, ClassId, Interceptor, MethodDecl, Visibility};
pub use config::ScanConfig;
pub use context::{ContextBag, TypeKey};
pub use descriptor::InterceptorData;
pub use discovery::{
    AccessRelaxer, AnnotationFinder, DiscoveryError, HierarchyFinder, MethodDiscovery,
    SetAccessible,
};
pub use error::InterceptorError;
pub use interceptor_macros::interceptor;
pub use method::{Method, MethodSet};
pub use phase::Phase;
pub use scanner::InterceptorScanner;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
