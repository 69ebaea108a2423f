//! Attribute macros for declaring interceptor classes.
//!
//! This crate provides the `#[interceptor]` attribute, which reads marker
//! attributes on the methods of an inherent `impl` block and generates an
//! `Interceptor` implementation describing the class:
//!
//! - `#[around_invoke]`, `#[around_timeout]`
//! - `#[post_construct]`, `#[pre_destroy]`
//! - `#[post_activate]`, `#[pre_passivate]`
//! - `#[after_begin]`, `#[before_completion]`, `#[after_completion]`
//!
//! Generated code references `::interceptor_scan`, so the consuming crate must
//! depend on it under that name.

use proc_macro::TokenStream;

mod interceptor;

/// Declares an interceptor class from an inherent `impl` block.
///
/// Marker attributes are stripped from the emitted methods and recorded as
/// class metadata. Method name, parameter types and visibility are recorded
/// for every method in the block, marked or not.
///
/// # Example
///
/// ```ignore
/// use interceptor_scan::interceptor;
///
/// pub struct AuditInterceptor;
///
/// #[interceptor(extends = BaseInterceptor)]
/// impl AuditInterceptor {
///     #[around_invoke]
///     fn audit(&self, ctx: &mut Invocation) {}
///
///     #[post_construct]
///     pub fn init(&mut self) {}
/// }
///
/// // Generated implementation:
/// // impl ::interceptor_scan::Interceptor for AuditInterceptor {
/// //     fn class() -> ::interceptor_scan::Class { ... }
/// // }
/// ```
///
/// # Superclass
///
/// `extends = Path` names the superclass. The superclass type must itself be
/// declared with `#[interceptor]` (or implement `Interceptor` by hand).
/// `extends = Self` is rejected. Longer cycles (`A` extends `B` extends `A`)
/// cannot be detected here and deadlock the first `class()` call, since each
/// class is built once behind a `OnceCell`.
#[proc_macro_attribute]
pub fn interceptor(attr: TokenStream, item: TokenStream) -> TokenStream {
    interceptor::interceptor_impl(attr, item)
}
