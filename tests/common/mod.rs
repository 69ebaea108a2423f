//! Shared fixtures for integration tests.

#![allow(dead_code)]

use interceptor_scan::interceptor;

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub struct Invocation;

pub struct Timer;

/// Class `A`: one around-invoke and one post-construct method.
pub struct A;

#[interceptor]
impl A {
    #[around_invoke]
    fn a1(&self, _ctx: &mut Invocation) {}

    #[post_construct]
    fn a2(&self) {}

    pub fn helper(&self) {}
}

/// Class `B extends A`: adds a post-construct method.
pub struct B;

#[interceptor(extends = A)]
impl B {
    #[post_construct]
    pub(crate) fn b1(&self) {}
}

/// Timer interceptor with an around-timeout method.
pub struct TimeoutInterceptor;

#[interceptor]
impl TimeoutInterceptor {
    #[around_timeout]
    pub fn on_timer(&self, _timer: &Timer) {}
}

/// Class with no marked methods.
pub struct Plain;

#[interceptor]
impl Plain {
    pub fn plain(&self) {}
}

/// Stateful session callbacks spread over every lifecycle marker.
pub struct SessionCallbacks;

#[interceptor]
impl SessionCallbacks {
    #[post_construct]
    fn created(&self) {}

    #[pre_destroy]
    fn destroyed(&self) {}

    #[post_activate]
    fn activated(&self) {}

    #[pre_passivate]
    fn passivated(&self) {}

    #[after_begin]
    fn begun(&self) {}

    #[before_completion]
    fn completing(&self) {}

    #[after_completion]
    fn completed(&self, _committed: bool) {}
}
