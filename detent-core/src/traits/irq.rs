//! Edge-interrupt registration
//!
//! The one platform facility the sampler needs: a callback invoked in
//! interrupt context on any level change of the monitored line(s).

/// Pin-change interrupt source
///
/// An implementation covering both quadrature lines must invoke the same
/// callback for edges on either line; how the platform shares the callback
/// between its interrupt vectors is its own concern.
pub trait EdgeInterrupt {
    /// Install `callback` to run in interrupt context on every level
    /// change. Registration is one-shot: the engine has no teardown path,
    /// so there is no detach.
    fn on_any_edge<F: FnMut() + Send + 'static>(self, callback: F);
}
