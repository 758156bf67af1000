//! One-shot installation of the map engine script and stylesheet.
//!
//! [`EngineLoader`] is meant to live once per page (process-wide); the
//! browser crate keeps it in a thread-local. Its phase is checked before every
//! injection, so calling [`EngineLoader::ensure_available`] from several
//! mounts injects the resources at most once. Load, error and timeout race to
//! settle a pending load; only the first one counts.

use crate::config::EngineAssets;
use crate::error::EngineLoadError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The DOM side of engine installation.
pub trait EngineHost {
    /// Whether the engine global already exists.
    fn engine_present(&self) -> bool;

    fn inject_stylesheet(&self, href: &str);

    /// Append a script element; exactly one of the callbacks is expected to fire.
    fn inject_script(&self, src: &str, on_load: Box<dyn FnOnce()>, on_error: Box<dyn FnOnce()>);

    /// Fire-and-forget timer.
    fn set_timeout(&self, ms: u32, callback: Box<dyn FnOnce()>);
}

/// Proof that the engine global is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineHandle {
    /// The engine was already on the page before this loader ran.
    pub preinstalled: bool,
}

pub type LoadOutcome = Result<EngineHandle, EngineLoadError>;
pub type LoadCallback = Box<dyn FnOnce(LoadOutcome)>;

enum Phase {
    Idle,
    Pending(Vec<LoadCallback>),
    Installed(EngineHandle),
    Failed(EngineLoadError),
}

struct Inner<H> {
    host: H,
    assets: EngineAssets,
    timeout_ms: u32,
    phase: RefCell<Phase>,
    injections: Cell<u32>,
}

pub struct EngineLoader<H: EngineHost> {
    inner: Rc<Inner<H>>,
}

impl<H: EngineHost> Clone for EngineLoader<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

enum Next {
    Settled(LoadOutcome),
    Start,
    Wait,
}

impl<H: EngineHost + 'static> EngineLoader<H> {
    pub fn new(host: H, assets: EngineAssets, timeout_ms: u32) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                assets,
                timeout_ms,
                phase: RefCell::new(Phase::Idle),
                injections: Cell::new(0),
            }),
        }
    }

    /// Resolve `callback` once the engine is usable, or with the load error.
    ///
    /// A failed load is terminal for the page: later calls get the same
    /// error without another attempt.
    pub fn ensure_available(&self, callback: LoadCallback) {
        let mut callback = Some(callback);
        let next = match &mut *self.inner.phase.borrow_mut() {
            Phase::Installed(handle) => Next::Settled(Ok(*handle)),
            Phase::Failed(err) => Next::Settled(Err(err.clone())),
            Phase::Pending(waiters) => {
                waiters.extend(callback.take());
                Next::Wait
            }
            Phase::Idle => Next::Start,
        };

        match next {
            Next::Settled(outcome) => {
                if let Some(callback) = callback {
                    callback(outcome);
                }
            }
            Next::Start if self.inner.host.engine_present() => {
                let handle = EngineHandle { preinstalled: true };
                log::info!("[MRM] map engine already present");
                *self.inner.phase.borrow_mut() = Phase::Installed(handle);
                if let Some(callback) = callback {
                    callback(Ok(handle));
                }
            }
            Next::Start => {
                *self.inner.phase.borrow_mut() = Phase::Pending(callback.into_iter().collect());
                self.inject();
            }
            Next::Wait => {}
        }
    }

    /// Number of times the script and stylesheet were injected.
    pub fn injection_count(&self) -> u32 {
        self.inner.injections.get()
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            &*self.inner.phase.borrow(),
            Phase::Installed(_) | Phase::Failed(_)
        )
    }

    fn inject(&self) {
        let inner = &self.inner;
        log::info!("[MRM] loading map engine from {}", inner.assets.script_url);
        inner.injections.set(inner.injections.get() + 1);
        inner.host.inject_stylesheet(&inner.assets.stylesheet_url);

        let on_load = {
            let inner = Rc::clone(inner);
            Box::new(move || {
                let outcome = if inner.host.engine_present() {
                    Ok(EngineHandle { preinstalled: false })
                } else {
                    Err(EngineLoadError::EngineMissing)
                };
                inner.settle(outcome, "load");
            })
        };
        let on_error = {
            let inner = Rc::clone(inner);
            Box::new(move || {
                let err = EngineLoadError::ScriptFailed(inner.assets.script_url.clone());
                inner.settle(Err(err), "error");
            })
        };
        inner
            .host
            .inject_script(&inner.assets.script_url, on_load, on_error);

        let on_timeout = {
            let inner = Rc::clone(inner);
            Box::new(move || {
                let err = EngineLoadError::TimedOut(inner.timeout_ms);
                inner.settle(Err(err), "timeout");
            })
        };
        inner.host.set_timeout(inner.timeout_ms, on_timeout);
    }
}

impl<H: EngineHost> Inner<H> {
    fn settle(&self, outcome: LoadOutcome, source: &str) {
        let waiters = {
            let mut phase = self.phase.borrow_mut();
            if !matches!(&*phase, Phase::Pending(_)) {
                log::debug!("[MRM] map engine {} after settlement ignored", source);
                return;
            }
            let next = match &outcome {
                Ok(handle) => Phase::Installed(*handle),
                Err(err) => Phase::Failed(err.clone()),
            };
            match std::mem::replace(&mut *phase, next) {
                Phase::Pending(waiters) => waiters,
                _ => Vec::new(),
            }
        };

        match &outcome {
            Ok(_) => log::info!("[MRM] map engine loaded"),
            Err(err) => log::error!("[MRM] map engine failed to load: {}", err),
        }
        for waiter in waiters {
            waiter(outcome.clone());
        }
    }
}
