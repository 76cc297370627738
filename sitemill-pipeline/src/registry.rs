//! Hook registry and reference pipeline host

use regex::Regex;
use sitemill_core::{File, MiddlewareError, Phase};
use std::sync::Arc;

/// Handler run against a matching file at a given phase. The host's
/// continuation convention becomes a synchronous `Result`: returning
/// `Err` aborts the file's pass for the current phase.
pub type Handler = Arc<dyn Fn(&mut File) -> Result<(), MiddlewareError> + Send + Sync>;

/// Capability interface a host pipeline must implement so middleware can
/// wire itself in. Checked at the type level instead of probing the host
/// object for methods at runtime.
pub trait HookRegistry {
    /// Register `handler` to run at `phase` for files whose path matches
    /// `selector`.
    fn hook(&mut self, phase: Phase, selector: Regex, handler: Handler);

    fn on_load<F>(&mut self, selector: Regex, handler: F)
    where
        F: Fn(&mut File) -> Result<(), MiddlewareError> + Send + Sync + 'static,
        Self: Sized,
    {
        self.hook(Phase::OnLoad, selector, Arc::new(handler));
    }

    fn post_render<F>(&mut self, selector: Regex, handler: F)
    where
        F: Fn(&mut File) -> Result<(), MiddlewareError> + Send + Sync + 'static,
        Self: Sized,
    {
        self.hook(Phase::PostRender, selector, Arc::new(handler));
    }

    fn pre_write<F>(&mut self, selector: Regex, handler: F)
    where
        F: Fn(&mut File) -> Result<(), MiddlewareError> + Send + Sync + 'static,
        Self: Sized,
    {
        self.hook(Phase::PreWrite, selector, Arc::new(handler));
    }

    fn post_write<F>(&mut self, selector: Regex, handler: F)
    where
        F: Fn(&mut File) -> Result<(), MiddlewareError> + Send + Sync + 'static,
        Self: Sized,
    {
        self.hook(Phase::PostWrite, selector, Arc::new(handler));
    }
}

struct Route {
    phase: Phase,
    selector: Regex,
    handler: Handler,
}

/// Reference host: runs matching handlers in registration order and
/// records the phase on the file once any handler ran.
#[derive(Default)]
pub struct Pipeline {
    routes: Vec<Route>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every handler registered for `phase` whose selector matches
    /// the file's path. Stops at the first handler error.
    pub fn handle(&self, phase: Phase, file: &mut File) -> Result<(), MiddlewareError> {
        let mut ran = false;
        for route in &self.routes {
            if route.phase != phase || !route.selector.is_match(&file.path) {
                continue;
            }
            tracing::trace!(phase = %phase, path = %file.path, "running handler");
            ran = true;
            (route.handler)(file)?;
        }
        if ran {
            file.handled.push(phase);
        }
        Ok(())
    }
}

impl HookRegistry for Pipeline {
    fn hook(&mut self, phase: Phase, selector: Regex, handler: Handler) {
        self.routes.push(Route {
            phase,
            selector,
            handler,
        });
    }
}
