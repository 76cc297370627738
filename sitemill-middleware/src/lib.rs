//! Sitemill Middleware
//!
//! Common file middleware for a template build pipeline:
//! - front-matter parsing into `file.data`
//! - delimiter escaping so nested template expressions survive a render
//!   pass (`{%%= foo %}` / `<%%= foo %>` syntax)
//! - a lazily-parsed JSON view of `.json` files, re-serialized at write
//!   time, with optional config-data merging into a shared cache
//!
//! Construct a [`Middleware`] from validated [`MiddlewareOptions`], then
//! wire it into any host implementing
//! [`HookRegistry`](sitemill_pipeline::HookRegistry):
//!
//! ```
//! use sitemill_middleware::{Middleware, MiddlewareOptions};
//! use sitemill_pipeline::Pipeline;
//!
//! let middleware = Middleware::new(MiddlewareOptions::new()).unwrap();
//! let mut pipeline = Pipeline::new();
//! middleware.register(&mut pipeline);
//! ```

pub mod escape;
pub mod json_view;
pub mod matter;

pub use escape::{escape, unescape};

use regex::Regex;
use sitemill_core::{File, MiddlewareError, Phase, SharedData};
use sitemill_pipeline::HookRegistry;

/// Default selector for files that get the JSON view.
pub const DEFAULT_JSON_PATTERN: &str = r"\.(json|jshintrc)$";

/// Default selector for files that get front-matter parsing, and for
/// delimiter escaping unless overridden.
pub const DEFAULT_EXT_PATTERN: &str = r"\.(md|tmpl)$";

/// Plugin-construction-time options.
#[derive(Debug, Clone)]
pub struct MiddlewareOptions {
    /// Selector for files that get the JSON view.
    pub json_pattern: String,
    /// Selector for files that get front-matter parsing.
    pub ext_pattern: String,
    /// Selector for files that get delimiter escaping; defaults to
    /// `ext_pattern` when unset.
    pub escape_pattern: Option<String>,
    /// Key looked up inside parsed JSON for shared config-data merging;
    /// merging is disabled when unset.
    pub config_name: Option<String>,
    /// Phase the unescape pass runs at: `PostRender` (default) restores
    /// delimiters in the rendered output, `PreWrite` defers to just
    /// before the file is written back.
    pub unescape_phase: Phase,
}

impl Default for MiddlewareOptions {
    fn default() -> Self {
        Self {
            json_pattern: DEFAULT_JSON_PATTERN.to_string(),
            ext_pattern: DEFAULT_EXT_PATTERN.to_string(),
            escape_pattern: None,
            config_name: None,
            unescape_phase: Phase::PostRender,
        }
    }
}

impl MiddlewareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.json_pattern = pattern.into();
        self
    }

    pub fn with_ext_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ext_pattern = pattern.into();
        self
    }

    pub fn with_escape_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.escape_pattern = Some(pattern.into());
        self
    }

    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    pub fn with_unescape_phase(mut self, phase: Phase) -> Self {
        self.unescape_phase = phase;
        self
    }
}

/// The middleware plugin. Selectors are compiled and validated up front;
/// a bad pattern or unsupported phase is a construction-time error, not
/// a silent skip at registration time.
pub struct Middleware {
    json_selector: Regex,
    ext_selector: Regex,
    escape_selector: Regex,
    config_name: Option<String>,
    unescape_phase: Phase,
    shared: SharedData,
}

impl Middleware {
    pub fn new(options: MiddlewareOptions) -> Result<Self, MiddlewareError> {
        let json_selector = compile("jsonRegex", &options.json_pattern)?;
        let ext_selector = compile("extRegex", &options.ext_pattern)?;
        let escape_selector = match &options.escape_pattern {
            Some(pattern) => compile("escapeRegex", pattern)?,
            None => ext_selector.clone(),
        };
        match options.unescape_phase {
            Phase::PostRender | Phase::PreWrite => {}
            other => return Err(MiddlewareError::UnescapePhase(other)),
        }
        Ok(Self {
            json_selector,
            ext_selector,
            escape_selector,
            config_name: options.config_name,
            unescape_phase: options.unescape_phase,
            shared: SharedData::new(),
        })
    }

    /// Builder: share a data cache with other middleware or an embedder,
    /// instead of the private one created by [`Middleware::new`].
    pub fn with_shared(mut self, shared: SharedData) -> Self {
        self.shared = shared;
        self
    }

    /// The shared data cache config-data merges land in.
    pub fn shared(&self) -> &SharedData {
        &self.shared
    }

    /// Wire all handlers into `registry`.
    pub fn register<R: HookRegistry>(&self, registry: &mut R) {
        registry.on_load(self.ext_selector.clone(), matter::parse);

        registry.on_load(self.escape_selector.clone(), |file: &mut File| {
            file.content = escape(&file.content);
            Ok(())
        });

        let shared = self.shared.clone();
        let config_name = self.config_name.clone();
        registry.on_load(self.json_selector.clone(), move |file: &mut File| {
            json_view::install(file, &shared, config_name.as_deref())
        });

        let unescape_handler = |file: &mut File| {
            file.content = unescape(&file.content);
            Ok(())
        };
        match self.unescape_phase {
            Phase::PreWrite => registry.pre_write(self.escape_selector.clone(), unescape_handler),
            _ => registry.post_render(self.escape_selector.clone(), unescape_handler),
        }

        registry.pre_write(self.json_selector.clone(), json_view::flush);
    }
}

fn compile(option: &'static str, pattern: &str) -> Result<Regex, MiddlewareError> {
    Regex::new(pattern).map_err(|source| MiddlewareError::Pattern { option, source })
}
