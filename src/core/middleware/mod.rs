//! Action dispatch pipeline and the asset-enrichment middleware.
//!
//! Each middleware receives the action plus a [`Next`] handle for the rest of the chain,
//! and decides whether to rewrite the action before forwarding it. The action that comes
//! out of the end of the chain is returned from [`Pipeline::dispatch`].

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::config::SiteConfig;
use crate::core::release::{self, Asset, Release};

/// Action type announcing a newly published release.
pub const ADD_RELEASE: &str = "ADD_RELEASE";

/// A message flowing through the pipeline, tagged with its type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// An `ADD_RELEASE` action carrying `release` as its payload.
    pub fn add_release(release: Value) -> Self {
        Self::new(ADD_RELEASE, release)
    }
}

/// Read-only state visible to every middleware during a dispatch.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    pub config: &'a SiteConfig,
}

/// Errors raised while an action travels through the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The payload of a release action is not a release with an `assets` list.
    #[error("{kind} payload is not a release: {source}")]
    MalformedRelease {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode enriched release: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Interception handler composed into a [`Pipeline`].
pub trait Middleware: Send + Sync {
    fn handle(
        &self,
        ctx: &Context<'_>,
        action: Action,
        next: Next<'_>,
    ) -> Result<Action, DispatchError>;
}

/// The remainder of the chain after the current middleware.
pub struct Next<'a> {
    rest: &'a [Box<dyn Middleware>],
    ctx: &'a Context<'a>,
}

impl Next<'_> {
    /// Forward `action` to the following middleware, or return it if the chain is done.
    pub fn run(self, action: Action) -> Result<Action, DispatchError> {
        match self.rest.split_first() {
            Some((head, rest)) => head.handle(self.ctx, action, Next { rest, ctx: self.ctx }),
            None => Ok(action),
        }
    }
}

/// Middleware backed by a plain function or closure. See [`from_fn`].
pub struct FromFn<F>(F);

impl<F> Middleware for FromFn<F>
where
    F: Fn(&Context<'_>, Action, Next<'_>) -> Result<Action, DispatchError> + Send + Sync,
{
    fn handle(
        &self,
        ctx: &Context<'_>,
        action: Action,
        next: Next<'_>,
    ) -> Result<Action, DispatchError> {
        (self.0)(ctx, action, next)
    }
}

/// Wrap a closure as a middleware.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Context<'_>, Action, Next<'_>) -> Result<Action, DispatchError> + Send + Sync,
{
    FromFn(f)
}

/// Ordered middleware chain. Holds no state between dispatches.
#[derive(Default)]
pub struct Pipeline {
    chain: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The landing page pipeline: action logging, then asset enrichment.
    pub fn landr() -> Self {
        Self::new().with(from_fn(log_action)).with(EnrichAssets)
    }

    /// Append a middleware to the end of the chain.
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.chain.push(Box::new(middleware));
        self
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Run `action` through every middleware in order.
    pub fn dispatch(&self, ctx: &Context<'_>, action: Action) -> Result<Action, DispatchError> {
        Next {
            rest: &self.chain,
            ctx,
        }
        .run(action)
    }
}

fn log_action(ctx: &Context<'_>, action: Action, next: Next<'_>) -> Result<Action, DispatchError> {
    log::info!("{} dispatched ({})", action.kind, ctx.config.theme);
    next.run(action)
}

/// Labels every asset of an `ADD_RELEASE` payload with `prettyName`, `arch`, and `os`.
/// Other actions are forwarded untouched.
pub struct EnrichAssets;

impl Middleware for EnrichAssets {
    fn handle(
        &self,
        _ctx: &Context<'_>,
        action: Action,
        next: Next<'_>,
    ) -> Result<Action, DispatchError> {
        if action.kind != ADD_RELEASE {
            return next.run(action);
        }

        let Action { kind, payload } = action;
        let raw: Release<Asset> = serde_json::from_value(payload).map_err(|source| {
            DispatchError::MalformedRelease {
                kind: kind.clone(),
                source,
            }
        })?;
        let enriched = release::enrich_release(raw);
        log::debug!(
            "Enriched {} asset(s) of release {}",
            enriched.assets.len(),
            enriched.tag().unwrap_or("<untagged>")
        );
        let payload = serde_json::to_value(&enriched).map_err(DispatchError::Encode)?;
        next.run(Action { kind, payload })
    }
}
