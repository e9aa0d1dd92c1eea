use crate::config::{bind_store, BrokerConfig};
use crate::dispatch::Resource;
use crate::error::HandlerError;
use crate::policy::{NamespacePolicy, SelfNamespace};
use crate::request::{Body, Request, Response};
use coffer_core::{validate_simple_secret, Key, KvStore, StoreError, KEY_PREFIX};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resource implementing GET (fetch-or-list) and PUT (create) over the store.
///
/// Authorization happens before any store access: the namespace check in
/// [`Self::key_for`] runs first on every path, so an unauthorized caller can
/// never probe container existence in someone else's namespace.
pub struct Secrets {
    store: Arc<dyn KvStore>,
    policy: Arc<dyn NamespacePolicy>,
}

impl Secrets {
    /// Build the resource against an explicit store handle, with the default
    /// one-namespace-per-caller policy.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_policy(store, Arc::new(SelfNamespace))
    }

    pub fn with_policy(store: Arc<dyn KvStore>, policy: Arc<dyn NamespacePolicy>) -> Self {
        Self { store, policy }
    }

    /// Build the resource from configuration, binding the named store.
    pub fn from_config(config: &BrokerConfig) -> anyhow::Result<Self> {
        Ok(Self::new(bind_store(config)?))
    }

    fn namespaces(&self, request: &Request) -> Result<Vec<String>, HandlerError> {
        let Some(remote_user) = request.remote_user.as_deref() else {
            return Err(HandlerError::Forbidden);
        };
        Ok(self.policy.namespaces(remote_user))
    }

    fn key_for(&self, namespaces: &[String], trail: &[String]) -> Result<Key, HandlerError> {
        let Some(first) = trail.first() else {
            return Err(HandlerError::Forbidden);
        };
        if !namespaces.iter().any(|ns| ns == first) {
            return Err(HandlerError::Forbidden);
        }
        Key::from_trail(trail).map_err(|err| HandlerError::Validation(err.to_string()))
    }

    fn filter_for(
        &self,
        namespaces: &[String],
        trail: &[String],
        user_filter: &str,
    ) -> Result<String, HandlerError> {
        let key = match trail.first() {
            Some(first) => {
                // Only the default namespace may anchor a listing.
                if namespaces.first().is_none_or(|ns| ns != first) {
                    return Err(HandlerError::Forbidden);
                }
                self.key_for(namespaces, trail)?
            }
            None => {
                let root = namespaces.first().cloned().ok_or(HandlerError::Forbidden)?;
                self.key_for(namespaces, &[root])?
            }
        };
        Ok(format!("{key}/{user_filter}"))
    }

    fn list(&self, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let namespaces = self.namespaces(request)?;
        let user_filter = request
            .query
            .get("filter")
            .map(String::as_str)
            .unwrap_or("");
        let scope = &request.trail[..request.trail.len().saturating_sub(1)];
        let key_filter = self.filter_for(&namespaces, scope, user_filter)?;

        let listing = match self.store.list(&key_filter) {
            Ok(Some(listing)) => listing,
            Ok(None) => return Err(HandlerError::NotFound),
            // A backend fault during listing is indistinguishable from a
            // missing container at this surface.
            Err(err) => {
                warn!(filter = %key_filter, %err, "listing failed");
                return Err(HandlerError::NotFound);
            }
        };

        let mut output = BTreeMap::new();
        for (key, value) in listing {
            let name = key
                .strip_prefix(KEY_PREFIX)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(&key)
                .to_string();
            // Containers themselves are not listed, only keys.
            if name.ends_with('/') {
                continue;
            }
            let parsed = if value.is_empty() {
                Value::String(String::new())
            } else {
                serde_json::from_str(&value)
                    .map_err(|_| StoreError::new("stored secret is not valid JSON"))?
            };
            output.insert(name, parsed);
        }
        debug!(filter = %key_filter, keys = output.len(), "listed container");
        let body =
            serde_json::to_string(&output).map_err(|err| StoreError::new(err.to_string()))?;
        response.set_output(body);
        Ok(())
    }

    fn fetch(&self, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let namespaces = self.namespaces(request)?;
        let key = self.key_for(&namespaces, &request.trail)?;
        match self.store.get(&key) {
            Ok(Some(value)) => {
                // The stored string goes out verbatim, never re-serialized.
                response.set_output(value);
                Ok(())
            }
            Ok(None) => Err(HandlerError::NotFound),
            Err(err) => Err(HandlerError::Backend(err)),
        }
    }

    fn create(&self, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let trail = &request.trail;
        let namespaces = self.namespaces(request)?;
        if trail.last().is_none_or(String::is_empty) {
            return Err(HandlerError::MethodNotAllowed);
        }

        let content_type = request
            .headers
            .get("Content-Type")
            .map(String::as_str)
            .unwrap_or("");
        if content_type.split(';').next().unwrap_or("").trim() != "application/json" {
            return Err(HandlerError::Validation("Invalid Content-Type".to_string()));
        }
        let body = request
            .body
            .as_deref()
            .ok_or_else(|| HandlerError::Validation("Missing request body".to_string()))?;
        let value = std::str::from_utf8(body)
            .map_err(|_| HandlerError::Validation("Payload is not valid UTF-8".to_string()))?;
        validate_simple_secret(body).map_err(|err| HandlerError::Validation(err.to_string()))?;

        // Derive the key before any store access: the namespace check lives
        // there, and unauthorized callers must learn nothing about container
        // existence.
        let key = self.key_for(&namespaces, trail)?;

        self.check_containers(&namespaces, trail)?;
        self.store.set(&key, value)?;
        debug!(%key, "stored secret");
        response.status = 201;
        Ok(())
    }

    /// Enforce the container precondition for a write at `trail`.
    ///
    /// Walks the proper prefixes of the trail in order and stops at the first
    /// level whose container marker is absent or errors. A missing root is
    /// lazily created when it names the caller's own default namespace; any
    /// deeper missing ancestor is a 404. A top-level key has no ancestors to
    /// probe and is always eligible for a direct write once authorized.
    fn check_containers(
        &self,
        namespaces: &[String],
        trail: &[String],
    ) -> Result<(), HandlerError> {
        let mut missing: Option<(usize, Key)> = None;
        for depth in 1..trail.len() {
            let mut probe_trail = trail[..depth].to_vec();
            probe_trail.push(String::new());
            let probe = self.key_for(namespaces, &probe_trail)?;
            match self.store.get(&probe) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    missing = Some((depth, probe));
                    break;
                }
                Err(err) => {
                    warn!(probe = %probe, %err, "container probe failed");
                    missing = Some((depth, probe));
                    break;
                }
            }
        }
        match missing {
            None => Ok(()),
            Some((1, probe)) if namespaces.first() == trail.first() => {
                self.store.set(&probe, "")?;
                debug!(container = %probe, "created root container");
                Ok(())
            }
            Some(_) => Err(HandlerError::NotFound),
        }
    }
}

impl Resource for Secrets {
    /// Fetch a single secret, or list a container when the trail is empty or
    /// ends in an empty segment.
    fn get(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<Option<Body>, HandlerError> {
        let list_mode =
            request.trail.is_empty() || request.trail.last().is_some_and(String::is_empty);
        if list_mode {
            self.list(request, response)?;
        } else {
            self.fetch(request, response)?;
        }
        Ok(None)
    }

    /// Create (or overwrite) a secret at the trail.
    fn put(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<Option<Body>, HandlerError> {
        self.create(request, response)?;
        Ok(None)
    }
}
