//! The resolution engine and per-hostname pipeline.

use crate::base::ResolveError;
use crate::fetch::Fetch;
use crate::resolver::config::ResolverConfig;
use crate::rules::RuleTable;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Deserialize;
use std::sync::{Arc, RwLock};

/// The shared outcome of one hostname's resolution pipeline.
///
/// Clonable and infallible: every clone settles with the same target, and
/// the target is always usable (an override IP, a discovered IP, or the
/// original hostname).
pub type Resolution = Shared<BoxFuture<'static, String>>;

/// Expected body of the fallback lookup response. Only the first entry of
/// `ips` is consulted; a missing `ips` field is a parse failure.
#[derive(Deserialize)]
struct LookupResponse {
    ips: Vec<String>,
}

/// Probe-then-fallback hostname resolver.
///
/// Owns the static rule table and the pending-resolution cache. One
/// instance serves the whole process; all methods take `&self` and the
/// engine is `Send + Sync`.
///
/// # Resolution precedence
///
/// Static rules beat cached results beat the live probe beats the fallback
/// lookup. See the [module docs](crate::resolver) for the pipeline detail.
pub struct HostResolver {
    fetch: Arc<dyn Fetch>,
    rules: Arc<RuleTable>,
    pending: Arc<DashMap<String, Resolution>>,
    config: RwLock<Option<ResolverConfig>>,
}

impl HostResolver {
    /// Creates an engine with an empty rule table.
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self::with_rules(fetch, RuleTable::new())
    }

    /// Creates an engine seeded with static override rules.
    pub fn with_rules(fetch: Arc<dyn Fetch>, rules: RuleTable) -> Self {
        Self {
            fetch,
            rules: Arc::new(rules),
            pending: Arc::new(DashMap::new()),
            config: RwLock::new(None),
        }
    }

    /// Installs the configuration.
    ///
    /// Must be called before [`resolve`](Self::resolve) or
    /// [`resolve_all`](Self::resolve_all). Calling it again replaces the
    /// stored configuration; pipelines already started keep the timeout they
    /// captured and are not canceled.
    pub fn configure(&self, config: ResolverConfig) {
        let mut slot = self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(config);
    }

    /// The static rule table, including mappings discovered by fallback
    /// lookups.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Begins (or joins) the resolution pipeline for `hostname`.
    ///
    /// Returns a shared future settling with the hostname's target. The
    /// pipeline is registered in the pending cache before this function
    /// returns, so every caller — including callers in the same synchronous
    /// turn — shares one pipeline per hostname and no duplicate probe or
    /// fallback request is ever issued.
    ///
    /// The returned future never fails; the only error here is calling
    /// before [`configure`](Self::configure).
    pub fn resolve(&self, hostname: &str) -> Result<Resolution, ResolveError> {
        let config = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(ResolveError::NotConfigured)?;

        let resolution = self
            .pending
            .entry(hostname.to_string())
            .or_insert_with(|| {
                Self::pipeline(
                    hostname.to_string(),
                    config,
                    Arc::clone(&self.fetch),
                    Arc::clone(&self.rules),
                    Arc::clone(&self.pending),
                )
            })
            .clone();
        Ok(resolution)
    }

    /// Returns the cached target for `hostname`, or the hostname unchanged.
    ///
    /// Reflects static rules and mappings already discovered by fallback
    /// lookups; never performs network activity.
    pub fn resolve_sync(&self, hostname: &str) -> String {
        self.rules
            .get(hostname)
            .unwrap_or_else(|| hostname.to_string())
    }

    /// Resolves every configured hostname concurrently.
    ///
    /// Returns `(hostname, target)` pairs in the configured order once all
    /// pipelines settle. Individual resolutions never fail, so the list is
    /// always complete; the only error is calling before
    /// [`configure`](Self::configure).
    pub async fn resolve_all(&self) -> Result<Vec<(String, String)>, ResolveError> {
        let hostnames = {
            let slot = self
                .config
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.as_ref()
                .ok_or(ResolveError::NotConfigured)?
                .hostnames()
                .to_vec()
        };

        let resolutions = hostnames
            .iter()
            .map(|host| self.resolve(host))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = futures::future::join_all(resolutions).await;
        Ok(hostnames.into_iter().zip(targets).collect())
    }

    /// Builds the single-attempt pipeline future for one hostname.
    fn pipeline(
        hostname: String,
        config: ResolverConfig,
        fetch: Arc<dyn Fetch>,
        rules: Arc<RuleTable>,
        pending: Arc<DashMap<String, Resolution>>,
    ) -> Resolution {
        let future = async move {
            // Static lookup: an override wins outright, no probe.
            if let Some(target) = rules.get(&hostname) {
                tracing::debug!(host = %hostname, target = %target, "static rule hit");
                return target;
            }

            // Probe the hostname under its own name, racing the timeout.
            let probe = fetch.probe(&format!("https://{hostname}"));
            let timer = tokio::time::sleep(config.timeout());
            tokio::pin!(timer);

            let reachable = tokio::select! {
                outcome = probe => match outcome {
                    Ok(signal) => {
                        tracing::debug!(host = %hostname, ?signal, "probe answered");
                        true
                    }
                    Err(error) => {
                        // A probe error only rules out the direct path; the
                        // timer stays authoritative for when the fallback
                        // stage may begin.
                        tracing::debug!(host = %hostname, %error, "probe failed");
                        timer.await;
                        false
                    }
                },
                () = &mut timer => {
                    tracing::debug!(host = %hostname, "probe timed out");
                    false
                }
            };

            if reachable {
                return hostname;
            }

            // Fallback lookup. No timeout applies here; failures degrade to
            // the original hostname and clear the pending entry so the next
            // call retries the whole pipeline.
            let request = config.lookup_request(&hostname);
            tracing::debug!(host = %hostname, url = %request.url, "falling back to lookup");
            match fetch.fetch(request).await {
                Ok(body) => match serde_json::from_slice::<LookupResponse>(&body) {
                    Ok(lookup) => {
                        match lookup.ips.into_iter().next().filter(|ip| !ip.is_empty()) {
                            Some(ip) => {
                                tracing::debug!(host = %hostname, ip = %ip, "mapping discovered");
                                rules.insert(hostname.clone(), ip.clone());
                                ip
                            }
                            None => {
                                tracing::debug!(host = %hostname, "lookup returned no addresses");
                                hostname
                            }
                        }
                    }
                    Err(error) => {
                        tracing::debug!(host = %hostname, %error, "lookup body unparseable");
                        pending.remove(&hostname);
                        hostname
                    }
                },
                Err(error) => {
                    tracing::debug!(host = %hostname, %error, "lookup request failed");
                    pending.remove(&hostname);
                    hostname
                }
            }
        };

        future.boxed().shared()
    }
}

impl std::fmt::Debug for HostResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostResolver")
            .field("rules", &self.rules.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{Fetching, ProbeSignal, Probing, RequestDescriptor};

    struct ReachableFetch;

    impl Fetch for ReachableFetch {
        fn probe(&self, _url: &str) -> Probing {
            Box::pin(std::future::ready(Ok(ProbeSignal::Response)))
        }

        fn fetch(&self, _request: RequestDescriptor) -> Fetching {
            Box::pin(std::future::ready(Ok(bytes::Bytes::from_static(
                b"{\"ips\":[]}",
            ))))
        }
    }

    fn test_config() -> ResolverConfig {
        ResolverConfig::new(
            vec!["a.com".into()],
            Arc::new(|host| RequestDescriptor::get(format!("https://dns.example/{host}"))),
        )
    }

    #[test]
    fn test_resolve_before_configure_fails() {
        let engine = HostResolver::new(Arc::new(ReachableFetch));
        assert_eq!(
            engine.resolve("a.com").unwrap_err(),
            ResolveError::NotConfigured
        );
    }

    #[tokio::test]
    async fn test_resolve_all_before_configure_fails() {
        let engine = HostResolver::new(Arc::new(ReachableFetch));
        assert_eq!(
            engine.resolve_all().await.unwrap_err(),
            ResolveError::NotConfigured
        );
    }

    #[test]
    fn test_resolve_sync_without_configuration() {
        // resolve_sync consults only the rule table; it works unconfigured.
        let engine = HostResolver::with_rules(
            Arc::new(ReachableFetch),
            RuleTable::parse("MAP a.com 9.9.9.9"),
        );
        assert_eq!(engine.resolve_sync("a.com"), "9.9.9.9");
        assert_eq!(engine.resolve_sync("b.com"), "b.com");
    }

    #[tokio::test]
    async fn test_reconfigure_replaces_config() {
        let engine = HostResolver::new(Arc::new(ReachableFetch));
        engine.configure(test_config());
        engine.configure(test_config().with_timeout_ms(50));

        let target = engine.resolve("a.com").unwrap().await;
        assert_eq!(target, "a.com");
    }
}
