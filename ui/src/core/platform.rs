//! Host environment detection and the timing profile derived from it.
//!
//! The overlay runs either in a regular browser (userscript manager) or
//! inside the embedded app webview, whose DOM becomes interactive later
//! than its attach events suggest. Detection happens once; everything
//! environment-specific reads the resulting [`HostProfile`].

use std::future::Future;

/// User-agent marker of the embedded app webview.
pub const EMBEDDED_USER_AGENT_MARKER: &str = "com.manuito.tornpda";

/// Globals injected by the embedded app's webview bridge.
pub const EMBEDDED_BRIDGE_GLOBALS: [&str; 3] = [
    "flutter_inappwebview",
    "__PDA_platformReadyPromise",
    "PDA_httpGet",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEnvironment {
    Browser,
    EmbeddedHost,
}

impl HostEnvironment {
    /// Pure detection from a user agent and a global lookup.
    pub fn classify(user_agent: &str, has_global: impl Fn(&str) -> bool) -> Self {
        if user_agent.contains(EMBEDDED_USER_AGENT_MARKER)
            || EMBEDDED_BRIDGE_GLOBALS.iter().any(|name| has_global(name))
        {
            HostEnvironment::EmbeddedHost
        } else {
            HostEnvironment::Browser
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        use wasm_bindgen::JsValue;

        let Some(window) = web_sys::window() else {
            return HostEnvironment::Browser;
        };
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        Self::classify(&user_agent, |name| {
            js_sys::Reflect::get(&window, &JsValue::from_str(name))
                .map(|value| value.is_truthy())
                .unwrap_or(false)
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        HostEnvironment::Browser
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostEnvironment::Browser => "browser",
            HostEnvironment::EmbeddedHost => "embedded",
        }
    }
}

/// Resolved timing and persistence policy for the current host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    pub environment: HostEnvironment,
    /// Delay between readiness checks while waiting to attach.
    pub poll_interval_ms: u64,
    /// Give up attaching after this long.
    pub attach_timeout_ms: u64,
    /// Besides the anchor, also wait for a stat container to render.
    pub wait_for_data: bool,
    /// Pause between inserting the panel and the first stats read.
    pub settle_delay_ms: u64,
    pub refresh_interval_ms: u64,
    pub persists_collapse_state: bool,
}

impl HostProfile {
    pub const POLL_INTERVAL_MS: u64 = 100;
    pub const REFRESH_INTERVAL_MS: u64 = 5_000;

    pub fn for_environment(environment: HostEnvironment) -> Self {
        match environment {
            HostEnvironment::Browser => Self {
                environment,
                poll_interval_ms: Self::POLL_INTERVAL_MS,
                attach_timeout_ms: 5_000,
                wait_for_data: true,
                settle_delay_ms: 0,
                refresh_interval_ms: Self::REFRESH_INTERVAL_MS,
                persists_collapse_state: true,
            },
            HostEnvironment::EmbeddedHost => Self {
                environment,
                poll_interval_ms: Self::POLL_INTERVAL_MS,
                attach_timeout_ms: 15_000,
                wait_for_data: false,
                settle_delay_ms: 2_000,
                refresh_interval_ms: Self::REFRESH_INTERVAL_MS,
                persists_collapse_state: false,
            },
        }
    }

    pub fn detect() -> Self {
        Self::for_environment(HostEnvironment::detect())
    }
}

/// Run a future to completion in the background.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Native builds drive the future on the calling thread with a
/// single-threaded runtime, which keeps `timing::sleep_ms` working.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => tracing::error!("failed to start runtime: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_browser_is_not_embedded() {
        let env = HostEnvironment::classify("Mozilla/5.0 (X11; Linux x86_64)", |_| false);
        assert_eq!(env, HostEnvironment::Browser);
    }

    #[test]
    fn user_agent_marker_selects_embedded() {
        let env = HostEnvironment::classify("Mozilla/5.0 com.manuito.tornpda", |_| false);
        assert_eq!(env, HostEnvironment::EmbeddedHost);
    }

    #[test]
    fn bridge_global_selects_embedded() {
        let env = HostEnvironment::classify("Mozilla/5.0", |name| name == "PDA_httpGet");
        assert_eq!(env, HostEnvironment::EmbeddedHost);
    }

    #[test]
    fn profiles_match_host_timing() {
        let browser = HostProfile::for_environment(HostEnvironment::Browser);
        assert_eq!(browser.attach_timeout_ms, 5_000);
        assert!(browser.wait_for_data);
        assert_eq!(browser.settle_delay_ms, 0);
        assert!(browser.persists_collapse_state);

        let embedded = HostProfile::for_environment(HostEnvironment::EmbeddedHost);
        assert_eq!(embedded.attach_timeout_ms, 15_000);
        assert!(!embedded.wait_for_data);
        assert_eq!(embedded.settle_delay_ms, 2_000);
        assert!(!embedded.persists_collapse_state);
        assert_eq!(embedded.poll_interval_ms, 100);
        assert_eq!(embedded.refresh_interval_ms, 5_000);
    }
}
