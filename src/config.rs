//! Build-time configuration for the doork API endpoint and token storage key,
//! with an optional runtime override. The runtime config is read from
//! `window.DOORK_CONFIG` (if present) so static deployments can change
//! endpoints without rebuilding. Configuration values are public; do not
//! store secrets here.

/// Storage key used for the bearer token when no override is configured.
pub const DEFAULT_STORAGE_KEY: &str = "__Secure-doork.access_token";

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub api_base_url: String,
    pub storage_key: String,
}

impl AuthConfig {
    /// Builds a config with an explicit API base URL and the default
    /// storage key.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Overrides the token storage key so multiple deployments can coexist
    /// in the same storage origin.
    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Loads config from build-time environment variables and applies
    /// runtime overrides.
    pub fn load() -> Self {
        let api_base_url = option_env!("DOORK_API_BASE_URL").unwrap_or("");
        let storage_key = option_env!("DOORK_STORAGE_KEY").unwrap_or(DEFAULT_STORAGE_KEY);

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            storage_key: storage_key.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    storage_key: Option<String>,
}

fn apply_runtime_overrides(config: &mut AuthConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.storage_key {
        config.storage_key = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("DOORK_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        storage_key: read_runtime_value(&object, "storage_key"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
