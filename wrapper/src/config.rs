use crate::error::WrapperError;
use serde::Deserialize;

/// Storage key read by [`WrapperConfig::load`].
pub const CONFIG_KEY: &str = "game_wrapper_config";

/// Copy shown on the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverlayText {
    pub loading: String,
    /// Title used when the game has no name.
    pub generic_title: String,
    pub start_hint: String,
    pub retry_hint: String,
    pub game_over: String,
    pub unavailable: String,
}

impl Default for OverlayText {
    fn default() -> Self {
        OverlayText {
            loading: "로딩중...".to_owned(),
            generic_title: "게임".to_owned(),
            start_hint: "터치하여 시작".to_owned(),
            retry_hint: "터치하여 다시 시도".to_owned(),
            game_over: "Game Over".to_owned(),
            unavailable: "게임을 불러올 수 없습니다".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Property of `window` polled for a published game.
    pub global_slot: String,
    /// Frames to poll before giving up. `None`, the default, polls until a game shows up.
    pub max_frames: Option<u32>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            global_slot: "GAME".to_owned(),
            max_frames: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub group_digits: bool,
}

/// Which log endpoints print their lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub general: bool,
    pub discovery: bool,
    pub lifecycle: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            general: true,
            discovery: true,
            lifecycle: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrapperConfig {
    pub text: OverlayText,
    pub discovery: DiscoveryConfig,
    pub score: ScoreConfig,
    pub log: LogConfig,
}

impl WrapperConfig {
    /// Parses a configuration document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, WrapperError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stored configuration under [`CONFIG_KEY`], or the defaults.
    pub fn load() -> Self {
        get_value(CONFIG_KEY).unwrap_or_default()
    }
}

/// Gets a global configuration value. Uses local storage on web and "data/config.json" on native.
///
/// Missing storage, a missing key and malformed values all read as `None`.
pub fn get_value<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let value = storage.get_item(key).ok()??;
        serde_json::from_str(&value).ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let file = std::fs::File::open("data/config.json").ok()?;
        let document: serde_json::Value = serde_json::from_reader(file).ok()?;
        serde_json::from_value(document.get(key)?.clone()).ok()
    }
}

#[test]
fn test_partial_config() {
    let config = WrapperConfig::from_json(
        r#"{ "text": { "start_hint": "Tap to start" }, "discovery": { "max_frames": null } }"#,
    )
    .unwrap();
    assert_eq!(config.text.start_hint, "Tap to start");
    assert_eq!(config.text.retry_hint, OverlayText::default().retry_hint);
    assert_eq!(config.discovery.max_frames, None);
    assert_eq!(config.discovery.global_slot, "GAME");
    assert!(!config.score.group_digits);
}

#[test]
fn test_discovery_unbounded_by_default() {
    assert_eq!(DiscoveryConfig::default().max_frames, None);
    let config = WrapperConfig::from_json(r#"{ "discovery": { "max_frames": 600 } }"#).unwrap();
    assert_eq!(config.discovery.max_frames, Some(600));
}

#[test]
fn test_empty_config() {
    assert_eq!(WrapperConfig::from_json("{}").unwrap(), WrapperConfig::default());
}

#[test]
fn test_bad_config() {
    let err = WrapperConfig::from_json(r#"{ "score": { "group_digits": "yes" } }"#).unwrap_err();
    assert!(matches!(err, WrapperError::Config(_)));
}
