use crate::cli_args::Cli;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MAX_TOKENS: usize = 16_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TOKEN_INCREMENT: usize = 2_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Knobs the generator reads on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    /// Hard cap for the request ceiling.
    pub max_tokens: usize,
    pub temperature: f32,
    /// Headroom added to the request size before capping at `max_tokens`.
    pub token_increment: usize,
    pub emoji: bool,
    pub stream: bool,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            token_increment: DEFAULT_TOKEN_INCREMENT,
            emoji: false,
            stream: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Final resolved configuration for diffscribe.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub generation: GenerationSettings,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence per field:
    ///   1. CLI flags (`--model`, `--max-tokens`, ...)
    ///   2. Env vars (`DIFFSCRIBE_MODEL`, `OPENAI_API_KEY`, ...)
    ///   3. TOML `~/.config/diffscribe.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Result<Self> {
        let file_cfg = load_file_config()?.unwrap_or_default();
        resolve(cli, |name| env::var(name).ok(), file_cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
    pub token_increment: Option<usize>,
    pub emoji: Option<bool>,
    pub stream: Option<bool>,
    pub timeout_secs: Option<u64>,
}

fn resolve<E>(cli: &Cli, env: E, file: FileConfig) -> Result<Config>
where
    E: Fn(&str) -> Option<String>,
{
    let model = cli
        .model
        .clone()
        .or(env("DIFFSCRIBE_MODEL"))
        .or(file.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let api_key = cli
        .api_key
        .clone()
        .or(env("OPENAI_API_KEY"))
        .or(file.api_key)
        .ok_or_else(|| {
            anyhow!("OPENAI_API_KEY must be set via env var, --api-key, or the config file")
        })?;

    let api_base_url = cli
        .api_base_url
        .clone()
        .or(env("DIFFSCRIBE_API_BASE_URL"))
        .or(file.api_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let max_tokens = cli_or_env(cli.max_tokens, &env, "DIFFSCRIBE_MAX_TOKENS")?
        .or(file.max_tokens)
        .unwrap_or(DEFAULT_MAX_TOKENS);

    let temperature = cli_or_env(cli.temperature, &env, "DIFFSCRIBE_TEMPERATURE")?
        .or(file.temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);

    let token_increment = cli_or_env(cli.token_increment, &env, "DIFFSCRIBE_TOKEN_INCREMENT")?
        .or(file.token_increment)
        .unwrap_or(DEFAULT_TOKEN_INCREMENT);

    let emoji = if cli.emoji {
        true
    } else {
        env_parse(&env, "DIFFSCRIBE_EMOJI")?
            .or(file.emoji)
            .unwrap_or(false)
    };

    let stream = !cli.no_stream && file.stream.unwrap_or(true);

    let timeout_secs = cli
        .timeout
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Config {
        api_key,
        api_base_url,
        generation: GenerationSettings {
            model,
            max_tokens,
            temperature,
            token_increment,
            emoji,
            stream,
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}

fn env_parse<E, T>(env: &E, name: &str) -> Result<Option<T>>
where
    E: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match env(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("invalid value {raw:?} for {name}: {e}")),
    }
}

/// The CLI value if given; the env var is only parsed otherwise.
fn cli_or_env<E, T>(cli_value: Option<T>, env: &E, name: &str) -> Result<Option<T>>
where
    E: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match cli_value {
        Some(v) => Ok(Some(v)),
        None => env_parse(env, name),
    }
}

/// Return `~/.config/diffscribe.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("diffscribe.toml"))
}

fn load_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let cfg = toml::from_str::<FileConfig>(&data)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("diffscribe").chain(args.iter().copied()))
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = resolve(&cli(&["--api-key", "k"]), env_of(&[]), FileConfig::default()).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.generation, GenerationSettings::default());
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = FileConfig {
            model: Some("from-file".into()),
            max_tokens: Some(100),
            temperature: Some(0.9),
            ..FileConfig::default()
        };
        let env = env_of(&[
            ("OPENAI_API_KEY", "env-key"),
            ("DIFFSCRIBE_MODEL", "from-env"),
            ("DIFFSCRIBE_MAX_TOKENS", "200"),
        ]);
        let cfg = resolve(&cli(&["--max-tokens", "300"]), env, file).unwrap();

        assert_eq!(cfg.api_key, "env-key");
        assert_eq!(cfg.generation.model, "from-env");
        assert_eq!(cfg.generation.max_tokens, 300);
        assert_eq!(cfg.generation.temperature, 0.9);
    }

    #[test]
    fn flags_toggle_emoji_and_streaming() {
        let file = FileConfig {
            api_key: Some("file-key".into()),
            ..FileConfig::default()
        };
        let args = cli(&["--emoji", "--no-stream", "--timeout", "5"]);
        let cfg = resolve(&args, env_of(&[]), file).unwrap();
        assert!(cfg.generation.emoji);
        assert!(!cfg.generation.stream);
        assert_eq!(cfg.generation.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = resolve(&cli(&[]), env_of(&[]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn malformed_env_number_is_rejected() {
        let env = env_of(&[("OPENAI_API_KEY", "k"), ("DIFFSCRIBE_MAX_TOKENS", "lots")]);
        let err = resolve(&cli(&[]), env, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("DIFFSCRIBE_MAX_TOKENS"));
    }

    #[test]
    fn cli_value_skips_malformed_env() {
        let env = env_of(&[
            ("DIFFSCRIBE_MAX_TOKENS", "lots"),
            ("DIFFSCRIBE_TEMPERATURE", "warm"),
            ("DIFFSCRIBE_TOKEN_INCREMENT", "-1"),
        ]);
        let args = cli(&[
            "--api-key",
            "k",
            "--max-tokens",
            "300",
            "--temperature",
            "0.5",
            "--token-increment",
            "10",
        ]);
        let cfg = resolve(&args, env, FileConfig::default()).unwrap();
        assert_eq!(cfg.generation.max_tokens, 300);
        assert_eq!(cfg.generation.temperature, 0.5);
        assert_eq!(cfg.generation.token_increment, 10);
    }

    #[test]
    fn file_config_parses_from_toml() {
        let cfg: FileConfig =
            toml::from_str("model = \"m\"\nemoji = true\ntimeout_secs = 30\n").unwrap();
        assert_eq!(cfg.model.as_deref(), Some("m"));
        assert_eq!(cfg.emoji, Some(true));
        assert_eq!(cfg.timeout_secs, Some(30));
    }
}
