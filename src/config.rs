/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Only the host board is configurable; game timings are fixed.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub audio: AudioConfig,
    pub input: InputConfig,
    pub gamepad: GamepadConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub enabled: bool,
    pub sample_rate: u32,
    pub volume: f32,
    pub fifo_depth: usize,
}

#[derive(Clone, Debug)]
pub struct InputConfig {
    /// Keys without release events count as held this long after the last repeat.
    pub hold_timeout_ms: u64,
    /// ...and this long after the initial press, before auto-repeat starts.
    pub repeat_delay_ms: u64,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub switch_toggle: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_audio_enabled")]
    enabled: bool,
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
    #[serde(default = "default_volume")]
    volume: f32,
    #[serde(default = "default_fifo_depth")]
    fifo_depth: usize,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_hold_timeout")]
    hold_timeout_ms: u64,
    #[serde(default = "default_repeat_delay")]
    repeat_delay_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_switch_toggle")]
    switch_toggle: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_audio_enabled() -> bool { true }
fn default_sample_rate() -> u32 { 48_000 }
fn default_volume() -> f32 { 0.25 }
fn default_fifo_depth() -> usize { 128 }
fn default_hold_timeout() -> u64 { 160 }   // several auto-repeat intervals
fn default_repeat_delay() -> u64 { 700 }   // above the longest common initial repeat delay (660 ms)
fn default_switch_toggle() -> Vec<String> { vec!["Select".into(), "Y".into()] }
fn default_log_file() -> String { "mazememory.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio {
            enabled: default_audio_enabled(),
            sample_rate: default_sample_rate(),
            volume: default_volume(),
            fifo_depth: default_fifo_depth(),
        }
    }
}

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput {
            hold_timeout_ms: default_hold_timeout(),
            repeat_delay_ms: default_repeat_delay(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { switch_toggle: default_switch_toggle() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: default_log_file(), level: default_log_level() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        Self::from_toml(load_toml(&search_dirs))
    }

    /// Parse a config document; a malformed one is an error.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Self::from_toml)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        // an empty FIFO could never accept a sample
        let fifo_depth = toml_cfg.audio.fifo_depth.clamp(1, 255);
        GameConfig {
            audio: AudioConfig {
                enabled: toml_cfg.audio.enabled,
                sample_rate: toml_cfg.audio.sample_rate.max(1),
                volume: toml_cfg.audio.volume.max(0.0),
                fifo_depth,
            },
            input: InputConfig {
                hold_timeout_ms: toml_cfg.input.hold_timeout_ms,
                repeat_delay_ms: toml_cfg.input.repeat_delay_ms,
            },
            gamepad: GamepadConfig { switch_toggle: toml_cfg.gamepad.switch_toggle },
            log: LogConfig {
                file: PathBuf::from(toml_cfg.log.file),
                level: toml_cfg.log.level,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
