use log::{LevelFilter, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

const CONFIG_PATH: &str = "deadsync-edit.ini";

// --- Minimal INI reader ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&content);
        Ok(())
    }

    pub fn load_str(&mut self, content: &str) {
        self.sections.clear();

        let mut current_section: Option<String> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header: [SectionName]
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let section = line[1..line.len() - 1].trim().to_string();
                current_section = Some(section.clone());
                self.sections.entry(section).or_default();
                continue;
            }

            // Key/value pair: key=value
            if let Some((key_raw, value_raw)) = line.split_once('=') {
                let key = key_raw.trim();
                if key.is_empty() {
                    continue;
                }
                let section = current_section.clone().unwrap_or_default();
                self.sections
                    .entry(section)
                    .or_default()
                    .insert(key.to_string(), value_raw.trim().to_string());
            }
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LogLevel,
    /// Home edit mode: only Edit charts can be made, and locked songs are hidden.
    pub home_edit_mode: bool,
    pub steps_types_to_show: Vec<String>,
    pub song_library_path: PathBuf,
    /// Comma separated `group/title` keys hidden in home edit mode.
    pub locked_songs: String,
    pub translated_titles: bool,
    /// `group/title` the menu opens on, if present in the library.
    pub current_song: String,
    /// `steps-type:Difficulty`, e.g. `dance-single:Hard`.
    pub current_steps: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            home_edit_mode: false,
            steps_types_to_show: vec!["dance-single".to_string(), "dance-double".to_string()],
            song_library_path: PathBuf::from("songs.json"),
            locked_songs: String::new(),
            translated_titles: false,
            current_song: String::new(),
            current_steps: String::new(),
        }
    }
}

// Global, mutable configuration instance.
static CONFIG: std::sync::LazyLock<Mutex<Config>> =
    std::sync::LazyLock::new(|| Mutex::new(Config::default()));

#[inline(always)]
fn parse_bool(v: &str) -> Option<bool> {
    let v = v.trim();
    if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("on")
    {
        Some(true)
    } else if v.eq_ignore_ascii_case("false")
        || v.eq_ignore_ascii_case("no")
        || v.eq_ignore_ascii_case("off")
    {
        Some(false)
    } else {
        v.parse::<u8>().ok().map(|n| n != 0)
    }
}

fn parse_steps_types(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn config_from_ini(conf: &SimpleIni) -> Config {
    let default = Config::default();
    Config {
        log_level: conf
            .get("Options", "LogLevel")
            .and_then(|v| LogLevel::from_str(&v).ok())
            .unwrap_or(default.log_level),
        home_edit_mode: conf
            .get("Options", "HomeEditMode")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(default.home_edit_mode),
        steps_types_to_show: conf
            .get("EditMenu", "StepsTypesToShow")
            .map(|v| parse_steps_types(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or(default.steps_types_to_show),
        song_library_path: conf
            .get("Options", "SongLibrary")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default.song_library_path),
        locked_songs: conf
            .get("Unlocks", "LockedSongs")
            .unwrap_or(default.locked_songs),
        translated_titles: conf
            .get("Options", "TranslatedTitles")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(default.translated_titles),
        current_song: conf
            .get("EditMenu", "CurrentSong")
            .unwrap_or(default.current_song),
        current_steps: conf
            .get("EditMenu", "CurrentSteps")
            .unwrap_or(default.current_steps),
    }
}

// --- File I/O ---

fn create_default_config_file() -> Result<(), std::io::Error> {
    info!("'{CONFIG_PATH}' not found, creating with default values.");
    let default = Config::default();

    let mut content = String::new();
    content.push_str("[Options]\n");
    content.push_str(&format!(
        "HomeEditMode={}\n",
        if default.home_edit_mode { "1" } else { "0" }
    ));
    content.push_str(&format!("LogLevel={}\n", default.log_level.as_str()));
    content.push_str(&format!(
        "SongLibrary={}\n",
        default.song_library_path.display()
    ));
    content.push_str(&format!(
        "TranslatedTitles={}\n",
        if default.translated_titles { "1" } else { "0" }
    ));
    content.push('\n');

    content.push_str("[EditMenu]\n");
    content.push_str(&format!("CurrentSong={}\n", default.current_song));
    content.push_str(&format!("CurrentSteps={}\n", default.current_steps));
    content.push_str(&format!(
        "StepsTypesToShow={}\n",
        default.steps_types_to_show.join(",")
    ));
    content.push('\n');

    content.push_str("[Unlocks]\n");
    content.push_str(&format!("LockedSongs={}\n", default.locked_songs));

    std::fs::write(CONFIG_PATH, content)
}

pub fn load() {
    if !Path::new(CONFIG_PATH).exists()
        && let Err(e) = create_default_config_file()
    {
        warn!("Failed to create default config file: {e}");
    }

    let mut conf = SimpleIni::new();
    match conf.load(CONFIG_PATH) {
        Ok(()) => {
            let cfg = config_from_ini(&conf);
            info!(
                "Configuration loaded from '{CONFIG_PATH}' (home edit mode: {}, steps types: {}).",
                cfg.home_edit_mode,
                cfg.steps_types_to_show.join(",")
            );
            *CONFIG.lock().unwrap() = cfg;
        }
        Err(e) => {
            warn!("Failed to load '{CONFIG_PATH}': {e}. Using default settings.");
        }
    }
}

pub fn get() -> Config {
    CONFIG.lock().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::{LogLevel, SimpleIni, config_from_ini};
    use std::path::PathBuf;

    #[test]
    fn ini_values_override_defaults() {
        let mut ini = SimpleIni::new();
        ini.load_str(
            "; comment\n\
             [Options]\n\
             LogLevel = debug\n\
             HomeEditMode=yes\n\
             SongLibrary=lib/songs.json\n\
             [EditMenu]\n\
             StepsTypesToShow= Dance-Single , ,pump-single\n\
             CurrentSong=Pack/Song\n\
             [Unlocks]\n\
             LockedSongs=Pack/Secret\n",
        );
        let cfg = config_from_ini(&ini);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.home_edit_mode);
        assert_eq!(cfg.song_library_path, PathBuf::from("lib/songs.json"));
        assert_eq!(cfg.steps_types_to_show, ["dance-single", "pump-single"]);
        assert_eq!(cfg.current_song, "Pack/Song");
        assert_eq!(cfg.locked_songs, "Pack/Secret");
        assert!(!cfg.translated_titles);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let mut ini = SimpleIni::new();
        ini.load_str("[Options]\nLogLevel=loud\nHomeEditMode=maybe\n[EditMenu]\nStepsTypesToShow=,\n");
        let cfg = config_from_ini(&ini);
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert!(!cfg.home_edit_mode);
        assert_eq!(cfg.steps_types_to_show, ["dance-single", "dance-double"]);
    }
}
