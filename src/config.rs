use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "folio.toml";

const DEFAULT_MAX_AGE_SECS: u32 = 60 * 10;
const DEFAULT_S_MAXAGE_SECS: u32 = 60 * 60 * 24;

#[derive(Deserialize, Debug)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub url: String,
    pub generator: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub posts_dir: PathBuf,
}

#[derive(Deserialize, Debug)]
pub struct Defaults {
    pub index_base_name: Option<String>,
    pub home_post_count: usize,
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

/// Lifetimes sent with the feed responses, in seconds.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Cache {
    pub max_age_secs: u32,
    pub s_maxage_secs: u32,
}

impl Default for Cache {
    fn default() -> Self {
        Cache {
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            s_maxage_secs: DEFAULT_S_MAXAGE_SECS,
        }
    }
}

impl Cache {
    pub fn header_value(&self) -> String {
        format!("public, max-age={}, s-maxage={}", self.max_age_secs, self.s_maxage_secs)
    }
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub author: Author,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    #[serde(default)]
    pub cache: Cache,
    pub log: Option<Log>,
}

impl Config {
    pub fn index_base_name(&self) -> &str {
        self.defaults.index_base_name.as_deref().unwrap_or("index")
    }
}

fn exe_dir() -> Option<PathBuf> {
    let cur_exe = env::current_exe().ok()?;
    cur_exe.parent().map(Path::to_path_buf)
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    match (exe_dir(), path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

/// Looks for the configuration next to the executable, then in the current
/// directory, then in the user config directory.
pub fn find_config_path() -> Option<PathBuf> {
    let candidates = [
        exe_dir(),
        env::current_dir().ok(),
        dirs::config_dir(),
    ];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}
