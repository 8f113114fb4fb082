use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    env,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime},
};

use derive_more::Display;
use log::{debug, info, warn};
use serde_yaml::Value;

use super::{
    defaults::{default_config, fallback_config},
    emoji::emoji_mode_active,
    error::ConfigError,
    root::{self, ProjectRoot},
    types::{Config, RawConfig, unknown_fields},
    validator::ConfigValidator,
};
use crate::common::{CONFIG_FILE_NAME, CONFIG_FILE_NAME_ALT};

/// Default number of config files kept in the cache.
pub const CACHE_LIMIT: usize = 10;

/// Files modified within this window of the cached load are treated as unchanged.
const MTIME_TOLERANCE: Duration = Duration::from_secs(1);

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigSource {
    #[display("project")]
    Project,
    #[display("defaults")]
    Defaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    /// Config file path, `None` for built-in defaults
    pub path: Option<PathBuf>,
    pub loaded_at: SystemTime,
    pub emoji_mode_active: bool,
    pub project_root: ProjectRoot,
}

#[derive(Debug)]
pub struct CachedConfig {
    pub data: Arc<LoadedConfig>,
    pub timestamp: SystemTime,
    pub watched_paths: Vec<PathBuf>,
}

impl CachedConfig {
    fn is_fresh(&self) -> bool {
        let limit = self
            .timestamp
            .checked_add(MTIME_TOLERANCE)
            .unwrap_or(self.timestamp);
        self.watched_paths.iter().all(|path| {
            fs::metadata(path)
                .and_then(|meta| meta.modified())
                .is_ok_and(|mtime| mtime <= limit)
        })
    }
}

/// Discovers, parses, validates and caches project configuration.
#[derive(Debug)]
pub struct ConfigLoader {
    roots: HashMap<PathBuf, ProjectRoot>,
    cache: HashMap<PathBuf, CachedConfig>,
    order: VecDeque<PathBuf>,
    limit: usize,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache_limit(CACHE_LIMIT)
    }

    #[must_use]
    pub fn with_cache_limit(limit: usize) -> Self {
        Self {
            roots: HashMap::new(),
            cache: HashMap::new(),
            order: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn load(&mut self, start: &Path) -> Result<Arc<LoadedConfig>, ConfigError> {
        let project_root = self.discover_root(start)?;

        let Some(path) = find_config_file(&project_root.path) else {
            info!(
                "No configuration file in {}, using defaults",
                project_root.path.display()
            );
            let config = fallback_config();
            return Ok(Arc::new(LoadedConfig {
                emoji_mode_active: emoji_mode_active(&config.config),
                config,
                source: ConfigSource::Defaults,
                path: None,
                loaded_at: SystemTime::now(),
                project_root,
            }));
        };

        if let Some(cached) = self.cache.get(&path) {
            if cached.is_fresh() {
                debug!("Using cached configuration for {}", path.display());
                return Ok(Arc::clone(&cached.data));
            }
            debug!("Cached configuration for {} is stale", path.display());
            self.forget(&path);
        }

        let config = read_config(&path)?;
        let loaded_at = SystemTime::now();
        let data = Arc::new(LoadedConfig {
            emoji_mode_active: emoji_mode_active(&config.config),
            config,
            source: ConfigSource::Project,
            path: Some(path.clone()),
            loaded_at,
            project_root,
        });
        info!("Loaded configuration from {}", path.display());

        self.insert(path.clone(), CachedConfig {
            data: Arc::clone(&data),
            timestamp: loaded_at,
            watched_paths: vec![path],
        });
        Ok(data)
    }

    /// Project root for `start`, cached per start path.
    pub fn discover_root(&mut self, start: &Path) -> Result<ProjectRoot, ConfigError> {
        if let Some(found) = self.roots.get(start) {
            return Ok(found.clone());
        }
        let found = root::discover(start).map_err(|e| ConfigError::start_path(start, e))?;
        self.roots.insert(start.to_path_buf(), found.clone());
        Ok(found)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.order.clear();
        self.roots.clear();
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    fn insert(&mut self, path: PathBuf, entry: CachedConfig) {
        self.order.push_back(path.clone());
        self.cache.insert(path, entry);

        while self.cache.len() > self.limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            debug!("Evicting cached configuration {}", oldest.display());
            self.cache.remove(&oldest);
        }
    }

    fn forget(&mut self, path: &Path) {
        self.cache.remove(path);
        self.order.retain(|p| p != path);
    }
}

thread_local! {
    static LOADER: RefCell<ConfigLoader> = RefCell::new(ConfigLoader::new());
}

/// Loads configuration for `start`, or the current directory.
///
/// Uses a loader shared by the whole thread, so repeated calls within one
/// command observe the same cached result.
pub fn load_config(start: Option<&Path>) -> Result<Arc<LoadedConfig>, ConfigError> {
    let start = match start {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().map_err(|e| ConfigError::start_path(Path::new("."), e))?,
    };
    LOADER.with_borrow_mut(|loader| loader.load(&start))
}

/// First existing config file in `root`, primary name first.
#[must_use]
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    [CONFIG_FILE_NAME, CONFIG_FILE_NAME_ALT]
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Reads, validates and merges one config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = read_text(path)?;
    if text.trim().is_empty() {
        return Err(ConfigError::empty_file(path));
    }

    let document: Value = serde_yaml::from_str(&text).map_err(|e| ConfigError::parse(path, e))?;
    let Some(top) = document.as_mapping() else {
        return Err(ConfigError::not_an_object(path));
    };
    if !top.get("types").is_some_and(Value::is_sequence) {
        return Err(ConfigError::missing_types(path));
    }

    let result = ConfigValidator::validate(&document);
    if !result.valid {
        warn!(
            "{} has {} validation errors",
            path.display(),
            result.errors.len()
        );
        return Err(ConfigError::validation(path, &result));
    }

    for field in unknown_fields(&document) {
        warn!("Ignoring unknown configuration field '{field}' in {}", path.display());
    }

    let raw: RawConfig =
        serde_yaml::from_value(document).map_err(|e| ConfigError::deserialize(path, e))?;
    Ok(Config::merge(raw, &default_config()))
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    let mut file = File::open(path).map_err(|e| ConfigError::unreadable(path, e))?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| ConfigError::unreadable(path, e))?;
    Ok(text)
}
