mod cache;
mod parser;

pub use cache::CachePolicy;

use crate::config::CatalogConfig;
use crate::schemes::domain::Scheme;
use cache::CatalogCache;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Columns every catalog file must carry, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "scheme_id",
    "scheme_name",
    "benefits",
    "min_age",
    "max_age",
    "min_land_holding",
    "max_land_holding",
    "income_limit",
    "farmer_type",
    "state",
    "crop_type",
    "category",
    "gender",
    "other_conditions",
    "steps_to_apply",
    "official_url",
];

/// Read-only access to the scheme table, so the filter can run against any store.
pub trait SchemeSource: Send + Sync {
    fn load(&self) -> Result<Arc<[Scheme]>, CatalogError>;
}

/// Error enumeration for catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("government schemes dataset not found at: {}", .path.display())]
    SourceNotFound { path: PathBuf },
    #[error("missing required columns in scheme dataset: {}", .missing.join(", "))]
    SchemaValidation { missing: Vec<String> },
    #[error("failed to read scheme dataset: {0}")]
    Io(#[from] io::Error),
    #[error("invalid scheme CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Scheme catalog backed by a CSV file on disk.
#[derive(Debug)]
pub struct CsvSchemeCatalog {
    path: PathBuf,
    cache: CatalogCache,
}

impl CsvSchemeCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            path: config.path.clone(),
            cache: CatalogCache::new(config.cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a catalog from any reader, applying the same column checks as a file load.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Scheme>, CatalogError> {
        parser::parse_schemes(reader)
    }

    /// Drops cached rows so the next load reads the file again.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    fn read(&self) -> Result<Vec<Scheme>, CatalogError> {
        let file = File::open(&self.path).map_err(|err| self.not_found_or(err))?;
        let schemes = parser::parse_schemes(file)?;
        debug!(path = %self.path.display(), rows = schemes.len(), "loaded scheme catalog");
        Ok(schemes)
    }

    fn modified(&self) -> Result<SystemTime, CatalogError> {
        let metadata = std::fs::metadata(&self.path).map_err(|err| self.not_found_or(err))?;
        Ok(metadata.modified()?)
    }

    fn not_found_or(&self, err: io::Error) -> CatalogError {
        if err.kind() == io::ErrorKind::NotFound {
            CatalogError::SourceNotFound {
                path: self.path.clone(),
            }
        } else {
            CatalogError::Io(err)
        }
    }
}

impl SchemeSource for CsvSchemeCatalog {
    fn load(&self) -> Result<Arc<[Scheme]>, CatalogError> {
        let modified = match self.cache.policy() {
            CachePolicy::Disabled => return self.read().map(Arc::from),
            CachePolicy::ModifiedTime => Some(self.modified()?),
            CachePolicy::TimeToLive(_) => None,
        };

        if let Some(schemes) = self.cache.fresh(modified) {
            debug!(path = %self.path.display(), "serving scheme catalog from cache");
            return Ok(schemes);
        }

        let schemes: Arc<[Scheme]> = Arc::from(self.read()?);
        self.cache.store(Arc::clone(&schemes), modified);
        Ok(schemes)
    }
}
