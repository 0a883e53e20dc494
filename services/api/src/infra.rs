use farm_schemes::config::CatalogConfig;
use farm_schemes::schemes::{CsvSchemeCatalog, EligibilityFilter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_catalog(config: &CatalogConfig) -> CsvSchemeCatalog {
    CsvSchemeCatalog::new(config)
}

pub(crate) fn build_filter(config: &CatalogConfig) -> EligibilityFilter<CsvSchemeCatalog> {
    EligibilityFilter::new(Arc::new(build_catalog(config)), config.malformed_rows)
}
