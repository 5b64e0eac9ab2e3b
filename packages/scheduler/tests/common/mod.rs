use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use dory_scheduler::config::Config;
use dory_scheduler::logging;
use dory_scheduler::services::ReviewService;
use dory_scheduler::store::MemoryStore;

pub fn init_test_tracing() {
    let config = Config {
        log_level: "dory_scheduler=debug".to_string(),
        ..Config::default()
    };
    let _ = logging::init_tracing(&config);
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

pub fn create_test_service() -> ReviewService<MemoryStore> {
    init_test_tracing();
    ReviewService::new(Arc::new(MemoryStore::new()))
}
