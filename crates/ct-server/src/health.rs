//! Health checks
//!
//! `/health` only proves the process answers. `/health/ready` also checks
//! the database when the server runs against one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ct_db::{Database, PoolStats};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolDetails>,
}

/// Connection counts of the database pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolDetails {
    pub size: u32,
    pub idle: usize,
}

impl From<PoolStats> for PoolDetails {
    fn from(stats: PoolStats) -> Self {
        Self {
            size: stats.size,
            idle: stats.idle,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Readiness checker
pub struct HealthChecker {
    start_time: Instant,
    check_timeout: Duration,
    database: Option<Database>,
}

impl HealthChecker {
    /// `None` means the server runs on the in-memory store
    pub fn new(database: Option<Database>) -> Self {
        Self {
            start_time: Instant::now(),
            check_timeout: Duration::from_secs(5),
            database,
        }
    }

    pub async fn check(&self) -> HealthReport {
        let mut components = Vec::new();
        let mut status = HealthStatus::Healthy;

        if let Some(db) = &self.database {
            let component = self.check_database(db).await;
            if component.status == HealthStatus::Unhealthy {
                status = HealthStatus::Unhealthy;
            }
            components.push(component);
        }

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_database(&self, db: &Database) -> ComponentHealth {
        let start = Instant::now();

        let (status, message) = match tokio::time::timeout(self.check_timeout, db.ping()).await {
            Ok(Ok(())) => (HealthStatus::Healthy, None),
            Ok(Err(e)) => {
                warn!(error = %e, "Database ping failed");
                (HealthStatus::Unhealthy, Some(e.to_string()))
            }
            Err(_) => {
                warn!("Database ping timed out");
                (HealthStatus::Unhealthy, Some("ping timed out".to_string()))
            }
        };

        ComponentHealth {
            name: "database".to_string(),
            status,
            message,
            response_time_ms: start.elapsed().as_millis() as u64,
            pool: Some(db.stats().into()),
        }
    }
}

/// Liveness
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness
pub async fn readiness(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    (report.http_status(), Json(report))
}
