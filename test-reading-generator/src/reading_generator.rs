use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::Rng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use common::types::{RiskAssessment, RiskLevel, SensorReading};

const DEFAULT_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_INTERVAL_MS: u64 = 500;

/// 生成器参数，全部来自环境变量
#[derive(Debug, Clone)]
struct GeneratorConfig {
    base_url: String,
    interval: Duration,
    count: u64, // 0 表示一直运行直到 Ctrl+C
}

impl GeneratorConfig {
    fn from_env() -> Result<Self> {
        let base_url = std::env::var("NEUROWATCH_URL")
            .unwrap_or_else(|_| DEFAULT_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let interval_ms = match std::env::var("READING_INTERVAL_MS") {
            Ok(v) => v.parse::<u64>()
                .with_context(|| format!("Invalid READING_INTERVAL_MS: {}", v))?,
            Err(_) => DEFAULT_INTERVAL_MS,
        };

        let count = match std::env::var("READING_COUNT") {
            Ok(v) => v.parse::<u64>()
                .with_context(|| format!("Invalid READING_COUNT: {}", v))?,
            Err(_) => 0,
        };

        Ok(Self {
            base_url,
            interval: Duration::from_millis(interval_ms.max(1)),
            count,
        })
    }
}

/// 随机读数，取值范围覆盖三个阈值两侧
fn random_reading<R: Rng>(rng: &mut R) -> SensorReading {
    SensorReading {
        gait: rng.gen_range(40.0..80.0),
        voice: rng.gen_range(40.0..80.0),
        tremor: rng.gen_range(15.0..45.0),
    }
}

fn new_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(5)))
        .build()
        .new_agent()
}

/// 启动前确认后端在运行
fn probe_backend(agent: &ureq::Agent, base_url: &str) -> Result<()> {
    let response = agent
        .get(&format!("{}/", base_url))
        .call()
        .with_context(|| format!("NeuroWatch backend not reachable at {}", base_url))?;

    if response.status().as_u16() != 200 {
        bail!("Liveness check failed with status {}", response.status());
    }

    let body: serde_json::Value = response.into_body().read_json()?;
    info!("Backend status: {}", body["status"]);
    Ok(())
}

fn post_reading(agent: &ureq::Agent, base_url: &str, reading: &SensorReading) -> Result<RiskAssessment> {
    let response = agent
        .post(&format!("{}/predict", base_url))
        .header("Content-Type", "application/json")
        .send_json(reading)
        .map_err(|e| anyhow::anyhow!("Predict request failed: {}", e))?;

    let status = response.status().as_u16();
    if status != 200 {
        let text = response.into_body().read_to_string().unwrap_or_default();
        bail!("Predict returned {}: {}", status, text);
    }

    let assessment: RiskAssessment = response.into_body().read_json()?;
    Ok(assessment)
}

/// 按风险等级统计结果
#[derive(Debug, Default)]
struct Tally {
    by_level: BTreeMap<RiskLevel, u64>,
    failures: u64,
}

impl Tally {
    fn record(&mut self, assessment: &RiskAssessment) {
        *self.by_level.entry(assessment.risk).or_insert(0) += 1;
    }

    fn total(&self) -> u64 {
        self.by_level.values().sum::<u64>() + self.failures
    }

    fn print(&self) {
        info!("=== Reading Generator Statistics ===");
        info!("Total readings: {}", self.total());
        for level in RiskLevel::ALL {
            info!("{}: {}", level, self.by_level.get(&level).copied().unwrap_or(0));
        }
        info!("Failures: {}", self.failures);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()))
        .init();

    let config = GeneratorConfig::from_env()?;
    info!("Starting reading generator against {}", config.base_url);

    let agent = new_agent();
    {
        let agent = agent.clone();
        let base_url = config.base_url.clone();
        tokio::task::spawn_blocking(move || probe_backend(&agent, &base_url)).await??;
    }

    let mut rng = rand::thread_rng();
    let mut tally = Tally::default();
    let mut ticker = tokio::time::interval(config.interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reading = random_reading(&mut rng);
                debug!("Sending reading: {}", reading);

                let agent = agent.clone();
                let base_url = config.base_url.clone();
                let result = tokio::task::spawn_blocking(move || {
                    post_reading(&agent, &base_url, &reading)
                }).await?;

                match result {
                    Ok(assessment) => {
                        info!("{} -> score={} risk={}", reading, assessment.score, assessment.risk);
                        tally.record(&assessment);
                    }
                    Err(e) => {
                        error!("Failed to score reading {}: {:?}", reading, e);
                        tally.failures += 1;
                    }
                }

                if config.count > 0 && tally.total() >= config.count {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                warn!("Received Ctrl+C, stopping generator");
                break;
            }
        }
    }

    tally.print();
    Ok(())
}
