//! # Runtime モジュール
//!
//! tokio 上で `Simulation` を共有し、周期タイマーで時間刻みを駆動します。
//!
//! 再構築と時間刻みは書き込みロック、スナップショットは読み込みロックで行うため、
//! 読み手が観測する母集団は常に差し替え前か差し替え後のどちらか一方です。
//! タイマーの停止は返された `JoinHandle` の中断のみで行います。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::models::entity::Entity;
use crate::simulation::{PopulationStats, Simulation};

/// スレッド間で共有されるシミュレーション
#[derive(Clone)]
pub struct SharedSimulation {
    inner: Arc<RwLock<Simulation>>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(RwLock::new(simulation)),
        }
    }

    /// シナリオを構築し、構築後の件数を返す
    pub async fn build_scenario(&self, key: &str) -> usize {
        let mut sim = self.inner.write().await;
        sim.build_scenario(key).len()
    }

    pub async fn tick(&self, delta_ms: u64) {
        self.inner.write().await.tick(delta_ms);
    }

    pub async fn snapshot(&self) -> Vec<Entity> {
        self.inner.read().await.snapshot()
    }

    pub async fn stats(&self) -> PopulationStats {
        self.inner.read().await.stats()
    }

    pub async fn tick_count(&self) -> u64 {
        self.inner.read().await.tick_count()
    }

    pub async fn clock_ms(&self) -> u64 {
        self.inner.read().await.clock_ms()
    }

    /// 周期タイマーを起動する
    ///
    /// # 引数
    ///
    /// * `period` - 時間刻みの周期（模擬時計もこの幅で進む）
    /// * `max_ticks` - 指定時はこの回数で停止、`None` は中断されるまで継続
    pub fn spawn_ticker(&self, period: Duration, max_ticks: Option<u64>) -> JoinHandle<u64> {
        let shared = self.clone();
        let delta_ms = period.as_millis() as u64;

        tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval の初回は即時に完了する
            timer.tick().await;

            let mut ticks = 0u64;
            while max_ticks.is_none_or(|max| ticks < max) {
                timer.tick().await;
                shared.tick(delta_ms).await;
                ticks += 1;

                if ticks % 10 == 0 {
                    let stats = shared.stats().await;
                    debug!("ティック {} 完了 (エンティティ: {}件)", ticks, stats.total);
                }
            }

            info!("タイマー停止 ({}ティック)", ticks);
            ticks
        })
    }
}
