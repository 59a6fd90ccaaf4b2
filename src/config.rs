//! # Config モジュール
//!
//! YAML形式の設定ファイルを読み込み、検証します。
//! すべてのセクションは省略可能で、省略時は既定値が使われます。
//!
//! ```yaml
//! sim:
//!   scenario: stress-small
//!   tick_ms: 1000
//!   seed: 42
//! motion:
//!   retarget_probability: 0.05
//! logging:
//!   level: info
//!   output: console
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::{parse_log_level, LogConfig, LogOutput};
use crate::scenario::{find_scenario, DEFAULT_SCENARIO};
use crate::simulation::MotionConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub sim: SimSection,
    pub motion: MotionConfig,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSection {
    /// 起動時に構築するシナリオ
    pub scenario: String,
    /// 時間刻みの周期（ms）
    pub tick_ms: u64,
    /// 乱数シード（省略時は時刻から決定）
    pub seed: Option<u64>,
    /// 停止までのティック数（省略時は中断まで継続）
    pub max_ticks: Option<u64>,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            scenario: DEFAULT_SCENARIO.to_string(),
            tick_ms: 1000,
            seed: None,
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub output: String,
    pub log_dir: String,
    pub file_prefix: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "console".to_string(),
            log_dir: "logs".to_string(),
            file_prefix: "tacsim".to_string(),
        }
    }
}

impl LoggingSection {
    pub fn to_log_config(&self) -> Result<LogConfig, ConfigError> {
        Ok(LogConfig {
            level: parse_log_level(&self.level),
            output: LogOutput::from_str(&self.output).map_err(ConfigError::Validation)?,
            log_dir: self.log_dir.clone(),
            file_prefix: self.file_prefix.clone(),
        })
    }
}

impl EmulatorConfig {
    /// YAMLファイルから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config: EmulatorConfig =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sim.tick_ms == 0 {
            return Err(ConfigError::Validation("tick_ms must be positive".to_string()));
        }
        if self.sim.max_ticks == Some(0) {
            return Err(ConfigError::Validation("max_ticks must be positive".to_string()));
        }

        let p = self.motion.retarget_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Validation(format!(
                "retarget_probability {} is outside [0, 1]",
                p
            )));
        }
        if self.motion.altitude_jitter_m.is_nan() || self.motion.altitude_jitter_m < 0.0 {
            return Err(ConfigError::Validation(
                "altitude_jitter_m must not be negative".to_string(),
            ));
        }
        if self.motion.min_altitude_m.is_nan() || self.motion.min_altitude_m < 0.0 {
            return Err(ConfigError::Validation("min_altitude_m must not be negative".to_string()));
        }

        LogOutput::from_str(&self.logging.output).map_err(ConfigError::Validation)?;

        Ok(())
    }

    /// 設定内容の表示
    pub fn print_summary(&self) {
        println!("=== シミュレーション設定 ===");
        match find_scenario(&self.sim.scenario) {
            Some(scenario) => println!(
                "シナリオ: {} ({}, {}件)",
                scenario.key,
                scenario.name,
                scenario.total()
            ),
            None => println!("シナリオ: {} (未定義、{} を使用)", self.sim.scenario, DEFAULT_SCENARIO),
        }
        println!("時間刻み: {}ms", self.sim.tick_ms);
        match self.sim.seed {
            Some(seed) => println!("シード値: {}", seed),
            None => println!("シード値: (時刻から決定)"),
        }
        match self.sim.max_ticks {
            Some(n) => println!("停止ティック数: {}", n),
            None => println!("停止ティック数: (中断まで継続)"),
        }
        println!();

        println!("=== 運動モデル ===");
        println!("再目標設定確率: {:.3}", self.motion.retarget_probability);
        println!("高度揺らぎ: ±{:.0}m", self.motion.altitude_jitter_m);
        println!("最低高度: {:.0}m", self.motion.min_altitude_m);
        println!();

        println!("=== ログ ===");
        println!("レベル: {}", self.logging.level);
        println!("出力先: {}", self.logging.output);
        println!("ディレクトリ: {}", self.logging.log_dir);
    }
}
