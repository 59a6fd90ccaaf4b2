//! # tacsim
//!
//! 南シナ海を舞台に、地理的制約を満たす航空・艦艇・地上エンティティを生成し、
//! 周期的な時間刻みで運動させる合成戦術データ生成エンジンです。
//!
//! - `geo`: 陸地・水域判定とスポーン位置の棄却サンプリング
//! - `naming`: プラットフォーム名・コールサインの払い出し
//! - `factory` / `scenario`: エンティティとシナリオ母集団の構築
//! - `simulation` / `runtime`: 運動モデルと tokio 上の周期駆動

pub mod config;
pub mod error;
pub mod factory;
pub mod geo;
pub mod logging;
pub mod models;
pub mod naming;
pub mod runtime;
pub mod scenario;
pub mod simulation;

pub use error::{ConfigError, TacsimError};
pub use runtime::SharedSimulation;
pub use simulation::{MotionConfig, MotionSimulator, Simulation};
