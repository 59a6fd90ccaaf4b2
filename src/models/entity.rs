use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{GeoPoint, Position};

/// エンティティのドメイン（配置・移動ルールを決める区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Air,
    Maritime,
    Land,
}

impl Domain {
    /// 哨戒半径（km）
    pub fn patrol_radius_km(&self) -> f64 {
        match self {
            Domain::Land => 5.0,
            Domain::Maritime => 50.0,
            Domain::Air => 100.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Air => "AIR",
            Domain::Maritime => "MARITIME",
            Domain::Land => "LAND",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 所属（ディスポジション）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affiliation {
    Friendly,
    Hostile,
    Neutral,
    Unknown,
}

impl Affiliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::Friendly => "FRIENDLY",
            Affiliation::Hostile => "HOSTILE",
            Affiliation::Neutral => "NEUTRAL",
            Affiliation::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 電波放射源の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmitterType {
    Radar,
    Communications,
    Jammer,
    Missile,
}

impl EmitterType {
    pub const ALL: [EmitterType; 4] = [
        EmitterType::Radar,
        EmitterType::Communications,
        EmitterType::Jammer,
        EmitterType::Missile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmitterType::Radar => "RADAR",
            EmitterType::Communications => "COMMUNICATIONS",
            EmitterType::Jammer => "JAMMER",
            EmitterType::Missile => "MISSILE",
        }
    }
}

/// クライアント側スキーマ上のエンティティ種別（生成物は常に Emitter）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Emitter,
}

/// 周波数範囲（MHz）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub avg_mhz: f64,
    pub min_mhz: f64,
    pub max_mhz: f64,
}

/// 哨戒行動のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// 哨戒中心（スポーン地点）
    pub center: GeoPoint,
    /// 哨戒半径（km）
    pub radius_km: f64,
}

/// 命名オラクルが返す識別情報
#[derive(Debug, Clone, PartialEq)]
pub struct EntityIdentity {
    /// 表示名（例: "USS Benfold (DDG-65)"）
    pub name: String,
    /// プラットフォーム種別（例: "Arleigh Burke-class Destroyer"）
    pub platform_type: String,
    /// コールサイン
    pub callsign: String,
    pub emitter_type: EmitterType,
    pub nationality: String,
}

/// シミュレーション対象エンティティ
///
/// 識別情報・運動状態・哨戒パラメータを1つの集約値として保持します。
/// ドメインごとの振る舞いの違いは型階層ではなく、サンプラーと
/// モーションシミュレータ内の分岐で表現されます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 一意識別子
    pub id: Uuid,
    /// 表示名
    pub name: String,
    pub domain: Domain,
    /// 所属（ディスポジション）
    pub affiliation: Affiliation,
    pub nationality: String,
    pub position: Position,
    /// 方位（度、真北0度・時計回り、0〜360）
    pub heading: f64,
    /// 速度（ノット、0は停止）
    pub speed_kn: f64,
    pub platform_type: String,
    pub callsign: String,
    pub entity_type: EntityType,
    pub emitter_type: EmitterType,
    pub frequency: FrequencyRange,
    pub patrol: Option<Patrol>,
    /// 直近の再目標設定で選んだ哨戒点
    pub waypoint: Option<GeoPoint>,
    /// 生成時に近傍にあった参照地点・航路の名前
    pub near_landmark: String,
    /// 最終更新時刻（エポックミリ秒）
    pub last_update_ms: u64,
}

impl Entity {
    pub fn is_stationary(&self) -> bool {
        self.speed_kn == 0.0
    }
}
