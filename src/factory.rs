//! # Factory モジュール
//!
//! ドメインと所属の組から1件のエンティティを組み立てます。
//!
//! スポーン位置は `LocationSampler`、識別情報は命名オラクルから取得し、
//! 高度・速度はプラットフォーム種別のキーワードから、周波数範囲は放射源種別の
//! 帯域テーブルから決定します。組み立て後に配置の整合性を検証し、
//! 不整合は警告ログのみで生成は中断しません。

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::warn;
use uuid::Uuid;

use crate::geo::sampler::LocationSampler;
use crate::models::common::Position;
use crate::models::entity::{
    Affiliation, Domain, EmitterType, Entity, EntityType, FrequencyRange, Patrol,
};
use crate::models::traits::{INamingOracle, ITerrain};

/// 周波数帯（中心周波数と帯域幅、MHz）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub name: &'static str,
    pub base_mhz: f64,
    pub bandwidth_mhz: f64,
}

const fn band(name: &'static str, base_mhz: f64, bandwidth_mhz: f64) -> FrequencyBand {
    FrequencyBand { name, base_mhz, bandwidth_mhz }
}

/// レーダー帯域: L (1-2 GHz), S (2-4 GHz), C (4-8 GHz), X (8-12 GHz)
pub const RADAR_BANDS: [FrequencyBand; 4] = [
    band("L", 1500.0, 500.0),
    band("S", 3000.0, 1000.0),
    band("C", 6000.0, 2000.0),
    band("X", 10000.0, 2000.0),
];

/// 通信帯域: VHF, UHF（下側・上側）, SHF
pub const COMM_BANDS: [FrequencyBand; 4] = [
    band("VHF", 150.0, 100.0),
    band("UHF-L", 400.0, 200.0),
    band("UHF-H", 1800.0, 500.0),
    band("SHF", 5000.0, 1000.0),
];

/// エンティティ生成器
pub struct EntityFactory {
    sampler: LocationSampler,
    terrain: Arc<dyn ITerrain>,
}

impl EntityFactory {
    pub fn new(terrain: Arc<dyn ITerrain>) -> Self {
        Self {
            sampler: LocationSampler::new(Arc::clone(&terrain)),
            terrain,
        }
    }

    /// エンティティを1件生成する
    ///
    /// # 引数
    ///
    /// * `domain` - ドメイン（AIR / MARITIME / LAND）
    /// * `affiliation` - 所属
    /// * `namer` - 命名オラクル（シナリオ単位の発行済み名前を保持）
    /// * `rng` - 乱数生成器
    /// * `now_ms` - 生成時刻（エポックミリ秒）
    pub fn create(
        &self,
        domain: Domain,
        affiliation: Affiliation,
        namer: &mut dyn INamingOracle,
        rng: &mut SmallRng,
        now_ms: u64,
    ) -> Entity {
        let placement = self.sampler.sample(domain, affiliation, rng);
        let identity = namer.next_name(domain, affiliation, rng);

        let altitude = altitude_for(domain, &identity.platform_type, rng);
        let speed_kn = speed_for(domain, &identity.platform_type, rng);

        let entity = Entity {
            id: random_uuid(rng),
            name: identity.name,
            domain,
            affiliation,
            nationality: identity.nationality,
            position: Position::new(placement.point.lat, placement.point.lon, altitude),
            heading: rng.gen_range(0.0..360.0),
            speed_kn,
            platform_type: identity.platform_type,
            callsign: identity.callsign,
            entity_type: EntityType::Emitter,
            emitter_type: identity.emitter_type,
            frequency: frequency_range_for(identity.emitter_type, rng),
            patrol: Some(Patrol {
                center: placement.point,
                radius_km: domain.patrol_radius_km(),
            }),
            waypoint: None,
            near_landmark: placement.near,
            last_update_ms: now_ms,
        };

        self.validate_placement(&entity);
        entity
    }

    /// ドメインと位置の整合性を検証する
    ///
    /// 不整合は警告ログを出して false を返すのみで、生成は続行する。
    pub fn validate_placement(&self, entity: &Entity) -> bool {
        let (lat, lon) = (entity.position.latitude, entity.position.longitude);

        match entity.domain {
            Domain::Maritime if !self.terrain.is_in_water(lat, lon) => {
                warn!("艦艇エンティティ \"{}\" が陸上に配置されました ({:.2}, {:.2})", entity.name, lat, lon);
                false
            }
            Domain::Land if !self.terrain.is_on_land(lat, lon) => {
                warn!("地上エンティティ \"{}\" が水域に配置されました ({:.2}, {:.2})", entity.name, lat, lon);
                false
            }
            _ => true,
        }
    }
}

/// 乱数生成器から UUID v4 を作る（シード固定時に再現可能）
fn random_uuid(rng: &mut SmallRng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

fn contains_any(platform_type: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| platform_type.contains(k))
}

/// プラットフォーム種別に応じた高度（m）
///
/// AIR 以外は 0（海面・地表）。
pub fn altitude_for(domain: Domain, platform_type: &str, rng: &mut SmallRng) -> f64 {
    if domain != Domain::Air {
        return 0.0;
    }

    let (min, max) = if contains_any(platform_type, &["UAV", "Drone"]) {
        (3000.0, 8000.0)
    } else if contains_any(platform_type, &["Fighter", "Strike"]) {
        (8000.0, 15000.0)
    } else if platform_type.contains("Bomber") {
        (10000.0, 15000.0)
    } else if platform_type.contains("Helicopter") {
        (100.0, 1600.0)
    } else if contains_any(platform_type, &["Tanker", "AWACS"]) {
        (8000.0, 12000.0)
    } else {
        (5000.0, 15000.0)
    };

    rng.gen_range(min..max)
}

/// プラットフォーム種別に応じた速度（ノット）
///
/// 地上ユニットは "Mobile" または "TEL" を含む場合のみ移動する。
pub fn speed_for(domain: Domain, platform_type: &str, rng: &mut SmallRng) -> f64 {
    let (min, max) = match domain {
        Domain::Air => {
            if platform_type.contains("Helicopter") {
                (80.0, 160.0)
            } else if contains_any(platform_type, &["UAV", "Drone"]) {
                (100.0, 250.0)
            } else if contains_any(platform_type, &["Fighter", "Strike"]) {
                (400.0, 700.0)
            } else if platform_type.contains("Bomber") {
                (400.0, 600.0)
            } else {
                (300.0, 600.0)
            }
        }
        Domain::Maritime => {
            if contains_any(platform_type, &["Cargo", "Tanker"]) {
                (12.0, 20.0)
            } else if contains_any(platform_type, &["Patrol", "Corvette"]) {
                (15.0, 30.0)
            } else if contains_any(platform_type, &["Destroyer", "Frigate"]) {
                (18.0, 30.0)
            } else if contains_any(platform_type, &["Carrier", "Cruiser"]) {
                (20.0, 35.0)
            } else {
                (15.0, 30.0)
            }
        }
        Domain::Land => {
            if contains_any(platform_type, &["Mobile", "TEL"]) {
                (0.0, 30.0)
            } else {
                return 0.0;
            }
        }
    };

    rng.gen_range(min..max)
}

/// 放射源種別に応じた周波数範囲（MHz）
pub fn frequency_range_for(emitter_type: EmitterType, rng: &mut SmallRng) -> FrequencyRange {
    let (base, bandwidth) = match emitter_type {
        EmitterType::Radar => {
            let b = RADAR_BANDS[rng.gen_range(0..RADAR_BANDS.len())];
            (b.base_mhz, b.bandwidth_mhz)
        }
        EmitterType::Communications => {
            let b = COMM_BANDS[rng.gen_range(0..COMM_BANDS.len())];
            (b.base_mhz, b.bandwidth_mhz)
        }
        // 広帯域: 2-10 GHz
        EmitterType::Jammer => (rng.gen_range(2000.0..10000.0), rng.gen_range(1000.0..3000.0)),
        // ミサイル誘導: X/Ku 帯
        EmitterType::Missile => (rng.gen_range(10000.0..15000.0), 500.0),
    };

    let half = bandwidth / 2.0;
    let avg_mhz = base + rng.gen_range(-half..half);

    FrequencyRange {
        avg_mhz,
        min_mhz: avg_mhz - half * rng.gen_range(0.0..1.0),
        max_mhz: avg_mhz + half * rng.gen_range(0.0..1.0),
    }
}
