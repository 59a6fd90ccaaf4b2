//! # Simulation モジュール
//!
//! エンティティ母集団の運動を時間刻みで進めるシミュレーションエンジンを提供します。
//!
//! ## 主要機能
//!
//! - **推測航法**: 方位と速度から次の位置を射影
//! - **哨戒行動**: 一定確率で哨戒円内の新しい目標点へ再目標設定
//! - **境界処理**: 地形違反・シナリオ領域外への移動を棄却し、必要に応じて反転
//! - **母集団管理**: シナリオの構築と差し替え、模擬時計、統計
//!
//! ## 1刻みあたりの処理順序
//!
//! 1. 速度0のエンティティは時刻のみ更新
//! 2. 移動距離（海里→度）を計算
//! 3. 一定確率で再目標設定（哨戒中心がなければ方位をランダムに）
//! 4. 現在の方位で位置を射影
//! 5. 境界判定（領域外・艦艇の上陸は反転して棄却、地上の水域進入は棄却のみ）
//! 6. 棄却されなければ位置を確定
//! 7. 航空機のみ高度を揺らがせ、下限で切り詰める
//! 8. 時刻を更新

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::factory::EntityFactory;
use crate::geo::boundary::BoundaryIndex;
use crate::geo::sampler::random_point_near;
use crate::models::common::{math_utils, ScenarioBounds, NM_PER_DEGREE};
use crate::models::entity::{Affiliation, Domain, EmitterType, Entity};
use crate::models::traits::{INamingOracle, ITerrain};
use crate::naming::PlatformNamer;
use crate::scenario::{ScenarioBuilder, ScenarioDefinition};

/// 運動モデルの調整値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// 1刻みあたりの再目標設定確率
    pub retarget_probability: f64,
    /// 航空機の高度揺らぎ幅（±m）
    pub altitude_jitter_m: f64,
    /// 航空機の最低高度（m）
    pub min_altitude_m: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            retarget_probability: 0.05,
            altitude_jitter_m: 50.0,
            min_altitude_m: 100.0,
        }
    }
}

/// 1エンティティ・1刻みの移動結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 速度0のため移動なし
    Stationary,
    /// 新しい位置を確定
    Moved,
    /// 移動を棄却し方位を反転
    Reflected,
    /// 移動を棄却（方位は維持）
    Blocked,
}

/// 運動シミュレータ
pub struct MotionSimulator {
    terrain: Arc<dyn ITerrain>,
    bounds: ScenarioBounds,
    config: MotionConfig,
}

impl MotionSimulator {
    pub fn new(terrain: Arc<dyn ITerrain>, config: MotionConfig) -> Self {
        Self::with_bounds(terrain, ScenarioBounds::default(), config)
    }

    /// 再目標設定確率は [0, 1] に切り詰める（NaN は 0）
    pub fn with_bounds(
        terrain: Arc<dyn ITerrain>,
        bounds: ScenarioBounds,
        mut config: MotionConfig,
    ) -> Self {
        let p = config.retarget_probability;
        config.retarget_probability = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        Self { terrain, bounds, config }
    }

    pub fn bounds(&self) -> &ScenarioBounds {
        &self.bounds
    }

    /// 全エンティティを delta_ms だけ進める
    ///
    /// 各エンティティの位置・方位・時刻をその場で書き換える。
    pub fn advance(&self, entities: &mut [Entity], delta_ms: u64, now_ms: u64, rng: &mut SmallRng) {
        let mut reflected = 0usize;
        let mut blocked = 0usize;

        for entity in entities.iter_mut() {
            match self.step(entity, delta_ms, now_ms, rng) {
                MoveOutcome::Reflected => reflected += 1,
                MoveOutcome::Blocked => blocked += 1,
                MoveOutcome::Moved | MoveOutcome::Stationary => {}
            }
        }

        trace!("{}件を更新 (反転: {}, 停止: {})", entities.len(), reflected, blocked);
    }

    /// 1エンティティを1刻み進める
    pub fn step(
        &self,
        entity: &mut Entity,
        delta_ms: u64,
        now_ms: u64,
        rng: &mut SmallRng,
    ) -> MoveOutcome {
        if entity.is_stationary() {
            entity.last_update_ms = now_ms;
            return MoveOutcome::Stationary;
        }

        let delta_hours = delta_ms as f64 / 3_600_000.0;
        let distance_deg = entity.speed_kn * delta_hours / NM_PER_DEGREE;

        if rng.gen_bool(self.config.retarget_probability) {
            self.retarget(entity, rng);
        }

        let heading_rad = entity.heading.to_radians();
        let new_lat = entity.position.latitude + distance_deg * heading_rad.cos();
        let new_lon = entity.position.longitude + distance_deg * heading_rad.sin();

        let outcome = self.check_move(entity.domain, new_lat, new_lon);
        match outcome {
            MoveOutcome::Moved => {
                entity.position.latitude = new_lat;
                entity.position.longitude = new_lon;
            }
            MoveOutcome::Reflected => {
                entity.heading = math_utils::reverse_heading(entity.heading);
            }
            MoveOutcome::Blocked | MoveOutcome::Stationary => {}
        }

        if entity.domain == Domain::Air {
            self.jitter_altitude(entity, rng);
        }

        entity.last_update_ms = now_ms;
        outcome
    }

    /// 哨戒円内の新しい目標点へ方位を向け直す
    fn retarget(&self, entity: &mut Entity, rng: &mut SmallRng) {
        match entity.patrol {
            Some(patrol) => {
                let target = random_point_near(patrol.center, patrol.radius_km, rng);
                entity.heading = math_utils::heading_between(
                    entity.position.latitude,
                    entity.position.longitude,
                    target.lat,
                    target.lon,
                );
                entity.waypoint = Some(target);
            }
            None => {
                entity.heading = rng.gen_range(0.0..360.0);
            }
        }
    }

    /// 射影位置の妥当性判定
    fn check_move(&self, domain: Domain, lat: f64, lon: f64) -> MoveOutcome {
        if !self.bounds.contains(lat, lon) {
            return MoveOutcome::Reflected;
        }

        match domain {
            Domain::Maritime if !self.terrain.is_in_water(lat, lon) => MoveOutcome::Reflected,
            Domain::Land if !self.terrain.is_on_land(lat, lon) => MoveOutcome::Blocked,
            _ => MoveOutcome::Moved,
        }
    }

    fn jitter_altitude(&self, entity: &mut Entity, rng: &mut SmallRng) {
        let jitter = self.config.altitude_jitter_m;
        let delta = if jitter > 0.0 { rng.gen_range(-jitter..=jitter) } else { 0.0 };
        entity.position.altitude =
            (entity.position.altitude + delta).max(self.config.min_altitude_m);
    }
}

/// 母集団の内訳
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulationStats {
    pub total: usize,
    pub by_domain: BTreeMap<&'static str, usize>,
    pub by_affiliation: BTreeMap<&'static str, usize>,
    pub by_emitter: BTreeMap<&'static str, usize>,
}

impl PopulationStats {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut stats = Self {
            total: entities.len(),
            ..Self::default()
        };
        for entity in entities {
            *stats.by_domain.entry(entity.domain.as_str()).or_insert(0) += 1;
            *stats.by_affiliation.entry(entity.affiliation.as_str()).or_insert(0) += 1;
            *stats.by_emitter.entry(entity.emitter_type.as_str()).or_insert(0) += 1;
        }
        stats
    }

    pub fn domain(&self, domain: Domain) -> usize {
        self.by_domain.get(domain.as_str()).copied().unwrap_or(0)
    }

    pub fn affiliation(&self, affiliation: Affiliation) -> usize {
        self.by_affiliation.get(affiliation.as_str()).copied().unwrap_or(0)
    }

    pub fn emitter(&self, emitter: EmitterType) -> usize {
        self.by_emitter.get(emitter.as_str()).copied().unwrap_or(0)
    }
}

/// シミュレーション本体
///
/// 現在の母集団・模擬時計・乱数生成器・命名オラクルを単一所有者として保持します。
/// シナリオの再構築は母集団をまるごと差し替えます。
pub struct Simulation {
    builder: ScenarioBuilder,
    motion: MotionSimulator,
    namer: Box<dyn INamingOracle>,
    rng: SmallRng,
    clock_ms: u64,
    scenario: Option<&'static ScenarioDefinition>,
    entities: Vec<Entity>,
    tick_count: u64,
}

impl Simulation {
    /// 既定の南シナ海の陸地モデルで作成
    pub fn new(seed: u64, motion: MotionConfig, start_ms: u64) -> Self {
        Self::with_terrain(Arc::new(BoundaryIndex::default_region()), seed, motion, start_ms)
    }

    pub fn with_terrain(
        terrain: Arc<dyn ITerrain>,
        seed: u64,
        motion: MotionConfig,
        start_ms: u64,
    ) -> Self {
        Self {
            builder: ScenarioBuilder::new(EntityFactory::new(Arc::clone(&terrain))),
            motion: MotionSimulator::new(terrain, motion),
            namer: Box::new(PlatformNamer::new()),
            rng: SmallRng::seed_from_u64(seed),
            clock_ms: start_ms,
            scenario: None,
            entities: Vec::new(),
            tick_count: 0,
        }
    }

    /// シナリオを構築して母集団を差し替える
    pub fn build_scenario(&mut self, key: &str) -> &[Entity] {
        let (scenario, entities) =
            self.builder.build(key, self.namer.as_mut(), &mut self.rng, self.clock_ms);
        self.scenario = Some(scenario);
        self.entities = entities;
        self.tick_count = 0;
        info!("母集団を差し替え: {} ({}件)", scenario.key, self.entities.len());
        &self.entities
    }

    /// 模擬時計と母集団を delta_ms だけ進める
    pub fn tick(&mut self, delta_ms: u64) {
        self.clock_ms += delta_ms;
        self.motion.advance(&mut self.entities, delta_ms, self.clock_ms, &mut self.rng);
        self.tick_count += 1;

        if self.tick_count % 60 == 0 {
            debug!("ティック {} (エンティティ: {}件)", self.tick_count, self.entities.len());
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// 母集団の複製
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_entities(&self.entities)
    }

    pub fn scenario_key(&self) -> Option<&'static str> {
        self.scenario.map(|s| s.key)
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{GeoPoint, Position, Terrain};
    use crate::models::entity::{EntityType, FrequencyRange, Patrol};
    use uuid::Uuid;

    struct AllWater;

    impl ITerrain for AllWater {
        fn classify(&self, _lat: f64, _lon: f64) -> Terrain {
            Terrain::Water
        }
    }

    struct AllLand;

    impl ITerrain for AllLand {
        fn classify(&self, _lat: f64, _lon: f64) -> Terrain {
            Terrain::Land
        }
    }

    fn entity(domain: Domain, lat: f64, lon: f64, heading: f64, speed_kn: f64) -> Entity {
        Entity {
            id: Uuid::nil(),
            name: "TEST".to_string(),
            domain,
            affiliation: Affiliation::Friendly,
            nationality: "USA".to_string(),
            position: Position::new(lat, lon, if domain == Domain::Air { 5000.0 } else { 0.0 }),
            heading,
            speed_kn,
            platform_type: "Test Platform".to_string(),
            callsign: "TEST".to_string(),
            entity_type: EntityType::Emitter,
            emitter_type: EmitterType::Radar,
            frequency: FrequencyRange { avg_mhz: 3000.0, min_mhz: 2900.0, max_mhz: 3100.0 },
            patrol: Some(Patrol {
                center: GeoPoint::new(lat, lon),
                radius_km: domain.patrol_radius_km(),
            }),
            waypoint: None,
            near_landmark: "Test".to_string(),
            last_update_ms: 0,
        }
    }

    fn no_retarget() -> MotionConfig {
        MotionConfig { retarget_probability: 0.0, ..MotionConfig::default() }
    }

    #[test]
    fn test_dead_reckoning_north() {
        let motion = MotionSimulator::new(Arc::new(AllWater), no_retarget());
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ship = entity(Domain::Maritime, 12.0, 114.0, 0.0, 60.0);

        // 60ノットで1時間 = 60海里 = 1度
        let outcome = motion.step(&mut ship, 3_600_000, 3_600_000, &mut rng);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert!((ship.position.latitude - 13.0).abs() < 1e-9);
        assert!((ship.position.longitude - 114.0).abs() < 1e-9);
        assert_eq!(ship.last_update_ms, 3_600_000);
    }

    #[test]
    fn test_reflect_at_scenario_bound() {
        let motion = MotionSimulator::new(Arc::new(AllWater), no_retarget());
        let mut rng = SmallRng::seed_from_u64(2);
        let max_lat = motion.bounds().max_lat;
        let mut jet = entity(Domain::Air, max_lat - 0.001, 114.0, 0.0, 600.0);
        let before = jet.position.point();

        let outcome = motion.step(&mut jet, 1_000, 1_000, &mut rng);

        assert_eq!(outcome, MoveOutcome::Reflected);
        assert_eq!(jet.heading, 180.0);
        assert_eq!(jet.position.point(), before);
    }

    #[test]
    fn test_ship_reflects_at_coast() {
        let motion = MotionSimulator::new(Arc::new(AllLand), no_retarget());
        let mut rng = SmallRng::seed_from_u64(3);
        let mut ship = entity(Domain::Maritime, 12.0, 114.0, 90.0, 20.0);

        let outcome = motion.step(&mut ship, 1_000, 1_000, &mut rng);

        assert_eq!(outcome, MoveOutcome::Reflected);
        assert_eq!(ship.heading, 270.0);
        assert_eq!(ship.position.point(), GeoPoint::new(12.0, 114.0));
    }

    #[test]
    fn test_land_unit_blocked_at_shore_keeps_heading() {
        let motion = MotionSimulator::new(Arc::new(AllWater), no_retarget());
        let mut rng = SmallRng::seed_from_u64(4);
        let mut tel = entity(Domain::Land, 12.0, 109.0, 45.0, 20.0);

        let outcome = motion.step(&mut tel, 1_000, 1_000, &mut rng);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(tel.heading, 45.0);
        assert_eq!(tel.position.point(), GeoPoint::new(12.0, 109.0));
        assert_eq!(tel.last_update_ms, 1_000);
    }

    #[test]
    fn test_stationary_only_refreshes_timestamp() {
        let motion = MotionSimulator::new(Arc::new(AllLand), MotionConfig::default());
        let mut rng = SmallRng::seed_from_u64(5);
        let mut sam = entity(Domain::Land, 20.0, 110.0, 10.0, 0.0);

        for tick in 1..=100 {
            let outcome = motion.step(&mut sam, 1_000, tick * 1_000, &mut rng);
            assert_eq!(outcome, MoveOutcome::Stationary);
        }
        assert_eq!(sam.position.point(), GeoPoint::new(20.0, 110.0));
        assert_eq!(sam.heading, 10.0);
        assert_eq!(sam.last_update_ms, 100_000);
    }

    #[test]
    fn test_retarget_points_toward_patrol_waypoint() {
        let config = MotionConfig { retarget_probability: 1.0, ..MotionConfig::default() };
        let motion = MotionSimulator::new(Arc::new(AllWater), config);
        let mut rng = SmallRng::seed_from_u64(6);
        let mut ship = entity(Domain::Maritime, 12.0, 114.0, 0.0, 20.0);
        ship.position.latitude = 12.3;

        motion.step(&mut ship, 1_000, 1_000, &mut rng);

        let waypoint = ship.waypoint.expect("waypoint");
        let center = ship.patrol.unwrap().center;
        assert!(waypoint.distance_km(&center) <= 50.0 * 1.01);
        assert!((0.0..360.0).contains(&ship.heading));
    }

    #[test]
    fn test_out_of_range_probability_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(8);

        let config = MotionConfig { retarget_probability: 5.0, ..MotionConfig::default() };
        let eager = MotionSimulator::new(Arc::new(AllWater), config);
        let mut ship = entity(Domain::Maritime, 12.0, 114.0, 0.0, 20.0);
        eager.step(&mut ship, 1_000, 1_000, &mut rng);
        assert!(ship.waypoint.is_some());

        for p in [-1.0, f64::NAN] {
            let config = MotionConfig { retarget_probability: p, ..MotionConfig::default() };
            let idle = MotionSimulator::new(Arc::new(AllWater), config);
            let mut ship = entity(Domain::Maritime, 12.0, 114.0, 0.0, 20.0);
            for tick in 1..=50 {
                idle.step(&mut ship, 1_000, tick * 1_000, &mut rng);
            }
            assert!(ship.waypoint.is_none());
            assert_eq!(ship.heading, 0.0);
        }
    }

    #[test]
    fn test_altitude_floor() {
        let config = MotionConfig {
            retarget_probability: 0.0,
            altitude_jitter_m: 50.0,
            min_altitude_m: 100.0,
        };
        let motion = MotionSimulator::new(Arc::new(AllWater), config);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut helo = entity(Domain::Air, 12.0, 114.0, 90.0, 100.0);
        helo.position.altitude = 100.0;

        for tick in 1..=200 {
            motion.step(&mut helo, 1_000, tick * 1_000, &mut rng);
            assert!(helo.position.altitude >= 100.0);
            assert!(helo.position.altitude <= 100.0 + 50.0 * tick as f64);
        }
    }

    #[test]
    fn test_simulation_tick_advances_clock() {
        let mut sim = Simulation::new(42, MotionConfig::default(), 1_000);
        sim.build_scenario("stress-tiny");
        assert_eq!(sim.entities().len(), 100);
        assert!(sim.entities().iter().all(|e| e.last_update_ms == 1_000));

        sim.tick(1_000);
        sim.tick(1_000);

        assert_eq!(sim.clock_ms(), 3_000);
        assert_eq!(sim.tick_count(), 2);
        assert!(sim.entities().iter().all(|e| e.last_update_ms == 3_000));
    }

    #[test]
    fn test_rebuild_replaces_population() {
        let mut sim = Simulation::new(43, MotionConfig::default(), 0);
        let first = sim.build_scenario("stress-tiny").to_vec();
        let second = sim.build_scenario("contested-maritime").to_vec();

        assert_eq!(sim.scenario_key(), Some("contested-maritime"));
        assert_eq!(second.len(), 80);
        assert!(second.iter().all(|e| first.iter().all(|f| f.id != e.id)));
    }

    #[test]
    fn test_stats_breakdown() {
        let mut sim = Simulation::new(44, MotionConfig::default(), 0);
        sim.build_scenario("stress-tiny");
        let stats = sim.stats();

        assert_eq!(stats.total, 100);
        assert_eq!(stats.domain(Domain::Air), 30);
        assert_eq!(stats.domain(Domain::Maritime), 45);
        assert_eq!(stats.domain(Domain::Land), 25);
        assert_eq!(stats.affiliation(Affiliation::Neutral), 15);
        assert_eq!(EmitterType::ALL.iter().map(|e| stats.emitter(*e)).sum::<usize>(), 100);
    }

    #[test]
    fn test_same_seed_same_population() {
        let build = || {
            let mut sim = Simulation::new(99, MotionConfig::default(), 0);
            sim.build_scenario("stress-tiny");
            sim.tick(1_000);
            sim.snapshot()
        };
        assert_eq!(build(), build());
    }
}
