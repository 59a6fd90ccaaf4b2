//! # LocationSampler
//!
//! エンティティのドメインと所属に応じたスポーン位置を棄却サンプリングで決定します。
//!
//! 陸地・水域の境界は不規則で、概略ポリゴン集合に対する閉形式の逆変換サンプリングは
//! 存在しないため、参照地点の周辺に候補点を提案し、ドメインの制約を満たすものだけを
//! 採用します。
//!
//! ## ドメイン別の提案方法
//!
//! - **MARITIME**: 30% 海軍基地付近（所属で国を絞り込み）、30% 航路上
//!   （回廊幅以内の横方向ジッター）、40% 外洋海域。WATER のみ採用
//! - **LAND**: 所属で絞り込んだ陸上軍事施設の付近。LAND のみ採用
//! - **AIR**: 40% 飛行場付近（最大100km）、60% 外洋海域。常に採用
//!
//! 試行回数は1回の呼び出しにつき最大100回で、尽きた場合は海域中心付近の
//! フォールバック点を返します。失敗として呼び出し元に伝播することはありません。

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::geo::catalog::{
    sites_of, Country, ReferenceSite, SiteKind, FALLBACK_CENTER, FALLBACK_JITTER_DEG,
    FALLBACK_LANDMARK, SHIPPING_LANES,
};
use crate::models::common::{math_utils, GeoPoint, ScenarioBounds, SCENARIO_BOUNDS};
use crate::models::entity::{Affiliation, Domain};
use crate::models::traits::ITerrain;

/// 1回のサンプリングで許される提案回数
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// 海軍基地からの最大距離（km）
const NAVAL_BASE_RADIUS_KM: f64 = 30.0;
/// 陸上施設からの最大距離（km）
const LAND_SITE_RADIUS_KM: f64 = 20.0;
/// 飛行場からの最大距離（km）
const AIRFIELD_RADIUS_KM: f64 = 100.0;

const FRIENDLY_COUNTRIES: &[Country] =
    &[Country::Usa, Country::Japan, Country::Taiwan, Country::Philippines];
const HOSTILE_MARITIME_AIR_COUNTRIES: &[Country] = &[Country::China];
const HOSTILE_LAND_COUNTRIES: &[Country] = &[Country::China, Country::Vietnam];

/// 採用されたスポーン位置
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub point: GeoPoint,
    /// 近傍の参照地点・航路名
    pub near: String,
    /// 試行予算を使い切ってフォールバックしたか
    pub fallback: bool,
}

impl Placement {
    fn near_site(point: GeoPoint, site: &ReferenceSite) -> Self {
        Self { point, near: site.name.to_string(), fallback: false }
    }
}

/// 所属と地点種別に対する国フィルタ（None は絞り込みなし）
pub fn country_filter(kind: SiteKind, affiliation: Affiliation) -> Option<&'static [Country]> {
    match (affiliation, kind) {
        (Affiliation::Friendly, _) => Some(FRIENDLY_COUNTRIES),
        (Affiliation::Hostile, SiteKind::LandMilitary) => Some(HOSTILE_LAND_COUNTRIES),
        (Affiliation::Hostile, _) => Some(HOSTILE_MARITIME_AIR_COUNTRIES),
        (Affiliation::Neutral | Affiliation::Unknown, _) => None,
    }
}

/// 国フィルタを適用した参照地点一覧
pub fn eligible_sites(kind: SiteKind, affiliation: Affiliation) -> Vec<&'static ReferenceSite> {
    let sites = sites_of(kind);
    match country_filter(kind, affiliation) {
        Some(countries) => sites.iter().filter(|s| countries.contains(&s.country)).collect(),
        None => sites.iter().collect(),
    }
}

/// 中心から半径 radius_km 以内のランダムな点（一様な角度、一様な距離）
pub fn random_point_near(center: GeoPoint, radius_km: f64, rng: &mut SmallRng) -> GeoPoint {
    let radius_deg = math_utils::km_to_deg(radius_km);
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(0.0..=radius_deg);
    GeoPoint::new(
        center.lat + distance * angle.cos(),
        center.lon + distance * angle.sin(),
    )
}

fn pick<'a, T>(items: &'a [T], rng: &mut SmallRng) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

/// スポーン位置サンプラー
pub struct LocationSampler {
    terrain: Arc<dyn ITerrain>,
    bounds: ScenarioBounds,
    max_attempts: u32,
}

impl LocationSampler {
    pub fn new(terrain: Arc<dyn ITerrain>) -> Self {
        Self::with_bounds(terrain, SCENARIO_BOUNDS)
    }

    pub fn with_bounds(terrain: Arc<dyn ITerrain>, bounds: ScenarioBounds) -> Self {
        Self { terrain, bounds, max_attempts: MAX_PLACEMENT_ATTEMPTS }
    }

    pub fn bounds(&self) -> &ScenarioBounds {
        &self.bounds
    }

    /// ドメインと所属に応じたスポーン位置を返す
    ///
    /// 提案ループは明示的な試行カウンタで打ち切られ、必ず終了します。
    pub fn sample(
        &self,
        domain: Domain,
        affiliation: Affiliation,
        rng: &mut SmallRng,
    ) -> Placement {
        let mut attempts = 0;

        while attempts < self.max_attempts {
            attempts += 1;

            let candidate = match domain {
                Domain::Maritime => self.propose_maritime(affiliation, rng),
                Domain::Land => self.propose_land(affiliation, rng),
                Domain::Air => self.propose_air(affiliation, rng),
            };

            if let Some(placement) = candidate {
                return placement;
            }
        }

        debug!("配置試行が上限に達しました: {} {} ({}回)", domain, affiliation, attempts);
        self.fallback(rng)
    }

    /// 試行予算を使い切ったときのフォールバック点
    pub fn fallback(&self, rng: &mut SmallRng) -> Placement {
        let half = FALLBACK_JITTER_DEG / 2.0;
        let point = self.bounds.clamp(
            FALLBACK_CENTER.lat + rng.gen_range(-half..half),
            FALLBACK_CENTER.lon + rng.gen_range(-half..half),
        );
        Placement { point, near: FALLBACK_LANDMARK.to_string(), fallback: true }
    }

    fn propose_maritime(&self, affiliation: Affiliation, rng: &mut SmallRng) -> Option<Placement> {
        let source: f64 = rng.gen_range(0.0..1.0);

        let placement = if source < 0.3 {
            // 海軍基地付近
            let bases = eligible_sites(SiteKind::NavalBase, affiliation);
            let base = *pick(&bases, rng)?;
            let point = random_point_near(base.location, NAVAL_BASE_RADIUS_KM, rng);
            Placement::near_site(point, base)
        } else if source < 0.6 {
            // 航路上
            let lane = pick(SHIPPING_LANES, rng)?;
            let segment = rng.gen_range(0..lane.waypoints.len() - 1);
            let start = lane.waypoints[segment];
            let end = lane.waypoints[segment + 1];

            let t = rng.gen_range(0.0..=1.0);
            let lat = start.lat + t * (end.lat - start.lat);
            let lon = start.lon + t * (end.lon - start.lon);

            // 区間に直交する方向へ回廊幅以内でずらす
            let (d_lat, d_lon) = (end.lat - start.lat, end.lon - start.lon);
            let length = (d_lat * d_lat + d_lon * d_lon).sqrt();
            let half_width = math_utils::km_to_deg(lane.width_km) / 2.0;
            let offset = rng.gen_range(-half_width..=half_width);
            let point = if length > 0.0 {
                GeoPoint::new(lat - offset * d_lon / length, lon + offset * d_lat / length)
            } else {
                GeoPoint::new(lat, lon)
            };
            Placement { point, near: lane.name.to_string(), fallback: false }
        } else {
            // 外洋
            let zone = pick(sites_of(SiteKind::OceanZone), rng)?;
            let point = random_point_near(zone.location, zone.radius_km, rng);
            Placement::near_site(point, zone)
        };

        let GeoPoint { lat, lon } = placement.point;
        (self.bounds.contains(lat, lon) && self.terrain.is_in_water(lat, lon)).then_some(placement)
    }

    fn propose_land(&self, affiliation: Affiliation, rng: &mut SmallRng) -> Option<Placement> {
        let sites = eligible_sites(SiteKind::LandMilitary, affiliation);
        // 該当施設がなければこの試行は飛ばす（予算は消費する）
        let site = *pick(&sites, rng)?;
        let point = random_point_near(site.location, LAND_SITE_RADIUS_KM, rng);

        let GeoPoint { lat, lon } = point;
        (self.bounds.contains(lat, lon) && self.terrain.is_on_land(lat, lon))
            .then(|| Placement::near_site(point, site))
    }

    fn propose_air(&self, affiliation: Affiliation, rng: &mut SmallRng) -> Option<Placement> {
        let source: f64 = rng.gen_range(0.0..1.0);

        let (point, site) = if source < 0.4 {
            let airfields = eligible_sites(SiteKind::Airfield, affiliation);
            let airfield = *pick(&airfields, rng)?;
            (random_point_near(airfield.location, AIRFIELD_RADIUS_KM, rng), airfield)
        } else {
            let zone = pick(sites_of(SiteKind::OceanZone), rng)?;
            (random_point_near(zone.location, zone.radius_km, rng), zone)
        };

        // 航空機は地形を問わないが、シナリオ領域内には収める
        let point = self.bounds.clamp(point.lat, point.lon);
        Some(Placement::near_site(point, site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::boundary::BoundaryIndex;
    use crate::geo::catalog::{AIRFIELDS, NAVAL_BASES};
    use crate::models::common::Terrain;
    use rand::SeedableRng;

    fn sampler() -> LocationSampler {
        LocationSampler::new(Arc::new(BoundaryIndex::default_region()))
    }

    struct AllLand;

    impl ITerrain for AllLand {
        fn classify(&self, _lat: f64, _lon: f64) -> Terrain {
            Terrain::Land
        }
    }

    #[test]
    fn test_country_filters_are_disjoint() {
        let friendly = country_filter(SiteKind::NavalBase, Affiliation::Friendly).unwrap();
        let hostile = country_filter(SiteKind::NavalBase, Affiliation::Hostile).unwrap();
        assert!(friendly.iter().all(|c| !hostile.contains(c)));

        let hostile_land = country_filter(SiteKind::LandMilitary, Affiliation::Hostile).unwrap();
        assert!(friendly.iter().all(|c| !hostile_land.contains(c)));

        assert!(country_filter(SiteKind::Airfield, Affiliation::Neutral).is_none());
        assert!(country_filter(SiteKind::Airfield, Affiliation::Unknown).is_none());
    }

    #[test]
    fn test_eligible_sites_respect_affiliation() {
        let hostile = eligible_sites(SiteKind::Airfield, Affiliation::Hostile);
        assert!(!hostile.is_empty());
        assert!(hostile.iter().all(|s| s.country == Country::China));

        let neutral = eligible_sites(SiteKind::Airfield, Affiliation::Neutral);
        assert_eq!(neutral.len(), AIRFIELDS.len());
    }

    #[test]
    fn test_random_point_near_stays_within_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        let center = GeoPoint::new(12.0, 112.0);
        for _ in 0..1000 {
            let p = random_point_near(center, 50.0, &mut rng);
            let d = ((p.lat - center.lat).powi(2) + (p.lon - center.lon).powi(2)).sqrt();
            assert!(d <= 50.0 / 111.0 + 1e-12);
        }
    }

    #[test]
    fn test_maritime_samples_are_in_water_and_bounds() {
        let sampler = sampler();
        let index = BoundaryIndex::default_region();
        let mut rng = SmallRng::seed_from_u64(42);

        for affiliation in [Affiliation::Friendly, Affiliation::Hostile, Affiliation::Neutral] {
            for _ in 0..300 {
                let placement = sampler.sample(Domain::Maritime, affiliation, &mut rng);
                let GeoPoint { lat, lon } = placement.point;
                assert!(sampler.bounds().contains(lat, lon));
                if !placement.fallback {
                    assert!(index.is_in_water(lat, lon));
                }
            }
        }
    }

    #[test]
    fn test_land_samples_are_on_land() {
        let sampler = sampler();
        let index = BoundaryIndex::default_region();
        let mut rng = SmallRng::seed_from_u64(43);

        for affiliation in [Affiliation::Friendly, Affiliation::Hostile, Affiliation::Neutral] {
            for _ in 0..300 {
                let placement = sampler.sample(Domain::Land, affiliation, &mut rng);
                assert!(!placement.fallback);
                assert!(index.is_on_land(placement.point.lat, placement.point.lon));
            }
        }
    }

    #[test]
    fn test_hostile_land_uses_hostile_sites() {
        let sampler = sampler();
        let mut rng = SmallRng::seed_from_u64(44);
        let names: Vec<&str> = eligible_sites(SiteKind::LandMilitary, Affiliation::Hostile)
            .iter()
            .map(|s| s.name)
            .collect();

        for _ in 0..100 {
            let placement = sampler.sample(Domain::Land, Affiliation::Hostile, &mut rng);
            assert!(names.contains(&placement.near.as_str()), "{}", placement.near);
        }
    }

    #[test]
    fn test_air_samples_are_always_accepted_inside_bounds() {
        let sampler = sampler();
        let mut rng = SmallRng::seed_from_u64(45);
        for _ in 0..500 {
            let placement = sampler.sample(Domain::Air, Affiliation::Friendly, &mut rng);
            assert!(!placement.fallback);
            assert!(sampler.bounds().contains(placement.point.lat, placement.point.lon));
        }
    }

    #[test]
    fn test_exhausted_budget_returns_fallback() {
        // 全域が陸地なら艦艇は配置できない
        let sampler = LocationSampler::new(Arc::new(AllLand));
        let mut rng = SmallRng::seed_from_u64(46);
        let placement = sampler.sample(Domain::Maritime, Affiliation::Neutral, &mut rng);

        assert!(placement.fallback);
        assert_eq!(placement.near, FALLBACK_LANDMARK);
        assert!((placement.point.lat - FALLBACK_CENTER.lat).abs() <= FALLBACK_JITTER_DEG / 2.0);
        assert!((placement.point.lon - FALLBACK_CENTER.lon).abs() <= FALLBACK_JITTER_DEG / 2.0);
    }

    /// 点から線分までの距離（度、平面近似）
    fn distance_to_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
        let (d_lat, d_lon) = (b.lat - a.lat, b.lon - a.lon);
        let length_sq = d_lat * d_lat + d_lon * d_lon;
        let t = if length_sq > 0.0 {
            (((p.lat - a.lat) * d_lat + (p.lon - a.lon) * d_lon) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (lat, lon) = (a.lat + t * d_lat, a.lon + t * d_lon);
        ((p.lat - lat).powi(2) + (p.lon - lon).powi(2)).sqrt()
    }

    #[test]
    fn test_lane_placements_stay_inside_corridor() {
        let sampler = sampler();
        let mut rng = SmallRng::seed_from_u64(47);
        let mut lane_hits = 0;

        for _ in 0..3000 {
            let placement = sampler.sample(Domain::Maritime, Affiliation::Neutral, &mut rng);
            let Some(lane) = SHIPPING_LANES.iter().find(|l| l.name == placement.near) else {
                continue;
            };
            lane_hits += 1;

            let nearest = lane
                .waypoints
                .windows(2)
                .map(|w| distance_to_segment(placement.point, w[0], w[1]))
                .fold(f64::MAX, f64::min);
            let half_width = lane.width_km / 2.0 / 111.0;
            assert!(
                nearest <= half_width + 1e-9,
                "{} is {} deg off {}",
                placement.near,
                nearest,
                lane.name
            );
        }
        assert!(lane_hits > 100, "only {} lane placements", lane_hits);
    }

    #[test]
    fn test_hostile_maritime_and_air_anchor_on_chinese_sites() {
        let sampler = sampler();
        let mut rng = SmallRng::seed_from_u64(48);
        let mut anchored = 0;

        for domain in [Domain::Maritime, Domain::Air] {
            for _ in 0..1000 {
                let placement = sampler.sample(domain, Affiliation::Hostile, &mut rng);
                let site = NAVAL_BASES
                    .iter()
                    .chain(AIRFIELDS.iter())
                    .find(|s| s.name == placement.near);
                if let Some(site) = site {
                    anchored += 1;
                    assert_eq!(site.country, Country::China, "{} {}", domain, site.name);
                }
            }
        }
        assert!(anchored > 0);
    }
}
