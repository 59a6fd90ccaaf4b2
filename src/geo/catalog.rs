//! 参照地点・航路・陸地ポリゴンの静的カタログ
//!
//! いずれも南シナ海周辺の概略データであり、権威あるGISデータではありません。
//! 起動時に一度だけ読み込まれ、全てのサンプリング呼び出しで参照共有されます。

use crate::models::common::GeoPoint;

/// 参照地点の国・ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    China,
    Vietnam,
    Philippines,
    Taiwan,
    Usa,
    Japan,
    International,
}

/// 参照地点の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    NavalBase,
    Airfield,
    LandMilitary,
    OceanZone,
}

/// 名前付きの参照地点（基地、飛行場、陸上施設、海域）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSite {
    pub name: &'static str,
    pub location: GeoPoint,
    pub kind: SiteKind,
    pub country: Country,
    /// 影響半径（km）
    pub radius_km: f64,
}

/// 航路（ウェイポイント列と回廊幅）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingLane {
    pub name: &'static str,
    pub waypoints: &'static [GeoPoint],
    /// 回廊幅（km）
    pub width_km: f64,
}

/// 簡略化した陸地輪郭（頂点は暗黙に閉じたリング）
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    pub name: String,
    pub is_land: bool,
    pub vertices: Vec<GeoPoint>,
}

impl RegionPolygon {
    pub fn new(name: impl Into<String>, is_land: bool, vertices: Vec<GeoPoint>) -> Self {
        Self { name: name.into(), is_land, vertices }
    }

    /// 緯度経度の矩形から陸地ポリゴンを作る
    pub fn land_box(
        name: impl Into<String>,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Self {
        Self::new(
            name,
            true,
            vec![
                GeoPoint::new(min_lat, min_lon),
                GeoPoint::new(max_lat, min_lon),
                GeoPoint::new(max_lat, max_lon),
                GeoPoint::new(min_lat, max_lon),
            ],
        )
    }
}

const fn site(
    lat: f64,
    lon: f64,
    name: &'static str,
    kind: SiteKind,
    country: Country,
    radius_km: f64,
) -> ReferenceSite {
    ReferenceSite { name, location: GeoPoint::new(lat, lon), kind, country, radius_km }
}

use Country::*;
use SiteKind::*;

/// 主要な港湾・海軍基地
pub static NAVAL_BASES: &[ReferenceSite] = &[
    site(18.2, 109.5, "Yulin Naval Base", NavalBase, China, 15.0),
    site(21.5, 111.8, "Zhanjiang Naval Base", NavalBase, China, 12.0),
    site(22.5, 114.1, "Hong Kong", NavalBase, China, 8.0),
    site(15.0, 109.5, "Woody Island (Yongxing)", NavalBase, China, 3.0),
    site(9.9, 114.4, "Fiery Cross Reef", NavalBase, China, 2.0),
    site(10.4, 114.0, "Subi Reef", NavalBase, China, 2.0),
    site(10.5, 115.8, "Mischief Reef", NavalBase, China, 2.0),
    site(16.1, 108.2, "Da Nang", NavalBase, Vietnam, 10.0),
    site(12.2, 109.2, "Cam Ranh Bay", NavalBase, Vietnam, 12.0),
    site(10.8, 106.7, "Ho Chi Minh City", NavalBase, Vietnam, 8.0),
    site(14.5, 120.9, "Manila Bay", NavalBase, Philippines, 10.0),
    site(14.8, 120.3, "Subic Bay", NavalBase, Philippines, 8.0),
    site(9.8, 118.7, "Puerto Princesa", NavalBase, Philippines, 5.0),
    site(22.6, 120.3, "Kaohsiung", NavalBase, Taiwan, 10.0),
    site(25.1, 121.8, "Keelung", NavalBase, Taiwan, 8.0),
    site(13.4, 144.8, "Guam Naval Base", NavalBase, Usa, 15.0),
    site(26.3, 127.8, "Okinawa", NavalBase, Japan, 12.0),
];

/// 主要な飛行場・空軍基地
pub static AIRFIELDS: &[ReferenceSite] = &[
    site(18.2, 109.4, "Sanya-Phoenix AFB", Airfield, China, 8.0),
    site(21.2, 110.4, "Zhanjiang AFB", Airfield, China, 8.0),
    site(23.4, 113.3, "Guangzhou AFB", Airfield, China, 10.0),
    site(15.0, 109.5, "Woody Island Airstrip", Airfield, China, 2.0),
    site(9.9, 114.4, "Fiery Cross Airstrip", Airfield, China, 2.0),
    site(16.0, 108.2, "Da Nang AFB", Airfield, Vietnam, 6.0),
    site(12.0, 109.2, "Cam Ranh AFB", Airfield, Vietnam, 6.0),
    site(21.2, 105.8, "Hanoi (Noi Bai)", Airfield, Vietnam, 8.0),
    site(15.2, 120.6, "Clark AFB", Airfield, Philippines, 10.0),
    site(14.5, 121.0, "Villamor AFB", Airfield, Philippines, 6.0),
    site(9.8, 118.8, "Palawan AFB", Airfield, Philippines, 5.0),
    site(24.0, 121.6, "Hualien AFB", Airfield, Taiwan, 6.0),
    site(23.5, 120.4, "Tainan AFB", Airfield, Taiwan, 6.0),
    site(25.1, 121.3, "Taipei (Songshan)", Airfield, Taiwan, 8.0),
    site(13.6, 144.9, "Andersen AFB (Guam)", Airfield, Usa, 10.0),
    site(26.3, 127.8, "Kadena AFB (Okinawa)", Airfield, Japan, 12.0),
];

/// 陸上軍事施設（SAMサイト、レーダーサイト、C2ノード）
pub static LAND_MILITARY_SITES: &[ReferenceSite] = &[
    site(19.0, 110.3, "Hainan SAM Site Alpha", LandMilitary, China, 3.0),
    site(18.5, 109.8, "Hainan Radar Station", LandMilitary, China, 2.0),
    site(21.8, 111.0, "Leizhou SAM Battery", LandMilitary, China, 3.0),
    site(22.8, 113.5, "Shenzhen C2 Node", LandMilitary, China, 2.0),
    site(23.1, 113.2, "Guangzhou Radar", LandMilitary, China, 2.0),
    site(16.5, 107.6, "Hue SAM Site", LandMilitary, Vietnam, 3.0),
    site(11.9, 109.0, "Nha Trang Radar", LandMilitary, Vietnam, 2.0),
    site(12.5, 109.5, "Cam Ranh SAM", LandMilitary, Vietnam, 3.0),
    site(14.9, 120.5, "Zambales Radar", LandMilitary, Philippines, 2.0),
    site(15.5, 120.0, "Northern Luzon C2", LandMilitary, Philippines, 2.0),
    site(24.5, 121.0, "Taipei SAM Network", LandMilitary, Taiwan, 5.0),
    site(22.8, 120.5, "Kaohsiung Radar", LandMilitary, Taiwan, 3.0),
    site(23.5, 121.5, "East Coast Surveillance", LandMilitary, Taiwan, 4.0),
];

/// 外洋の海域
pub static OCEAN_ZONES: &[ReferenceSite] = &[
    site(12.0, 112.0, "Central South China Sea", OceanZone, International, 200.0),
    site(8.0, 110.0, "Southern SCS", OceanZone, International, 150.0),
    site(16.0, 115.0, "Northern SCS", OceanZone, International, 150.0),
    site(18.0, 118.0, "Philippine Sea West", OceanZone, International, 100.0),
    site(20.0, 125.0, "Philippine Sea", OceanZone, International, 200.0),
];

/// 主要航路
pub static SHIPPING_LANES: &[ShippingLane] = &[
    ShippingLane {
        name: "Strait of Malacca to Hong Kong",
        waypoints: &[
            GeoPoint::new(1.3, 104.0),
            GeoPoint::new(5.0, 105.0),
            GeoPoint::new(10.0, 110.0),
            GeoPoint::new(15.0, 113.0),
            GeoPoint::new(22.5, 114.1),
        ],
        width_km: 50.0,
    },
    ShippingLane {
        name: "Taiwan Strait",
        waypoints: &[
            GeoPoint::new(22.5, 118.0),
            GeoPoint::new(24.0, 119.0),
            GeoPoint::new(25.5, 120.0),
        ],
        width_km: 30.0,
    },
    ShippingLane {
        name: "Luzon Strait",
        waypoints: &[
            GeoPoint::new(18.0, 120.0),
            GeoPoint::new(20.0, 121.5),
            GeoPoint::new(22.0, 122.0),
        ],
        width_km: 60.0,
    },
    ShippingLane {
        name: "Spratly Islands Patrol",
        waypoints: &[
            GeoPoint::new(8.0, 112.0),
            GeoPoint::new(10.0, 114.0),
            GeoPoint::new(12.0, 116.0),
            GeoPoint::new(10.0, 118.0),
            GeoPoint::new(8.0, 115.0),
        ],
        width_km: 40.0,
    },
];

/// 配置の最終手段として使う海域中心
pub const FALLBACK_CENTER: GeoPoint = GeoPoint::new(12.0, 114.0);
pub const FALLBACK_LANDMARK: &str = "Central South China Sea";
/// フォールバック点のジッター幅（度、中心から ±半分）
pub const FALLBACK_JITTER_DEG: f64 = 5.0;

/// 主要な陸塊の簡略ポリゴン（概略の矩形）
pub fn land_masses() -> Vec<RegionPolygon> {
    vec![
        RegionPolygon::land_box("Hainan Island", 18.2, 20.2, 108.6, 111.0),
        RegionPolygon::land_box("Vietnam Coast", 8.5, 23.5, 104.0, 108.5),
        RegionPolygon::land_box("China Mainland Coast", 20.0, 25.0, 108.5, 122.0),
        RegionPolygon::land_box("Taiwan", 21.9, 25.3, 120.0, 122.0),
        RegionPolygon::land_box("Philippines (Luzon)", 13.5, 18.5, 119.5, 122.5),
        RegionPolygon::land_box("Philippines (Palawan)", 8.5, 12.5, 117.0, 119.5),
        RegionPolygon::land_box("Borneo (North)", 4.0, 7.5, 108.0, 119.0),
    ]
}

/// 指定種別の参照地点一覧
pub fn sites_of(kind: SiteKind) -> &'static [ReferenceSite] {
    match kind {
        NavalBase => NAVAL_BASES,
        Airfield => AIRFIELDS,
        LandMilitary => LAND_MILITARY_SITES,
        OceanZone => OCEAN_ZONES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_kinds_are_consistent() {
        for kind in [NavalBase, Airfield, LandMilitary, OceanZone] {
            assert!(!sites_of(kind).is_empty());
            assert!(sites_of(kind).iter().all(|s| s.kind == kind && s.radius_km > 0.0));
        }
    }

    #[test]
    fn test_lanes_have_segments() {
        for lane in SHIPPING_LANES {
            assert!(lane.waypoints.len() >= 2, "{} has no segment", lane.name);
            assert!(lane.width_km > 0.0);
        }
    }

    #[test]
    fn test_land_masses_are_closed_rings() {
        for polygon in land_masses() {
            assert!(polygon.is_land);
            assert!(polygon.vertices.len() >= 3);
        }
    }
}
