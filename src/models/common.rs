use serde::{Deserialize, Serialize};

/// 緯度1度あたりの概算距離（km）
pub const KM_PER_DEGREE: f64 = 111.0;

/// 赤道上で1度あたりの距離（海里）
pub const NM_PER_DEGREE: f64 = 60.0;

/// 地球半径（km）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 緯度経度の2次元座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64, // 度
    pub lon: f64, // 度
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// 大円距離（km、Haversine）
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        math_utils::haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// エンティティの位置（高度は海面・地表ドメインでは0）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,  // 度
    pub longitude: f64, // 度
    pub altitude: f64,  // m
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// 陸地・水域の分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Land,
    Water,
}

/// シナリオ全体を囲む固定の緯度経度矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// 南シナ海シナリオの領域（ボルネオ北岸〜台湾、ベトナム沿岸〜フィリピン）
pub const SCENARIO_BOUNDS: ScenarioBounds = ScenarioBounds {
    min_lat: 5.0,
    max_lat: 25.0,
    min_lon: 105.0,
    max_lon: 125.0,
};

impl ScenarioBounds {
    /// 境界上の点も領域内として扱う
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// 領域内に収まるよう座標を切り詰める
    pub fn clamp(&self, lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(
            lat.clamp(self.min_lat, self.max_lat),
            lon.clamp(self.min_lon, self.max_lon),
        )
    }
}

impl Default for ScenarioBounds {
    fn default() -> Self {
        SCENARIO_BOUNDS
    }
}

/// 数学ユーティリティ関数
pub mod math_utils {
    use super::{EARTH_RADIUS_KM, KM_PER_DEGREE};

    /// 方位を0度〜360度の範囲に正規化
    pub fn normalize_heading(heading_deg: f64) -> f64 {
        let normalized = heading_deg.rem_euclid(360.0);
        // rem_euclid は丸め誤差で 360.0 を返すことがある
        if normalized >= 360.0 { 0.0 } else { normalized }
    }

    /// 反転方位（180度回転）
    pub fn reverse_heading(heading_deg: f64) -> f64 {
        normalize_heading(heading_deg + 180.0)
    }

    /// from から to へ向かう方位（真北基準、時計回り、度）
    ///
    /// 赤道近似の平面上で atan2(Δlon, Δlat) を用いる。
    pub fn heading_between(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
        let d_lat = to_lat - from_lat;
        let d_lon = to_lon - from_lon;
        normalize_heading(d_lon.atan2(d_lat).to_degrees())
    }

    /// km を緯度方向の度に換算
    pub fn km_to_deg(km: f64) -> f64 {
        km / KM_PER_DEGREE
    }

    /// Haversine 公式による2点間距離（km）
    pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// 現在時刻（UNIXエポックからのミリ秒）
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
