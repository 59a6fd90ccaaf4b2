use crate::geo::catalog::{land_masses, RegionPolygon};
use crate::models::common::Terrain;
use crate::models::traits::ITerrain;

/// 陸地・水域判定インデックス
///
/// 陸地ポリゴン群に対して ray casting（偶奇規則）で内外判定を行います。
/// いずれかの陸地ポリゴンの内側にある点を LAND、それ以外を WATER とし、
/// 水域ポリゴンは持ちません。静的カタログのみの関数で、隠れた状態はありません。
/// 辺上の点の分類は未規定ですが、同じ入力に対しては常に同じ結果になります。
#[derive(Debug, Clone)]
pub struct BoundaryIndex {
    polygons: Vec<RegionPolygon>,
}

impl BoundaryIndex {
    /// 任意のポリゴン集合からインデックスを作る（陸地フラグのないものは無視）
    pub fn new(polygons: Vec<RegionPolygon>) -> Self {
        Self {
            polygons: polygons.into_iter().filter(|p| p.is_land).collect(),
        }
    }

    /// 南シナ海シナリオの陸塊カタログで作る
    pub fn default_region() -> Self {
        Self::new(land_masses())
    }

    pub fn polygons(&self) -> &[RegionPolygon] {
        &self.polygons
    }

    /// 点を含む最初の陸地ポリゴン
    pub fn polygon_containing(&self, lat: f64, lon: f64) -> Option<&RegionPolygon> {
        self.polygons.iter().find(|p| point_in_polygon(lat, lon, p))
    }
}

impl Default for BoundaryIndex {
    fn default() -> Self {
        Self::default_region()
    }
}

impl ITerrain for BoundaryIndex {
    fn classify(&self, lat: f64, lon: f64) -> Terrain {
        if self.polygon_containing(lat, lon).is_some() {
            Terrain::Land
        } else {
            Terrain::Water
        }
    }
}

/// ray casting による点の内外判定
///
/// x = 経度、y = 緯度として、点から +x 方向に伸ばした半直線と
/// 各辺との交差回数の偶奇で判定する。
pub fn point_in_polygon(lat: f64, lon: f64, polygon: &RegionPolygon) -> bool {
    let vertices = &polygon.vertices;
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lon, vertices[i].lat);
        let (xj, yj) = (vertices[j].lon, vertices[j].lat);

        // (yi > lat) != (yj > lat) が成り立つ辺は水平ではないので除算は安全
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::GeoPoint;

    #[test]
    fn test_interior_points_are_land() {
        let index = BoundaryIndex::default_region();
        assert_eq!(index.classify(19.2, 109.8), Terrain::Land); // 海南島
        assert_eq!(index.classify(23.0, 121.0), Terrain::Land); // 台湾
        assert_eq!(index.classify(16.0, 121.0), Terrain::Land); // ルソン島
    }

    #[test]
    fn test_open_sea_is_water() {
        let index = BoundaryIndex::default_region();
        assert_eq!(index.classify(12.0, 113.0), Terrain::Water);
        assert_eq!(index.classify(15.0, 115.0), Terrain::Water);
        assert!(index.is_in_water(9.0, 112.0));
    }

    #[test]
    fn test_classification_is_stable() {
        let index = BoundaryIndex::default_region();
        let first = index.classify(18.2, 109.5);
        for _ in 0..10 {
            assert_eq!(index.classify(18.2, 109.5), first);
        }
    }

    #[test]
    fn test_polygon_containing_reports_name() {
        let index = BoundaryIndex::default_region();
        let polygon = index.polygon_containing(19.0, 110.0).expect("Hainan");
        assert_eq!(polygon.name, "Hainan Island");
        assert!(index.polygon_containing(12.0, 113.0).is_none());
    }

    #[test]
    fn test_non_convex_polygon() {
        // L字型: 右上の切り欠きは水域
        let l_shape = RegionPolygon::new(
            "L",
            true,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(2.0, 0.0),
                GeoPoint::new(2.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, 2.0),
                GeoPoint::new(0.0, 2.0),
            ],
        );
        let index = BoundaryIndex::new(vec![l_shape]);
        assert!(index.is_on_land(0.5, 0.5));
        assert!(index.is_on_land(1.5, 0.5));
        assert!(index.is_on_land(0.5, 1.5));
        assert!(index.is_in_water(1.5, 1.5));
    }

    #[test]
    fn test_water_polygons_are_ignored() {
        let lake = RegionPolygon::new(
            "Lake",
            false,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0), GeoPoint::new(1.0, 1.0)],
        );
        let index = BoundaryIndex::new(vec![lake]);
        assert!(index.polygons().is_empty());
        assert!(index.is_in_water(0.7, 0.2));
    }
}
