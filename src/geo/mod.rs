// 陸地・水域判定
pub mod boundary;

// 参照地点・航路・陸地ポリゴンの静的データ
pub mod catalog;

// スポーン位置の棄却サンプリング
pub mod sampler;

pub use boundary::{point_in_polygon, BoundaryIndex};
pub use catalog::{Country, ReferenceSite, RegionPolygon, ShippingLane, SiteKind};
pub use sampler::{LocationSampler, Placement, MAX_PLACEMENT_ATTEMPTS};
