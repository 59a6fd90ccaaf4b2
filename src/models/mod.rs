// 基本的なデータ型と数学ユーティリティ
pub mod common;

// エンティティ集約と列挙型
pub mod entity;

// 地形判定・命名の境界インターフェース（trait）定義
pub mod traits;

// 便利な re-export
pub use common::*;
pub use entity::{
    Affiliation, Domain, EmitterType, Entity, EntityIdentity, EntityType, FrequencyRange, Patrol,
};
pub use traits::*;
