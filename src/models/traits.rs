use rand::rngs::SmallRng;

use crate::models::common::Terrain;
use crate::models::entity::{Affiliation, Domain, EntityIdentity};

/// 陸地・水域判定のインターフェース
pub trait ITerrain: Send + Sync {
    /// 指定座標の地形分類
    fn classify(&self, lat: f64, lon: f64) -> Terrain;

    /// 陸上かどうか
    fn is_on_land(&self, lat: f64, lon: f64) -> bool {
        self.classify(lat, lon) == Terrain::Land
    }

    /// 水域かどうか
    fn is_in_water(&self, lat: f64, lon: f64) -> bool {
        self.classify(lat, lon) == Terrain::Water
    }
}

/// 命名オラクルのインターフェース
///
/// 発行済みの名前はシナリオ単位で管理され、`reset_names` が呼ばれるまで
/// 再発行されません。名前プールが尽きても失敗せず、合成した一意名を返します。
pub trait INamingOracle: Send + Sync {
    /// ドメインと所属に応じた識別情報を払い出す
    fn next_name(
        &mut self,
        domain: Domain,
        affiliation: Affiliation,
        rng: &mut SmallRng,
    ) -> EntityIdentity;

    /// 発行済み名前をクリア（シナリオ開始時）
    fn reset_names(&mut self);
}
