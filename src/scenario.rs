//! # Scenario モジュール
//!
//! 名前付きシナリオのカテゴリ別エンティティ数を定義し、
//! `EntityFactory` を繰り返し呼び出して母集団全体を構築します。
//!
//! カテゴリは {友軍, 敵軍, 中立} × {航空, 艦艇, 地上} のうち中立地上を除く8種で、
//! 生成順は固定です（友軍航空 → 友軍艦艇 → 友軍地上 → 敵軍航空 → 敵軍艦艇 →
//! 敵軍地上 → 中立航空 → 中立艦艇）。

use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::factory::EntityFactory;
use crate::models::entity::{Affiliation, Domain, Entity};
use crate::models::traits::INamingOracle;

/// 未知のキーが指定されたときに使うシナリオ
pub const DEFAULT_SCENARIO: &str = "stress-small";

/// カテゴリ別エンティティ数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub friendly_air: u32,
    pub friendly_maritime: u32,
    pub friendly_land: u32,
    pub hostile_air: u32,
    pub hostile_maritime: u32,
    pub hostile_land: u32,
    pub neutral_air: u32,
    pub neutral_maritime: u32,
}

impl EntityCounts {
    /// 生成順に並べたカテゴリと件数
    pub fn categories(&self) -> [(Domain, Affiliation, u32); 8] {
        [
            (Domain::Air, Affiliation::Friendly, self.friendly_air),
            (Domain::Maritime, Affiliation::Friendly, self.friendly_maritime),
            (Domain::Land, Affiliation::Friendly, self.friendly_land),
            (Domain::Air, Affiliation::Hostile, self.hostile_air),
            (Domain::Maritime, Affiliation::Hostile, self.hostile_maritime),
            (Domain::Land, Affiliation::Hostile, self.hostile_land),
            (Domain::Air, Affiliation::Neutral, self.neutral_air),
            (Domain::Maritime, Affiliation::Neutral, self.neutral_maritime),
        ]
    }

    pub fn total(&self) -> u32 {
        self.categories().iter().map(|(_, _, n)| n).sum()
    }

    /// 指定カテゴリの件数（未定義の組は0）
    pub fn count_for(&self, domain: Domain, affiliation: Affiliation) -> u32 {
        self.categories()
            .iter()
            .find(|(d, a, _)| *d == domain && *a == affiliation)
            .map(|(_, _, n)| *n)
            .unwrap_or(0)
    }
}

/// シナリオ定義
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub counts: EntityCounts,
}

impl ScenarioDefinition {
    pub fn total(&self) -> u32 {
        self.counts.total()
    }
}

#[allow(clippy::too_many_arguments)]
const fn counts(
    fa: u32,
    fm: u32,
    fl: u32,
    ha: u32,
    hm: u32,
    hl: u32,
    na: u32,
    nm: u32,
) -> EntityCounts {
    EntityCounts {
        friendly_air: fa,
        friendly_maritime: fm,
        friendly_land: fl,
        hostile_air: ha,
        hostile_maritime: hm,
        hostile_land: hl,
        neutral_air: na,
        neutral_maritime: nm,
    }
}

/// 定義済みシナリオ
pub static SCENARIOS: &[ScenarioDefinition] = &[
    ScenarioDefinition {
        key: "stress-tiny",
        name: "Stress Test (Tiny)",
        counts: counts(10, 15, 10, 15, 20, 15, 5, 10),
    },
    ScenarioDefinition {
        key: "stress-small",
        name: "Stress Test (Small)",
        counts: counts(50, 80, 50, 80, 120, 80, 40, 100),
    },
    ScenarioDefinition {
        key: "stress-medium",
        name: "Stress Test (Medium)",
        counts: counts(250, 400, 250, 400, 600, 400, 200, 500),
    },
    ScenarioDefinition {
        key: "stress-large",
        name: "Stress Test (Large)",
        counts: counts(500, 800, 500, 800, 1200, 800, 400, 1000),
    },
    ScenarioDefinition {
        key: "stress-extreme",
        name: "Stress Test (Extreme)",
        counts: counts(1250, 2000, 1250, 2000, 3000, 2000, 1000, 2500),
    },
    ScenarioDefinition {
        key: "contested-maritime",
        name: "Contested Maritime (South China Sea)",
        counts: counts(8, 12, 8, 12, 18, 12, 4, 6),
    },
];

/// キーに一致するシナリオ
pub fn find_scenario(key: &str) -> Option<&'static ScenarioDefinition> {
    SCENARIOS.iter().find(|s| s.key == key)
}

/// キーを解決する（未知のキーは既定シナリオ）
pub fn resolve_scenario(key: &str) -> &'static ScenarioDefinition {
    match find_scenario(key) {
        Some(scenario) => scenario,
        None => {
            warn!("未知のシナリオ '{}'. 既定の '{}' を使用します", key, DEFAULT_SCENARIO);
            find_scenario(DEFAULT_SCENARIO).unwrap_or(&SCENARIOS[0])
        }
    }
}

pub fn scenario_keys() -> Vec<&'static str> {
    SCENARIOS.iter().map(|s| s.key).collect()
}

/// シナリオ一覧の表示
pub fn list_scenarios() {
    println!("=== 利用可能なシナリオ ===");
    for scenario in SCENARIOS {
        let marker = if scenario.key == DEFAULT_SCENARIO { " (既定)" } else { "" };
        println!("  {:<20} {:>6}件  {}{}", scenario.key, scenario.total(), scenario.name, marker);
    }
}

/// シナリオ構築器
pub struct ScenarioBuilder {
    factory: EntityFactory,
}

impl ScenarioBuilder {
    pub fn new(factory: EntityFactory) -> Self {
        Self { factory }
    }

    /// シナリオの母集団を構築する
    ///
    /// 命名プールをリセットしたうえで、カテゴリごとに指定件数ずつ
    /// 固定順でエンティティを生成し、連結した一覧を返します。
    pub fn build(
        &self,
        key: &str,
        namer: &mut dyn INamingOracle,
        rng: &mut SmallRng,
        now_ms: u64,
    ) -> (&'static ScenarioDefinition, Vec<Entity>) {
        let scenario = resolve_scenario(key);
        namer.reset_names();

        info!("シナリオを構築中: {} ({})", scenario.name, scenario.key);

        let mut entities = Vec::with_capacity(scenario.total() as usize);
        for (domain, affiliation, count) in scenario.counts.categories() {
            for _ in 0..count {
                entities.push(self.factory.create(domain, affiliation, namer, rng, now_ms));
            }
        }

        let count_domain = |d: Domain| entities.iter().filter(|e| e.domain == d).count();
        info!(
            "{}件のエンティティを生成 (AIR: {}, MARITIME: {}, LAND: {})",
            entities.len(),
            count_domain(Domain::Air),
            count_domain(Domain::Maritime),
            count_domain(Domain::Land),
        );

        (scenario, entities)
    }
}
