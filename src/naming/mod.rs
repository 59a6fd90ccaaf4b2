//! # Naming モジュール
//!
//! ドメインと所属に見合った表示名・プラットフォーム種別・コールサイン・
//! 放射源種別・国籍を払い出す命名オラクルを提供します。
//!
//! 発行済みの名前はシナリオ単位の `NamePool` に記録され、プロセス全体の
//! 可変状態は持ちません。テストなどで複数のシナリオを構築しても状態が漏れないよう、
//! プールは `PlatformNamer` の値が所有します。

pub mod platforms;

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::trace;

use crate::models::entity::{Affiliation, Domain, EmitterType, EntityIdentity};
use crate::models::traits::INamingOracle;
use platforms::{nationality_for, platforms_for, PlatformDef};

/// 未使用名を探す最大試行回数
const MAX_NAME_ATTEMPTS: u32 = 50;

/// 合成名の接尾辞に使う文字
const SUFFIX_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// シナリオ単位の発行済み名前集合
#[derive(Debug, Default, Clone)]
pub struct NamePool {
    used: HashSet<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未使用なら登録して true を返す
    pub fn claim(&mut self, name: &str) -> bool {
        if self.used.contains(name) {
            return false;
        }
        self.used.insert(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }
}

/// 静的プラットフォームテーブルに基づく命名オラクル
#[derive(Debug, Default)]
pub struct PlatformNamer {
    pool: NamePool,
}

impl PlatformNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(&self) -> &NamePool {
        &self.pool
    }

    /// ドメイン・所属ごとの名前プール容量
    pub fn available_name_count(domain: Domain, affiliation: Affiliation) -> usize {
        platforms_for(domain, affiliation).iter().map(|p| p.names.len()).sum()
    }

    /// 候補名を1つ組み立てる（未使用かどうかは呼び出し側で判定）
    fn compose(
        platform: &PlatformDef,
        domain: Domain,
        rng: &mut SmallRng,
    ) -> (String, String, usize) {
        let index = rng.gen_range(0..platform.names.len());
        let name = platform.names[index];

        let hull = platform.hull_numbers.and_then(|hulls| hulls.get(index));
        let (display, callsign) = if let Some(hull) = hull {
            // 艦番号付きの艦艇
            let display = if platform.prefix.is_empty() {
                format!("{} ({})", name, hull)
            } else {
                format!("{} {} ({})", platform.prefix, name, hull)
            };
            (display, name.to_uppercase())
        } else if domain == Domain::Air && platform.prefix.is_empty() {
            // 編隊番号付きのコールサイン
            let flight = rng.gen_range(1..=99);
            let callsign = format!("{}-{}", name, flight);
            (callsign.clone(), callsign)
        } else {
            let display = if platform.prefix.is_empty() {
                name.to_string()
            } else {
                format!("{} {}", platform.prefix, name)
            };
            let callsign: String = name
                .to_uppercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            (display, callsign)
        };

        (display, callsign, index)
    }

    /// プール枯渇時の合成名を払い出す
    ///
    /// 接尾辞が衝突した場合は引き直し、それでも衝突する場合は
    /// プールの登録数を付け足す（登録数は単調増加なので以後衝突しない）。
    fn synthesize(&mut self, prefix: &str, rng: &mut SmallRng) -> (String, String) {
        let compose = |suffix: &str| {
            let callsign = format!("UNIT-{}", suffix);
            let display = if prefix.is_empty() {
                callsign.clone()
            } else {
                format!("{} {}", prefix, callsign)
            };
            (display, callsign)
        };

        for _ in 0..MAX_NAME_ATTEMPTS {
            let suffix = random_suffix(rng);
            let (display, callsign) = compose(&suffix);
            if self.pool.claim(&display) {
                return (display, callsign);
            }
        }

        let suffix = format!("{}-{}", random_suffix(rng), self.pool.len());
        let (display, callsign) = compose(&suffix);
        self.pool.claim(&display);
        (display, callsign)
    }
}

fn random_suffix(rng: &mut SmallRng) -> String {
    (0..4)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

fn pick_emitter(platform: &PlatformDef, rng: &mut SmallRng) -> EmitterType {
    platform.emitters[rng.gen_range(0..platform.emitters.len())]
}

impl INamingOracle for PlatformNamer {
    fn next_name(
        &mut self,
        domain: Domain,
        affiliation: Affiliation,
        rng: &mut SmallRng,
    ) -> EntityIdentity {
        let platforms = platforms_for(domain, affiliation);

        if platforms.is_empty() {
            let (name, callsign) = self.synthesize("", rng);
            return EntityIdentity {
                name,
                platform_type: "Unknown Platform".to_string(),
                callsign,
                emitter_type: EmitterType::Radar,
                nationality: "UNKNOWN".to_string(),
            };
        }

        for _ in 0..MAX_NAME_ATTEMPTS {
            let platform = platforms[rng.gen_range(0..platforms.len())];
            let (display, callsign, index) = Self::compose(platform, domain, rng);

            if self.pool.claim(&display) {
                let nationality =
                    nationality_for(platform, platform.names[index], domain, affiliation);
                return EntityIdentity {
                    name: display,
                    platform_type: platform.platform_type.to_string(),
                    callsign,
                    emitter_type: pick_emitter(platform, rng),
                    nationality: nationality.to_string(),
                };
            }
        }

        // 名前プールが尽きた
        let platform = platforms[rng.gen_range(0..platforms.len())];
        let (name, callsign) = self.synthesize(platform.prefix, rng);
        trace!("名前プール枯渇のため合成名を発行: {}", name);

        EntityIdentity {
            name,
            platform_type: platform.platform_type.to_string(),
            callsign,
            emitter_type: pick_emitter(platform, rng),
            nationality: "UNKNOWN".to_string(),
        }
    }

    fn reset_names(&mut self) {
        self.pool.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_names_are_unique_until_reset() {
        let mut namer = PlatformNamer::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let identity = namer.next_name(Domain::Maritime, Affiliation::Hostile, &mut rng);
            assert!(seen.insert(identity.name.clone()), "duplicate {}", identity.name);
        }
        assert_eq!(namer.pool().len(), 200);

        namer.reset_names();
        assert!(namer.pool().is_empty());
    }

    #[test]
    fn test_exhausted_pool_synthesizes_unique_names() {
        let mut namer = PlatformNamer::new();
        let mut rng = SmallRng::seed_from_u64(2);
        let capacity = PlatformNamer::available_name_count(Domain::Land, Affiliation::Neutral);
        let mut seen = HashSet::new();

        for _ in 0..(capacity * 20) {
            let identity = namer.next_name(Domain::Land, Affiliation::Neutral, &mut rng);
            assert!(seen.insert(identity.name.clone()), "duplicate {}", identity.name);
        }
        assert!(seen.iter().any(|n| n.starts_with("UNIT-")));
    }

    #[test]
    fn test_hull_numbered_ship_naming() {
        let mut namer = PlatformNamer::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let identity = namer.next_name(Domain::Maritime, Affiliation::Friendly, &mut rng);

        assert!(identity.name.ends_with(')'), "{}", identity.name);
        assert!(identity.name.contains(" ("));
        assert_eq!(identity.callsign, identity.callsign.to_uppercase());
        assert!(["USA", "TAIWAN", "JAPAN"].contains(&identity.nationality.as_str()));
    }

    #[test]
    fn test_emitter_comes_from_platform_set() {
        let mut namer = PlatformNamer::new();
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..50 {
            let identity = namer.next_name(Domain::Land, Affiliation::Hostile, &mut rng);
            let def = platforms_for(Domain::Land, Affiliation::Hostile)
                .into_iter()
                .find(|p| p.platform_type == identity.platform_type)
                .expect("platform");
            assert!(def.emitters.contains(&identity.emitter_type));
        }
    }

    #[test]
    fn test_separate_namers_do_not_share_state() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut first = PlatformNamer::new();
        first.next_name(Domain::Air, Affiliation::Friendly, &mut rng);
        let second = PlatformNamer::new();
        assert_eq!(first.pool().len(), 1);
        assert!(second.pool().is_empty());
    }
}
