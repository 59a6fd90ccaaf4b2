//! ドメイン・所属ごとのプラットフォーム定義テーブル

use crate::models::entity::{Affiliation, Domain, EmitterType};
use crate::models::entity::EmitterType::{Communications as Comm, Jammer, Missile, Radar};

/// プラットフォーム定義
#[derive(Debug)]
pub struct PlatformDef {
    /// プラットフォーム種別（速度・高度のキーワード判定にも使う）
    pub platform_type: &'static str,
    /// 所属軍・船籍の接頭辞（空文字なら接頭辞なし）
    pub prefix: &'static str,
    pub names: &'static [&'static str],
    /// 艦番号（names と同じ並び）
    pub hull_numbers: Option<&'static [&'static str]>,
    pub emitters: &'static [EmitterType],
}

const fn platform(
    platform_type: &'static str,
    prefix: &'static str,
    names: &'static [&'static str],
    hull_numbers: Option<&'static [&'static str]>,
    emitters: &'static [EmitterType],
) -> PlatformDef {
    PlatformDef { platform_type, prefix, names, hull_numbers, emitters }
}

// ===== 艦艇 =====

pub static FRIENDLY_MARITIME: &[PlatformDef] = &[
    platform(
        "Arleigh Burke-class Destroyer",
        "USS",
        &[
            "Benfold", "Milius", "McCampbell", "Halsey", "Wayne E. Meyer", "Stockdale",
            "Chung-Hoon", "Preble", "Kidd", "Pinckney",
        ],
        Some(&[
            "DDG-65", "DDG-69", "DDG-85", "DDG-97", "DDG-108", "DDG-106", "DDG-93", "DDG-88",
            "DDG-100", "DDG-91",
        ]),
        &[Radar, Comm],
    ),
    platform(
        "Ticonderoga-class Cruiser",
        "USS",
        &["Shiloh", "Antietam", "Chancellorsville", "Mobile Bay", "Lake Erie"],
        Some(&["CG-67", "CG-54", "CG-62", "CG-53", "CG-70"]),
        &[Radar, Comm, Missile],
    ),
    platform(
        "Nimitz-class Carrier",
        "USS",
        &[
            "Ronald Reagan", "Carl Vinson", "Abraham Lincoln", "Theodore Roosevelt",
            "George Washington",
        ],
        Some(&["CVN-76", "CVN-70", "CVN-72", "CVN-71", "CVN-73"]),
        &[Radar, Comm],
    ),
    platform(
        "Virginia-class Submarine",
        "USS",
        &["Hawaii", "North Carolina", "California", "Mississippi", "Minnesota"],
        Some(&["SSN-776", "SSN-777", "SSN-781", "SSN-782", "SSN-783"]),
        &[Radar, Comm],
    ),
    platform(
        "Oliver Hazard Perry-class Frigate",
        "ROCS",
        &["Feng Jia", "Ji Long", "Cheng Kung", "Tian Dan", "Ban Chao"],
        Some(&["PFG-1101", "PFG-1103", "PFG-1105", "PFG-1110", "PFG-1108"]),
        &[Radar, Comm],
    ),
    platform(
        "Kongou-class Destroyer",
        "JS",
        &["Kongou", "Kirishima", "Myoukou", "Choukai"],
        Some(&["DDG-173", "DDG-174", "DDG-175", "DDG-176"]),
        &[Radar, Comm, Missile],
    ),
];

pub static HOSTILE_MARITIME: &[PlatformDef] = &[
    platform(
        "Type 055 Destroyer",
        "PLANS",
        &["Nanchang", "Lhasa", "Dalian", "Wuxi", "Anshan", "Yan'an", "Zunyi", "Guiyang"],
        Some(&["101", "102", "105", "106", "103", "104", "107", "108"]),
        &[Radar, Comm, Missile],
    ),
    platform(
        "Type 052D Destroyer",
        "PLANS",
        &["Kunming", "Changsha", "Hefei", "Yinchuan", "Xiamen", "Guiyang", "Nanning", "Zibo"],
        Some(&["172", "173", "174", "175", "154", "119", "162", "163"]),
        &[Radar, Comm, Missile],
    ),
    platform(
        "Type 054A Frigate",
        "PLANS",
        &["Xuzhou", "Huanggang", "Linyi", "Handan", "Yiyang", "Changzhou", "Hengyang", "Jingzhou"],
        Some(&["530", "577", "547", "579", "548", "549", "568", "532"]),
        &[Radar, Comm],
    ),
    platform(
        "Type 056 Corvette",
        "PLANS",
        &["Bengbu", "Huizhou", "Qinzhou", "Jieyang", "Wuzhou", "Meizhou", "Baise"],
        Some(&["582", "596", "597", "587", "594", "595", "585"]),
        &[Radar, Comm],
    ),
    platform(
        "Liaoning-class Carrier",
        "PLANS",
        &["Liaoning", "Shandong", "Fujian"],
        Some(&["16", "17", "18"]),
        &[Radar, Comm],
    ),
    platform(
        "Type 093 Submarine",
        "PLANS",
        &["Shang-1", "Shang-2", "Shang-3", "Shang-4"],
        Some(&["409", "410", "411", "412"]),
        &[Radar, Comm],
    ),
    platform(
        "Type 022 Missile Boat",
        "PLANS",
        &["Houbei-1", "Houbei-2", "Houbei-3", "Houbei-4", "Houbei-5"],
        Some(&["2201", "2202", "2203", "2204", "2205"]),
        &[Radar, Missile],
    ),
];

pub static NEUTRAL_MARITIME: &[PlatformDef] = &[
    platform(
        "Container Ship",
        "MV",
        &[
            "Ever Given", "MSC Oscar", "OOCL Hong Kong", "COSCO Shipping", "Maersk Alabama",
            "Yang Ming Unity", "Hapag-Lloyd Express",
        ],
        None,
        &[Comm, Radar],
    ),
    platform(
        "Oil Tanker",
        "MT",
        &[
            "Seawise Giant", "Jahre Viking", "Knock Nevis", "Pacific Aurora", "Atlantic Star",
            "Gulf Harmony",
        ],
        None,
        &[Comm, Radar],
    ),
    platform(
        "Bulk Cargo Carrier",
        "MV",
        &[
            "Vale Brasil", "Berge Stahl", "China Fortune", "Pacific Voyager", "Sea Trader",
            "Ocean Pioneer",
        ],
        None,
        &[Comm, Radar],
    ),
    platform(
        "Fishing Vessel",
        "FV",
        &[
            "Lucky Dragon", "Pacific Catch", "Sea Harvest", "Morning Star", "Blue Fin",
            "Ocean Spirit",
        ],
        None,
        &[Comm],
    ),
];

// ===== 航空機 =====

pub static FRIENDLY_AIR: &[PlatformDef] = &[
    platform(
        "F/A-18E/F Super Hornet Fighter",
        "",
        &[
            "HAMMER", "VIPER", "KNIGHT", "RAZOR", "REAPER", "DEMON", "IRON", "COBRA", "PHANTOM",
            "STRIKER",
        ],
        None,
        &[Radar, Comm, Jammer],
    ),
    platform(
        "F-35C Lightning II Fighter",
        "",
        &[
            "SHADOW", "GHOST", "STEALTH", "RAPTOR", "FALCON", "HAWK", "EAGLE", "THUNDER", "STORM",
            "BLADE",
        ],
        None,
        &[Radar, Comm],
    ),
    platform(
        "E-2D Hawkeye AWACS",
        "",
        &["TIGERTAIL", "CLOSEOUT", "WALLBANGER", "SCREWTOP", "LIBERTY", "OVERWATCH"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "EA-18G Growler",
        "",
        &["SPARK", "VOLTAGE", "ZAP", "STATIC", "SURGE", "FLASH", "ARC", "BOLT"],
        None,
        &[Radar, Jammer, Comm],
    ),
    platform(
        "P-8A Poseidon",
        "",
        &["TRIDENT", "NEPTUNE", "SEAWATCH", "OVERCAST", "MARINER", "SEEKER"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "MQ-4C Triton UAV",
        "",
        &["TRITON-1", "TRITON-2", "TRITON-3", "TRITON-4"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "KC-135 Stratotanker Tanker",
        "",
        &["TEXACO", "SHELL", "ARCO", "MOBIL", "ESSO", "PETROL"],
        None,
        &[Comm],
    ),
    platform(
        "F-16V Fighting Falcon Fighter",
        "ROCAF",
        &["TIGER", "DRAGON", "PHOENIX", "VIPER", "THUNDER"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "F-15J Eagle Fighter",
        "JASDF",
        &["SAMURAI", "NINJA", "SHOGUN", "RONIN", "KATANA"],
        None,
        &[Radar, Comm],
    ),
];

pub static HOSTILE_AIR: &[PlatformDef] = &[
    platform(
        "J-20 Mighty Dragon Fighter",
        "PLAAF",
        &["RED DRAGON", "BLACK DRAGON", "STORM DRAGON", "IRON DRAGON", "FIRE DRAGON"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "J-16 Strike Fighter",
        "PLAAF",
        &["FLANKER-1", "FLANKER-2", "FLANKER-3", "FLANKER-4", "FLANKER-5"],
        None,
        &[Radar, Comm, Jammer],
    ),
    platform(
        "J-11B Fighter",
        "PLAAF",
        &["SHENYANG-1", "SHENYANG-2", "SHENYANG-3", "SHENYANG-4"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "H-6K Bomber",
        "PLAAF",
        &["BADGER-1", "BADGER-2", "BADGER-3", "BADGER-4", "BADGER-5", "BADGER-6"],
        None,
        &[Radar, Comm, Missile],
    ),
    platform(
        "Y-8 Maritime Patrol",
        "PLAN",
        &["COOT-1", "COOT-2", "COOT-3", "COOT-4"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "KJ-500 AWACS",
        "PLAAF",
        &["MAINRING-1", "MAINRING-2", "MAINRING-3"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "WZ-7 Soaring Dragon UAV",
        "PLAAF",
        &["DRAGON EYE-1", "DRAGON EYE-2", "DRAGON EYE-3", "DRAGON EYE-4"],
        None,
        &[Radar, Comm],
    ),
    platform(
        "Z-20 Helicopter",
        "PLAN",
        &["HARBIN-1", "HARBIN-2", "HARBIN-3", "HARBIN-4", "HARBIN-5"],
        None,
        &[Radar, Comm],
    ),
];

pub static NEUTRAL_AIR: &[PlatformDef] = &[
    platform(
        "Boeing 777",
        "",
        &["CPA881", "SIA318", "EVA052", "JAL066", "ANA912", "VNA730"],
        None,
        &[Comm],
    ),
    platform(
        "Airbus A350",
        "",
        &["CX256", "SQ322", "BR891", "JL045", "NH802", "VN520"],
        None,
        &[Comm],
    ),
];

// ===== 地上ユニット =====

pub static FRIENDLY_LAND: &[PlatformDef] = &[
    platform(
        "AN/TPS-80 G/ATOR Radar",
        "USMC",
        &["WATCHDOG-1", "WATCHDOG-2", "WATCHDOG-3"],
        None,
        &[Radar],
    ),
    platform(
        "Patriot PAC-3 Battery",
        "USA",
        &["PATRIOT-ALPHA", "PATRIOT-BRAVO", "PATRIOT-CHARLIE", "PATRIOT-DELTA"],
        None,
        &[Radar, Missile],
    ),
    platform(
        "AN/TPY-2 THAAD Radar",
        "USA",
        &["THAAD-1", "THAAD-2"],
        None,
        &[Radar],
    ),
    platform(
        "Sky Bow III SAM",
        "ROCA",
        &["TIEN KUNG-1", "TIEN KUNG-2", "TIEN KUNG-3", "TIEN KUNG-4"],
        None,
        &[Radar, Missile],
    ),
    platform(
        "Type 03 SAM",
        "JGSDF",
        &["CHU-SAM-A", "CHU-SAM-B", "CHU-SAM-C"],
        None,
        &[Radar, Missile],
    ),
    platform(
        "Mobile C2 Node",
        "USA",
        &["TOC-ALPHA", "TOC-BRAVO", "COMMAND-1", "COMMAND-2"],
        None,
        &[Comm],
    ),
];

pub static HOSTILE_LAND: &[PlatformDef] = &[
    platform(
        "HQ-9 SAM Battery",
        "PLA",
        &["RED FLAG-1", "RED FLAG-2", "RED FLAG-3", "RED FLAG-4", "RED FLAG-5"],
        None,
        &[Radar, Missile],
    ),
    platform(
        "S-400 SAM Battery",
        "PLA",
        &["GROWLER-1", "GROWLER-2", "GROWLER-3"],
        None,
        &[Radar, Missile],
    ),
    platform(
        "Type 305B Radar",
        "PLA",
        &["TALL KING-1", "TALL KING-2", "TALL KING-3", "TALL KING-4"],
        None,
        &[Radar],
    ),
    platform(
        "YLC-8B AESA Radar",
        "PLA",
        &["DRAGON EYE-1", "DRAGON EYE-2", "DRAGON EYE-3"],
        None,
        &[Radar],
    ),
    platform(
        "DF-21D ASBM TEL",
        "PLARF",
        &["CARRIER KILLER-1", "CARRIER KILLER-2", "CARRIER KILLER-3"],
        None,
        &[Radar, Comm, Missile],
    ),
    platform(
        "DF-26 IRBM TEL",
        "PLARF",
        &["GUAM KILLER-1", "GUAM KILLER-2", "GUAM KILLER-3"],
        None,
        &[Radar, Comm, Missile],
    ),
    platform(
        "Coastal Defense Radar",
        "PLA",
        &["SHORE WATCH-1", "SHORE WATCH-2", "SHORE WATCH-3", "SHORE WATCH-4"],
        None,
        &[Radar],
    ),
    platform(
        "C4I Node",
        "PLA",
        &["COMMAND POST-A", "COMMAND POST-B", "COMMAND POST-C", "COMMAND POST-D"],
        None,
        &[Comm],
    ),
];

pub static NEUTRAL_LAND: &[PlatformDef] = &[
    platform(
        "Airport Surveillance Radar",
        "",
        &["MANILA-ASR", "TAIPEI-ASR", "HONG KONG-ASR", "SINGAPORE-ASR"],
        None,
        &[Radar],
    ),
    platform(
        "Maritime VTS Radar",
        "",
        &["STRAITS-VTS", "LUZON-VTS", "TAIWAN-VTS", "HAINAN-VTS"],
        None,
        &[Radar],
    ),
    platform(
        "Cell Tower",
        "",
        &["COMM-SITE-1", "COMM-SITE-2", "COMM-SITE-3", "COMM-SITE-4"],
        None,
        &[Comm],
    ),
];

/// ドメインと所属に対応するプラットフォーム一覧
///
/// UNKNOWN は友軍と敵軍のテーブルを合わせたものから選ぶ。
pub fn platforms_for(domain: Domain, affiliation: Affiliation) -> Vec<&'static PlatformDef> {
    let (friendly, hostile, neutral) = match domain {
        Domain::Maritime => (FRIENDLY_MARITIME, HOSTILE_MARITIME, NEUTRAL_MARITIME),
        Domain::Air => (FRIENDLY_AIR, HOSTILE_AIR, NEUTRAL_AIR),
        Domain::Land => (FRIENDLY_LAND, HOSTILE_LAND, NEUTRAL_LAND),
    };

    match affiliation {
        Affiliation::Friendly => friendly.iter().collect(),
        Affiliation::Hostile => hostile.iter().collect(),
        Affiliation::Neutral => neutral.iter().collect(),
        Affiliation::Unknown => friendly.iter().chain(hostile.iter()).collect(),
    }
}

/// 接頭辞と名前から国籍を推定する
pub fn nationality_for(
    platform: &PlatformDef,
    name: &str,
    domain: Domain,
    affiliation: Affiliation,
) -> &'static str {
    match platform.prefix {
        "USS" | "USA" | "USMC" => "USA",
        "PLANS" | "PLAAF" | "PLAN" | "PLA" | "PLARF" => "CHINA",
        "ROCS" | "ROCAF" | "ROCA" => "TAIWAN",
        "JS" | "JASDF" | "JGSDF" => "JAPAN",
        "MV" | "MT" | "FV" => "COMMERCIAL",
        _ if domain == Domain::Air && affiliation == Affiliation::Neutral => {
            airline_nationality(name)
        }
        _ => "UNKNOWN",
    }
}

/// 民間機の便名（航空会社コード）から国籍を推定する
fn airline_nationality(flight: &str) -> &'static str {
    const AIRLINES: &[(&[&str], &str)] = &[
        (&["CPA", "CX"], "HONG KONG"),
        (&["SIA", "SQ"], "SINGAPORE"),
        (&["EVA", "BR"], "TAIWAN"),
        (&["JAL", "JL", "ANA", "NH"], "JAPAN"),
        (&["VNA", "VN"], "VIETNAM"),
    ];

    AIRLINES
        .iter()
        .find(|(codes, _)| codes.iter().any(|c| flight.starts_with(c)))
        .map(|(_, nationality)| *nationality)
        .unwrap_or("COMMERCIAL")
}
