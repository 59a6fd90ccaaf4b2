use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing::info;

use tacsim::config::EmulatorConfig;
use tacsim::error::TacsimError;
use tacsim::logging::{init_logging, level_from_verbosity, parse_log_level};
use tacsim::models::common::now_ms;
use tacsim::models::entity::Domain;
use tacsim::scenario::list_scenarios;
use tacsim::{SharedSimulation, Simulation};

fn main() {
    let matches = Command::new("tacsim")
        .version("0.1.0")
        .about("南シナ海 戦術エンティティシミュレータ (Tactical Entity Simulator)")
        .long_about("地理的制約を満たす航空・艦艇・地上エンティティを生成し、\n\
                     周期的な時間刻みで哨戒運動させます。")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("設定ファイル(.yaml)のパスを指定")
        )
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("KEY")
                .help("構築するシナリオ (例: stress-tiny, contested-maritime)")
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("乱数シード")
        )
        .arg(
            Arg::new("ticks")
                .short('n')
                .long("ticks")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("指定ティック数で停止 (省略時は Ctrl-C まで継続)")
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("シナリオ一覧を表示して終了")
                .conflicts_with("info")
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(ArgAction::SetTrue)
                .help("設定内容のみ表示して終了")
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("OUTPUT")
                .help("ログ出力先 (console, file, both)")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("詳細出力レベル (-v: デバッグ, -vv: トレース)")
        )
        .get_matches();

    if matches.get_flag("list") {
        list_scenarios();
        return;
    }

    if let Err(e) = run(&matches) {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

/// 設定を解決してシミュレーションを実行
fn run(matches: &ArgMatches) -> Result<(), TacsimError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => EmulatorConfig::from_file(path)?,
        None => EmulatorConfig::default(),
    };
    apply_overrides(&mut config, matches);
    config.validate()?;

    if matches.get_flag("info") {
        config.print_summary();
        return Ok(());
    }

    let mut log_config = config.logging.to_log_config()?;
    log_config.level = level_from_verbosity(
        matches.get_count("verbose"),
        parse_log_level(&config.logging.level),
    );
    let _guard = init_logging(&log_config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(execute(config))
}

fn apply_overrides(config: &mut EmulatorConfig, matches: &ArgMatches) {
    if let Some(scenario) = matches.get_one::<String>("scenario") {
        config.sim.scenario = scenario.clone();
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.sim.seed = Some(*seed);
    }
    if let Some(ticks) = matches.get_one::<u64>("ticks") {
        config.sim.max_ticks = Some(*ticks);
    }
    if let Some(output) = matches.get_one::<String>("log-output") {
        config.logging.output = output.clone();
    }
}

/// シナリオを構築し、タイマーを Ctrl-C または指定ティック数まで回す
async fn execute(config: EmulatorConfig) -> Result<(), TacsimError> {
    let start_ms = now_ms();
    let seed = config.sim.seed.unwrap_or(start_ms);
    info!("tacsim 起動 (シード値: {})", seed);

    let shared = SharedSimulation::new(Simulation::new(seed, config.motion, start_ms));
    let count = shared.build_scenario(&config.sim.scenario).await;
    info!("{}件のエンティティでシミュレーションを開始", count);

    let period = Duration::from_millis(config.sim.tick_ms);
    let mut ticker = shared.spawn_ticker(period, config.sim.max_ticks);

    tokio::select! {
        result = &mut ticker => {
            let ticks = result?;
            info!("指定ティック数に到達しました ({})", ticks);
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("中断シグナルを受信しました");
            ticker.abort();
        }
    }

    let stats = shared.stats().await;
    info!(
        "最終状態: {}件 (AIR: {}, MARITIME: {}, LAND: {}), 模擬時刻 {}ms",
        stats.total,
        stats.domain(Domain::Air),
        stats.domain(Domain::Maritime),
        stats.domain(Domain::Land),
        shared.clock_ms().await,
    );

    Ok(())
}
