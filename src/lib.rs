pub mod abstraction;
pub mod cards;
pub mod game;
pub mod mccfr;
pub mod persist;

/// dimensional analysis types
pub type Chips = i32;
pub type Probability = f32;
pub type Utility = f32;

// two-player heads-up only
pub const N: usize = 2;
pub const STACK: Chips = 400;
pub const S_BLIND: Chips = 1;
pub const B_BLIND: Chips = 2;
pub const HOLE_SIZE: usize = 3;
pub const FLOP_SIZE: usize = 2;
pub const MAX_RAISES_PER_STREET: usize = 4;

/// initialize logging: file sink at Debug, terminal sink at Info.
#[cfg(feature = "native")]
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let _ = simplelog::CombinedLogger::init(vec![term, file]);
}

/// progress bar for long-running training loops
#[cfg(feature = "native")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(500);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}
