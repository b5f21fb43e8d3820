use questlayer_core::reward::format_xp;
use questlayer_core::LevelInfo;
use serde::Serialize;

#[derive(Serialize)]
struct LevelReport {
    xp: u64,
    display: String,
    level: u64,
    rank: &'static str,
    progress_percent: u8,
}

pub fn run(xp: u64) -> Result<(), Box<dyn std::error::Error>> {
    let info = LevelInfo::from_xp(xp);
    let report = LevelReport {
        xp,
        display: format_xp(xp),
        level: info.level,
        rank: info.rank.name(),
        progress_percent: info.progress_percent,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
