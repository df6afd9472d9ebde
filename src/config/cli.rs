use chrono::Weekday;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<DayArg> for Weekday {
    fn from(day: DayArg) -> Self {
        match day {
            DayArg::Mon => Weekday::Mon,
            DayArg::Tue => Weekday::Tue,
            DayArg::Wed => Weekday::Wed,
            DayArg::Thu => Weekday::Thu,
            DayArg::Fri => Weekday::Fri,
            DayArg::Sat => Weekday::Sat,
            DayArg::Sun => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "daily-lesson")]
#[command(about = "Generate a short English lesson and email it to each recipient")]
pub struct CliArgs {
    #[arg(long, help = "Load environment variables from this file instead of ./.env")]
    pub env_file: Option<PathBuf>,

    #[arg(long, value_enum, help = "Use this weekday's lesson category instead of today's")]
    pub day: Option<DayArg>,

    #[arg(long, help = "Generate and render lessons without connecting to SMTP")]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
