//! Command-line flags for the terminal runner.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use clap::{Parser, ValueHint};

use term_tetris::core::{GameConfig, PieceSource, RandomPieces, ScriptedPieces};
use term_tetris::types::{
    PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, FALL_DELAY_MS, MAX_DIMENSION, MIN_DIMENSION,
};

#[derive(Parser, Debug)]
#[command(name = "term-tetris", version, about = "Falling-block puzzle in the terminal")]
pub struct Args {
    #[arg(long, default_value_t = DEFAULT_HEIGHT, help = "Field height in rows")]
    pub height: usize,

    #[arg(long, default_value_t = DEFAULT_WIDTH, help = "Field width in columns")]
    pub width: usize,

    #[arg(
        long = "fall-delay-ms",
        default_value_t = FALL_DELAY_MS,
        value_name = "MS",
        help = "Gravity interval in milliseconds"
    )]
    pub fall_delay_ms: u64,

    #[arg(long, help = "Seed for the piece generator (defaults to the current time)")]
    pub seed: Option<u32>,

    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_piece_kind,
        value_name = "KINDS",
        help = "Repeat this comma-separated piece sequence (e.g. i,o,z) instead of random pieces"
    )]
    pub pieces: Vec<PieceKind>,

    #[arg(
        long = "log-file",
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        help = "Write diagnostics to this file"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "log-level",
        default_value = "info",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,

    #[arg(
        long,
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        help = "Record every game event as a JSON line"
    )]
    pub journal: Option<PathBuf>,
}

impl Args {
    /// Validate the field flags and build the game configuration.
    pub fn to_config(&self) -> Result<GameConfig> {
        if self.height < MIN_DIMENSION || self.width < MIN_DIMENSION {
            bail!(
                "field must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {}x{}",
                self.height,
                self.width
            );
        }
        if self.height > MAX_DIMENSION || self.width > MAX_DIMENSION {
            bail!(
                "field must be at most {MAX_DIMENSION}x{MAX_DIMENSION}, got {}x{}",
                self.height,
                self.width
            );
        }
        if self.fall_delay_ms == 0 {
            bail!("--fall-delay-ms must be greater than zero");
        }
        Ok(GameConfig::new(self.height, self.width)
            .with_fall_delay(Duration::from_millis(self.fall_delay_ms)))
    }

    /// Scripted pieces when `--pieces` is given, seeded random ones otherwise.
    pub fn piece_source(&self, seed: u32) -> Box<dyn PieceSource> {
        if self.pieces.is_empty() {
            Box::new(RandomPieces::new(seed))
        } else {
            Box::new(ScriptedPieces::new(self.pieces.clone()))
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn parse_piece_kind(s: &str) -> Result<PieceKind, String> {
    PieceKind::from_str(s.trim())
        .ok_or_else(|| format!("unknown piece kind '{s}' (expected one of j, l, s, z, i, o)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("term-tetris").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_field() {
        let args = parse(&[]);
        let config = args.to_config().unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(args.log_level, "info");
        assert!(args.journal.is_none());
    }

    #[test]
    fn custom_dimensions_and_delay() {
        let args = parse(&["--height", "8", "--width", "6", "--fall-delay-ms", "250"]);
        let config = args.to_config().unwrap();
        assert_eq!((config.height, config.width), (8, 6));
        assert_eq!(config.fall_delay, Duration::from_millis(250));
    }

    #[test]
    fn tiny_field_is_rejected() {
        let err = parse(&["--width", "3"]).to_config().unwrap_err();
        assert!(err.to_string().contains("at least 4x4"));
    }

    #[test]
    fn zero_fall_delay_is_rejected() {
        assert!(parse(&["--fall-delay-ms", "0"]).to_config().is_err());
    }

    #[test]
    fn oversized_field_is_rejected() {
        let err = parse(&["--width", "40000"]).to_config().unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(parse(&["--height", "1001"]).to_config().is_err());
        assert!(parse(&["--height", "1000", "--width", "1000"]).to_config().is_ok());
    }

    #[test]
    fn piece_script_is_parsed_and_played() {
        let args = parse(&["--pieces", "i,O, z"]);
        assert_eq!(args.pieces, vec![PieceKind::I, PieceKind::O, PieceKind::Z]);

        let mut source = args.piece_source(1);
        let drawn: Vec<_> = (0..4).map(|_| source.next_kind()).collect();
        assert_eq!(drawn, vec![PieceKind::I, PieceKind::O, PieceKind::Z, PieceKind::I]);
    }

    #[test]
    fn unknown_piece_kind_is_a_usage_error() {
        let args = ["term-tetris", "--pieces", "i,t"];
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn explicit_seed_is_used() {
        assert_eq!(parse(&["--seed", "42"]).seed(), 42);
    }
}
