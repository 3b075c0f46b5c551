use std::path::PathBuf;

use clap::Parser;

use schip8_core::CLOCK_SPEED;

/// Runtime configuration, taken from the command line
#[derive(Parser, Debug)]
#[command(name = "schip8")]
#[command(about = "A CHIP-8/SCHIP interpreter")]
pub struct Config {
    /// ROM file to load
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    pub clock_speed: u32,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = 10)]
    pub scale: u32,

    /// Seed for CXNN's random numbers; OS entropy when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Step the timers once per instruction instead of at 60Hz
    #[arg(long)]
    pub coupled_timers: bool,

    /// Never play a tone
    #[arg(long)]
    pub mute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["schip8", "pong.ch8"]).unwrap();
        assert_eq!(config.rom, PathBuf::from("pong.ch8"));
        assert_eq!(config.clock_speed, 700);
        assert_eq!(config.scale, 10);
        assert_eq!(config.seed, None);
        assert!(!config.coupled_timers);
        assert!(!config.mute);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "schip8",
            "pong.ch8",
            "--clock-speed",
            "1000",
            "--seed",
            "7",
            "--coupled-timers",
        ])
        .unwrap();
        assert_eq!(config.clock_speed, 1000);
        assert_eq!(config.seed, Some(7));
        assert!(config.coupled_timers);
    }

    #[test]
    fn test_rom_is_required() {
        assert!(Config::try_parse_from(["schip8"]).is_err());
    }
}
