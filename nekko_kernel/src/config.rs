//! Runtime options taken from the kernel command line.
//!
//! Recognized are the flag `verbose` and `loglevel=off|error|warn|info|debug|trace`.
//! Anything else (including the kernel path GRUB puts first) is ignored.

use bare_metal::DirectMapping;
use log::LevelFilter;
use multiboot::MultibootInfo;

use crate::cmdline::{self, CmdLine, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootConfig {
    /// Maximum level of records that reach the serial log.
    pub log_level: LevelFilter,
    /// Print the memory map and the command line on screen.
    pub verbose: bool,
}

impl Default for BootConfig {
    fn default() -> BootConfig {
        BootConfig {
            log_level: LevelFilter::Info,
            verbose: false,
        }
    }
}

impl BootConfig {
    pub fn from_cmdline(raw: &[u8]) -> BootConfig {
        let mut config = BootConfig::default();
        for token in CmdLine::parse(raw) {
            match token {
                Token::Flag(flag) if flag == b"verbose" => config.verbose = true,
                Token::KeyValuePair(key, value) if key == b"loglevel" => match parse_level(value) {
                    Some(level) => config.log_level = level,
                    None => warn!("unknown log level {:?}", cmdline::as_text(value)),
                },
                Token::Flag(flag) => debug!("ignoring flag {:?}", cmdline::as_text(flag)),
                Token::KeyValuePair(key, _) => debug!("ignoring option {:?}", cmdline::as_text(key)),
            }
        }
        config
    }

    /// The configuration from the command line in `info`, or the default if there is none.
    pub fn from_info(info: &MultibootInfo, mapping: &DirectMapping) -> BootConfig {
        info.cmdline(mapping)
            .map(BootConfig::from_cmdline)
            .unwrap_or_default()
    }
}

/// Level names are matched case insensitively.
fn parse_level(value: &[u8]) -> Option<LevelFilter> {
    core::str::from_utf8(value).ok()?.parse().ok()
}
