use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use taskboard::config;

use application::{Flags, TaskBoardApp};
use config::{APP_ID, CONFIG_VERSION, TaskBoardConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new(APP_ID, CONFIG_VERSION)
        .map_err(|e| format!("failed to open cosmic config: {:?}", e))?;
    let config = TaskBoardConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(errors, cfg)| {
        for e in errors {
            eprintln!("taskboard: config entry error: {:?}", e);
        }
        cfg
    });

    // Parse CLI flags
    let debug_flag = std::env::args().any(|a| a == "--debug");

    // Set up logging to the systemd user journal (`journalctl --user -t taskboard -f`).
    // Wrapper filters: taskboard targets at info/debug, everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("taskboard") {
                    let max = if taskboard::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        taskboard::set_debug_logging(config.debug_logging || debug_flag);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("taskboard".to_string());
                log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
                // Global max must be Debug so taskboard debug logs can pass through when toggled
                log::set_max_level(log::LevelFilter::Debug);
            }
            Err(e) => eprintln!("taskboard: journal logging unavailable: {}", e),
        }
    }

    localize::localize();

    let mut settings = Settings::default();
    settings = settings.size_limits(Limits::NONE.min_width(480.0).min_height(320.0));

    let flags = Flags { config };
    cosmic::app::run::<TaskBoardApp>(settings, flags)?;

    Ok(())
}
