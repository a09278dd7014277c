use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static TUI_MODE: AtomicBool = AtomicBool::new(false);

/// Route `log` records through env_logger. Every record is also handed to the
/// tui-logger drain so the log panel has history once the TUI is up.
pub fn init_logger(level: log::LevelFilter) {
    let drain = tui_logger::Drain::new();
    let result = env_logger::Builder::default()
        .filter_level(level)
        .format(move |buf, record| {
            drain.log(record);

            if TUI_MODE.load(Ordering::Relaxed) {
                // the alternate screen owns the terminal
                return Ok(());
            }

            let timestamp = chrono::Local::now().format("%H:%M:%S");
            writeln!(buf, "[{timestamp}] {}: {}", record.level(), record.args())
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
    tui_logger::set_default_level(level);
    log::debug!("Logger initialized at {level}");
}

pub fn switch_to_tui_logging() {
    TUI_MODE.store(true, Ordering::Relaxed);
    log::info!("Switched to TUI logging");
}

pub fn switch_to_console_logging() {
    TUI_MODE.store(false, Ordering::Relaxed);
}
