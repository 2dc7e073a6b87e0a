//! `log` sink for the browser console.
//!
//! Records at `error`/`warn`/`info` map to the console method of the same
//! name; `debug` and `trace` go to `console.debug`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Once;
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;
static INIT: Once = Once::new();

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&msg),
            Level::Warn => console::warn_1(&msg),
            Level::Info => console::info_1(&msg),
            Level::Debug | Level::Trace => console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger and the panic hook.
///
/// This function is idempotent; later calls only adjust the level.
pub fn init_logging(level: LevelFilter) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_err() {
            // Another logger was installed first; leave it in charge.
            return;
        }
        console_error_panic_hook_setup();
    });
    log::set_max_level(level);
}

/// Parse a level name (`"off"`, `"error"` ... `"trace"`), case-insensitive.
pub fn parse_level(name: &str) -> Result<LevelFilter, String> {
    name.parse()
        .map_err(|_| format!("unknown log level {name:?}"))
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(|info| {
        let msg = format!("GLC WASM panic: {info}");
        console::error_1(&msg.into());
    }));
}
