//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::panic::PanicHookInfo;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let report = crash_report(
        &Local::now().to_rfc3339(),
        thread.name().unwrap_or("<unnamed>"),
        &format!("{:?}", info.location()),
        panic_message(info),
        &format!("{:?}", Backtrace::new()),
    );

    // 1. Log to stderr (always available)
    eprintln!("{}", report);

    // 2. Log via tracing
    tracing::error!("{}", report);

    // 3. Write crash dump file
    let dump_filename = format!(
        "slide_deck_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let dump_path = std::env::temp_dir().join(&dump_filename);

    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    }
}

fn panic_message<'a>(info: &'a PanicHookInfo) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

fn crash_report(timestamp: &str, thread: &str, location: &str, payload: &str, stack: &str) -> String {
    format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        timestamp, thread, location, payload, stack
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_report_layout() {
        let report = crash_report("2026-10-19T10:00:00+00:00", "main", "src/main.rs:1", "boom", "<frames>");
        assert!(report.starts_with("=== CRITICAL PANIC ==="));
        assert!(report.contains("Thread: main"));
        assert!(report.contains("Payload: boom"));
        assert!(report.ends_with("<frames>"));
    }
}
