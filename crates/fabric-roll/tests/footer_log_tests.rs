use fabric_roll::FooterBranding;
use fabric_roll::footer::generate_simple_footer;
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::{Mutex, Once};

const SIMPLE_FOOTER_TARGET: &str = "fabric_roll::footer::simple";

static RECORDS: Mutex<Vec<(Level, String, String)>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&CaptureLogger).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn simple_footer_records() -> Vec<(Level, String)> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, target, _)| target == SIMPLE_FOOTER_TARGET)
        .map(|(level, _, message)| (*level, message.clone()))
        .collect()
}

#[test]
fn test_simple_footer_save_reports_through_log() {
    install_logger();

    let bytes = generate_simple_footer(2171.53, 100.0, &FooterBranding::default()).unwrap();
    assert!(!bytes.is_empty());

    let records = simple_footer_records();
    assert!(
        records
            .iter()
            .any(|(level, message)| *level == Level::Info && message.starts_with("Simple footer created"))
    );
    // The placeholder uses in-range colors only, so saving raises nothing
    assert!(
        records.iter().all(|(level, _)| *level > Level::Warn),
        "unexpected warnings: {:?}",
        records
    );
}
