use sales_forecast::data::DataLoader;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_coercion_warning_goes_through_json_subscriber() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,sales,onpromotion").unwrap();
    writeln!(file, "2023-01-01,100,0").unwrap();
    writeln!(file, "2023-01-02,n/a,1").unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();

    let loaded = tracing::subscriber::with_default(subscriber, || {
        DataLoader::default().load_csv(file.path()).unwrap()
    });
    assert_eq!(loaded.coercion.sales, 1);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let events: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // one warning per load, rendered as JSON
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["level"], "WARN");
    assert_eq!(
        events[0]["fields"]["message"],
        "replaced missing or non-numeric cells with zero"
    );
    assert_eq!(events[0]["fields"]["sales"], 1);
}
