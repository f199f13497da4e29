use std::io::{self, Write};

use payment_smoke_core::scenario::ScenarioEvent;

/// Streams scenario events as human-readable output.
///
/// Rows are written one per line inside a JSON array as they arrive, so long
/// scans show progress instead of buffering the whole table. Call
/// [`ConsoleReport::finish`] when a run stops early so the array is closed.
pub struct ConsoleReport<W: Write> {
    out: W,
    rows_written: usize,
    array_open: bool,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows_written: 0,
            array_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn on_event(&mut self, event: ScenarioEvent<'_>) -> io::Result<()> {
        match event {
            ScenarioEvent::Response(response) => {
                let rendered = serde_json::to_string_pretty(&response.raw)?;
                writeln!(self.out, "Lambda Response: {rendered}")?;
            }
            ScenarioEvent::Record(record) => {
                let rendered = serde_json::to_string(record)?;
                if self.array_open {
                    write!(self.out, ",\n  {rendered}")?;
                } else {
                    writeln!(self.out, "DynamoDB Data: [")?;
                    write!(self.out, "  {rendered}")?;
                    self.array_open = true;
                }
                self.rows_written += 1;
            }
            ScenarioEvent::ScanComplete { .. } => {
                if self.rows_written == 0 {
                    writeln!(self.out, "DynamoDB Data: []")?;
                } else {
                    self.close_array()?;
                }
            }
        }
        self.out.flush()
    }

    /// Closes a row array left open by a scan that stopped partway.
    pub fn finish(&mut self) -> io::Result<()> {
        self.close_array()?;
        self.out.flush()
    }

    fn close_array(&mut self) -> io::Result<()> {
        if self.array_open {
            writeln!(self.out, "\n]")?;
            self.array_open = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use payment_smoke_core::contract::{InvocationResult, StoredRecord};
    use serde_json::{json, Value};

    use super::*;

    fn payment(id: &str) -> StoredRecord {
        let mut record = StoredRecord::new();
        record.insert("payment_id".to_string(), json!(id));
        record
    }

    fn report_with(events: Vec<ScenarioEvent<'_>>) -> ConsoleReport<Vec<u8>> {
        let mut report = ConsoleReport::new(Vec::new());
        for event in events {
            report.on_event(event).expect("write to vec");
        }
        report
    }

    fn output_of(report: ConsoleReport<Vec<u8>>) -> String {
        String::from_utf8(report.into_inner()).expect("utf-8 output")
    }

    fn render(events: Vec<ScenarioEvent<'_>>) -> String {
        output_of(report_with(events))
    }

    fn data_rows(output: &str) -> Value {
        let (_, array_text) = output.split_once("DynamoDB Data: ").expect("data prefix");
        serde_json::from_str(array_text).expect("valid json array")
    }

    #[test]
    fn prints_empty_set_when_table_is_empty() {
        let response = InvocationResult {
            raw: json!({"statusCode": 201}),
            status_code: Some(201),
            body: None,
        };

        let output = render(vec![
            ScenarioEvent::Response(&response),
            ScenarioEvent::ScanComplete {
                records: 0,
                pages: 1,
            },
        ]);

        assert!(output.starts_with("Lambda Response: {"));
        assert!(output.ends_with("DynamoDB Data: []\n"));
    }

    #[test]
    fn response_is_printed_once() {
        let response = InvocationResult {
            raw: json!({"statusCode": 201, "body": "{\"status\":\"success\"}"}),
            status_code: Some(201),
            body: Some(json!({"status": "success"})),
        };

        let output = render(vec![ScenarioEvent::Response(&response)]);

        assert_eq!(output.matches("Lambda Response: ").count(), 1);
        assert!(!output.contains("Response Body"));
    }

    #[test]
    fn rows_form_a_json_array() {
        let first = payment("p-1");
        let second = payment("p-2");

        let output = render(vec![
            ScenarioEvent::Record(&first),
            ScenarioEvent::Record(&second),
            ScenarioEvent::ScanComplete {
                records: 2,
                pages: 1,
            },
        ]);

        let rows = data_rows(&output);
        assert_eq!(rows, json!([{"payment_id": "p-1"}, {"payment_id": "p-2"}]));
    }

    #[test]
    fn finish_closes_array_after_partial_scan() {
        let first = payment("p-1");
        let second = payment("p-2");
        let mut report = report_with(vec![
            ScenarioEvent::Record(&first),
            ScenarioEvent::Record(&second),
        ]);

        report.finish().expect("finish");
        let output = output_of(report);

        assert!(output.ends_with("\n]\n"));
        let rows = data_rows(&output);
        assert_eq!(rows, json!([{"payment_id": "p-1"}, {"payment_id": "p-2"}]));
    }

    #[test]
    fn finish_after_complete_scan_writes_nothing() {
        let first = payment("p-1");
        let mut report = report_with(vec![
            ScenarioEvent::Record(&first),
            ScenarioEvent::ScanComplete {
                records: 1,
                pages: 1,
            },
        ]);
        let before = report.out.len();

        report.finish().expect("finish");

        assert_eq!(report.out.len(), before);
    }

    #[test]
    fn finish_without_rows_writes_nothing() {
        let mut report = ConsoleReport::new(Vec::new());
        report.finish().expect("finish");
        assert!(output_of(report).is_empty());
    }
}
