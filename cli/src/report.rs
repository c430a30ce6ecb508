use image_convert_core::converter::Conversion;

/// Aggregate report for all converted files.
#[derive(Default)]
pub struct Report {
    pub results: Vec<Conversion>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: Conversion) {
        self.results.push(result);
    }

    pub fn total_input(&self) -> u64 {
        self.results.iter().map(|r| r.input_size).sum()
    }

    pub fn total_output(&self) -> u64 {
        self.results.iter().map(|r| r.output_size).sum()
    }

    /// Size change relative to the inputs; negative when outputs grew.
    pub fn total_savings_pct(&self) -> f64 {
        let input = self.total_input();
        if input == 0 {
            return 0.0;
        }
        (1.0 - self.total_output() as f64 / input as f64) * 100.0
    }

    pub fn print_summary(&self) {
        println!("\n--- Summary ---");
        println!("Files converted: {}", self.results.len());

        if !self.results.is_empty() {
            println!(
                "Total: {} → {} ({:.1}% reduction)",
                format_size(self.total_input()),
                format_size(self.total_output()),
                self.total_savings_pct()
            );
        }
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
