use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行 extract / transform / load，回傳輸出檔路徑
    pub fn run(&self) -> Result<String> {
        println!("Starting report generation...");

        println!("Reading input files...");
        let inputs = self.pipeline.extract()?;
        self.monitor.log_stats("Extract");

        println!("Joining and formatting...");
        let result = self.pipeline.transform(inputs)?;
        println!(
            "Formatted {} report lines ({} records dropped below threshold)",
            result.stats.lines_emitted, result.stats.skipped_low_score
        );
        self.monitor.log_stats("Transform");

        println!("Writing report...");
        let output_path = self.pipeline.load(result)?;
        println!("Report saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
