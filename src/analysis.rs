//! Post-run chart rendering.

use plotters::prelude::*;

use crate::metrics::LoopReport;

pub fn render_latency_chart(
    report: &LoopReport,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let p50_us = report.cycle_p50.as_secs_f64() * 1_000_000.0;
    let p99_us = report.cycle_p99.as_secs_f64() * 1_000_000.0;
    let max_us = (p99_us * 1.2).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Hold Loop Compute Latency (us)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..100.0, 0.0..max_us)?;

    chart
        .configure_mesh()
        .x_desc("Quantile")
        .y_desc("Latency (us)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        vec![(50.0, p50_us), (99.0, p99_us)],
        &RED,
    ))?;

    root.present()?;
    Ok(())
}
