use crate::analysis::{PeriodSummary, ProgressMetric, ProgressPoint, ProgressStats, progress_stats};
use crate::model::RecordMetric;
use crate::state::PersonalRecords;
use maud::{Markup, html};
use plotters::prelude::*;
use std::path::Path;

trait FormatOption {
    fn fmt_opt(self) -> String;
}

impl FormatOption for Option<f64> {
    fn fmt_opt(self) -> String {
        self.map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".into())
    }
}

impl FormatOption for f64 {
    fn fmt_opt(self) -> String {
        format!("{:.1}", self)
    }
}

/// Everything shown in the HTML report.
pub struct ReportData<'a> {
    pub weekly: &'a PeriodSummary,
    pub monthly: &'a PeriodSummary,
    pub streak: u32,
    pub records: &'a PersonalRecords,
    /// Exercise name and its weight progression, oldest first.
    pub progress: Option<(&'a str, Vec<ProgressPoint>)>,
}

pub fn export_html_report<P: AsRef<Path>>(path: P, data: &ReportData<'_>) -> std::io::Result<()> {
    let path = path.as_ref();
    let chart_path = path.with_extension("png");
    let chart_file = match &data.progress {
        Some((name, series)) if !series.is_empty() => {
            match generate_progress_chart(name, series, &chart_path) {
                Ok(_) => chart_path
                    .file_name()
                    .unwrap_or_else(|| std::ffi::OsStr::new("")),
                Err(e) => {
                    log::error!("Failed to generate chart: {}", e);
                    std::ffi::OsStr::new("")
                }
            }
        }
        _ => std::ffi::OsStr::new(""),
    };
    let markup = build_html(data, chart_file);
    std::fs::write(path, markup.into_string())
}

fn generate_progress_chart(
    exercise: &str,
    series: &[ProgressPoint],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{exercise} progress"), ("sans-serif", 25))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..series.len(), 0f64..max * 1.1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Session")
        .y_desc(ProgressMetric::Weight.label())
        .draw()?;
    chart.draw_series(LineSeries::new(
        series.iter().enumerate().map(|(i, p)| (i, p.value)),
        &BLUE,
    ))?;
    root.present()?;
    Ok(())
}

fn summary_rows(label: &str, s: &PeriodSummary) -> Markup {
    html! {
        tr {
            th { (label) }
            td { (s.workouts) }
            td { (s.total_volume.fmt_opt()) }
            td { (s.cardio_minutes.fmt_opt()) }
            td { (s.total_calories.fmt_opt()) }
        }
    }
}

fn build_html(data: &ReportData<'_>, chart_file: &std::ffi::OsStr) -> Markup {
    let stats: Option<ProgressStats> = data
        .progress
        .as_ref()
        .and_then(|(_, series)| progress_stats(series.iter().copied()));
    html! {
        html {
            head { meta charset="utf-8"; title { "Workout Report" } }
            body {
                h1 { "Summary" }
                p { "Current streak: " (data.streak) " days" }
                table border="1" {
                    tr { th { "Period" } th { "Workouts" } th { "Volume" } th { "Cardio Minutes" } th { "Calories" } }
                    (summary_rows("Last 7 days", data.weekly))
                    (summary_rows("Last 30 days", data.monthly))
                }
                h1 { "Personal Records" }
                table border="1" {
                    tr { th { "Exercise" } th { "Max Weight" } th { "Max Volume" } th { "Date" } }
                    @for rec in data.records.iter().filter(|r| r.metric == RecordMetric::Weight) {
                        tr {
                            td { (rec.exercise) }
                            td { (rec.value.fmt_opt()) }
                            td { (data.records.get(&rec.exercise, RecordMetric::Volume).map(|v| v.value).fmt_opt()) }
                            td { (rec.date) }
                        }
                    }
                }
                @if let Some((name, _)) = &data.progress {
                    h1 { (name) " Progress" }
                    @if let Some(s) = stats {
                        table border="1" {
                            tr { th { "Latest" } td { (s.latest.fmt_opt()) } }
                            tr { th { "Personal Best" } td { (s.personal_best.fmt_opt()) } }
                            tr { th { "Sessions" } td { (s.session_count) } }
                            tr { th { "Improvement" } td { (format!("{:+.1}%", s.improvement_pct)) } }
                        }
                    } @else {
                        p { "No data for this exercise" }
                    }
                    @if chart_file.is_empty() {
                        p { "Chart unavailable" }
                    } @else {
                        img src=(chart_file.to_string_lossy());
                    }
                }
            }
        }
    }
}
