// charts.rs
//
// PNG renderings of the dashboard views.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::aggregations::{
    CongestionMatrix, DailyTrend, HourlyProfile, WeekdayCongestion,
};
use crate::analytics::ViewModel;
use crate::global_variables::MAX_CONGESTION;

const CONGESTION_AXIS_MAX: f64 = MAX_CONGESTION as f64 + 0.5;

/// Green for free flow, red for heavy congestion.
fn congestion_color(level: f64) -> RGBColor {
    let t = ((level - 1.0) / 9.0).clamp(0.0, 1.0);
    RGBColor(
        (40.0 + 215.0 * t).round() as u8,
        (190.0 - 150.0 * t).round() as u8,
        60,
    )
}

fn index_label(labels: &[String], x: i32) -> String {
    labels.get(x as usize).cloned().unwrap_or_default()
}

pub fn draw_daily_trend(path: &Path, trend: &[DailyTrend]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = trend.iter().map(|d| d.date.format("%m-%d").to_string()).collect();
    let root = BitMapBackend::new(path, (900, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Congestion Trend", ("sans-serif", 20))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..trend.len() as i32, 0f64..CONGESTION_AXIS_MAX)?;

    chart
        .configure_mesh()
        .x_labels(trend.len().min(15))
        .x_label_formatter(&|x| index_label(&labels, *x))
        .x_desc("Date")
        .y_desc("Congestion (1-10)")
        .draw()?;

    let points: Vec<(i32, f64)> = trend
        .iter()
        .enumerate()
        .map(|(i, d)| (i as i32, d.mean_congestion))
        .collect();
    chart.draw_series(LineSeries::new(points.clone(), &RED))?;
    chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, RED.filled())))?;

    root.present()?;
    Ok(())
}

pub fn draw_weekday_bars(path: &Path, days: &[WeekdayCongestion]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = days.iter().map(|d| d.weekday.to_string()).collect();
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Mean Congestion per Weekday", ("sans-serif", 20))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..days.len() as i32, 0f64..CONGESTION_AXIS_MAX)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(days.len())
        .x_label_formatter(&|x| index_label(&labels, *x))
        .y_desc("Congestion")
        .draw()?;

    chart.draw_series(days.iter().enumerate().map(|(i, d)| {
        let x = i as i32;
        Rectangle::new(
            [(x, 0.0), (x + 1, d.mean_congestion)],
            congestion_color(d.mean_congestion).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub fn draw_rush_hours(path: &Path, ranked: &[HourlyProfile]) -> Result<(), Box<dyn Error>> {
    // Bars in hour order.
    let mut by_hour = ranked.to_vec();
    by_hour.sort_by_key(|p| p.hour);
    let labels: Vec<String> = by_hour.iter().map(|p| p.hour.to_string()).collect();

    let root = BitMapBackend::new(path, (900, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Mean Congestion per Hour", ("sans-serif", 20))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..by_hour.len() as i32, 0f64..CONGESTION_AXIS_MAX)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(by_hour.len())
        .x_label_formatter(&|x| index_label(&labels, *x))
        .x_desc("Hour")
        .y_desc("Congestion (1-10)")
        .draw()?;

    chart.draw_series(by_hour.iter().enumerate().map(|(i, p)| {
        let x = i as i32;
        Rectangle::new(
            [(x, 0.0), (x + 1, p.mean_congestion)],
            congestion_color(p.mean_congestion).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub fn draw_heatmap(path: &Path, matrix: &CongestionMatrix) -> Result<(), Box<dyn Error>> {
    let (cell_width, cell_height) = (110i32, 30i32);
    let (label_width, header_height) = (70i32, 40i32);
    let image_width = label_width + cell_width * matrix.weekdays.len() as i32;
    let image_height = header_height + cell_height * matrix.hours.len() as i32;

    let root = BitMapBackend::new(path, (image_width as u32, image_height as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let centered = |size: u32| {
        TextStyle::from(("sans-serif", size).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    for (col, day) in matrix.weekdays.iter().enumerate() {
        let x = label_width + col as i32 * cell_width + cell_width / 2;
        root.draw(&Text::new(day.to_string(), (x, header_height / 2), centered(15)))?;
    }

    for (row, hour) in matrix.hours.iter().enumerate() {
        let y0 = header_height + row as i32 * cell_height;
        root.draw(&Text::new(
            hour.to_string(),
            (label_width / 2, y0 + cell_height / 2),
            centered(14),
        ))?;

        for (col, cell) in matrix.cells[row].iter().enumerate() {
            let x0 = label_width + col as i32 * cell_width;
            let corners = [(x0, y0), (x0 + cell_width, y0 + cell_height)];
            let fill = match cell {
                Some(level) => congestion_color(*level),
                None => RGBColor(220, 220, 220),
            };
            root.draw(&Rectangle::new(corners, fill.filled()))?;
            root.draw(&Rectangle::new(corners, &BLACK))?;
            if let Some(level) = cell {
                root.draw(&Text::new(
                    format!("{:.1}", level),
                    (x0 + cell_width / 2, y0 + cell_height / 2),
                    centered(13),
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Draw every chart of the view into `dir`. Empty views draw nothing.
pub fn render_charts(view: &ViewModel<'_>, dir: &str) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if view.is_empty() {
        log::warn!("Nothing to chart for an empty selection");
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)?;
    let dir = Path::new(dir);

    let daily = dir.join("daily_congestion_trend.png");
    draw_daily_trend(&daily, &view.daily_trend)?;
    let weekday = dir.join("weekday_congestion.png");
    draw_weekday_bars(&weekday, &view.weekday_congestion)?;
    let heatmap = dir.join("hour_weekday_heatmap.png");
    draw_heatmap(&heatmap, &view.hour_weekday)?;
    let rush = dir.join("rush_hours.png");
    draw_rush_hours(&rush, &view.rush_hours)?;

    let written = vec![daily, weekday, heatmap, rush];
    log::info!("Wrote {} charts to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scale_runs_green_to_red() {
        let free = congestion_color(1.0);
        let jammed = congestion_color(10.0);
        assert!(free.1 > free.0);
        assert!(jammed.0 > jammed.1);
        assert_eq!(congestion_color(0.0), free);
        assert_eq!(congestion_color(12.0), jammed);
    }
}
