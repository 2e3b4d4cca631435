// dashboard_main.rs
//
// Console front end: loads the dataset once, keeps the filter and display
// options, and redraws the view after every menu action.

use bandung_congestion::analytics::{
    render, to_json, DisplayConfig, FilterState, SortDirection, SortField, ViewModel,
};
use bandung_congestion::global_variables::DEFAULT_SETTINGS_FILE;
use bandung_congestion::reporting::console::{
    print_filter, print_location_detail, print_locations, print_records, print_rush_hours,
    print_summary, print_temporal,
};
use bandung_congestion::reporting::render_charts;
use bandung_congestion::settings::{AppSettings, DashboardSettings};
use bandung_congestion::shared_data::DayOfWeek;
use bandung_congestion::storage::{load_dataset, write_export, Dataset};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::env;
use std::error::Error;
use std::io::{self, stdin, stdout, BufRead, Write};
use std::process;

/// One trimmed line; closed input is `UnexpectedEof` rather than an empty answer.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    stdout().flush()?;
    read_answer(&mut stdin().lock())
}

fn input_closed(error: &(dyn Error + 'static)) -> bool {
    error
        .downcast_ref::<io::Error>()
        .map_or(false, |e| e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Case-insensitive match of a typed name against the known locations.
fn resolve_location(known: &[String], name: &str) -> Option<String> {
    known.iter().find(|k| k.eq_ignore_ascii_case(name)).cloned()
}

fn parse_list<T, F>(input: &str, all: &[T], parse: F) -> Result<BTreeSet<T>, String>
where
    T: Ord + Clone,
    F: Fn(&str) -> Result<T, String>,
{
    if input.eq_ignore_ascii_case("all") {
        return Ok(all.iter().cloned().collect());
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse)
        .collect()
}

fn edit_filters(dataset: &Dataset, filter: &mut FilterState) -> io::Result<()> {
    println!("\nCurrent filters:");
    print_filter(filter);
    println!("\n1. Date range");
    println!("2. Locations");
    println!("3. Weekdays");
    println!("4. Reset to everything");
    let choice = prompt("Enter your choice: ")?;
    match choice.as_str() {
        "1" => {
            let start = prompt("Start date (YYYY-MM-DD): ")?;
            let end = prompt("End date (YYYY-MM-DD): ")?;
            match (start.parse::<NaiveDate>(), end.parse::<NaiveDate>()) {
                (Ok(start), Ok(end)) if start <= end => {
                    filter.start_date = start;
                    filter.end_date = end;
                }
                _ => println!("Invalid date range, filters unchanged."),
            }
        }
        "2" => {
            let known = dataset.locations();
            println!("Available: {}", known.join(", "));
            let input = prompt("Locations (comma separated, 'all', or empty for none): ")?;
            let parsed = parse_list(&input, &known, |name| {
                resolve_location(&known, name)
                    .ok_or_else(|| format!("unknown location '{}'", name))
            });
            match parsed {
                Ok(locations) => filter.locations = locations,
                Err(e) => println!("{}, filters unchanged.", e),
            }
        }
        "3" => {
            let input = prompt("Weekdays (comma separated, 'all', or empty for none): ")?;
            let known: Vec<DayOfWeek> = dataset.weekdays().into_iter().collect();
            match parse_list(&input, &known, |s| s.parse::<DayOfWeek>()) {
                Ok(days) => filter.weekdays = days,
                Err(e) => println!("{}, filters unchanged.", e),
            }
        }
        "4" => {
            if let Some(all) = FilterState::select_all(dataset) {
                *filter = all;
            }
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn edit_display(display: &mut DisplayConfig) -> io::Result<()> {
    let field = prompt("Sort by (date/congestion/speed/volume): ")?;
    match field.parse::<SortField>() {
        Ok(field) => display.sort_field = field,
        Err(e) => println!("{}", e),
    }
    let direction = prompt("Order (asc/desc): ")?;
    match direction.parse::<SortDirection>() {
        Ok(direction) => display.direction = direction,
        Err(e) => println!("{}", e),
    }
    let rows = prompt("Rows to show (10-1000): ")?;
    match rows.parse::<usize>() {
        Ok(rows) => display.set_row_limit(rows),
        Err(_) => println!("Invalid row count, keeping {}", display.row_limit()),
    }
    Ok(())
}

fn export(view: &ViewModel<'_>, settings: &DashboardSettings) {
    let today = Local::now().date_naive();
    match write_export(&settings.export_dir, today, &view.filtered) {
        Ok(path) => println!("Exported {} rows to {}", view.filtered.len(), path.display()),
        Err(e) => eprintln!("Error exporting data: {}", e),
    }
}

fn run_cli(dataset: &Dataset, settings: &DashboardSettings) -> Result<(), Box<dyn Error>> {
    let mut filter =
        FilterState::select_all(dataset).ok_or("dataset holds no observations to filter")?;
    let mut display = settings.display_config();

    loop {
        let view = render(dataset, &filter, &display);
        if view.is_empty() {
            println!("\nWarning: the current filters match no data.");
        }

        println!("\nBandung Traffic Congestion Dashboard");
        println!("1. Summary Metrics");
        println!("2. Temporal Analysis");
        println!("3. Location Statistics");
        println!("4. Location Detail");
        println!("5. Rush Hours");
        println!("6. Data Table");
        println!("7. Change Filters");
        println!("8. Change Table Options");
        println!("9. Export Filtered Data (CSV)");
        println!("10. Render Charts");
        println!("11. Dump View as JSON");
        println!("12. Exit");
        let choice = prompt("Enter your choice: ")?;
        match choice.parse::<u32>().unwrap_or(0) {
            1 => print_summary(&view.summary),
            2 => print_temporal(&view),
            3 => print_locations(&view),
            4 => {
                let name = prompt("Location (empty for first): ")?;
                if name.is_empty() {
                    display.selected_location = None;
                } else {
                    match resolve_location(&dataset.locations(), &name) {
                        Some(location) if filter.locations.contains(&location) => {
                            display.selected_location = Some(location);
                        }
                        Some(location) => {
                            println!("{} is excluded by the current filters.", location);
                            continue;
                        }
                        None => {
                            println!("Unknown location '{}'.", name);
                            continue;
                        }
                    }
                }
                let view = render(dataset, &filter, &display);
                match &view.location_detail {
                    Some(detail) => print_location_detail(detail),
                    None => println!("No data for the selected location."),
                }
            }
            5 => print_rush_hours(&view),
            6 => print_records(&view.records),
            7 => edit_filters(dataset, &mut filter)?,
            8 => edit_display(&mut display)?,
            9 => export(&view, settings),
            10 => match render_charts(&view, &settings.chart_dir) {
                Ok(paths) => {
                    for path in paths {
                        println!("Chart saved to {}", path.display());
                    }
                }
                Err(e) => eprintln!("Error rendering charts: {}", e),
            },
            11 => match to_json(&view) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error serializing view: {}", e),
            },
            12 => {
                println!("Exiting dashboard.");
                break;
            }
            _ => println!("Invalid choice. Try again."),
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let settings_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let settings = match AppSettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            process::exit(1);
        }
    };

    let dataset = match load_dataset(&settings.dashboard.dataset_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to load data: {}", e);
            eprintln!("Run generator_main first to create the dataset.");
            process::exit(1);
        }
    };

    if let Err(e) = run_cli(&dataset, &settings.dashboard) {
        if input_closed(&*e) {
            println!("\nInput closed, exiting dashboard.");
            return;
        }
        eprintln!("Dashboard error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn closed_input_ends_the_session() {
        let mut input = Cursor::new("12\n");
        assert_eq!(read_answer(&mut input).unwrap(), "12");
        let err = read_answer(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let boxed: Box<dyn Error> = err.into();
        assert!(input_closed(&*boxed));
        let other: Box<dyn Error> = "dataset holds no observations to filter".into();
        assert!(!input_closed(&*other));
    }

    #[test]
    fn blank_line_is_an_answer_not_closed_input() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_answer(&mut input).unwrap(), "");
    }

    #[test]
    fn location_names_resolve_ignoring_case() {
        let known = vec!["Jalan Dago".to_string(), "Jalan Riau".to_string()];
        assert_eq!(resolve_location(&known, "jalan dago"), Some("Jalan Dago".to_string()));
        assert_eq!(resolve_location(&known, "JALAN RIAU"), Some("Jalan Riau".to_string()));
        assert_eq!(resolve_location(&known, "Jalan Dgo"), None);
    }
}
