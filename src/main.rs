//! Command-line front end for the workout tracker.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use workout_tracker::{analysis, export};
use workout_tracker::repository::JsonStore;
use workout_tracker::report::{ReportData, export_html_report};
use workout_tracker::timer::{RestTimer, TimerEvent, TimerPhase};
use workout_tracker::{
    Category, ExerciseFilter, ProgressMetric, RecordMetric, SetInput, Settings, Tracker, Workout,
};

/// Log workouts and follow your training progress
#[derive(Parser, Debug)]
#[command(name = "workout-tracker")]
#[command(about = "Log workouts and follow your training progress", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the workout data (overrides settings)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog exercises
    Exercises {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Define a custom exercise
    CreateExercise {
        name: String,
        #[arg(long, default_value = "weight")]
        category: Category,
        #[arg(long, default_value = "3")]
        sets: String,
        #[arg(long, default_value = "10")]
        reps: String,
    },
    /// Delete a custom exercise
    DeleteExercise { id: String },
    /// Start a new workout
    Start {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add a catalog exercise to the current workout
    Add { exercise_id: String },
    /// Remove the exercise at a position (1-based)
    Remove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
    /// Replace the sets of an exercise, e.g. `log 1 --set 10,135 --set 8,155`
    /// (reps,weight) or `--set 30,250` (minutes,calories) for cardio
    Log {
        #[arg(value_parser = parse_position)]
        position: usize,
        #[arg(long = "set", required = true)]
        sets: Vec<String>,
    },
    /// Append a set to an exercise, copying the previous one
    AddSet {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
    /// Remove one set (both positions 1-based)
    RemoveSet {
        #[arg(value_parser = parse_position)]
        position: usize,
        #[arg(value_parser = parse_position)]
        set: usize,
    },
    /// Set notes on the workout or one of its exercises
    Notes {
        text: String,
        #[arg(long, value_parser = parse_position)]
        exercise: Option<usize>,
    },
    /// Show the current workout
    Status,
    /// Finish the current workout
    Finish,
    /// Throw away the current workout
    Discard,
    /// List finished workouts
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Start a new workout from a finished one
    Repeat {
        workout_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Weekly and monthly totals plus the current streak
    Summary,
    /// Progress of one exercise over time; lists logged exercises when none is given
    Progress {
        exercise: Option<String>,
        #[arg(long, default_value = "weight")]
        metric: ProgressMetric,
    },
    /// Personal records
    Records,
    /// Manage workout templates
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Body weight log
    #[command(subcommand)]
    Weight(WeightCommand),
    /// Run the rest timer in the terminal
    Timer {
        #[arg(long)]
        seconds: Option<u32>,
    },
    /// Export history, records and summaries to a directory
    Export { dir: PathBuf },
    /// Write an HTML report
    Report {
        path: PathBuf,
        #[arg(long)]
        exercise: Option<String>,
    },
    /// Show or change saved settings
    Settings {
        /// Data directory to remember for future runs
        #[arg(long)]
        default_data_dir: Option<PathBuf>,
        #[arg(long)]
        rest_seconds: Option<u32>,
        #[arg(long)]
        history_limit: Option<usize>,
        #[arg(long)]
        report_exercise: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TemplateCommand {
    /// Save the current workout as a template
    Save { name: String },
    /// Start a workout from a template
    Load {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a template
    Delete { id: String },
    /// List templates
    List,
}

#[derive(Subcommand, Debug)]
enum WeightCommand {
    /// Log today's body weight
    Log {
        weight: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show recent entries
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a 1-based position from the command line.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("positions start at 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Library index for a position checked by [`parse_position`].
fn index(position: usize) -> usize {
    position - 1
}

fn print_workout(w: &Workout) {
    println!("{} ({})", w.date.format("%a, %b %-d"), w.id);
    if !w.notes.is_empty() {
        println!("  {}", w.notes);
    }
    for (i, ex) in w.exercises.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, ex.name, ex.category);
        for (n, s) in ex.sets.iter().enumerate() {
            if ex.category.is_cardio() {
                println!("     Set {}: {} min, {} cal", n + 1, s.duration, s.calories);
            } else if s.weight > 0.0 {
                println!("     Set {}: {} reps @ {} lbs", n + 1, s.reps, s.weight);
            } else {
                println!("     Set {}: {} reps", n + 1, s.reps);
            }
        }
    }
}

fn parse_set_inputs(raw: &[String], category: Category) -> Vec<SetInput> {
    raw.iter()
        .map(|s| {
            let (a, b) = s.split_once(',').unwrap_or((s.as_str(), ""));
            if category.is_cardio() {
                SetInput::cardio(a, b)
            } else {
                SetInput::strength(a, b)
            }
        })
        .collect()
}

fn run_timer(seconds: u32) {
    let mut timer = RestTimer::new(seconds);
    timer.start();
    println!("{}", timer.display());
    while timer.is_running() {
        std::thread::sleep(Duration::from_secs(1));
        let event = timer.tick();
        match timer.phase() {
            TimerPhase::Warning => println!("{} !", timer.display()),
            _ => println!("{}", timer.display()),
        }
        if event == Some(TimerEvent::Completed) {
            println!("\x07Rest over!");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let mut settings = Settings::load();

    if let Commands::Settings {
        default_data_dir,
        rest_seconds,
        history_limit,
        report_exercise,
    } = &cli.command
    {
        let changed = default_data_dir.is_some()
            || rest_seconds.is_some()
            || history_limit.is_some()
            || report_exercise.is_some();
        if let Some(dir) = default_data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if let Some(secs) = rest_seconds {
            settings.rest_seconds = *secs;
        }
        if let Some(limit) = history_limit {
            settings.weight_history_limit = *limit;
        }
        if let Some(name) = report_exercise {
            settings.report_exercise = Some(name.clone());
        }
        if changed {
            settings.save()?;
            info!("Settings saved");
        }
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.resolve_data_dir())
        .ok_or("could not determine a data directory")?;
    let store = JsonStore::new(data_dir);
    info!("Using data directory {}", store.dir().display());
    let mut tracker = Tracker::open(store)?;

    match cli.command {
        Commands::Exercises { category, search } => {
            let filter = ExerciseFilter {
                category,
                query: search,
            };
            let list = tracker.list_exercises(&filter);
            if list.is_empty() {
                println!("No exercises found");
            }
            for ex in list {
                println!(
                    "{:<24} {:<20} {:<10} {} sets x {} reps",
                    ex.id, ex.name, ex.category, ex.default_sets, ex.default_reps
                );
            }
        }
        Commands::CreateExercise {
            name,
            category,
            sets,
            reps,
        } => {
            let ex = tracker.create_exercise(&name, category, &sets, &reps)?;
            println!("Created {} ({})", ex.name, ex.id);
        }
        Commands::DeleteExercise { id } => {
            let ex = tracker.delete_exercise(&id)?;
            println!("Deleted {}", ex.name);
        }
        Commands::Start { date } => {
            let w = tracker.start_session(date.unwrap_or_else(today))?;
            println!("Started workout {}", w.id);
        }
        Commands::Add { exercise_id } => {
            tracker.add_exercise(&exercise_id)?;
            if let Some(w) = tracker.current_session() {
                print_workout(w);
            }
        }
        Commands::Remove { position } => {
            tracker.remove_exercise(index(position))?;
        }
        Commands::Log { position, sets } => {
            let category = tracker
                .current_session()
                .and_then(|w| w.exercises.get(index(position)))
                .map(|ex| ex.category)
                .unwrap_or(Category::Weight);
            tracker.log_sets(index(position), &parse_set_inputs(&sets, category))?;
            if let Some(w) = tracker.current_session() {
                print_workout(w);
            }
        }
        Commands::AddSet { position } => {
            let set = tracker.add_set(index(position))?;
            println!("Added set: {} reps @ {} lbs", set.reps, set.weight);
        }
        Commands::RemoveSet { position, set } => {
            tracker.remove_set(index(position), index(set))?;
        }
        Commands::Notes { text, exercise } => match exercise {
            Some(p) => tracker.set_exercise_notes(index(p), &text)?,
            None => tracker.set_notes(&text)?,
        },
        Commands::Status => match tracker.current_session() {
            Some(w) if w.exercises.is_empty() => println!("Add your first exercise"),
            Some(w) => print_workout(w),
            None => println!("No workout in progress"),
        },
        Commands::Finish => {
            let (workout, notices) = tracker.finish_session()?;
            println!("Workout {} saved", workout.id);
            for n in notices {
                println!("New PR! {n}");
            }
        }
        Commands::Discard => {
            tracker.discard_session()?;
            println!("Workout discarded");
        }
        Commands::History { limit } => {
            let workouts = &tracker.state().workouts;
            if workouts.is_empty() {
                println!("No workout history yet");
            }
            for w in workouts.iter().take(limit) {
                print_workout(w);
            }
        }
        Commands::Repeat { workout_id, date } => {
            let w = tracker.repeat_workout(&workout_id, date.unwrap_or_else(today))?;
            print_workout(w);
        }
        Commands::Summary => {
            let now = Local::now().naive_local();
            for (label, s) in [
                ("This week", tracker.weekly_summary(now)),
                ("This month", tracker.monthly_summary(now)),
            ] {
                println!(
                    "{label}: {} workouts, {:.0} lbs volume, {:.0} cardio min, {:.0} cal",
                    s.workouts, s.total_volume, s.cardio_minutes, s.total_calories
                );
            }
            println!("Current streak: {} days", tracker.current_streak(today()));
        }
        Commands::Progress {
            exercise: None,
            ..
        } => {
            for name in analysis::logged_exercise_names(&tracker.state().workouts) {
                println!("{name}");
            }
        }
        Commands::Progress {
            exercise: Some(exercise),
            metric,
        } => {
            for p in tracker.progress_series(&exercise, metric) {
                println!("{}  {}", p.date, p.value);
            }
            match tracker.progress_stats(&exercise, metric) {
                Some(s) => println!(
                    "{}: latest {}, best {}, {} sessions, {:+.1}%",
                    metric.label(),
                    s.latest,
                    s.personal_best,
                    s.session_count,
                    s.improvement_pct
                ),
                None => println!("No data for this exercise"),
            }
        }
        Commands::Records => {
            for r in tracker.state().personal_records.iter() {
                println!("{:<20} {:<7} {:>10} {}", r.exercise, r.metric, r.value, r.date);
            }
        }
        Commands::Template(cmd) => match cmd {
            TemplateCommand::Save { name } => {
                let t = tracker.save_template(&name)?;
                println!("Saved template {} ({})", t.name, t.id);
            }
            TemplateCommand::Load { id, date } => {
                let w = tracker.load_template(&id, date.unwrap_or_else(today))?;
                print_workout(w);
            }
            TemplateCommand::Delete { id } => {
                tracker.delete_template(&id)?;
            }
            TemplateCommand::List => {
                for t in &tracker.state().templates {
                    println!("{} {} ({} exercises)", t.id, t.name, t.exercises.len());
                }
            }
        },
        Commands::Weight(cmd) => match cmd {
            WeightCommand::Log { weight, date } => {
                tracker.log_body_weight(date.unwrap_or_else(today), &weight)?;
            }
            WeightCommand::History { limit } => {
                let limit = limit.unwrap_or(settings.weight_history_limit);
                for e in tracker.get_weight_history(limit) {
                    println!("{}  {}", e.date, e.weight);
                }
            }
        },
        Commands::Timer { seconds } => run_timer(seconds.unwrap_or(settings.rest_seconds)),
        Commands::Export { dir } => {
            std::fs::create_dir_all(&dir)?;
            let state = tracker.state();
            let now = Local::now().naive_local();
            export::save_history_csv(dir.join("history.csv"), &state.workouts)?;
            export::save_history_json(dir.join("history.json"), &state.workouts)?;
            export::save_records_csv(dir.join("records.csv"), &state.personal_records)?;
            export::save_body_weight_csv(dir.join("body_weight.csv"), &state.body_weight_log)?;
            export::save_summary_json(
                dir.join("summary.json"),
                &tracker.weekly_summary(now),
                &tracker.monthly_summary(now),
                tracker.current_streak(today()),
                &state.personal_records,
            )?;
            println!("Exported to {}", dir.display());
        }
        Commands::Report { path, exercise } => {
            let now = Local::now().naive_local();
            let weekly = tracker.weekly_summary(now);
            let monthly = tracker.monthly_summary(now);
            let exercise = exercise.or_else(|| settings.report_exercise.clone());
            let progress = exercise.as_deref().map(|name| {
                let series = tracker
                    .progress_series(name, ProgressMetric::Weight)
                    .collect::<Vec<_>>();
                (name, series)
            });
            let data = ReportData {
                weekly: &weekly,
                monthly: &monthly,
                streak: tracker.current_streak(today()),
                records: &tracker.state().personal_records,
                progress,
            };
            export_html_report(&path, &data)?;
            if let Some(name) = exercise.as_deref() {
                if let Some(r) = tracker.get_record(name, RecordMetric::Weight) {
                    info!("{name} best weight {} on {}", r.value, r.date);
                }
            }
            println!("Report written to {}", path.display());
        }
        // handled before the store is opened
        Commands::Settings { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_start_at_one() {
        assert_eq!(parse_position("1"), Ok(1));
        assert!(parse_position("0").is_err());
        assert!(parse_position("-2").is_err());
        assert!(Cli::try_parse_from(["workout-tracker", "remove", "0"]).is_err());
        assert!(Cli::try_parse_from(["workout-tracker", "remove-set", "1", "0"]).is_err());

        let cli = Cli::try_parse_from(["workout-tracker", "add-set", "2"]).unwrap();
        match cli.command {
            Commands::AddSet { position } => assert_eq!(index(position), 1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn settings_flags_parse() {
        let cli = Cli::try_parse_from(["workout-tracker", "settings", "--rest-seconds", "120"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings {
                rest_seconds: Some(120),
                ..
            }
        ));
    }
}
