use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use educa_scheduler::gateway::JsonStore;
use educa_scheduler::payload::build_problem;
use educa_scheduler::reporter::{
    build_pre_solve_response, build_run_response, generate_reports, parse_formats, print_summary,
};
use educa_scheduler::request::{ClassIdsInput, RunRequest};
use educa_scheduler::scheduler::solve;
use educa_scheduler::types::SchoolId;
use educa_scheduler::validator::run_pre_solve;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "educa-scheduler")]
#[command(about = "Greedy weekly timetable generator for school classes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on generated sample data
    Demo,

    /// Build the problem instance and print the pre-solve report
    PreSolve {
        /// Directory containing the store's JSON relations
        #[arg(short, long)]
        data: PathBuf,

        /// School id
        #[arg(long)]
        school: i64,

        /// Shift (morning/afternoon/evening label, case-insensitive)
        #[arg(long)]
        shift: String,

        /// Class ids, comma-separated (e.g. "1,2,3")
        #[arg(long)]
        classes: String,

        /// Reference year for the pedagogical rule row
        #[arg(long)]
        year: Option<i32>,

        /// Educational level for the pedagogical rule row
        #[arg(long)]
        level: Option<String>,
    },

    /// Generate a timetable and print or write the response
    Run {
        /// Directory containing the store's JSON relations
        #[arg(short, long)]
        data: PathBuf,

        /// School id
        #[arg(long)]
        school: i64,

        /// Shift (morning/afternoon/evening label, case-insensitive)
        #[arg(long)]
        shift: String,

        /// Class ids, comma-separated (e.g. "1,2,3")
        #[arg(long)]
        classes: String,

        /// Reference year for the pedagogical rule row
        #[arg(long)]
        year: Option<i32>,

        /// Educational level for the pedagogical rule row
        #[arg(long)]
        level: Option<String>,

        /// Output directory for report files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print the JSON response only
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::PreSolve {
            data,
            school,
            shift,
            classes,
            year,
            level,
        } => run_pre_solve_cmd(&data, school, shift, classes, year, level),
        Commands::Run {
            data,
            school,
            shift,
            classes,
            year,
            level,
            output,
            format,
            quiet,
        } => run_generate(&data, school, shift, classes, year, level, &output, &format, quiet),
    }
}

fn run_pre_solve_cmd(
    data: &PathBuf,
    school: i64,
    shift: String,
    classes: String,
    year: Option<i32>,
    level: Option<String>,
) -> Result<()> {
    let request = RunRequest {
        shift,
        class_ids: ClassIdsInput::Csv(classes),
        year_ref: year,
        level,
    }
    .validate()?;

    let store = JsonStore::open(data);
    let instance = build_problem(
        &store,
        SchoolId(school),
        &request.shift,
        &request.class_ids,
        request.year_ref,
        request.level.as_deref(),
    )
    .context("Failed to build the problem instance")?;

    let report = run_pre_solve(&instance);
    let response = build_pre_solve_response(instance, report);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    data: &PathBuf,
    school: i64,
    shift: String,
    classes: String,
    year: Option<i32>,
    level: Option<String>,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let request = RunRequest {
        shift,
        class_ids: ClassIdsInput::Csv(classes),
        year_ref: year,
        level,
    }
    .validate()?;

    let store = JsonStore::open(data);
    let instance = build_problem(
        &store,
        SchoolId(school),
        &request.shift,
        &request.class_ids,
        request.year_ref,
        request.level.as_deref(),
    )
    .context("Failed to build the problem instance")?;

    let pre_solve = run_pre_solve(&instance);
    if !quiet {
        for error in &pre_solve.errors {
            println!("{} {}", "Error:".red(), error);
        }
        for warning in &pre_solve.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} classes, {} demand rows, {} teachers",
            instance.classes.len(),
            instance.demand.len(),
            instance.teacher_ids().len()
        );
        if instance.config_defaulted {
            println!("Pedagogical rules: defaults");
        }
        println!("\nGenerating timetable...\n");
    }

    let schedule = solve(&instance, quiet);

    if quiet {
        let response = build_run_response(&instance, &schedule);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_summary(&schedule, &pre_solve);

    let formats = parse_formats(format);
    generate_reports(&instance, &schedule, &pre_solve, output, &formats)?;
    println!(
        "Reports written to: {}",
        output.display().to_string().green()
    );

    Ok(())
}

fn run_demo() -> Result<()> {
    println!("{}", "Educa Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    if !demo_path.join("classes.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }
    println!("Loading demo data from: {}", demo_path.display());

    run_generate(
        &demo_path,
        1,
        "manha".to_string(),
        "1,2".to_string(),
        Some(2026),
        None,
        &PathBuf::from("output"),
        "all",
        false,
    )
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let mut grid_rows = Vec::new();
    for day in 1..=5 {
        let periods: Vec<serde_json::Value> = (1..=5)
            .map(|o| {
                serde_json::json!({
                    "ordem": o,
                    "start": format!("{:02}:00", 6 + o),
                    "end": format!("{:02}:50", 6 + o)
                })
            })
            .collect();
        grid_rows.push(serde_json::json!({
            "school_id": 1, "shift": "manha", "day": day, "periods": periods
        }));
    }
    std::fs::write(
        path.join("time_grid.json"),
        serde_json::to_string_pretty(&grid_rows)?,
    )?;

    let classes = serde_json::json!([
        {"school_id": 1, "id": 1, "name": "6A", "stage": "fundamental", "series": "6", "shift": "manha"},
        {"school_id": 1, "id": 2, "name": "6B", "stage": "fundamental", "series": "6", "shift": "manha"}
    ]);
    std::fs::write(path.join("classes.json"), serde_json::to_string_pretty(&classes)?)?;

    // Subjects: 10 = math, 20 = portuguese, 30 = science, 40 = history
    let demand = serde_json::json!([
        {"school_id": 1, "shift": "manha", "class_id": 1, "subject_id": 10, "weekly_lessons": 5},
        {"school_id": 1, "shift": "manha", "class_id": 1, "subject_id": 20, "weekly_lessons": 5},
        {"school_id": 1, "shift": "manha", "class_id": 1, "subject_id": 30, "weekly_lessons": 3},
        {"school_id": 1, "shift": "manha", "class_id": 1, "subject_id": 40, "weekly_lessons": 2},
        {"school_id": 1, "shift": "manha", "class_id": 2, "subject_id": 10, "weekly_lessons": 5},
        {"school_id": 1, "shift": "manha", "class_id": 2, "subject_id": 20, "weekly_lessons": 5},
        {"school_id": 1, "shift": "manha", "class_id": 2, "subject_id": 30, "weekly_lessons": 3},
        {"school_id": 1, "shift": "manha", "class_id": 2, "subject_id": 40, "weekly_lessons": 2}
    ]);
    std::fs::write(path.join("demand.json"), serde_json::to_string_pretty(&demand)?)?;

    let assignments = serde_json::json!([
        {"school_id": 1, "teacher_id": 101, "class_id": 1, "subject_id": 10},
        {"school_id": 1, "teacher_id": 101, "class_id": 2, "subject_id": 10},
        {"school_id": 1, "teacher_id": 102, "class_id": 1, "subject_id": 20},
        {"school_id": 1, "teacher_id": 102, "class_id": 2, "subject_id": 20},
        {"school_id": 1, "teacher_id": 103, "class_id": 1, "subject_id": 30},
        {"school_id": 1, "teacher_id": 103, "class_id": 2, "subject_id": 30},
        {"school_id": 1, "teacher_id": 104, "class_id": 1, "subject_id": 40},
        {"school_id": 1, "teacher_id": 104, "class_id": 2, "subject_id": 40}
    ]);
    std::fs::write(
        path.join("assignments.json"),
        serde_json::to_string_pretty(&assignments)?,
    )?;

    // Teacher 104 only works Mondays and Tuesdays
    let availabilities: Vec<serde_json::Value> = (1..=2)
        .map(|day| {
            let periods: Vec<serde_json::Value> = (1..=5)
                .map(|o| serde_json::json!({"ordem": o, "status": "livre"}))
                .collect();
            serde_json::json!({
                "school_id": 1, "shift": "manha", "teacher_id": 104, "day": day,
                "periods": periods
            })
        })
        .collect();
    std::fs::write(
        path.join("availabilities.json"),
        serde_json::to_string_pretty(&availabilities)?,
    )?;

    let locks = serde_json::json!([
        {"school_id": 1, "shift": "manha", "class_id": 1, "day": 3, "ordem": 1,
         "subject_id": 30, "teacher_id": 103}
    ]);
    std::fs::write(path.join("locks.json"), serde_json::to_string_pretty(&locks)?)?;

    let rules = serde_json::json!([
        {"school_id": 1, "shift": "manha", "year_ref": 2026, "level": null,
         "rules": {"rc01": {"mode": "soft", "max_consecutive": 2},
                    "rc02": {"mode": "soft", "default_per_day": 2}}}
    ]);
    std::fs::write(
        path.join("pedagogical_rules.json"),
        serde_json::to_string_pretty(&rules)?,
    )?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
