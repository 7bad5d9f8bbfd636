//! CLI for retargeting OpenPose JSON documents.
//!
//! Usage:
//!   pose-retarget input.json --age 8 --gender female -o child.json
//!   pose-retarget input.json --age 8 --gender female --input-age 20 --input-gender female
//!   pose-retarget input.json --estimate-only

use std::path::PathBuf;

use clap::Parser;
use pose_retarget::{Document, Gender};

#[derive(Parser, Debug)]
#[command(name = "pose-retarget")]
#[command(author, version, about = "Retarget 2D pose keypoints to a different age and gender", long_about = None)]
struct Args {
    /// Input OpenPose JSON file
    #[arg(required = true)]
    input: PathBuf,

    /// Target age in years (0..=120)
    #[arg(long, default_value = "20")]
    age: u32,

    /// Target gender: "male" or "female"
    #[arg(long, default_value = "female")]
    gender: Gender,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only process the pose at this index (default: all poses)
    #[arg(long)]
    pose: Option<usize>,

    /// Override the declared input age
    #[arg(long)]
    input_age: Option<u32>,

    /// Override the declared input gender
    #[arg(long)]
    input_gender: Option<Gender>,

    /// Report estimated age, gender and height instead of scaling
    #[arg(long)]
    estimate_only: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if args.verbose { "debug" } else { "warn" },
    ))
    .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        eprintln!("Loading {:?}...", args.input);
    }
    let mut doc = Document::load(&args.input)?;
    if args.verbose {
        eprintln!(
            "Loaded {} pose(s) on a {}x{} canvas",
            doc.people.len(),
            doc.canvas_width,
            doc.canvas_height
        );
    }

    let indices: Vec<usize> = match args.pose {
        Some(index) => {
            if index >= doc.people.len() {
                return Err(format!(
                    "pose index {} out of range ({} poses)",
                    index,
                    doc.people.len()
                )
                .into());
            }
            vec![index]
        }
        None => (0..doc.people.len()).collect(),
    };

    if args.estimate_only {
        for &index in &indices {
            let pose = &doc.people[index];
            let age = pose.guess_age();
            let gender = pose.guess_gender();
            let height = pose.estimate_height();
            println!(
                "Pose {}: age {}, gender {}, height {}",
                index,
                age.map_or("unknown".into(), |a| a.to_string()),
                gender.map_or("unknown".into(), |g| g.to_string()),
                height.map_or("unknown".into(), |h| format!("{h:.0} cm")),
            );
        }
        return Ok(());
    }

    for &index in &indices {
        if let Some(age) = args.input_age {
            doc.people[index].input_age = Some(age);
        }
        if let Some(gender) = args.input_gender {
            doc.people[index].input_gender = Some(gender);
        }

        if args.verbose {
            eprintln!(
                "Scaling pose {} to target age {} and gender {}...",
                index, args.age, args.gender
            );
        }
        doc.scale_pose(index, args.age, args.gender)?;
    }

    let output = doc.to_json()?;
    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        if args.verbose {
            eprintln!("Output written to {:?}", path);
        }
    } else {
        println!("{}", output);
    }

    Ok(())
}
