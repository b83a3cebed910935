use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use swing_domain::{
    AngleType, Category, Dataset, DatasetExporter, ExportFormat, GolferProfile, JsonExporter,
    NormalizedSequence, SwingMetadata,
};
use swing_pipeline::keypoints::read_keypoints;
use swing_pipeline::{
    Calibration, CategoryRoots, ConfusionMatrix, DatasetAssembler, PipelineConfig, Prediction,
    RecordingWriter,
};
use swing_registry::{CsvStore, GolferRegistry};
use time::OffsetDateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prepare golf swing recordings for the swing error classifier"
)]
struct Cli {
    /// YAML file with the data layout; defaults to the standard data/ tree
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a golfer to the registry and print the new id
    Register(RegisterArgs),
    /// Show a registered golfer's profile
    Lookup { golfer_id: String },
    /// Store the pixel scale measured from a reference club
    Calibrate {
        #[arg(long)]
        club_length_px: f32,
        #[arg(long)]
        club_length_in: f32,
    },
    /// File an extracted keypoints table under its swing category
    Record(RecordArgs),
    /// Build the labeled dataset from the category directories
    Assemble {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write train/test splits next to the output
        #[arg(long)]
        split: bool,
    },
    /// Print a keypoints table normalized for the classifier
    Normalize { keypoints: PathBuf },
    /// Report accuracy for a JSON list of {truth, predicted} pairs
    Evaluate { predictions: PathBuf },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    height_cm: f32,
    #[arg(long)]
    weight_kg: f32,
    /// m, f or other
    #[arg(long)]
    gender: String,
    #[arg(long)]
    age: u32,
    /// 0 for beginners
    #[arg(long)]
    handicap: f32,
    #[arg(long)]
    years_playing: f32,
    #[arg(long, default_value = "right")]
    dominant_hand: String,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    golfer_id: String,
    /// Club type, e.g. driver or 7-iron
    #[arg(long)]
    club: String,
    #[arg(long)]
    category: Category,
    #[arg(long, default_value = "face-on")]
    angle: AngleType,
    #[arg(long)]
    camera_distance_ft: f32,
    #[arg(long)]
    camera_height_ft: f32,
    /// Keypoints table produced by the pose extractor
    #[arg(long)]
    keypoints: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Command::Register(args) => register(&config, args),
        Command::Lookup { golfer_id } => lookup(&config, &golfer_id),
        Command::Calibrate {
            club_length_px,
            club_length_in,
        } => {
            let calibration = Calibration::from_reference(club_length_px, club_length_in)?;
            calibration.save(&config.calibration_path)?;
            println!("Calibration: {:.2} pixels per inch", calibration.px_per_inch);
            Ok(())
        }
        Command::Record(args) => record(&config, args),
        Command::Assemble { output, split } => {
            let output = output.unwrap_or_else(|| config.output_path.clone());
            assemble(&config, &output, split)
        }
        Command::Normalize { keypoints } => {
            let raw = read_keypoints(&keypoints)?;
            let sequence = NormalizedSequence::from_raw(&raw)
                .with_context(|| format!("normalize {:?}", keypoints))?;
            println!("{}", serde_json::to_string(&sequence)?);
            Ok(())
        }
        Command::Evaluate { predictions } => evaluate(&predictions),
    }
}

fn open_registry(config: &PipelineConfig) -> Result<GolferRegistry<CsvStore>> {
    Ok(GolferRegistry::new(CsvStore::open(&config.registry_path)?))
}

fn register(config: &PipelineConfig, args: RegisterArgs) -> Result<()> {
    let mut registry = open_registry(config)?;
    let golfer_id = registry.register(GolferProfile {
        height_cm: args.height_cm,
        weight_kg: args.weight_kg,
        gender: args.gender,
        age: args.age,
        handicap: args.handicap,
        years_playing: args.years_playing,
        dominant_hand: args.dominant_hand,
    })?;
    println!("Golfer registered with ID: {}", golfer_id);
    println!("Use this ID when recording swings");
    Ok(())
}

fn lookup(config: &PipelineConfig, golfer_id: &str) -> Result<()> {
    let registry = open_registry(config)?;
    match registry.lookup(golfer_id)? {
        Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
        None => println!("No golfer registered with ID {}", golfer_id),
    }
    Ok(())
}

fn record(config: &PipelineConfig, args: RecordArgs) -> Result<()> {
    let registry = open_registry(config)?;
    if registry.lookup(&args.golfer_id)?.is_none() {
        warn!(golfer_id = %args.golfer_id, "golfer is not registered, defaults will be used");
    }
    let frames = read_keypoints(&args.keypoints)?;
    let calibration = Calibration::load(&config.calibration_path)?;
    let metadata = SwingMetadata::new(
        args.golfer_id,
        args.club,
        args.camera_distance_ft,
        args.camera_height_ft,
        args.angle,
        OffsetDateTime::now_utc(),
        frames.len(),
        calibration.px_per_inch,
    );
    let roots = CategoryRoots::from_base_dir(&config.base_dir);
    let dir = roots
        .get(args.category)
        .with_context(|| format!("no directory configured for {}", args.category))?;
    let files = RecordingWriter.write(dir, metadata, &frames)?;
    println!("Swing recorded: {}", files.stem);
    Ok(())
}

fn assemble(config: &PipelineConfig, output: &Path, split: bool) -> Result<()> {
    let registry = open_registry(config)?;
    let report = DatasetAssembler::new(&registry).assemble(&config.category_roots())?;
    for skipped in &report.skipped {
        info!(
            category = %skipped.category,
            file = %skipped.keypoints.display(),
            reason = %skipped.reason,
            "excluded from dataset"
        );
    }
    write_dataset(output, &report.dataset)?;
    println!(
        "Dataset created with {} samples ({} skipped)",
        report.dataset.len(),
        report.skipped.len()
    );

    if split {
        let (train, test) = report
            .dataset
            .split(config.test_fraction, config.seed)?;
        write_dataset(&sibling(output, "train"), &train)?;
        write_dataset(&sibling(output, "test"), &test)?;
        println!("Split into {} train / {} test", train.len(), test.len());
    }
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    path.with_file_name(format!("{}_{}.json", stem, suffix))
}

fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let bytes = JsonExporter.export(dataset, ExportFormat::Json)?;
    fs::write(path, bytes).with_context(|| format!("write dataset {:?}", path))?;
    info!(path = %path.display(), rows = dataset.len(), "dataset written");
    Ok(())
}

fn evaluate(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open predictions {:?}", path))?;
    let predictions: Vec<Prediction> = serde_json::from_reader(BufReader::new(file))?;
    info!(count = predictions.len(), "loaded predictions");
    let matrix = ConfusionMatrix::from_predictions(&predictions);
    print!("{}", matrix);
    Ok(())
}
