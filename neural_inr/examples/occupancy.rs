//! Example: Fitting a 3D occupancy volume and extracting its isosurface.
//!
//! Loads a `.vol` occupancy field, crops it to its occupied bounding box,
//! fits a coordinate network to it, and runs marching cubes over the best
//! reconstruction. Artifacts (metrics, reconstruction, preview, OBJ mesh)
//! and a model checkpoint are written per run.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p neural_inr --example occupancy -- -n wire -i data/thai_statue.vol
//! ```

use burn::backend::{Autodiff, NdArray};
use clap::Parser;

use neural_inr::prelude::*;

type MyBackend = Autodiff<NdArray>;

#[derive(Parser, Debug)]
#[command(name = "occupancy", about = "INR occupancy reconstruction driver")]
struct Args {
    /// Nonlinearity family: wire, siren, gauss, mfn, relu, posenc.
    #[arg(short = 'n', long, default_value = "wire")]
    nonlinearity: String,
    /// Input volume path (.vol container).
    #[arg(short = 'i', long, default_value = "data/thai_statue.vol")]
    input: String,
    /// Number of epochs.
    #[arg(long, default_value_t = 200)]
    epochs: usize,
    /// Base learning rate.
    #[arg(long, default_value_t = 5e-3)]
    learning_rate: f64,
    /// Minibatch size in samples.
    #[arg(long, default_value_t = 200_000)]
    batch_size: usize,
    /// Binarization threshold for IoU and marching cubes.
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,
    /// Occupancy level used to crop empty space before training.
    #[arg(long, default_value_t = 0.99)]
    crop_threshold: f32,
    /// Hidden layers in the model.
    #[arg(long, default_value_t = 2)]
    hidden_layers: usize,
    /// Hidden units per layer.
    #[arg(long, default_value_t = 256)]
    hidden_features: usize,
    /// Sinusoid frequency omega.
    #[arg(long, default_value_t = 10.0)]
    omega: f64,
    /// Gaussian scale sigma.
    #[arg(long, default_value_t = 40.0)]
    sigma: f64,
    /// Stream per-epoch scalars to a JSONL file in the run directory.
    #[arg(long, default_value_t = false)]
    track: bool,
}

fn main() -> neural_inr::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let nonlinearity: Nonlinearity = args.nonlinearity.parse()?;
    let device = burn::backend::ndarray::NdArrayDevice::Cpu;
    let paths = RunPaths::from_env();

    // Load the volume and discard empty space around the occupied region.
    let volume = inr_io::load_volume(&args.input)?;
    let volume = inr_io::crop_to_occupied(&volume, args.crop_threshold)?;
    let (h, w, t) = volume.shape.dims();
    println!("Training on {}x{}x{} volume", h, w, t);

    let model_config = InrModelConfig::new(3, 1)
        .with_hidden_layers(args.hidden_layers)
        .with_hidden_features(args.hidden_features)
        .with_first_omega(args.omega)
        .with_hidden_omega(args.omega)
        .with_sigma(args.sigma)
        .with_sidelength(h.max(w).max(t));
    model_config.validate()?;

    let model = Inr::<MyBackend>::new(nonlinearity, &model_config, &device);
    println!("Number of parameters: {}", model.param_count());

    let training_config = TrainingConfig::new()
        .with_epochs(args.epochs)
        .with_learning_rate(args.learning_rate)
        .with_batch_size(args.batch_size.min(h * w * t))
        .with_iou_threshold(args.threshold)
        .with_lr_decay_factor(0.2);

    let mut trainer = InrTrainer::<MyBackend>::occupancy(training_config, &volume, &device)?;

    let input_id = std::path::Path::new(&args.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("volume")
        .to_string();
    let name = run_name(nonlinearity, &input_id, "occupancy");
    let run_dir = paths.run_dir(&name);

    let model = if args.track {
        std::fs::create_dir_all(&run_dir)?;
        let mut tracker = JsonlTracker::create(run_dir.join("scalars.jsonl"));
        let model = trainer.train_tracked(model, &mut tracker)?;
        tracker.finish();
        model
    } else {
        trainer.train(model)?
    };

    let artifacts = trainer.artifacts();
    println!("Best IoU: {:.4}", trainer.best_metric());

    inr_io::save_run(&paths, &name, &artifacts)?;

    // Extract the isosurface of the best reconstruction.
    match save_reconstruction_mesh(&artifacts.best, args.threshold, run_dir.join("surface.obj")) {
        Ok(stats) => println!(
            "Mesh: {} vertices, {} triangles",
            stats.vertex_count, stats.triangle_count
        ),
        Err(e) => eprintln!("Mesh extraction failed: {}", e),
    }

    let metadata = CheckpointMetadata::new(
        nonlinearity.to_string(),
        args.epochs,
        trainer.best_metric(),
        artifacts.best.shape.dims(),
    );
    save_checkpoint(&paths.checkpoint_dir(&name), &model, &metadata)?;

    println!("Run saved under {:?}", run_dir);

    Ok(())
}
