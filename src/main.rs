//! `spflogo` command-line interface.
//!
//! Converts a short video clip into a packed SPF/PAL asset pair for the
//! game client's animated login-screen logo, and offers small inspection
//! helpers for the produced files.
//!
//! # Usage
//!
//! ```bash
//! # Full pipeline: video in, LOGO.SPF + LOGO.PAL out
//! spflogo convert intro.avi --logo logo.png -o assets/
//!
//! # Show SPF file information
//! spflogo info assets/LOGO.SPF
//!
//! # Decode an SPF back to PNG frames for eyeballing
//! spflogo unpack assets/LOGO.SPF -p assets/LOGO.PAL -o frames/
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use image::RgbaImage;
use spf_types::prelude::*;
use spflogo::pipeline::{self, ConvertOptions};

#[derive(Parser)]
#[command(name = "spflogo")]
#[command(author = "spflogo project")]
#[command(version)]
#[command(about = "Convert a short video clip into an animated SPF/PAL login logo", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Convert a video into an SPF/PAL pair
	Convert {
		/// Input video file
		#[arg(value_name = "VIDEO")]
		video: PathBuf,

		/// Reference logo image; the mask takes its dimensions from it
		#[arg(short, long, value_name = "IMAGE")]
		logo: PathBuf,

		/// Output directory (optional, defaults to the current directory)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Maximum number of frames to sample from the video
		#[arg(long, value_name = "N", default_value_t = spflogo::sampler::DEFAULT_MAX_FRAMES)]
		max_frames: usize,

		/// Keep the intermediate frame files for inspection
		#[arg(long)]
		keep_temp: bool,
	},

	/// Display information about an SPF file
	Info {
		/// Input SPF file path
		#[arg(value_name = "INPUT_SPF")]
		input: PathBuf,
	},

	/// Decode the frames of an SPF file back to PNG images
	Unpack {
		/// Input SPF file path
		#[arg(value_name = "INPUT_SPF")]
		input: PathBuf,

		/// Path to the companion PAL palette file
		#[arg(short, long, value_name = "PALETTE")]
		palette: PathBuf,

		/// Output directory path (optional, defaults to `input_frames/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	match cli.command {
		Commands::Convert {
			video,
			logo,
			output,
			max_frames,
			keep_temp,
		} => handle_convert(video, logo, output, max_frames, keep_temp),

		Commands::Info {
			input,
		} => handle_info(input),

		Commands::Unpack {
			input,
			palette,
			output,
		} => handle_unpack(input, palette, output),
	}
}

fn handle_convert(
	video: PathBuf,
	logo: PathBuf,
	output: Option<PathBuf>,
	max_frames: usize,
	keep_temp: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let out_dir = output.unwrap_or_else(|| PathBuf::from("."));

	println!("🎬 Converting video to SPF/PAL");
	println!("   Video:  {}", video.display());
	println!("   Logo:   {}", logo.display());
	println!("   Output: {}", out_dir.display());

	let mut opts = ConvertOptions::new(video, logo, out_dir);
	opts.max_frames = max_frames;
	opts.keep_temp = keep_temp;

	let manifest = pipeline::run(&opts)?;

	println!("\n✅ Conversion completed successfully!");
	println!("   ✓ {} frames at {}x{}", manifest.frame_count, manifest.width, manifest.height);
	println!("   ✓ Sprite:  {}", manifest.spf.display());
	println!("   ✓ Palette: {}", manifest.pal.display());

	Ok(())
}

fn handle_info(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
	let spf = SpfFile::open(&input)?;

	println!("📋 SPF file: {}", input.display());
	println!("   Total frames: {}", spf.frame_count());

	for (index, entry) in spf.entries().iter().enumerate() {
		println!("   [{index:3}] {entry} @ offset {}", entry.data_offset());
	}

	Ok(())
}

fn handle_unpack(
	input: PathBuf,
	palette: PathBuf,
	output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
	let out_dir = output.unwrap_or_else(|| {
		let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("spf");
		PathBuf::from(format!("{stem}_frames"))
	});

	println!("🔓 Unpacking SPF file");
	println!("   Input:   {}", input.display());
	println!("   Palette: {}", palette.display());
	println!("   Output:  {}", out_dir.display());

	let spf = SpfFile::open(&input)?;
	let pal = Palette::from_file(&palette)?;

	std::fs::create_dir_all(&out_dir)?;

	let mut exported = 0usize;
	for (index, frame) in spf.iter().enumerate() {
		let rgba = frame.to_rgba(&pal);
		let Some(img) = RgbaImage::from_raw(frame.width(), frame.height(), rgba) else {
			eprintln!("   ⚠ frame {index} has inconsistent dimensions, skipped");
			continue;
		};

		let path = out_dir.join(format!("frame_{index:04}.png"));
		img.save(&path)?;
		exported += 1;
	}

	println!("\n✅ Unpacked {exported} of {} frames", spf.frame_count());

	Ok(())
}
