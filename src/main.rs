use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use trackview::layout::{write_glyph_tsv, write_tsv, GLYPH_TSV_HEADER, TSV_HEADER};
use trackview::{Region, Track, TrackSource, TrackStyle};

/// Stack reads and transcripts from a genomic window into non-overlapping lanes
#[derive(Parser, Debug)]
#[command(name = "trackview", version, about)]
struct Args {
    /// Window to lay out, e.g. chr7:45232945-45240000
    #[arg(short, long)]
    region: Region,

    /// GTF annotation file (repeatable)
    #[arg(short = 'g', long = "annotation")]
    annotations: Vec<PathBuf>,

    /// PSL alignment file (repeatable)
    #[arg(short = 'i', long = "reads")]
    reads: Vec<PathBuf>,

    /// Lane floor offset for read tracks
    #[arg(long, default_value_t = TrackStyle::reads().floor_offset)]
    read_floor_offset: i64,

    /// Lane floor offset for transcript tracks
    #[arg(long, default_value_t = TrackStyle::transcripts().floor_offset)]
    transcript_floor_offset: i64,

    /// Give up after this many lanes instead of packing everything
    #[arg(long)]
    max_lanes: Option<usize>,

    /// Emit glyph rectangles instead of one row per feature
    #[arg(long)]
    glyphs: bool,

    /// Output TSV (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    if args.annotations.is_empty() && args.reads.is_empty() {
        anyhow::bail!("Nothing to lay out: pass at least one --annotation or --reads file");
    }

    // Annotation panels sit above the read panels
    let transcript_style = TrackStyle::transcripts().with_floor_offset(args.transcript_floor_offset);
    let read_style = TrackStyle::reads().with_floor_offset(args.read_floor_offset);
    let sources = args
        .annotations
        .iter()
        .map(|p| (TrackSource::Transcripts(p.clone()), transcript_style))
        .chain(args.reads.iter().map(|p| (TrackSource::Reads(p.clone()), read_style)));

    let mut tracks = Vec::new();
    for (source, style) in sources {
        info!("Laying out {}", source.path().display());
        let track = Track::from_source(&source, &args.region, style, args.max_lanes)
            .with_context(|| format!("Failed to lay out track: {}", source.path().display()))?;
        tracks.push(track);
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if args.glyphs {
        writeln!(out, "{GLYPH_TSV_HEADER}")?;
        for track in &tracks {
            write_glyph_tsv(&track.name, &track.layout, &track.style, &mut out)?;
        }
    } else {
        writeln!(out, "{TSV_HEADER}")?;
        for track in &tracks {
            write_tsv(&track.name, &track.layout, &mut out)?;
        }
    }
    out.flush()?;

    Ok(())
}
