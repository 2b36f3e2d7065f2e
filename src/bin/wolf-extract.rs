//! wolf-extract - Command-line asset extractor
//!
//! Dumps pictures, fonts, textures, sprites, sounds and map planes from the
//! archives of Wolfenstein 3D and Spear of Destiny.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;
use wolfdata::{
    Edition, GameFiles, GraphicsStore, MapStore, PageDialect, PageLayout, PageStore, Palette,
    PALETTE_SIZE,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "wolf-extract")]
#[command(about = "Extract assets from Wolfenstein 3D and Spear of Destiny archives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the game archives
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Edition extension (WL1, WL6, SOD); detected from VSWAP.* when omitted
    #[arg(short, long, value_parser = parse_edition, global = true)]
    edition: Option<Edition>,

    /// Page file records lengths as offset deltas
    #[arg(long, global = true)]
    offset_delta: bool,

    /// Graphics chunk holding the palette for image output
    #[arg(long, global = true)]
    palette_chunk: Option<usize>,

    /// Text file of RGB(r, g, b) entries to use as the palette
    #[arg(long, global = true, conflicts_with = "palette_chunk")]
    palette_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize all three archives
    Info,

    /// Write the decoded bytes of a graphics chunk
    Chunk {
        /// Chunk index
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Print a text screen chunk
    Text {
        /// Chunk index
        index: usize,
    },

    /// Write a picture as PPM
    Picture {
        /// Picture index, relative to the first picture chunk
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Write a font's glyph strip as PGM
    Font {
        /// Chunk index
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Write a wall texture as PPM
    Texture {
        /// Texture index
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Write a sprite as PPM
    Sprite {
        /// Sprite index
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Write a digitized sound as raw 8-bit PCM
    Sound {
        /// Sound index
        index: usize,
        /// Output file
        output: PathBuf,
    },

    /// Print a map plane as hex codes
    Map {
        /// Map index
        index: usize,
        /// Plane (0 walls, 1 objects, 2 extra)
        #[arg(short, long, default_value_t = 0)]
        plane: usize,
    },

    /// Dump every asset into a directory
    ExtractAll {
        /// Output directory
        output: PathBuf,
    },
}

/// Where the palette for image output comes from
#[derive(Debug, Clone)]
enum PaletteSource {
    Chunk(usize),
    File(PathBuf),
    Grayscale,
}

/// Resolved global options
struct Context {
    files: GameFiles,
    layout: PageLayout,
    palette: PaletteSource,
    quiet: bool,
}

impl Context {
    fn graphics(&self) -> CliResult<GraphicsStore> {
        Ok(self.files.open_graphics()?)
    }

    fn pages(&self) -> CliResult<PageStore> {
        Ok(self.files.open_pages(self.layout)?)
    }

    fn maps(&self) -> CliResult<MapStore> {
        Ok(self.files.open_maps()?)
    }

    /// Load the palette, reusing an already opened graphics store
    fn palette(&self, graphics: Option<&GraphicsStore>) -> CliResult<Palette> {
        match &self.palette {
            PaletteSource::File(path) => Ok(Palette::parse_text(&fs::read_to_string(path)?)?),
            PaletteSource::Chunk(index) => match graphics {
                Some(store) => Ok(store.palette(*index)?),
                None => Ok(self.graphics()?.palette(*index)?),
            },
            PaletteSource::Grayscale => {
                log::warn!("no palette given, writing grayscale images");
                Ok(grayscale())
            }
        }
    }

    fn report(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

fn parse_edition(s: &str) -> Result<Edition, String> {
    Edition::from_extension(s).map_err(|e| e.to_string())
}

fn grayscale() -> Palette {
    let colors: Vec<[u8; 3]> = (0..PALETTE_SIZE).map(|i| [i as u8; 3]).collect();
    Palette::from_colors(&colors)
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = build_context(&cli).and_then(|ctx| run(cli.command, &ctx));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_context(cli: &Cli) -> CliResult<Context> {
    let files = match cli.edition {
        Some(edition) => GameFiles::new(&cli.dir, edition),
        None => GameFiles::detect(&cli.dir)?,
    };
    let dialect = if cli.offset_delta {
        PageDialect::OffsetDelta
    } else {
        PageDialect::Classic
    };
    let palette = match (&cli.palette_file, cli.palette_chunk) {
        (Some(path), _) => PaletteSource::File(path.clone()),
        (None, Some(index)) => PaletteSource::Chunk(index),
        (None, None) => PaletteSource::Grayscale,
    };

    if cli.verbose {
        println!("{} in '{}'", files.edition(), files.dir().display());
    }

    Ok(Context {
        files,
        layout: PageLayout::with_dialect(dialect),
        palette,
        quiet: cli.quiet,
    })
}

fn run(command: Commands, ctx: &Context) -> CliResult<()> {
    match command {
        Commands::Info => show_info(ctx),
        Commands::Chunk { index, output } => {
            let graphics = ctx.graphics()?;
            let data = graphics
                .chunk(index)
                .ok_or_else(|| format!("chunk {index} holds no data"))?;
            fs::write(&output, data)?;
            ctx.report(&format!("✓ chunk {index}: {} bytes", data.len()));
            Ok(())
        }
        Commands::Text { index } => {
            print!("{}", ctx.graphics()?.text_screen(index)?);
            Ok(())
        }
        Commands::Picture { index, output } => {
            let graphics = ctx.graphics()?;
            let palette = ctx.palette(Some(&graphics))?;
            let picture = graphics.picture(index)?;
            write_ppm(&output, picture.width, picture.height, &picture.to_rgb(&palette))?;
            ctx.report(&format!("✓ picture {index}: {}x{}", picture.width, picture.height));
            Ok(())
        }
        Commands::Font { index, output } => {
            let graphics = ctx.graphics()?;
            let strip = graphics.font(index)?.render()?;
            write_pgm(&output, strip.width, strip.height, &strip.pixels)?;
            ctx.report(&format!("✓ font {index}: {}x{}", strip.width, strip.height));
            Ok(())
        }
        Commands::Texture { index, output } => {
            let palette = ctx.palette(None)?;
            let texture = ctx.pages()?.texture(index)?;
            write_ppm(&output, texture.width, texture.height, &texture.to_rgb(&palette))?;
            ctx.report(&format!("✓ texture {index}"));
            Ok(())
        }
        Commands::Sprite { index, output } => {
            let palette = ctx.palette(None)?;
            let sprite = ctx.pages()?.sprite(index)?;
            write_ppm(&output, sprite.width, sprite.height, &sprite.to_rgb(&palette))?;
            ctx.report(&format!("✓ sprite {index}"));
            Ok(())
        }
        Commands::Sound { index, output } => {
            let samples = ctx.pages()?.sound(index)?;
            fs::write(&output, &samples)?;
            ctx.report(&format!("✓ sound {index}: {} bytes", samples.len()));
            Ok(())
        }
        Commands::Map { index, plane } => {
            let maps = ctx.maps()?;
            let map = maps.map(index).ok_or_else(|| format!("map {index} is empty"))?;
            let grid = map
                .plane(plane)
                .ok_or_else(|| format!("map {index} has no plane {plane}"))?;
            ctx.report(&format!("{} ({}x{})", map.name(), map.width(), map.height()));
            for row in grid.rows() {
                let cells: Vec<String> = row.iter().map(|c| format!("{c:04x}")).collect();
                println!("{}", cells.join(" "));
            }
            Ok(())
        }
        Commands::ExtractAll { output } => extract_all(ctx, &output),
    }
}

fn show_info(ctx: &Context) -> CliResult<()> {
    println!("{} in '{}'", ctx.files.edition(), ctx.files.dir().display());

    match ctx.graphics() {
        Ok(graphics) => {
            let layout = graphics.layout();
            println!("Graphics:");
            println!("  Chunks:   {} of {}", graphics.chunk_count(), layout.num_chunks);
            println!("  Pictures: {}", graphics.picture_count());
            print_failures(graphics.failures());
        }
        Err(e) => println!("Graphics: ✗ {e}"),
    }

    match ctx.pages() {
        Ok(pages) => {
            let header = pages.header();
            println!("Pages ({:?}):", pages.layout().dialect);
            println!("  Pages:    {}", header.chunks_in_file);
            println!("  Textures: 0..{}", header.sprite_start);
            println!("  Sprites:  {}..{}", header.sprite_start, header.sound_start);
            println!("  Sounds:   {}", pages.sound_count());
            print_failures(pages.failures());
        }
        Err(e) => println!("Pages: ✗ {e}"),
    }

    match ctx.maps() {
        Ok(maps) => {
            println!("Maps (tag {:#06x}):", maps.rlew_tag());
            for (index, map) in maps.maps() {
                println!(
                    "  {index:3}: {:16} {}x{}",
                    map.name(),
                    map.width(),
                    map.height()
                );
            }
            print_failures(maps.failures());
        }
        Err(e) => println!("Maps: ✗ {e}"),
    }

    Ok(())
}

fn print_failures(failures: &[wolfdata::UnitFailure]) {
    if !failures.is_empty() {
        println!("  Failures: {}", failures.len());
        for failure in failures {
            println!("    {failure}");
        }
    }
}

fn extract_all(ctx: &Context, output: &Path) -> CliResult<()> {
    let start_time = Instant::now();
    fs::create_dir_all(output)?;

    let graphics = ctx.graphics()?;
    let pages = ctx.pages()?;
    let maps = ctx.maps()?;
    let palette = ctx.palette(Some(&graphics))?;

    let total = graphics.chunk_count()
        + graphics.picture_count()
        + pages.texture_count()
        + pages.sprite_count()
        + pages.sound_count()
        + maps.maps().count();

    let progress = if ctx.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb
    };

    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut tally = |result: CliResult<()>, what: String| {
        match result {
            Ok(()) => written += 1,
            Err(e) => {
                log::warn!("skipping {what}: {e}");
                skipped += 1;
            }
        }
        progress.inc(1);
    };

    progress.set_message("graphics");
    for index in graphics.chunk_indices() {
        let result: CliResult<()> = graphics
            .chunk(index)
            .map_or(Ok(()), |data| {
                fs::write(output.join(format!("chunk_{index:04}.bin")), data)
            })
            .map_err(Into::into);
        tally(result, format!("chunk {index}"));
    }
    for index in 0..graphics.picture_count() {
        let result: CliResult<()> = graphics.picture(index).map_err(Into::into).and_then(|p| {
            let path = output.join(format!("picture_{index:03}.ppm"));
            Ok(write_ppm(&path, p.width, p.height, &p.to_rgb(&palette))?)
        });
        tally(result, format!("picture {index}"));
    }

    progress.set_message("pages");
    for index in 0..pages.texture_count() {
        let result: CliResult<()> = pages.texture(index).map_err(Into::into).and_then(|t| {
            let path = output.join(format!("texture_{index:03}.ppm"));
            Ok(write_ppm(&path, t.width, t.height, &t.to_rgb(&palette))?)
        });
        tally(result, format!("texture {index}"));
    }
    for index in 0..pages.sprite_count() {
        let result: CliResult<()> = pages.sprite(index).map_err(Into::into).and_then(|s| {
            let path = output.join(format!("sprite_{index:03}.ppm"));
            Ok(write_ppm(&path, s.width, s.height, &s.to_rgb(&palette))?)
        });
        tally(result, format!("sprite {index}"));
    }
    for index in 0..pages.sound_count() {
        let result: CliResult<()> = pages.sound(index).map_err(Into::into).and_then(|samples| {
            Ok(fs::write(output.join(format!("sound_{index:03}.raw")), samples)?)
        });
        tally(result, format!("sound {index}"));
    }

    progress.set_message("maps");
    for (index, map) in maps.maps() {
        let result = write_map_planes(output, index, map);
        tally(result, format!("map {index}"));
    }

    progress.finish_with_message("done");

    ctx.report("✓ Extraction complete!");
    ctx.report(&format!("  Written: {written}"));
    ctx.report(&format!("  Skipped: {skipped}"));
    ctx.report(&format!("  Time:    {:.2?}", start_time.elapsed()));
    Ok(())
}

/// Each plane as little-endian words, row-major
fn write_map_planes(output: &Path, index: usize, map: &wolfdata::Map) -> CliResult<()> {
    for n in 0..wolfdata::PLANE_COUNT {
        let Some(plane) = map.plane(n) else {
            continue;
        };
        let bytes: Vec<u8> = plane.cells().iter().flat_map(|c| c.to_le_bytes()).collect();
        fs::write(output.join(format!("map_{index:02}_plane{n}.bin")), bytes)?;
    }
    Ok(())
}

fn write_ppm(path: &Path, width: usize, height: usize, rgb: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{width} {height}\n255\n")?;
    out.write_all(rgb)?;
    out.flush()
}

fn write_pgm(path: &Path, width: usize, height: usize, gray: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P5\n{width} {height}\n255\n")?;
    out.write_all(gray)?;
    out.flush()
}
