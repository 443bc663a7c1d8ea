use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use tilecells::{
    is_in_layer, layer_to_svg, parse_vector2, timed, AnyCells, Cells,
    LayerConfig, LayerGeometry, NeighborQuery, Vector2f, Vector2i,
};

/// CLI for inspecting the geometry of a tile map layer.
#[derive(Debug, StructOpt)]
#[structopt(name = "tilecells")]
struct Opt {
    /// Path to a config file that defines the layer. Supported formats: JSON,
    /// TOML. If not given, a 16x16 layer of 32x32 square cells is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Print the coordinates of the cell containing this world point, given
    /// as `x,y`
    #[structopt(long, parse(try_from_str = parse_point))]
    locate: Option<Vector2f>,

    /// Print the neighbors of the cell at these coordinates, given as `x,y`
    #[structopt(long, parse(try_from_str = parse_coords))]
    neighbors: Option<Vector2i>,

    /// Only print neighbors that are inside the layer
    #[structopt(long)]
    valid: bool,

    /// Include diagonal neighbors. Only square cells have any.
    #[structopt(long)]
    diagonal: bool,

    /// If given, the layer geometry will be saved to this directory. The
    /// exact files that appear in the directory are defined by the output
    /// formats. See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the layer in. Supported formats:
    ///
    /// cfg - The full config object used for the layer, in TOML format
    ///
    /// json - Bounds and outline of every cell in the layer
    ///
    /// svg - 2D rendering of the layer's grid
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the layer's full config in a human-readable file
    Cfg,
    /// Export the geometry of every cell as JSON
    Json,
    /// Render the grid as a 2D SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

fn parse_point(s: &str) -> anyhow::Result<Vector2f> {
    parse_vector2(s)
}

fn parse_coords(s: &str) -> anyhow::Result<Vector2i> {
    parse_vector2(s)
}

fn load_config(config_path: &Path) -> anyhow::Result<LayerConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the layer in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    config: &LayerConfig,
    cells: &AnyCells,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        config: &LayerConfig,
        cells: &AnyCells,
    ) -> anyhow::Result<Vec<u8>> {
        let layer_size = config.layer_size();
        let bytes = match output_format {
            OutputFormat::Cfg => toml::to_string_pretty(config)
                .context("error serializing config")?
                .into_bytes(),
            OutputFormat::Json => {
                LayerGeometry::new(cells, layer_size).to_json()?.into_bytes()
            }
            OutputFormat::Svg => {
                layer_to_svg(cells, layer_size, config.line_width)
                    .to_string()
                    .into_bytes()
            }
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("layer")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, config, cells)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => LayerConfig::default(),
    };
    let cells = config.build()?;
    let layer_size = config.layer_size();
    info!(
        "{}x{} layer of {} cells, bounds {:?}",
        layer_size.x,
        layer_size.y,
        config.cells.orientation,
        cells.compute_bounds(layer_size)
    );

    if let Some(point) = opt.locate {
        let coords = cells.compute_coordinates(point);
        if !is_in_layer(coords, layer_size) {
            info!("Cell {},{} is outside the layer", coords.x, coords.y);
        }
        println!("{},{}", coords.x, coords.y);
    }

    if let Some(coords) = opt.neighbors {
        let mut flags = NeighborQuery::NONE;
        if opt.valid {
            flags |= NeighborQuery::VALID;
        }
        if opt.diagonal {
            flags |= NeighborQuery::DIAGONAL;
        }
        for neighbor in cells.compute_neighbors(coords, layer_size, flags) {
            println!("{},{}", neighbor.x, neighbor.y);
        }
    }

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;

        for output_format in opt.output_formats {
            gen_output(&output_dir, output_format, &config, &cells)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
