// crates/homematic-catalog-cli/src/main.rs

//! `hm-catalog`: compiles vendor device descriptions into the JSON catalog.
//!
//! ```text
//! hm-catalog convert <legacy|homegear> <output.json> <input.xml>...
//! ```
//!
//! Exit codes: `0` success, `1` usage error, `2` an input could not be read
//! or the catalog could not be written, `3` an input is not a valid document
//! of the selected dialect.

use clap::{Args, Parser, Subcommand, ValueEnum};
use homematic_catalog::{
    Catalog, CatalogError, CatalogStats, Dialect, compile_document, decode_document,
    save_catalog_to_writer,
};
use log::{error, info};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "hm-catalog", version, about = "HomeMatic device catalog compiler")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Convert device description XML files into a JSON catalog
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Schema of the input files
    #[arg(value_enum)]
    dialect: DialectArg,
    /// Catalog to write (must end in `.json`)
    output: PathBuf,
    /// Device description files, processed in order
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DialectArg {
    /// HomeMatic `rftypes` XML
    Legacy,
    /// Homegear XML
    Homegear,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Legacy => Dialect::Legacy,
            DialectArg::Homegear => Dialect::Homegear,
        }
    }
}

// --- Failures ---

/// Everything that aborts a run, grouped by exit code.
#[derive(Debug)]
enum Failure {
    Usage(String),
    Read { path: PathBuf, source: io::Error },
    Create { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: CatalogError },
    Write { path: PathBuf, source: CatalogError },
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Usage(_) => 1,
            Failure::Read { .. } | Failure::Create { .. } | Failure::Write { .. } => 2,
            Failure::Parse { .. } => 3,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Usage(msg) => write!(f, "{}", msg),
            Failure::Read { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
            Failure::Create { path, source } => {
                write!(f, "Could not create {}: {}", path.display(), source)
            }
            Failure::Parse { path, source } => {
                write!(f, "Could not parse {}: {}", path.display(), source)
            }
            Failure::Write { path, source } => {
                write!(f, "Could not write {}: {}", path.display(), source)
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let result = match cli.cmd {
        Cmd::Convert(args) => convert(&args),
    };
    if let Err(failure) = result {
        error!("{}", failure);
        process::exit(failure.exit_code());
    }
}

/// Compiles all inputs and writes the catalog once every input succeeded.
fn convert(args: &ConvertArgs) -> Result<CatalogStats, Failure> {
    if args.output.extension().is_none_or(|ext| ext != "json") {
        return Err(Failure::Usage(format!(
            "Output file {} must end in .json",
            args.output.display()
        )));
    }

    let started = Instant::now();
    let dialect = Dialect::from(args.dialect);
    let mut catalog = Catalog::new();

    info!("------- starting conversion ----------");
    for path in &args.inputs {
        let bytes = fs::read(path).map_err(|source| Failure::Read {
            path: path.clone(),
            source,
        })?;
        let xml = decode_document(&bytes);
        compile_document(&mut catalog, &path.display().to_string(), &xml, dialect).map_err(
            |source| Failure::Parse {
                path: path.clone(),
                source,
            },
        )?;
    }

    info!("- writing {} ..", args.output.display());
    write_catalog(&args.output, &catalog)?;

    let stats = catalog.stats();
    report(&catalog, &stats);
    info!("Conversion took       : {:.2?}", started.elapsed());
    Ok(stats)
}

fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), Failure> {
    let file = File::create(path).map_err(|source| Failure::Create {
        path: path.to_path_buf(),
        source,
    })?;
    save_catalog_to_writer(BufWriter::new(file), catalog.descriptors()).map_err(|source| {
        Failure::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn report(catalog: &Catalog, stats: &CatalogStats) {
    info!("------- conversion finished ----------");
    info!("Input files           : {}", stats.input_files);
    if stats.skipped_files > 0 {
        info!("Skipped files         : {}", stats.skipped_files);
    }
    info!("Unique device types   : {}", stats.unique_names);
    info!("Unique descriptors    : {}", stats.descriptors);
    info!("Unknown channel count : {}", stats.unsupported);
    for device in catalog.unsupported() {
        info!("  - {} ({})", device.name, device.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWITCH: &str = r#"<homegearDevice version="1">
        <supportedDevices><device id="HM-X"/></supportedDevices>
        <functions>
            <function channel="1" type="SWITCH">
                <variables>switch_valueset</variables>
            </function>
        </functions>
        <parameterGroups>
            <variables id="switch_valueset">
                <parameter id="STATE">
                    <logicalBoolean/>
                    <packets><packet id="SET"><type>set</type></packet></packets>
                </parameter>
            </variables>
        </parameterGroups>
    </homegearDevice>"#;

    fn args(dialect: DialectArg, output: PathBuf, inputs: Vec<PathBuf>) -> ConvertArgs {
        ConvertArgs {
            dialect,
            output,
            inputs,
        }
    }

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "hm-catalog",
            "convert",
            "homegear",
            "out.json",
            "a.xml",
            "b.xml",
        ])
        .unwrap();
        let Cmd::Convert(args) = cli.cmd;
        assert_eq!(args.dialect, DialectArg::Homegear);
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn test_inputs_are_required() {
        let err = Cli::try_parse_from(["hm-catalog", "convert", "legacy", "out.json"]).unwrap_err();
        assert!(err.use_stderr());

        let err = Cli::try_parse_from(["hm-catalog", "convert", "xml", "out.json", "a.xml"])
            .unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_output_must_be_json() {
        let failure = convert(&args(
            DialectArg::Legacy,
            PathBuf::from("catalog.txt"),
            vec![PathBuf::from("a.xml")],
        ))
        .unwrap_err();
        assert_eq!(failure.exit_code(), 1);
    }

    #[test]
    fn test_convert_writes_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("switch.xml");
        fs::write(&input, SWITCH).unwrap();
        let output = dir.path().join("homematic.json");

        let stats = convert(&args(DialectArg::Homegear, output.clone(), vec![input])).unwrap();
        assert_eq!(stats.input_files, 1);
        assert_eq!(stats.descriptors, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"HM-X\""));
        assert!(written.ends_with("]\n"));
    }

    #[test]
    fn test_convert_reads_latin1_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rf_cc_tc.xml");
        let mut xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n".to_vec();
        xml.extend_from_slice(
            b"<device version=\"1\">
                <supported_types><type id=\"HM-CC-TC\" name=\"Wall thermostat\"/></supported_types>
                <channels>
                    <channel index=\"1\" type=\"WEATHER\">
                        <paramset type=\"VALUES\" id=\"weather_values\">
                            <parameter id=\"TEMPERATURE\" operations=\"read,event\">
                                <logical type=\"float\" unit=\"\xB0C\"/>
                            </parameter>
                        </paramset>
                    </channel>
                </channels>
            </device>",
        );
        fs::write(&input, xml).unwrap();
        let output = dir.path().join("homematic.json");

        let stats = convert(&args(DialectArg::Legacy, output.clone(), vec![input])).unwrap();
        assert_eq!(stats.descriptors, 1);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"TEMPERATURE\""));
    }

    #[test]
    fn test_failures_do_not_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("switch.xml");
        fs::write(&good, SWITCH).unwrap();
        let output = dir.path().join("homematic.json");

        let missing = dir.path().join("missing.xml");
        let failure = convert(&args(
            DialectArg::Homegear,
            output.clone(),
            vec![good.clone(), missing],
        ))
        .unwrap_err();
        assert_eq!(failure.exit_code(), 2);
        assert!(!output.exists());

        let failure = convert(&args(DialectArg::Legacy, output.clone(), vec![good])).unwrap_err();
        assert_eq!(failure.exit_code(), 3);
        assert!(!output.exists());
    }
}
