mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use st_core::{QuantityKind, Unit, catalog, convert};
use st_tables::{
    CellValue, Lookup, LookupRequest, PropertyKey, PropertyTable, Reading, SearchMode, TableKind,
    TableSet, load_table,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "st-cli")]
#[command(about = "steamtab - water and steam property table lookups", long_about = None)]
struct Cli {
    /// YAML config file (defaults to ./steamtab.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the reference table files
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between two units of the same kind
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Source unit symbol (e.g. F, kPa, BTU/lbm)
        from: String,
        /// Target unit symbol
        to: String,
    },
    /// Look up a saturation property by temperature or pressure
    Saturation {
        /// Independent axis of the query
        #[arg(long, value_enum, default_value_t = Axis::Temperature)]
        by: Axis,
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Unit of the query value (configured display unit when omitted)
        #[arg(long)]
        unit: Option<String>,
        /// Property id (e.g. enthalpy-vapor)
        #[arg(long)]
        property: String,
        /// Output unit for the property
        #[arg(long)]
        out: Option<String>,
    },
    /// Look up a compressed-liquid or superheated-steam property
    Superheated {
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,
        #[arg(long)]
        t_unit: Option<String>,
        #[arg(long)]
        pressure: f64,
        #[arg(long)]
        p_unit: Option<String>,
        /// Property id (e.g. internal-energy)
        #[arg(long)]
        property: String,
        /// Output unit for the property
        #[arg(long)]
        out: Option<String>,
    },
    /// List the properties available in a table
    Properties {
        /// Table id (e.g. saturation-by-pressure); all tables when omitted
        #[arg(long)]
        table: Option<String>,
    },
    /// List known units
    Units {
        /// Quantity kind id (e.g. specific-energy); all kinds when omitted
        #[arg(long)]
        kind: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    Temperature,
    Pressure,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut cfg = config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.tables {
        cfg.tables_dir = dir;
    }

    match cli.command {
        Commands::Convert { value, from, to } => cmd_convert(value, &from, &to, cli.json),
        Commands::Saturation {
            by,
            value,
            unit,
            property,
            out,
        } => cmd_saturation(&cfg, by, value, unit.as_deref(), &property, out.as_deref(), cli.json),
        Commands::Superheated {
            temperature,
            t_unit,
            pressure,
            p_unit,
            property,
            out,
        } => {
            let t = Reading::new(
                temperature,
                cfg.display.resolve(QuantityKind::Temperature, t_unit.as_deref())?,
            );
            let p = Reading::new(
                pressure,
                cfg.display.resolve(QuantityKind::Pressure, p_unit.as_deref())?,
            );
            cmd_superheated(&cfg, t, p, &property, out.as_deref(), cli.json)
        }
        Commands::Properties { table } => cmd_properties(table.as_deref(), cli.json),
        Commands::Units { kind } => cmd_units(kind.as_deref(), cli.json),
    }
}

fn cmd_convert(value: f64, from: &str, to: &str, as_json: bool) -> CliResult<()> {
    let from = find_unit(from)?;
    let to = find_unit(to)?;
    let converted = convert(value, from, to)?;
    if as_json {
        print_json(&json!({
            "value": value,
            "from": from.symbol,
            "to": to.symbol,
            "result": converted,
        }))
    } else {
        println!("{value} {from} = {converted} {to}");
        Ok(())
    }
}

fn cmd_saturation(
    cfg: &Config,
    by: Axis,
    value: f64,
    unit: Option<&str>,
    property: &str,
    out: Option<&str>,
    as_json: bool,
) -> CliResult<()> {
    let (kind, independent, axis_kind) = match by {
        Axis::Temperature => (
            TableKind::SaturationByTemperature,
            PropertyKey::Temperature,
            QuantityKind::Temperature,
        ),
        Axis::Pressure => (
            TableKind::SaturationByPressure,
            PropertyKey::Pressure,
            QuantityKind::Pressure,
        ),
    };
    let target = Reading::new(value, cfg.display.resolve(axis_kind, unit)?);
    let dependent = find_property(kind, property)?;
    let request = LookupRequest {
        mode: SearchMode::SingleAxis {
            independent,
            target,
        },
        dependent,
        output_unit: output_unit(cfg, dependent, out)?,
    };
    let table = open_table(cfg, kind)?;
    let result = st_tables::lookup(&table, &request)?;
    report(&request, &result, as_json)
}

fn cmd_superheated(
    cfg: &Config,
    temperature: Reading,
    pressure: Reading,
    property: &str,
    out: Option<&str>,
    as_json: bool,
) -> CliResult<()> {
    let kind = TableKind::CompressedSuperheated;
    let dependent = find_property(kind, property)?;
    let request = LookupRequest {
        mode: SearchMode::DoubleAxis {
            temperature,
            pressure,
        },
        dependent,
        output_unit: output_unit(cfg, dependent, out)?,
    };
    let table = open_table(cfg, kind)?;
    let result = st_tables::lookup(&table, &request)?;
    report(&request, &result, as_json)
}

fn cmd_properties(table: Option<&str>, as_json: bool) -> CliResult<()> {
    let kinds = match table {
        Some(id) => vec![TableKind::from_id(id).ok_or_else(|| CliError::UnknownTable(id.to_string()))?],
        None => TableKind::ALL.to_vec(),
    };

    if as_json {
        let listing: Vec<_> = kinds
            .iter()
            .map(|kind| {
                let properties: Vec<_> = kind
                    .properties()
                    .into_iter()
                    .map(|key| {
                        json!({
                            "id": key.id(),
                            "column": key.column(),
                            "unit": key.native_unit().map(|u| u.symbol),
                        })
                    })
                    .collect();
                json!({ "table": kind.id(), "properties": properties })
            })
            .collect();
        return print_json(&listing);
    }

    for kind in kinds {
        println!("{kind} [{}]", kind.id());
        for key in kind.properties() {
            let unit = key.native_unit().map_or("-", |u| u.symbol);
            println!("  {:<32} {:<10} {}", key.id(), unit, key.info().display_name);
        }
    }
    Ok(())
}

fn cmd_units(kind: Option<&str>, as_json: bool) -> CliResult<()> {
    let kinds = match kind {
        Some(id) => {
            vec![QuantityKind::from_id(id).ok_or_else(|| CliError::UnknownKind(id.to_string()))?]
        }
        None => QuantityKind::ALL.to_vec(),
    };

    if as_json {
        let listing: Vec<_> = kinds
            .iter()
            .map(|&kind| {
                let units: Vec<_> = catalog::for_kind(kind)
                    .map(|u| json!({ "symbol": u.symbol, "aliases": u.aliases }))
                    .collect();
                json!({ "kind": kind.id(), "units": units })
            })
            .collect();
        return print_json(&listing);
    }

    for kind in kinds {
        let symbols: Vec<&str> = catalog::for_kind(kind).map(|u| u.symbol).collect();
        println!("{kind}: {}", symbols.join(", "));
    }
    Ok(())
}

fn find_unit(symbol: &str) -> CliResult<&'static Unit> {
    catalog::find(symbol).ok_or_else(|| CliError::UnknownUnit {
        unit: symbol.to_string(),
        kind: "any quantity".to_string(),
    })
}

fn find_property(table: TableKind, id: &str) -> CliResult<PropertyKey> {
    let key = PropertyKey::from_id(id).ok_or_else(|| CliError::UnknownProperty(id.to_string()))?;
    if !table.properties().contains(&key) {
        return Err(CliError::PropertyNotInTable {
            property: key.id().to_string(),
            table: table.id().to_string(),
        });
    }
    Ok(key)
}

/// Output unit for `dependent`: explicit, else configured display unit.
/// Categorical properties have none.
fn output_unit(
    cfg: &Config,
    dependent: PropertyKey,
    explicit: Option<&str>,
) -> CliResult<Option<&'static Unit>> {
    match dependent.quantity_kind() {
        Some(kind) => cfg.display.resolve(kind, explicit).map(Some),
        None => Ok(None),
    }
}

fn open_table(cfg: &Config, kind: TableKind) -> CliResult<PropertyTable> {
    let path = TableSet::path_in(&cfg.tables_dir, kind);
    Ok(load_table(&path, kind, &cfg.loader())?)
}

fn report(request: &LookupRequest, result: &Lookup, as_json: bool) -> CliResult<()> {
    let unit = request
        .output_unit
        .or_else(|| request.dependent.native_unit());

    if as_json {
        return print_json(&json!({
            "property": request.dependent.id(),
            "unit": unit.map(|u| u.symbol),
            "result": result,
        }));
    }

    let name = request.dependent.info().display_name;
    let Some(value) = result.value() else {
        println!("{name}: outside table range");
        return Ok(());
    };
    match (value, unit) {
        (CellValue::Number(_), Some(unit)) => println!("{name}: {value} {unit}"),
        _ => println!("{name}: {value}"),
    }

    match result {
        Lookup::Single(r) => {
            if let SearchMode::SingleAxis { target, .. } = request.mode {
                print_bracket("bracket", r.low_bound, r.high_bound, target.unit);
            }
        }
        Lookup::Double(r) => {
            if let SearchMode::DoubleAxis {
                temperature,
                pressure,
            } = request.mode
            {
                print_bracket("temperature", r.temp_low, r.temp_high, temperature.unit);
                print_bracket("pressure", r.pres_low, r.pres_high, pressure.unit);
            }
        }
    }
    Ok(())
}

fn print_bracket(label: &str, low: Option<f64>, high: Option<f64>, unit: &Unit) {
    if let (Some(low), Some(high)) = (low, high) {
        if low == high {
            println!("  {label}: exact at {low} {unit}");
        } else {
            println!("  {label}: {low} .. {high} {unit}");
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
