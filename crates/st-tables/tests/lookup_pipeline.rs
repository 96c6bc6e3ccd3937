//! End-to-end lookups over tables loaded from disk.

use std::path::PathBuf;

use st_core::catalog::{CELSIUS, FAHRENHEIT, KILOJOULE_PER_KG, KILOPASCAL, MEGAPASCAL};
use st_tables::{
    CellValue, LoaderConfig, Lookup, LookupRequest, PropertyKey, PropertyTable, Reading,
    SearchMode, TableKind, TableSet, lookup,
};

const TITLE: &str = "Thermodynamic properties of water\nversion,test\n\n\n\n\n";

const SAT_BY_T: &str = "T (°C),P (MPa),Specific Volume Liquid (m^3/kg),Specific Volume Vapor (m^3/kg),Specific Enthalpy Liquid (kJ/kg),Specific Enthalpy Vapor (kJ/kg),Specific Enthalpy of Vaporization (kJ/kg)\n\
110,0.143376,0.001052,1.2094,461.42,2691.1,2229.7\n\
100,0.101418,0.001043,1.6720,419.17,2675.6,2256.4\n\
120,0.198665,0.001060,0.8913,503.81,2705.9,2202.1\n";

const SAT_BY_P: &str = "P (MPa),T (°C),Specific Enthalpy Liquid (kJ/kg),Specific Enthalpy Vapor (kJ/kg)\n\
0.1,99.61,417.50,2674.9\n\
0.2,120.21,504.70,2706.2\n";

const COMP_SUP: &str = "P (MPa),T (°C),Specific Volume (m^3/kg),Specific Internal Energy (kJ/kg),Specific Enthalpy (kJ/kg),Phase\n\
0.1,20,0.001002,83.91,84.01,liquid\n\
0.1,30,0.001004,125.73,125.83,liquid\n\
0.1,150,1.9367,2582.9,2776.6,vapor\n\
0.5,20,0.001002,83.91,84.41,liquid\n\
0.5,150,0.0010905,631.66,632.18,liquid\n\
1.0,150,0.0010903,631.16,632.25,liquid\n\
0.5,200,0.42503,2643.3,2855.8,vapor\n\
1.0,200,0.20602,2622.3,2828.3,vapor\n";

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("st-tables-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for (kind, body) in [
        (TableKind::SaturationByTemperature, SAT_BY_T),
        (TableKind::SaturationByPressure, SAT_BY_P),
        (TableKind::CompressedSuperheated, COMP_SUP),
    ] {
        let text = format!("\u{feff}{TITLE}{body}");
        std::fs::write(TableSet::path_in(&dir, kind), text).unwrap();
    }
    dir
}

fn number(result: &Lookup) -> f64 {
    result.value().and_then(CellValue::as_number).unwrap()
}

#[test]
fn internal_energy_between_two_temperatures_at_exact_pressure() {
    let table = PropertyTable::new(
        TableKind::CompressedSuperheated,
        &[
            PropertyKey::Temperature,
            PropertyKey::Pressure,
            PropertyKey::InternalEnergy,
        ],
        vec![
            vec![
                CellValue::Number(20.0),
                CellValue::Number(0.1),
                CellValue::Number(200.0),
            ],
            vec![
                CellValue::Number(30.0),
                CellValue::Number(0.1),
                CellValue::Number(220.0),
            ],
        ],
    )
    .unwrap();

    let request = LookupRequest {
        mode: SearchMode::DoubleAxis {
            temperature: Reading::new(25.0, &CELSIUS),
            pressure: Reading::new(0.1, &MEGAPASCAL),
        },
        dependent: PropertyKey::InternalEnergy,
        output_unit: None,
    };
    let result = lookup(&table, &request).unwrap();
    assert_eq!(number(&result), 210.0);
    let Lookup::Double(grid) = result else {
        panic!("expected a grid result");
    };
    assert_eq!((grid.temp_low, grid.temp_high), (Some(20.0), Some(30.0)));
    assert_eq!((grid.pres_low, grid.pres_high), (Some(0.1), Some(0.1)));
}

#[test]
fn loads_reference_directory_and_answers_each_table() {
    let dir = fixture_dir("set");
    let tables = TableSet::load_dir(&dir, &LoaderConfig::default()).unwrap();

    assert_eq!(tables.get(TableKind::SaturationByTemperature).len(), 3);
    assert_eq!(tables.get(TableKind::SaturationByPressure).len(), 2);
    assert_eq!(tables.get(TableKind::CompressedSuperheated).len(), 8);

    // Saturation by temperature, unsorted rows, Fahrenheit input.
    let by_t = LookupRequest {
        mode: SearchMode::SingleAxis {
            independent: PropertyKey::Temperature,
            target: Reading::new(221.0, &FAHRENHEIT),
        },
        dependent: PropertyKey::EnthalpyVaporization,
        output_unit: Some(&KILOJOULE_PER_KG),
    };
    let res = lookup(tables.get(TableKind::SaturationByTemperature), &by_t).unwrap();
    assert!((number(&res) - (2256.4 + 2229.7) / 2.0).abs() < 1e-6);

    // Saturation by pressure, kPa input.
    let by_p = LookupRequest {
        mode: SearchMode::SingleAxis {
            independent: PropertyKey::Pressure,
            target: Reading::new(150.0, &KILOPASCAL),
        },
        dependent: PropertyKey::Temperature,
        output_unit: Some(&CELSIUS),
    };
    let res = lookup(tables.get(TableKind::SaturationByPressure), &by_p).unwrap();
    assert!((number(&res) - (99.61 + 120.21) / 2.0).abs() < 1e-9);
    let Lookup::Single(single) = res else {
        panic!("expected a single-axis result");
    };
    assert!((single.low_bound.unwrap() - 100.0).abs() < 1e-9);
    assert!((single.high_bound.unwrap() - 200.0).abs() < 1e-9);

    // Bilinear phase lookup across the 150 °C / 200 °C slices.
    let phase = LookupRequest {
        mode: SearchMode::DoubleAxis {
            temperature: Reading::new(175.0, &CELSIUS),
            pressure: Reading::new(0.7, &MEGAPASCAL),
        },
        dependent: PropertyKey::Phase,
        output_unit: None,
    };
    let res = lookup(tables.get(TableKind::CompressedSuperheated), &phase).unwrap();
    assert_eq!(res.value(), Some(&CellValue::from("liquid or vapor")));

    // Above every tabulated pressure at 200 °C.
    let outside = LookupRequest {
        mode: SearchMode::DoubleAxis {
            temperature: Reading::new(200.0, &CELSIUS),
            pressure: Reading::new(2.0, &MEGAPASCAL),
        },
        dependent: PropertyKey::Enthalpy,
        output_unit: None,
    };
    let res = lookup(tables.get(TableKind::CompressedSuperheated), &outside).unwrap();
    assert!(res.is_out_of_range());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_reports_path() {
    let dir = std::env::temp_dir().join(format!("st-tables-empty-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let err = TableSet::load_dir(&dir, &LoaderConfig::default()).unwrap_err();
    assert!(err.to_string().contains("saturated_by_temperature_V1.5.csv"));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn concurrent_lookups_share_one_table() {
    let dir = fixture_dir("threads");
    let tables = TableSet::load_dir(&dir, &LoaderConfig::default()).unwrap();
    let table = tables.get(TableKind::CompressedSuperheated);
    let request = LookupRequest {
        mode: SearchMode::DoubleAxis {
            temperature: Reading::new(175.0, &CELSIUS),
            pressure: Reading::new(0.7, &MEGAPASCAL),
        },
        dependent: PropertyKey::Enthalpy,
        output_unit: None,
    };
    let expected = lookup(table, &request).unwrap();
    assert!(!expected.is_out_of_range());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| lookup(table, &request).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    std::fs::remove_dir_all(&dir).ok();
}
