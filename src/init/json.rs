use std::{fs, path::Path, str::FromStr, time::Duration};

use json::{self, JsonValue};

use crate::{
    app::Settings,
    error::{Error, Result},
    simulation::{FitnessBiases, Scenario, Vec2},
};

macro_rules! get_json {
    ($json:ident,$($key:literal),+, $func:ident) => {
            get_json!($json$([$key])+, concat!($("/",$key),+), $func)
    };

    ($value:expr, $key:expr, $func:ident) => {
        $value
            .$func()
            .ok_or(Error::MissingKey($key))?
    };
}

macro_rules! get_json_or_none {
    ($json:ident,$($key:literal),+, $func:ident) => {
        {
            let value = &$json$([$key])+;
            if value.is_null() {
                None
            } else {
                Some(get_json!(value, concat!($("/",$key),+), $func))
            }
        }
    };
}

macro_rules! json_value_or_err {
    ($json:ident,$($key:literal),+) => {
            {
                let value = &$json$([$key])+;
                if value.is_null() {
                    Err(Error::MissingKey(concat!($("/",$key),+)))
                } else {
                    Ok(value)
                }
            }
    };
}

const UNNAMED: &str = "unnamed";

pub fn parse_settings<P: AsRef<Path>>(settings_file_path: P) -> Result<Settings> {
    parse_settings_json(&read_json(settings_file_path.as_ref())?)
}

pub fn parse_settings_from_str(content: &str) -> Result<Settings> {
    parse_settings_json(&json::parse(content)?)
}

pub fn parse_scenario<P: AsRef<Path>>(sim_file_path: P) -> Result<Scenario> {
    let path = sim_file_path.as_ref();
    let mut scenario = parse_scenario_json(&read_json(path)?)?;
    if scenario.name == UNNAMED {
        if let Some(stem) = path.file_stem() {
            scenario.name = stem.to_string_lossy().into_owned();
        }
    }
    Ok(scenario)
}

pub fn parse_scenario_from_str(content: &str) -> Result<Scenario> {
    parse_scenario_json(&json::parse(content)?)
}

fn read_json(file_path: &Path) -> Result<JsonValue> {
    let file_content = fs::read_to_string(file_path).map_err(|source| Error::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    Ok(json::parse(&file_content)?)
}

fn parse_settings_json(json: &JsonValue) -> Result<Settings> {
    let defaults = Settings::default();
    let max_time = get_json_or_none!(json, "MaxTimeSecs", as_f64)
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|e| Error::InvalidValue {
                key: "/MaxTimeSecs",
                reason: e.to_string(),
            })
        })
        .transpose()?;

    Ok(Settings {
        population_size: get_json!(json, "PopulationSize", as_usize),
        chromosome_size: get_json_or_none!(json, "ChromosomeSize", as_usize),
        parent_cutoff: get_json!(json, "ParentCutoff", as_usize),
        parent: parse_kind(json, "Parent", "/Parent")?.unwrap_or(defaults.parent),
        crossover: parse_kind(json, "Crossover", "/Crossover")?.unwrap_or(defaults.crossover),
        crossover_point: get_json_or_none!(json, "CrossoverPoint", as_f64)
            .unwrap_or(defaults.crossover_point),
        mutation_rate: get_json!(json, "MutationRate", as_f64),
        survivor: parse_kind(json, "Survivor", "/Survivor")?.unwrap_or(defaults.survivor),
        elite_count: get_json_or_none!(json, "EliteCount", as_usize)
            .unwrap_or(defaults.elite_count),
        max_simulations: get_json_or_none!(json, "MaxSimulations", as_usize),
        max_time,
        seed: get_json_or_none!(json, "Seed", as_u64),
    })
}

fn parse_kind<T>(json: &JsonValue, key: &str, path: &'static str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    let value = &json[key];
    if value.is_null() {
        return Ok(None);
    }
    let name = get_json!(value, path, as_str);
    name.parse()
        .map(Some)
        .map_err(|reason| Error::InvalidValue { key: path, reason })
}

fn parse_scenario_json(json: &JsonValue) -> Result<Scenario> {
    let name = get_json_or_none!(json, "Name", as_str).unwrap_or(UNNAMED);
    let biases = if json["Biases"].is_null() {
        FitnessBiases::default()
    } else {
        parse_biases(json)?
    };

    Ok(Scenario {
        name: name.to_owned(),
        surface: parse_terrain(json_value_or_err!(json, "Terrain")?)?,
        position: Vec2::new(
            get_json!(json, "Lander", "X", as_f64),
            get_json!(json, "Lander", "Y", as_f64),
        ),
        h_speed: get_json!(json, "Lander", "HSpeed", as_f64),
        v_speed: get_json!(json, "Lander", "VSpeed", as_f64),
        fuel: get_json!(json, "Lander", "Fuel", as_f64),
        rotation: get_json!(json, "Lander", "Angle", as_i32),
        thrust: get_json!(json, "Lander", "Power", as_i32),
        biases,
    })
}

fn parse_terrain(terrain_array: &JsonValue) -> Result<Vec<Vec2>> {
    if !terrain_array.is_array() {
        return Err(Error::InvalidValue {
            key: "/Terrain",
            reason: "expected an array of [x, y] points".to_owned(),
        });
    }
    terrain_array
        .members()
        .map(|point_json| {
            let err = || Error::InvalidValue {
                key: "/Terrain",
                reason: format!("Terrain has to contain numeric landpoints, got {point_json}"),
            };
            let x = point_json[0].as_f64().ok_or_else(err)?;
            let y = point_json[1].as_f64().ok_or_else(err)?;
            Ok::<_, Error>(Vec2::new(x, y))
        })
        .collect()
}

fn parse_biases(json: &JsonValue) -> Result<FitnessBiases> {
    Ok(FitnessBiases {
        h_speed: get_json!(json, "Biases", "HSpeed", as_f64),
        v_speed: get_json!(json, "Biases", "VSpeed", as_f64),
        angle: get_json!(json, "Biases", "Angle", as_f64),
        fuel_burned: get_json!(json, "Biases", "FuelBurned", as_f64),
        distance: get_json!(json, "Biases", "Distance", as_f64),
        landed: get_json!(json, "Biases", "Landed", as_f64),
    })
}
