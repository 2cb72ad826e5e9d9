//! Load retirement inputs from JSON files

use super::RetirementInput;
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A file may hold a single input or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<RetirementInput>),
    Many(Vec<RetirementInput>),
}

/// Load a single input from a JSON file
pub fn load_input(path: &Path) -> Result<RetirementInput> {
    let file = File::open(path)?;
    load_input_from_reader(BufReader::new(file))
}

/// Load a single input from any JSON reader
pub fn load_input_from_reader<R: Read>(reader: R) -> Result<RetirementInput> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load every input in a JSON file holding one object or an array
pub fn load_inputs(path: &Path) -> Result<Vec<RetirementInput>> {
    let file = File::open(path)?;
    load_inputs_from_reader(BufReader::new(file))
}

pub fn load_inputs_from_reader<R: Read>(reader: R) -> Result<Vec<RetirementInput>> {
    let parsed: OneOrMany = serde_json::from_reader(reader)?;
    Ok(match parsed {
        OneOrMany::One(input) => vec![*input],
        OneOrMany::Many(inputs) => inputs,
    })
}
