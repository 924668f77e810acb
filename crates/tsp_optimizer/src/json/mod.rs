use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::problem::tsp_problem::{ProblemError, TspProblem};

use self::types::JsonTspProblem;

pub mod types;

/// Loads the problem stored in the JSON file at `path`.
#[instrument(level = "debug")]
pub fn load_problem(path: &Path) -> Result<TspProblem, ProblemError> {
    let content = fs::read_to_string(path).map_err(|source| ProblemError::Io {
        path: path.to_owned(),
        source,
    })?;

    let problem = serde_json::from_str::<JsonTspProblem>(&content)
        .map_err(|source| ProblemError::Json {
            path: path.to_owned(),
            source,
        })?
        .build_problem()?;

    debug!("loaded {problem}");

    Ok(problem)
}

/// Loads every `.json` problem below `path`, ordered by file path, or the
/// problem at `path` itself when it is a file.
pub fn load_problems(path: &Path) -> Result<Vec<TspProblem>, ProblemError> {
    if path.is_file() {
        return Ok(vec![load_problem(path)?]);
    }

    read_folder(path)
        .map_err(|source| ProblemError::Io {
            path: path.to_owned(),
            source,
        })?
        .iter()
        .filter(|file| file.extension().is_some_and(|extension| extension == "json"))
        .map(|file| load_problem(file))
        .collect()
}

/// Every file below `folder_path`, recursively, sorted.
pub fn read_folder(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder_path)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

pub fn to_json_string(problem: &TspProblem) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonTspProblem::from(problem))
}
