//! This module provides the `MachineLoader` struct, responsible for loading machine
//! descriptions and candidate strings from files and directories.

use crate::automaton::Automaton;
use crate::parser::parse;
use crate::types::{AutomatonError, DESCRIPTION_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};

/// `MachineLoader` is a utility struct for loading finite automaton descriptions.
/// It loads single descriptions from files, discovers every `.fa` file in a
/// directory, and reads the candidate strings to run against them.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.fa` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the file is read; the automaton may still be classified invalid.
    /// * `Err(AutomatonError::SourceUnavailable)` if the file cannot be read.
    pub fn load_machine(path: &Path) -> Result<Automaton, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::SourceUnavailable(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))
        })?;

        parse(&content)
    }

    /// Loads every machine description (`.fa` extension) from a given directory.
    ///
    /// Entries are returned sorted by path so batch output is stable. Directories and
    /// files with other extensions are skipped. A file that cannot be read yields an `Err`
    /// entry without affecting the others.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Automaton), AutomatonError>>` - One element per description
    ///   file, or a single `Err` if the directory itself cannot be read.
    pub fn load_machines(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, Automaton), AutomatonError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(AutomatonError::SourceUnavailable(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut results = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => results.push(Err(AutomatonError::SourceUnavailable(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        // Skip directories and non-.fa files
        paths.retain(|path| {
            !path.is_dir() && path.extension().is_some_and(|ext| ext == DESCRIPTION_EXTENSION)
        });
        paths.sort();

        results.extend(
            paths
                .into_iter()
                .map(|path| Self::load_machine(&path).map(|automaton| (path, automaton))),
        );

        results
    }

    /// Reads candidate strings, one per line, from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` with one entry per line, see [`MachineLoader::strings_from_str`].
    /// * `Err(AutomatonError::SourceUnavailable)` if the file cannot be read.
    pub fn load_strings(path: &Path) -> Result<Vec<String>, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::SourceUnavailable(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::strings_from_str(&content))
    }

    /// Splits candidate strings from text, one per line.
    ///
    /// The line terminator (`\n` or `\r\n`) is stripped but every other character,
    /// including leading and trailing spaces, is kept. A blank line is the empty string.
    pub fn strings_from_str(content: &str) -> Vec<String> {
        content.lines().map(str::to_string).collect()
    }

    /// Returns the short name of a machine: its file name without the extension.
    pub fn short_name(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Classification;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("m00.fa");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"[1]\n0,a,1\n").unwrap();

        let automaton = MachineLoader::load_machine(&file_path).unwrap();
        assert_eq!(automaton.classification, Classification::Deterministic);
        assert_eq!(automaton.state_count(), 2);
    }

    #[test]
    fn test_load_missing_machine() {
        let dir = tempdir().unwrap();

        let result = MachineLoader::load_machine(&dir.path().join("missing.fa"));
        assert!(matches!(result, Err(AutomatonError::SourceUnavailable(_))));
    }

    #[test]
    fn test_load_invalid_machine_still_loads() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("m01.fa");
        fs::write(&file_path, "[0]\n256,a,0").unwrap();

        let automaton = MachineLoader::load_machine(&file_path).unwrap();
        assert_eq!(automaton.classification, Classification::Invalid);
    }

    #[test]
    fn test_load_machines_from_directory() {
        let dir = tempdir().unwrap();

        let machines = [
            ("m01.fa", "[1]\n0,a,1"),
            ("m00.fa", "[0]\n0,,1"),
            ("m02.fa", "[0]\n256,a,0"),
            ("notes.txt", "ignored"),
        ];
        for (name, content) in machines {
            let mut file = File::create(dir.path().join(name)).unwrap();
            file.write_all(content.as_bytes()).unwrap();
        }
        fs::create_dir(dir.path().join("nested.fa")).unwrap();

        let results = MachineLoader::load_machines(dir.path());
        assert_eq!(results.len(), 3);

        let loaded = results
            .into_iter()
            .map(|result| {
                let (path, automaton) = result.unwrap();
                (MachineLoader::short_name(&path), automaton.classification)
            })
            .collect::<Vec<_>>();

        assert_eq!(
            loaded,
            vec![
                ("m00".to_string(), Classification::Nondeterministic),
                ("m01".to_string(), Classification::Deterministic),
                ("m02".to_string(), Classification::Invalid),
            ]
        );
    }

    #[test]
    fn test_load_machines_missing_directory() {
        let dir = tempdir().unwrap();

        let results = MachineLoader::load_machines(&dir.path().join("nowhere"));
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(AutomatonError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_load_strings() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("strings.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"a\r\n\n a b \nab\n").unwrap();

        let strings = MachineLoader::load_strings(&file_path).unwrap();
        assert_eq!(strings, vec!["a", "", " a b ", "ab"]);
    }

    #[test]
    fn test_load_strings_missing_file() {
        let result = MachineLoader::load_strings(Path::new("/nonexistent/strings.txt"));
        assert!(matches!(result, Err(AutomatonError::SourceUnavailable(_))));
    }
}
