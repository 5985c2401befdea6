use anyhow::{bail, Context, Result};
use clap::Parser;
use fasim::loader::MachineLoader;
use fasim::report::{self, Evaluation};
use fasim::AutomatonError;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  fasim-cli -m machines/m00.fa -i ab -i ''
  fasim-cli -m machines -s machines/strings.txt -o results
  cat machines/strings.txt | fasim-cli -m machines/m01.fa --json")]
struct Cli {
    /// A machine description file (.fa) or a directory of them
    #[clap(short, long)]
    machines: PathBuf,

    /// File with one candidate string per line; a blank line is the empty string
    #[clap(short, long)]
    strings: Option<PathBuf>,

    /// Candidate strings given directly
    #[clap(short, long)]
    input: Vec<String>,

    /// Directory to write accepted strings and the summary to
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print each summary as a JSON object
    #[clap(long)]
    json: bool,

    /// Print the accepted strings of each machine
    #[clap(short = 'a', long)]
    show_accepted: bool,

    /// Cap on configurations explored per string by the nondeterministic search; without
    /// it the search runs to completion
    #[clap(long)]
    max_steps: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let strings = candidate_strings(&cli)?;
    log::debug!("{} candidate strings", strings.len());

    let results = if cli.machines.is_dir() {
        report::evaluate_directory(&cli.machines, &strings, cli.max_steps)
    } else {
        vec![evaluate_file(&cli.machines, &strings, cli.max_steps)]
    };

    if let Some(dir) = &cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut evaluations = Vec::new();
    let mut failures = 0;

    for result in results {
        let evaluation = match result {
            Ok(evaluation) => evaluation,
            Err(e) => {
                eprintln!("Skipped: {}", e);
                failures += 1;
                continue;
            }
        };

        print_evaluation(&evaluation, &cli)?;
        evaluations.push(evaluation);
    }

    if let Some(dir) = &cli.output {
        for e in report::write_outputs(dir, &evaluations) {
            eprintln!("Not written: {}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        log::info!("{} failures", failures);
    }

    if evaluations.is_empty() && failures > 0 {
        bail!("No machine could be evaluated");
    }

    Ok(())
}

/// Collects candidate strings from `--strings`, then `--input`. With neither given and
/// stdin piped, strings are read from stdin.
fn candidate_strings(cli: &Cli) -> Result<Vec<String>> {
    let mut strings = match &cli.strings {
        Some(path) => MachineLoader::load_strings(path)?,
        None => Vec::new(),
    };
    strings.extend(cli.input.iter().cloned());

    if cli.strings.is_none() && cli.input.is_empty() && !atty::is(atty::Stream::Stdin) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read strings from stdin")?;
        strings = MachineLoader::strings_from_str(&content);
    }

    Ok(strings)
}

fn evaluate_file(
    path: &Path,
    strings: &[String],
    step_limit: Option<usize>,
) -> Result<Evaluation, AutomatonError> {
    let automaton = MachineLoader::load_machine(path)?;
    let name = MachineLoader::short_name(path);

    Ok(report::evaluate(&name, &automaton, strings, step_limit))
}

fn print_evaluation(evaluation: &Evaluation, cli: &Cli) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string(&evaluation.summary)?);
    } else {
        println!("{}", evaluation.summary);
    }

    if cli.show_accepted {
        for accepted in &evaluation.accepted {
            println!("  {:?}", accepted);
        }
    }

    Ok(())
}
