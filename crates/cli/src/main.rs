use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triage_core::{
    candidate_conditions, SelectedSymptom, Severity, SymptomCatalog, TriageError, TriageResult,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Dental symptom triage and OPG recommendation CLI")]
struct Cli {
    /// YAML symptom catalog to use instead of the built-in table
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symptom catalog
    Symptoms,
    /// Score a set of symptoms and print the OPG advisory
    Recommend {
        /// Symptom and severity as NAME=SEVERITY, e.g. "Loose teeth=8". Severity defaults to 5.
        #[arg(long = "symptom", short = 's')]
        symptoms: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &cli.catalog {
        Some(path) => SymptomCatalog::load(path)?,
        None => SymptomCatalog::builtin(),
    };

    match cli.command {
        Some(Commands::Symptoms) => {
            for symptom in catalog.iter() {
                println!(
                    "{:<40} weight {:.2}  [{}]",
                    symptom.name,
                    symptom.weight,
                    symptom.associated_conditions.join(", ")
                );
            }
        }
        Some(Commands::Recommend { symptoms }) => {
            let selections = parse_selections(&symptoms)?;

            for s in &selections {
                if !catalog.contains(&s.name) {
                    eprintln!("Warning: '{}' is not in the catalog and scores 0", s.name);
                }
            }

            let result = triage_core::recommend(&catalog, &selections);
            println!("{}", result.advisory_text);
            println!("Score: {}/100 ({})", result.score, result.tier);

            let candidates = candidate_conditions(&catalog, &selections);
            if !candidates.is_empty() {
                println!("Candidate conditions:");
                for c in candidates {
                    println!("  {:<30} {:>5.1}%", c.name, c.share * 100.0);
                }
            }
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

/// Parse `NAME=SEVERITY` arguments. An empty list is rejected.
fn parse_selections(args: &[String]) -> TriageResult<Vec<SelectedSymptom>> {
    if args.is_empty() {
        return Err(TriageError::NoSymptomsSelected);
    }

    args.iter()
        .map(|arg| -> TriageResult<SelectedSymptom> {
            let (name, severity) = match arg.rsplit_once('=') {
                Some((name, raw)) => {
                    let value: i64 = raw.trim().parse().map_err(|_| {
                        TriageError::InvalidInput(format!("invalid severity in '{arg}'"))
                    })?;
                    (name, Severity::new(value)?)
                }
                None => (arg.as_str(), Severity::DEFAULT),
            };

            let name = name.trim();
            if name.is_empty() {
                return Err(TriageError::InvalidInput(format!(
                    "missing symptom name in '{arg}'"
                )));
            }
            Ok(SelectedSymptom::new(name, severity))
        })
        .collect()
}
