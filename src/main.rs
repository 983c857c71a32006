//! cors-gate: standalone CORS preflight server and rule checker.
//!
//! ```text
//!  rule text ──▶ rules::parser ──▶ RuleSet ──▶ http::routes ──▶ OPTIONS /path
//!                                     │
//!  server.toml ──▶ config::loader ────┘        lifecycle: signals → shutdown
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use cors_gate::lifecycle::startup;
use cors_gate::{Rule, RuleSet};

#[derive(Parser)]
#[command(name = "cors-gate")]
#[command(about = "Path-scoped CORS preflight server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve preflight routes described by a config file
    Serve {
        #[arg(short, long, default_value = "cors-gate.toml")]
        config: PathBuf,
    },
    /// Parse a rule file and print the resulting rule table
    Check {
        /// Rule text file
        rules: PathBuf,

        /// Also show which rule a path resolves to (repeatable)
        #[arg(short, long = "path")]
        paths: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    rules: Vec<Entry<'a>>,
    lookups: Vec<Lookup<'a>>,
}

#[derive(Serialize)]
struct Entry<'a> {
    path: &'a str,
    rule: &'a Rule,
}

#[derive(Serialize)]
struct Lookup<'a> {
    path: &'a str,
    rule: Option<&'a Rule>,
}

fn report<'a>(rules: &'a RuleSet, paths: &'a [String]) -> Report<'a> {
    Report {
        rules: rules.iter().map(|(path, rule)| Entry { path, rule }).collect(),
        lookups: paths
            .iter()
            .map(|path| Lookup {
                path,
                rule: rules.rule_for(path),
            })
            .collect(),
    }
}

fn describe(rule: &Rule) -> String {
    let methods: Vec<&str> = rule.methods().iter().map(|m| m.as_str()).collect();
    format!(
        "origins=[{}] headers=[{}] methods=[{}]",
        rule.origins().join(","),
        rule.headers().join(","),
        methods.join(",")
    )
}

fn render_table(report: &Report<'_>) -> String {
    let mut out = String::new();
    for entry in &report.rules {
        out.push_str(&format!("{:<24} {}\n", entry.path, describe(entry.rule)));
    }
    for lookup in &report.lookups {
        match lookup.rule {
            Some(rule) => out.push_str(&format!("{} -> {}\n", lookup.path, describe(rule))),
            None => out.push_str(&format!("{} -> no rule\n", lookup.path)),
        }
    }
    out
}

fn check(rules_path: &Path, paths: &[String], json: bool) -> Result<String, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(rules_path)?;
    let rules = RuleSet::parse(&text)?;
    let report = report(&rules, paths);
    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(render_table(&report))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => match startup::run(&config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Check { rules, paths, json } => match check(&rules, &paths, json) {
            Ok(output) => {
                println!("{}", output.trim_end());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["cors-gate", "check", "cors.rules", "-p", "/a", "--path", "/b", "--json"]).unwrap();
        match cli.command {
            Commands::Check { rules, paths, json } => {
                assert_eq!(rules, PathBuf::from("cors.rules"));
                assert_eq!(paths, ["/a", "/b"]);
                assert!(json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_table_report() {
        let rules = RuleSet::parse("/a;foo.com;content-type;DELETE\n*;*;;GET").unwrap();
        let lookups = vec!["/zzz".to_string()];
        let table = render_table(&report(&rules, &lookups));
        assert!(table.contains("origins=[foo.com] headers=[content-type] methods=[DELETE]"));
        assert!(table.contains("/zzz -> origins=[*] headers=[] methods=[GET]"));
    }

    #[test]
    fn test_json_report() {
        let rules = RuleSet::parse("/a;foo.com;;PUT,patch").unwrap();
        let lookups = vec!["/b".to_string()];
        let value = serde_json::to_value(report(&rules, &lookups)).unwrap();
        assert_eq!(value["rules"][0]["path"], "/a");
        assert_eq!(value["rules"][0]["rule"]["methods"], serde_json::json!(["PUT", "PATCH"]));
        assert!(value["lookups"][0]["rule"].is_null());
    }

    #[test]
    fn test_check_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cors.rules");
        std::fs::write(&path, "*;;").unwrap();
        let err = check(&path, &[], false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid cors rules: invalid amount of fields in rule 1, got 3 want 4"
        );
    }
}
