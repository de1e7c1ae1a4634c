use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ldapsql", bin_name = "ldapsql")]
#[command(about = "Compile SQL-shaped queries into directory search requests")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./ldapsql.yaml when present)
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a JSON query into a search descriptor
    #[command(after_help = r#"EXAMPLES:
  ldapsql translate query.json
  ldapsql translate --pretty < query.json
  LDAPSQL_SEARCH_SCOPE=subtree ldapsql translate query.json"#)]
    Translate(TranslateArgs),

    /// Parse a search filter and print its canonical form and tree
    #[command(after_help = r#"EXAMPLES:
  ldapsql check '(&(cn=R*)(!(uid=jdoe)))'"#)]
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// JSON query file, `-` or nothing for stdin
    #[arg(value_name = "QUERY_JSON")]
    pub input: Option<PathBuf>,

    /// Pretty-print the descriptor
    #[arg(long)]
    pub pretty: bool,
}

impl TranslateArgs {
    /// `None` means read standard input
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Filter string, e.g. `(cn=R*)`
    #[arg(value_name = "FILTER")]
    pub filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_translate_args() {
        let cli = Cli::try_parse_from(["ldapsql", "--config", "x.yaml", "translate", "q.json", "--pretty"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Command::Translate(args) => {
                assert!(args.pretty);
                assert_eq!(args.input_path(), Some(&PathBuf::from("q.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_dash_means_stdin() {
        let cli = Cli::try_parse_from(["ldapsql", "translate", "-"]).unwrap();
        let Command::Translate(args) = cli.command else {
            panic!("expected translate");
        };
        assert_eq!(args.input_path(), None);
    }

    #[test]
    fn test_check_requires_filter() {
        assert!(Cli::try_parse_from(["ldapsql", "check"]).is_err());
        let cli = Cli::try_parse_from(["ldapsql", "check", "(cn=*)", "-c", "cfg.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
    }
}
