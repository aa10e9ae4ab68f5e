use bundle_ruler::cmd;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

/// App bundle size attribution and regression analysis
///
/// bundle-ruler breaks an app's download and install size down by build
/// component and owner, diffs two builds and enforces size budgets.
#[derive(Parser)]
#[command(name = "bundle-ruler", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute app size to components and owners
    Analyze {
        /// Archive listing of the base app
        #[arg(value_name = "LISTING")]
        listing: PathBuf,

        /// Dependency map (file key -> candidate components)
        #[arg(long, value_name = "FILE")]
        deps: PathBuf,

        /// Dynamic feature listing, as name=listing.json (repeatable)
        #[arg(long = "feature", value_name = "NAME=LISTING")]
        features: Vec<cmd::FeatureListing>,

        /// Ownership rules (.toml or .json)
        #[arg(long, value_name = "FILE")]
        ownership: Option<PathBuf>,

        /// Deobfuscation tables (JSON)
        #[arg(long, value_name = "FILE")]
        mapping: Option<PathBuf>,

        /// Owner for anything no rule covers
        #[arg(long)]
        default_owner: Option<String>,

        /// Component receiving unattributed files
        #[arg(long)]
        default_component: Option<String>,

        /// Check app size against budget (fail if exceeded)
        #[arg(long)]
        check: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Rows shown per table
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Compare two builds
    Compare {
        /// Archive listing of the new build
        head: PathBuf,

        /// Archive listing of the build to compare against
        base: PathBuf,

        /// Also report files that exist only in the base build
        #[arg(long)]
        include_removed: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Rows shown in the changed-files table
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Initialize bundle-ruler configuration
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Some(Commands::Analyze {
            listing,
            deps,
            features,
            ownership,
            mapping,
            default_owner,
            default_component,
            check,
            json,
            top,
        }) => cmd::cmd_analyze(&cmd::AnalyzeOptions {
            listing,
            deps,
            features,
            ownership,
            mapping,
            default_owner,
            default_component,
            check,
            json,
            top,
        }),
        Some(Commands::Compare {
            head,
            base,
            include_removed,
            json,
            top,
        }) => cmd::cmd_compare(&head, &base, include_removed, json, top),
        Some(Commands::Init) => cmd::cmd_init(),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
        None => {
            println!("bundle-ruler v{}", env!("CARGO_PKG_VERSION"));
            println!("App bundle size attribution and regression analysis\n");
            println!("Usage: bundle-ruler <COMMAND>\n");
            println!("Commands:");
            println!("  analyze      Attribute app size to components and owners");
            println!("  compare      Compare two builds");
            println!("  init         Initialize bundle-ruler configuration");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-ruler <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_ruler::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
