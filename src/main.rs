// Use jemalloc for better memory allocation performance on Unix-like systems
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// Use mimalloc on Windows for better performance
#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli_types;
pub use cli_types::CheckArgs;

mod cli_utils;

mod commands;
mod file_processor;

use clap::{Parser, Subcommand, ValueEnum};
use core::error::Error;

use tagcheck_lib::exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output
    #[arg(long, global = true, default_value_t, value_enum)]
    color: Color,

    /// Path to configuration file
    #[arg(
        long,
        global = true,
        help = "Path to configuration file",
        conflicts_with = "no_config"
    )]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(
        long,
        global = true,
        help = "Ignore all configuration files and use built-in defaults"
    )]
    no_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check markup files for unbalanced tags
    Check(CheckArgs),
    /// Initialize a new configuration file
    Init {
        /// Output file path (default: .tagcheck.toml)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Show version information
    Version,
}

#[derive(Clone, Default, ValueEnum)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins; --verbose only raises the default.
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    // Reset SIGPIPE to default behavior on Unix so piping to `head` etc. works correctly.
    #[cfg(unix)]
    {
        // SAFETY: Setting SIGPIPE to SIG_DFL is standard practice for CLI tools
        // that produce output meant to be piped.
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Check(args) if args.verbose);
    init_logging(verbose);

    match cli.color {
        Color::Always => colored::control::set_override(true),
        Color::Never => colored::control::set_override(false),
        Color::Auto => colored::control::unset_override(),
    }

    // Catch panics and print a message, exit 2
    let result = std::panic::catch_unwind(|| match cli.command {
        Commands::Check(args) => {
            let config_path = if cli.no_config { None } else { cli.config.as_deref() };
            commands::check::run_check(&args, config_path, cli.no_config);
        }
        Commands::Init { output } => {
            commands::init::handle_init(output);
        }
        Commands::Version => {
            commands::version::handle_version();
        }
    });
    if let Err(e) = result {
        eprintln!("[tagcheck panic handler] Uncaught panic: {e:?}");
        exit::tool_error();
    } else {
        Ok(())
    }
}
