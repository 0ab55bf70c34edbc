use clap::Parser;
use miette::Result;
use rationale::cli::commands::{check, completions, generate, new, review, schema};
use rationale::cli::{Cli, Commands};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    configure_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::New(args) => new::run(args, &global),
        Commands::Generate(args) => generate::run(args, &global),
        Commands::Review(args) => review::run(args, &global),
        Commands::Check(args) => check::run(args, &global),
        Commands::Schema(cmd) => schema::run(cmd),
        Commands::Completions(args) => completions::run(args),
    }
}

/// Log to stderr so stdout stays clean for document output
fn configure_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
