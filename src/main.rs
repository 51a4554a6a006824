#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "crd2swagger",
    about = "Generate Swagger definitions from CRD structural schemas"
)]
struct Cli {
    /// Path or URL to the schema bundle
    #[arg(value_name = "BUNDLE")]
    input: String,

    /// Path to the Swagger output file
    #[arg(value_name = "SWAGGER")]
    output: String,

    /// Only namespaces under this root count toward group naming
    #[arg(long)]
    root_namespace: Option<String>,

    /// Group label convention for definition keys
    #[arg(long, value_enum, default_value_t = crd_swagger::NamingMode::Reversed)]
    naming_mode: crd_swagger::NamingMode,

    /// Key prefix of definitions owned by the base API document
    #[arg(long, default_value = crd_swagger::config::DEFAULT_FOREIGN_PREFIX)]
    foreign_prefix: String,

    /// Maximum description length; 0 drops descriptions
    #[arg(long)]
    max_desc_len: Option<usize>,

    /// Log at debug level
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .init();

    let config = crd_swagger::GeneratorConfig {
        root_namespace: cli.root_namespace.as_deref().map(Into::into),
        naming_mode: cli.naming_mode,
        foreign_prefix: cli.foreign_prefix,
        max_description_len: cli.max_desc_len,
    };

    match crd_swagger::convert_bundle_to_swagger(&cli.input, &cli.output, &config) {
        Ok(diagnostics) => {
            if !diagnostics.is_empty() {
                tracing::info!("{} diagnostic(s) reported", diagnostics.len());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
