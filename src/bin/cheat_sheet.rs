// Binary entry point: builds this week's cheat sheet.
use anyhow::{Context, Result};
use cheat_sheet::assembler::{self, document_url};
use cheat_sheet::classifier;
use cheat_sheet::cli::{CliArgs, print_help};
use cheat_sheet::client::{GoogleClient, HebcalClient};
use cheat_sheet::collector::{self, Sources};
use cheat_sheet::config::Config;
use cheat_sheet::context::{AppContext, StandardContext};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = CliArgs::parse(args.get(1..).unwrap_or_default())?;
    if cli.help {
        print_help("cheat-sheet");
        return Ok(());
    }

    TermLogger::init(
        if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logging")?;

    let ctx = StandardContext::new(cli.override_root.clone());
    let config = Config::load(&ctx).map_err(|e| {
        if Config::is_missing_config_error(&e) {
            log::error!(
                "Create {} first (see --help)",
                ctx.get_config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            );
        }
        e
    })?;

    let date = cli
        .date
        .unwrap_or_else(|| classifier::upcoming_shabbat(chrono::Local::now().date_naive()));
    log::info!("Building the cheat sheet for {}", date.format("%Y-%m-%d"));

    let hebcal = HebcalClient::new(&config.endpoints.hebcal);
    let google = GoogleClient::new(config.endpoints.clone(), &config.resolve_access_token()?);

    let flags = classifier::classify(date, &hebcal)?;
    log::debug!("{:?}", flags);
    let sources = Sources {
        calendar: &hebcal,
        sheets: &google,
    };
    let fields = collector::collect(date, &flags, sources, &config)?;

    if cli.dry_run {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "date": date,
                "flags": flags,
                "fields": fields,
            }))?
        );
        return Ok(());
    }

    let document_id = assembler::assemble(&google, &config.templates, date, &flags, &fields)?;
    log::info!("Done: {}", document_url(&document_id));
    Ok(())
}
