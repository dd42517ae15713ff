use std::sync::Arc;

use anyhow::Result;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use magic_link_api::prelude::*;

mod browser;
mod config;

use browser::SystemBrowser;
use config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(matches).await {
        eprintln!("❌ {}", err);

        // Print all errors in the chain
        for (i, cause) in err.chain().enumerate().skip(1) {
            eprintln!("  {}: {}", i, cause);
        }

        std::process::exit(1);
    } else {
        Ok(())
    }
}

fn build_api(matches: &ArgMatches) -> Result<MagicLinkApi> {
    let settings = Settings::resolve(
        matches.get_one::<String>("host"),
        matches.get_one::<String>("token"),
    )?;
    Ok(MagicLinkApi::new(
        Arc::new(StaticSession::new(settings.api_token)),
        Arc::new(StaticHosts::new(settings.host)),
    ))
}

async fn run(matches: ArgMatches) -> Result<()> {
    let api = build_api(&matches)?;

    // printing a link is the one path where failures reach the user
    if let Some(matches) = matches.subcommand_matches("link") {
        let sub_page = matches
            .get_one::<String>("sub_page")
            .cloned()
            .unwrap_or_default();
        let source = matches.get_one::<String>("source").map(String::as_str);
        let link = api.build_dashboard_link(&sub_page, source).await?;
        println!("{link}");
        return Ok(());
    }

    let service = MagicLinkService::new(api, Arc::new(SystemBrowser), Arc::new(LogUsageRecorder));
    match matches.subcommand() {
        Some(("prime", matches)) => {
            let refl = matches
                .get_one::<String>("refl")
                .cloned()
                .unwrap_or_default();
            service.link_to_prime(&refl).await;
        }
        Some(("widget-themes", _)) => service.open_widget_themes_magic_link().await,
        Some(("donation-settings", _)) => service.open_donation_settings().await,
        Some(("alert-testing", _)) => service.open_advanced_alert_testing().await,
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn destinations_help() -> String {
    let names = SubPage::ALL.map(|page| page.as_str()).join(", ");
    format!("dashboard destination, e.g. {names}")
}

fn cli() -> Command {
    Command::new("slink")
        .version("0.1.0")
        .about("Open streamlabs dashboard pages without logging in again")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .arg(Arg::new("host").long("host").value_name("domain").action(ArgAction::Set).global(true).help("Streamlabs domain, overrides STREAMLABS_HOST"))
        .arg(Arg::new("token").long("token").value_name("api_token").action(ArgAction::Set).global(true).help("Session api token, overrides STREAMLABS_API_TOKEN"))
        .subcommand(
            Command::new("prime")
                .about("open prime onboarding in the browser")
                .arg(Arg::new("refl").short('r').long("refl").value_name("tag").action(ArgAction::Set).help("Referral tag for analytics")),
        )
        .subcommand(Command::new("widget-themes").about("open the widget themes library"))
        .subcommand(Command::new("donation-settings").about("open donation settings"))
        .subcommand(Command::new("alert-testing").about("open advanced alert testing"))
        .subcommand(
            Command::new("link")
                .about("print a magic link instead of opening it")
                .arg(Arg::new("sub_page").value_name("sub_page").action(ArgAction::Set).help(destinations_help()))
                .arg(Arg::new("source").short('s').long("source").value_name("tag").action(ArgAction::Set).help("Referral tag for analytics")),
        )
}
