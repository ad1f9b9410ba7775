use clap::Parser;
use plant_ai::{cli, config, error, loader, predict, report, transport};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    let config = Config::load()?;

    match cli.command {
        Commands::Predict { image, mode, language, display, endpoint, json, output } => {
            let mode = mode.unwrap_or(config.mode);
            let language = language.unwrap_or(config.language);
            let endpoint = config.resolve_endpoint(endpoint.as_deref());

            if !json {
                println!("🌱 plant-ai - {}\n", mode);
            }

            let loaded = loader::load_image(&image)?;
            let transport = HttpTransport::new(endpoint)?;
            let options = predict::PredictOptions {
                mode,
                language,
                display,
                show_progress: !json,
            };

            let outcome = predict::run(&transport, loaded, &options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            } else {
                print!("{}", report::render(&outcome.result, outcome.overlay.as_ref(), language));
            }

            if let Some(path) = output {
                let content = serde_json::to_string_pretty(&outcome.result)?;
                std::fs::write(&path, content)?;
                if !json {
                    println!("\n✔ 結果を保存: {}", path.display());
                }
            }
        }

        Commands::Health { endpoint } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let transport = HttpTransport::new(endpoint)?;
            let status = transport.health().await?;

            let mark = if status.is_ok() { "✔" } else { "⚠" };
            println!(
                "{} {} - status: {}, version: {}",
                mark,
                transport.base_url(),
                status.status,
                status.version.as_deref().unwrap_or("-")
            );
        }

        Commands::Config { set_endpoint, set_language, set_mode, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_language.is_some() || set_mode.is_some();

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }
            if let Some(language) = set_language {
                config.language = language;
                println!("✔ 言語を設定しました");
            }
            if let Some(mode) = set_mode {
                config.mode = mode;
                println!("✔ 解析モードを設定しました");
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  実効エンドポイント: {}", config.resolve_endpoint(None));
                println!("  言語: {} ({})", config.language, config.language.native_name());
                println!("  解析モード: {}", config.mode);
            }
        }
    }

    Ok(())
}
