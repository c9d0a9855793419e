use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use nova_assistant::config::CONFIG;
use nova_assistant::db::{self, HistoryStorage};
use nova_assistant::input::{CommandParser, TypedInput, stdin_lines};
use nova_assistant::{NovaApp, Outcome};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "nova", version, about = "Command-line assistant driven by a wake word")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the command history table and exit
    InitDb,
    /// Run a single command (without the wake word) and exit
    Once {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = &*CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.basic.loglevel,
        wake_word = %cfg.basic.wake_word,
        gemini = cfg.gemini_enabled(),
        speech = cfg.speech.enabled,
    );

    match cli.command {
        Some(Command::InitDb) => {
            let pool = db::connect(&cfg.basic.database_url).await?;
            HistoryStorage::new(pool.clone()).init_schema().await?;
            pool.close().await;
            println!("Command history table is ready at {}", cfg.basic.database_url);
        }
        Some(Command::Once { text }) => {
            let mut app = NovaApp::from_config(cfg, stdin_lines()).await?;
            app.context_mut().history.start_recording();
            let command = CommandParser::normalize(&text.join(" "));
            let outcome = app.process_command(&command).await;
            app.close().await;
            if let Outcome::Responded { status, .. } = outcome {
                info!(%status, "command finished");
            }
        }
        None => {
            let lines = stdin_lines();
            let mut app = NovaApp::from_config(cfg, lines.clone()).await?;
            let mut input = TypedInput::shared(lines, app.parser().clone());
            app.start().await;
            app.run(&mut input).await;
            app.shutdown().await;
            // the blocking stdin read may still be pending after a signal
            std::process::exit(0);
        }
    }
    Ok(())
}
