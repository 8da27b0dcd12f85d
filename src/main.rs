use ai_recipe_generator::{
    controller_from_config, AppConfig, RecipeController, RequestState, ViewModel,
};
use clap::Parser;
use log::{debug, error};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "ai-recipe-generator", version, about = "Suggest a recipe from the ingredients you have")]
struct Cli {
    /// Comma-separated ingredients, e.g. "chicken, garlic, rice".
    /// Reads one submission per line from stdin when omitted.
    ingredients: Option<String>,

    /// Backend to query (overrides configuration)
    #[arg(long)]
    backend: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    let controller = controller_from_config(&config)?;
    debug!("Using backend {}", controller.backend_name());

    match cli.ingredients {
        Some(ingredients) => {
            let state = submit_and_render(&controller, ingredients).await;
            Ok(match state {
                RequestState::Failed(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        None => {
            println!("{}", ViewModel::from_controller(&controller));
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                submit_and_render(&controller, line).await;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn submit_and_render(controller: &RecipeController, input: String) -> RequestState {
    controller.set_input(input);
    let submission = controller.submit();
    tokio::pin!(submission);

    // The first poll moves the controller into Loading; draw that frame
    // before waiting for the query to settle.
    let state = tokio::select! {
        biased;
        state = &mut submission => state,
        _ = std::future::ready(()) => {
            println!("{}", ViewModel::from_controller(controller));
            submission.await
        }
    };
    println!("{}", ViewModel::from_controller(controller));
    state
}
