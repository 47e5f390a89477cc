mod provider;
mod survey;

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::provider::Provider;
use crate::survey::RankOrder;

#[derive(Parser)]
#[command(
    name = "saliency-survey-cli",
    version,
    about = "Inspect image-set providers and run scripted saliency surveys"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "SALIENCY_API_BASE",
        default_value = "http://localhost:3000"
    )]
    api_base: String,
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Images {
        #[command(subcommand)]
        command: ImageCommand,
    },
    Survey {
        #[command(subcommand)]
        command: SurveyCommand,
    },
}

#[derive(Subcommand)]
enum ImageCommand {
    /// List image sets known to the provider.
    List,
    /// Show one image set with its masks.
    Show { id: String },
    /// Fetch every image set and report the ones that fail validation.
    Check,
}

#[derive(Subcommand)]
enum SurveyCommand {
    /// Rank every image set in a fixed order and print the results.
    Run {
        #[arg(long, value_enum, default_value_t = RankOrder::Given)]
        order: RankOrder,
        /// Use the built-in demo catalog instead of the provider.
        #[arg(long)]
        demo: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs.max(1));

    match cli.command {
        Commands::Images { command } => {
            let provider = Provider::new(&cli.api_base, timeout)?;
            match command {
                ImageCommand::List => {
                    let sets = provider.image_sets().await?;
                    if sets.is_empty() {
                        eprintln!("no image sets at {}", provider.api_base());
                    }
                    for set in sets {
                        println!("{}\t{}", set.id, set.original_image);
                    }
                }
                ImageCommand::Show { id } => {
                    let set = provider.image_set_details(&id).await?;
                    println!("set: {}", set.id);
                    println!("original: {}", set.original_image);
                    for mask in &set.masks {
                        println!("  {}\t{}\t{}", mask.id, mask.name, mask.image_url);
                    }
                }
                ImageCommand::Check => {
                    let sets = provider.image_sets().await?;
                    if sets.is_empty() {
                        return Err("provider returned no image sets".into());
                    }
                    let mut failed = 0usize;
                    for stub in &sets {
                        match provider.image_set_details(&stub.id).await {
                            Ok(set) if set.masks.is_empty() => {
                                println!("warn {}: no masks", set.id);
                            }
                            Ok(set) => println!("ok   {}: {} masks", set.id, set.masks.len()),
                            Err(err) => {
                                failed += 1;
                                println!("fail {}: {err}", stub.id);
                            }
                        }
                    }
                    if failed > 0 {
                        return Err(format!("{failed} of {} image sets failed", sets.len()).into());
                    }
                }
            }
        }
        Commands::Survey { command } => match command {
            SurveyCommand::Run { order, demo } => {
                let provider = if demo {
                    None
                } else {
                    Some(Provider::new(&cli.api_base, timeout)?)
                };
                let results = survey::run(provider.as_ref(), order).await?;
                println!("{}", results.to_pretty_json()?);
            }
        },
    }

    Ok(())
}
