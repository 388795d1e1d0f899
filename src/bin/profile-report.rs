use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use dotenv::dotenv;
use log::{debug, info, initialize_logger};
use serde::Serialize;
use structopt::StructOpt;

use profile_core::api::{HttpProfileApi, ProfileApi};
use profile_core::completion::{Completion, Criterion};
use profile_core::config::Config;
use profile_core::profile::ProfileRecord;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "profile-report",
    about = "Print the completion report of a profile"
)]
struct Opt {
    /// A profile JSON file. When omitted, the profile is fetched from
    /// the service configured in the environment
    #[structopt(parse(from_os_str))]
    file: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    name: &'a str,
    #[serde(flatten)]
    completion: Completion,
    next_step: Option<Criterion>,
    hint: Option<&'static str>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let opt = Opt::from_args();

    let logger = initialize_logger();

    let profile: ProfileRecord = match &opt.file {
        Some(path) => {
            info!(logger, "Reading profile..."; "path" => %path.display());
            serde_json::from_reader(File::open(path)?)?
        }
        None => {
            let config = Config::from_env()?;
            info!(logger, "Fetching profile..."; "base_url" => %config.api_base_url);
            HttpProfileApi::from_config(&config)?.get_profile().await?
        }
    };

    let completion = Completion::of(&profile);
    let next_step = completion.next_step();
    debug!(logger, "Computed completion"; "score" => completion.score);

    let report = Report {
        name: &profile.name,
        completion,
        next_step,
        hint: next_step.map(Criterion::hint),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
