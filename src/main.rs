use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compile_probe::client::CompileClient;
use compile_probe::config::Config;
use compile_probe::report::{render_case, render_summary, RunReport};
use compile_probe::runner::Runner;
use compile_probe::session::Session;
use compile_probe::suite::{builtin_suite, SuiteRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "compile_probe=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let session = Session::new(config.clone());
    tracing::info!(run_id = %session.run_id, "probing {}", config.compiler_url);

    let client = CompileClient::new(&config.compiler_url, config.request_timeout)?;
    client.wait_until_ready().await?;

    let cases = match &config.suite_dir {
        Some(dir) => {
            SuiteRegistry::new(PathBuf::from(dir))
                .load_all()
                .await?
        }
        None => builtin_suite(),
    };

    let runner = Runner::new(client);
    let mut reports = Vec::with_capacity(cases.len());
    for case in &cases {
        let report = runner.run_case(case).await;
        print!("{}", render_case(&report));
        reports.push(report);
    }

    let run = RunReport::new(&session, reports);
    print!("{}", render_summary(&run));

    if let Some(path) = &config.report_path {
        tokio::fs::write(path, serde_json::to_string_pretty(&run)?).await?;
        tracing::info!("wrote report to {}", path);
    }

    if !run.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
