use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use regpay::application::workflow::{PaymentWorkflow, RetryPolicy};
use regpay::domain::registration::ViewState;
use regpay::infrastructure::http::HttpGateway;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL, e.g. https://api.example.com
    #[arg(long, env = "PAYMENT_BACKEND_URL")]
    backend: String,

    /// Load retry attempts (exponential backoff between attempts)
    #[arg(long, default_value_t = 1)]
    retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the payment status of a registration
    Status {
        /// The registration's object identifier
        object_id: String,
    },
    /// Submit a payment claim for a registration
    Submit {
        /// The registration's object identifier
        object_id: String,

        /// Payment method (Bkash, Nagad or Rocket)
        #[arg(long)]
        method: String,

        /// Transaction reference from the payment provider
        #[arg(long)]
        trx_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let gateway = HttpGateway::new(&cli.backend).into_diagnostic()?;
    let retry = RetryPolicy {
        attempts: cli.retries.max(1),
        base_delay: Duration::from_millis(250),
    };

    match cli.command {
        Command::Status { object_id } => {
            let mut workflow = PaymentWorkflow::new(object_id, Box::new(gateway))
                .into_diagnostic()?
                .with_retry_policy(retry);
            workflow.load().await.into_diagnostic()?;
            print_state(&workflow);
        }
        Command::Submit {
            object_id,
            method,
            trx_id,
        } => {
            let mut workflow = PaymentWorkflow::new(object_id, Box::new(gateway))
                .into_diagnostic()?
                .with_retry_policy(retry);
            workflow.load().await.into_diagnostic()?;
            workflow.set_payment_method(method);
            workflow.set_trx_id(trx_id);
            workflow.submit().await.into_diagnostic()?;
            println!("Payment information sent.");
            print_state(&workflow);
        }
    }

    Ok(())
}

fn print_state(workflow: &PaymentWorkflow) {
    let record = workflow.record();
    if let Some(team_id) = record.team_id {
        println!("Reference: {team_id}");
    }
    match workflow.view() {
        ViewState::Loading => println!("Status: loading"),
        ViewState::Verified => println!("Status: payment verification complete"),
        ViewState::Processing => {
            let trx = record.trx_id.as_deref().unwrap_or_default();
            println!("Status: payment is being processed (trxId {trx})");
        }
        ViewState::AwaitingSubmission => println!("Status: awaiting payment submission"),
    }
}
