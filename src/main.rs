use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use visanet_peru::application::gateway::VisanetPeruGateway;
use visanet_peru::config::{Environment, GatewayConfig};
use visanet_peru::domain::authorization::AuthRef;
use visanet_peru::domain::card::CreditCard;
use visanet_peru::domain::money::{Amount, Currency};
use visanet_peru::domain::options::TransactionOptions;
use visanet_peru::infrastructure::http::ReqwestTransport;

#[derive(Parser)]
#[command(author, version, about = "VisaNet Peru card payments from the command line", long_about = None)]
struct Cli {
    #[arg(long, env = "VISANET_MERCHANT_ID")]
    merchant_id: String,

    #[arg(long, env = "VISANET_ACCESS_KEY_ID")]
    access_key_id: String,

    #[arg(long, env = "VISANET_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: String,

    /// `test` or `live`
    #[arg(long, env = "VISANET_ENVIRONMENT", default_value = "test")]
    environment: Environment,

    /// Overrides the environment's API host, e.g. for a sandbox proxy
    #[arg(long, env = "VISANET_BASE_URL", hide = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reserve funds on a card
    Authorize {
        #[arg(long)]
        amount: Amount,
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Authorize and capture in one step
    Purchase {
        #[arg(long)]
        amount: Amount,
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Capture a previous authorization
    Capture {
        #[arg(long)]
        amount: Amount,
        #[arg(long)]
        authorization: AuthRef,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Cancel an uncaptured authorization
    Void {
        #[arg(long)]
        authorization: AuthRef,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Reverse a deposit
    Refund {
        #[arg(long)]
        amount: Option<Amount>,
        #[arg(long)]
        authorization: AuthRef,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Check a card with an authorization that is voided right away
    Verify {
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
}

#[derive(Args)]
struct CardArgs {
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    cvv: Option<String>,
    #[arg(long)]
    month: u8,
    #[arg(long)]
    year: u16,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
}

impl From<CardArgs> for CreditCard {
    fn from(args: CardArgs) -> Self {
        let card = CreditCard::new(args.card_number, args.month, args.year)
            .with_holder(args.first_name, args.last_name);
        match args.cvv {
            Some(cvv) => card.with_verification_value(cvv),
            None => card,
        }
    }
}

#[derive(Args)]
struct OrderArgs {
    #[arg(long)]
    order_id: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    currency: Option<Currency>,
    /// Merchant tax id, used by the unsettled-refund fallback
    #[arg(long)]
    ruc: Option<String>,
    #[arg(long)]
    force_full_refund_if_unsettled: bool,
}

impl From<OrderArgs> for TransactionOptions {
    fn from(args: OrderArgs) -> Self {
        TransactionOptions {
            order_id: args.order_id,
            email: args.email,
            currency: args.currency,
            ruc: args.ruc,
            force_full_refund_if_unsettled: args.force_full_refund_if_unsettled,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GatewayConfig::new(
        cli.merchant_id,
        cli.access_key_id,
        cli.secret_access_key,
        cli.environment,
    )
    .into_diagnostic()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let transport = ReqwestTransport::new().into_diagnostic()?;
    let gateway = VisanetPeruGateway::new(config, Box::new(transport));

    let result = match cli.command {
        Command::Authorize {
            amount,
            card,
            order,
        } => {
            gateway
                .authorize(amount, &card.into(), &order.into())
                .await
        }
        Command::Purchase {
            amount,
            card,
            order,
        } => gateway.purchase(amount, &card.into(), &order.into()).await,
        Command::Capture {
            amount,
            authorization,
            order,
        } => {
            gateway
                .capture(amount, &authorization, &order.into())
                .await
        }
        Command::Void {
            authorization,
            order,
        } => gateway.void(&authorization, &order.into()).await,
        Command::Refund {
            amount,
            authorization,
            order,
        } => gateway.refund(amount, &authorization, &order.into()).await,
        Command::Verify { card, order } => gateway.verify(&card.into(), &order.into()).await,
    }
    .into_diagnostic()?;

    // Declines are still printed and exit successfully; the result says what happened.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &result).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;

    Ok(())
}
