use anyhow::Context;
use clap::Parser;
use profile_hub::{
    client::{ApiClient, ClientError, Credentials, SmokeConfig, SmokeRunner},
    entities::user::NewUser,
    telemetry,
};

/// Runs the login and profile-edit scenario against a live server.
#[derive(Parser, Debug, Clone)]
#[command(name = "smoke")]
#[command(about = "Smoke test for the profile API")]
struct Args {
    /// API root, including the `/api` prefix
    #[arg(long, env = "SMOKE_BASE_URL", default_value = "http://localhost:8080/api")]
    base_url: String,

    #[arg(long, env = "SMOKE_EMAIL", default_value = "test@example.com")]
    email: String,

    #[arg(long, env = "SMOKE_PASSWORD", default_value = "password123")]
    password: String,

    /// Second account used for the endorse step
    #[arg(long, env = "SMOKE_ENDORSER_EMAIL", requires = "endorser_password")]
    endorser_email: Option<String>,

    #[arg(long, env = "SMOKE_ENDORSER_PASSWORD")]
    endorser_password: Option<String>,

    /// Register the endorser account before running (an existing account is fine)
    #[arg(long, requires = "endorser_email")]
    register_endorser: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn endorser(&self) -> Option<Credentials> {
        match (&self.endorser_email, &self.endorser_password) {
            (Some(email), Some(password)) => Some(Credentials::new(email, password)),
            _ => None,
        }
    }
}

async fn register_endorser(base_url: &str, endorser: &Credentials) -> Result<(), ClientError> {
    let client = ApiClient::new(base_url)?;
    let user = NewUser {
        email: endorser.email.clone(),
        password: endorser.password.clone(),
        name: "Smoke Endorser".to_string(),
    };

    match client.register(&user).await {
        Ok(created) => {
            tracing::info!(user_id = %created.id, "Registered endorser");
            Ok(())
        }
        Err(e) if e.status() == Some(409) => {
            tracing::info!(email = %endorser.email, "Endorser already registered");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let args = Args::parse();

    let mut config = SmokeConfig::new(&args.base_url, Credentials::new(&args.email, &args.password));
    if let Some(endorser) = args.endorser() {
        if args.register_endorser {
            register_endorser(&args.base_url, &endorser)
                .await
                .context("Failed to register endorser")?;
        }
        config = config.with_endorser(endorser);
    }

    let report = SmokeRunner::new(config)?.run().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
