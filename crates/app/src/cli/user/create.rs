use clap::Args;
use jiff::SignedDuration;
use techhaven_app::{
    auth::Credentials,
    context::{AppContext, AppSettings},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Username, unique across all users
    #[arg(long)]
    username: String,

    /// Cleartext password; only its salted hash is stored
    #[arg(long, env = "TECHHAVEN_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Secret used to sign access tokens
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Lifetime of the printed access token in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 900)]
    token_ttl_seconds: u32,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let context = AppContext::from_settings(AppSettings {
        database_url: &args.database_url,
        token_secret: &args.token_secret,
        token_ttl: SignedDuration::from_secs(i64::from(args.token_ttl_seconds)),
        run_migrations: false,
    })
    .await
    .map_err(|error| format!("failed to initialise services: {error}"))?;

    let credentials = Credentials::new(args.username.as_str(), args.password.as_str());

    let user = context
        .auth
        .register(credentials.clone())
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = context
        .auth
        .login(credentials)
        .await
        .map_err(|error| format!("failed to issue access token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("access_token: {}", issued.token);
    println!("expires_at: {}", issued.expires_at);

    Ok(())
}
