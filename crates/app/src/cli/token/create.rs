use blanja_app::{
    auth::{DEFAULT_TOKEN_TTL, Identity, JwtConfig, JwtService, Role},
    domain::users::models::UserId,
};
use clap::Args;
use jiff::{SignedDuration, Timestamp};

const MAX_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// User id placed in the `sub` claim
    #[arg(long)]
    user_id: i64,

    /// Email placed in the `email` claim
    #[arg(long)]
    email: String,

    /// One of admin, seller or customer
    #[arg(long)]
    role: Role,

    /// HS256 signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Token issuer
    #[arg(long, env = "JWT_ISSUER", default_value = "blanja")]
    jwt_issuer: String,

    /// Token lifetime in hours
    #[arg(long)]
    ttl_hours: Option<i64>,
}

pub(crate) fn run(args: CreateTokenArgs) -> Result<(), String> {
    if args.jwt_secret.trim().is_empty() {
        return Err("jwt-secret cannot be empty".to_string());
    }

    let ttl = match args.ttl_hours {
        Some(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => SignedDuration::from_hours(hours),
        Some(_) => return Err(format!("ttl-hours must be between 1 and {MAX_TTL_HOURS}")),
        None => DEFAULT_TOKEN_TTL,
    };

    let jwt = JwtService::new(&JwtConfig {
        secret: args.jwt_secret,
        issuer: args.jwt_issuer,
        ttl,
    });

    let now = Timestamp::now();

    let token = jwt
        .issue(
            &Identity {
                user_id: UserId::from_i64(args.user_id),
                email: args.email,
                role: args.role,
            },
            now,
        )
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("role: {}", args.role);
    println!("expires_at: {}", now + ttl);
    println!("token: {token}");

    Ok(())
}
