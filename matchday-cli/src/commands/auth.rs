use anyhow::Result;

pub async fn run() -> Result<()> {
    println!("Authenticating with Google...");

    // Runs the full OAuth flow and stores the session
    let account = matchday_google::authenticate::run().await?;

    println!("\nAuthenticated as: {}", account);
    println!("\nNow add the account to your config.toml:");
    println!();
    println!("account = \"{}\"", account);
    println!();
    println!("Then run `matchday sync` to add the match schedule to your calendar.");

    Ok(())
}
