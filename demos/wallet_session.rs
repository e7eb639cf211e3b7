use anyhow::Result;
use bloo_sdk::{BlooClient, Endpoint};

fn main() -> Result<()> {
    env_logger::init();

    println!("🚀 BlooCoin SDK - Wallet Session Example\n");

    // Point BLOO_SERVER_HOST / BLOO_SERVER_PORT at your own server to
    // run this against something other than the public one.
    let client = BlooClient::with_endpoint(Endpoint::from_env());

    // 1. Server-wide stats need no credentials
    println!("🪙 Fetching total coins...");
    let total = client.total_coins()?;
    println!("   Total coins: {}\n", total);

    println!("⛏️  Fetching current difficulty...");
    let difficulty = client.get_coin()?;
    println!("   Difficulty: {}\n", difficulty);

    // 2. Look up any address without a password
    let addr = "0000000000000000000000000000000000000000";
    println!("💰 Checking balance of {}...", addr);
    match client.check_addr(addr) {
        Ok(payload) => println!("   Balance: {}\n", payload),
        Err(e) => println!("   Lookup failed: {}\n", e),
    }

    // 3. Credentialed commands report failure through the same envelope
    println!("🔑 Verifying credentials...");
    match client.my_coins(addr, "not-the-password") {
        Ok(payload) => println!("   Coins: {}\n", payload),
        Err(e) => println!("   Server said no: {}\n", e),
    }

    // 4. Transaction history streams until the server hangs up
    println!("📜 Fetching transaction history...");
    match client.transactions(addr, "not-the-password") {
        Ok(history) => println!("   History: {}\n", history),
        Err(e) => println!("   Server said no: {}\n", e),
    }

    println!("🎉 Wallet session example complete!");
    Ok(())
}
