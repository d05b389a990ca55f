//! Demo walking the `OAuth2` client flows against a scripted transport

use oauth2_kit::test_utils::{error_response_body, token_response_body, MockTransport};
use oauth2_kit::{ClientConfig, OAuth2Client};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🔑 oauth2-kit Token Exchange Demo");
    println!("=================================");

    // Demo 1: Client configuration
    println!("\n1️⃣  Configuring the client:");
    let mut config = ClientConfig::new("demo-client-id", "demo-client-secret")?;
    config.set_redirect_uri("https://app.example.com/callback")?;
    println!("   client_id: {}", config.client_id());
    println!("   secret fingerprint: {}", config.secret_fingerprint());
    println!("   redirect_uri: {:?}", config.redirect_uri());

    let transport = Arc::new(MockTransport::new());
    let client = OAuth2Client::with_transport(transport.clone());

    // Demo 2: Authorization URL for the resource owner's user agent
    println!("\n2️⃣  Building the authorization URL:");
    let url = client.authorization_url(
        &config,
        "https://provider.example.com/authorize",
        Some("activity:read profile:read"),
        Some("demo-state"),
    )?;
    println!("   {url}");

    // Demo 3: Exchanging the returned code for tokens
    println!("\n3️⃣  Exchanging the authorization code:");
    transport
        .push_response(token_response_body("demo-access-token", Some("demo-refresh-token")))
        .await;
    let tokens = client
        .exchange_code(&mut config, "https://provider.example.com/token", "demo-code")
        .await?;
    println!("   access_token:  {:?}", tokens.access_token);
    println!("   refresh_token: {:?}", tokens.refresh_token);
    println!("   last_error clear: {}", config.last_error().is_clear());

    // Demo 4: A rejection the provider delivers as a normal body
    println!("\n4️⃣  Provider rejects an expired code:");
    transport
        .push_response(error_response_body(
            "invalid_grant",
            Some("authorization code expired"),
        ))
        .await;
    let rejected = client
        .exchange_code(&mut config, "https://provider.example.com/token", "stale-code")
        .await?;
    println!("   tokens empty: {}", rejected.is_empty());
    println!("   recorded code: {}", config.last_error().code());
    println!(
        "   recorded description: {:?}",
        config.last_error().description()
    );

    // Demo 5: Refreshing with the stored refresh token
    println!("\n5️⃣  Refreshing the access token:");
    transport
        .push_response(token_response_body("rotated-access-token", None))
        .await;
    let refreshed = client
        .refresh_tokens(
            &mut config,
            "https://provider.example.com/token",
            "demo-refresh-token",
        )
        .await?;
    println!("   access_token: {:?}", refreshed.access_token);
    println!("   last_error cleared again: {}", config.last_error().is_clear());

    // Demo 6: Calling a protected resource with the stored code
    println!("\n6️⃣  Authenticated resource request:");
    config.set_auth_code("rotated-access-token")?;
    transport
        .push_response(r#"{"activities" : "42"}"#)
        .await;
    let body = client
        .authenticated_request(
            &mut config,
            "https://api.provider.example.com/athlete/activities",
            Some("per_page=10&page=1"),
        )
        .await?;
    println!("   raw body: {body}");

    let sent = transport.last_request().await;
    if let Some(request) = sent {
        println!("   dispatched: {} {}", request.method, request.url);
        println!("   with body:  {:?}", request.body);
    }

    println!("\n✅ Demo completed successfully!");
    Ok(())
}
