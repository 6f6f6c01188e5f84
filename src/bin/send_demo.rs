//! Sends one sample listing message through the real dispatcher so channel
//! wiring can be checked without touching the snapshot.

use chrono::Utc;
use internship_watcher::config::Config;
use internship_watcher::format::new_listing_message;
use internship_watcher::notify::{discord::DiscordApi, Dispatcher};
use internship_watcher::Listing;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let sample = Listing {
        company_name: "Example Corp".into(),
        title: "Software Engineering Intern (demo)".into(),
        locations: vec!["Remote".into()],
        url: "https://example.com/jobs/demo".into(),
        season: "Summer 2025".into(),
        sponsorship: "Other".into(),
        is_visible: true,
        active: true,
        ..Default::default()
    };

    let api = DiscordApi::new(cfg.token.clone());
    let mut dispatcher = Dispatcher::new(api, &cfg.channel_ids, cfg.send_delay);
    dispatcher.dispatch(&new_listing_message(&sample, Utc::now())).await;

    println!("send-demo done");
}
