mod render;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{
    config::load_settings, AppRoute, CommentForm, Coordinator, FavoritesPageController,
    FavoritesView, HttpRentalApi, MainPageController, OfferPageController,
    OfferPageView, Store,
};
use shared::domain::{CityName, OfferId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Parser, Debug)]
#[command(name = "rental-cli", about = "Browse rental offers from the terminal")]
struct Args {
    /// Backend base URL; overrides client.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    verbose: bool,
    #[arg(default_value = "/")]
    path: String,
    #[arg(long)]
    city: Option<String>,
    #[arg(long, value_enum)]
    favorite: Option<Toggle>,
    #[arg(long, requires = "rating")]
    comment: Option<String>,
    #[arg(long)]
    rating: Option<u8>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(args.verbose))),
        )
        .init();

    let mut settings = load_settings();
    if let Some(url) = args.api_url.clone() {
        settings.api_base_url = url;
    }
    if let Some(token) = args.token.clone() {
        settings.auth_token = Some(token);
    }
    let api = HttpRentalApi::from_settings(&settings).context("failed to build api client")?;
    info!(base_url = api.base_url(), "using backend");

    let store = Arc::new(Store::new());
    let coordinator = Arc::new(Coordinator::new(store, Arc::new(api)));
    let login = coordinator.login().await;

    match AppRoute::resolve(&args.path) {
        AppRoute::Root => show_main(&coordinator, &args).await,
        AppRoute::Offer(offer_id) => show_offer(&coordinator, offer_id, &args).await,
        AppRoute::Favorites => show_favorites(&coordinator).await,
        AppRoute::Login => {
            println!("{}", render::login_status(login));
            Ok(())
        }
        AppRoute::NotFound => bail!("404 Not Found: {}", args.path),
    }
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

async fn show_main(coordinator: &Arc<Coordinator>, args: &Args) -> Result<()> {
    let mut page = MainPageController::new(coordinator.clone());
    match args.city.as_deref() {
        Some(raw) => {
            let city = CityName::parse(raw).with_context(|| format!("unknown city '{raw}'"))?;
            page.select_city(city).await;
        }
        None => {
            page.mount().await;
        }
    }
    print!("{}", render::main_page(&page.view()));
    Ok(())
}

async fn show_offer(coordinator: &Arc<Coordinator>, offer_id: OfferId, args: &Args) -> Result<()> {
    let page = OfferPageController::new(coordinator.clone());
    page.mount(offer_id.clone()).await;
    if let OfferPageView::Redirect(AppRoute::NotFound) = page.view() {
        bail!("404 Not Found: offer {offer_id}");
    }

    if let Some(toggle) = args.favorite {
        if !page.toggle_favorite(matches!(toggle, Toggle::On)).await {
            eprintln!("favorite was not updated");
        }
    }

    if let Some(text) = args.comment.as_deref() {
        let mut form = CommentForm::new();
        form.set_comment(text);
        form.set_rating(args.rating.unwrap_or_default());
        let draft = form
            .take_draft()
            .context("review needs at least 50 characters and a rating of 1-5")?;
        page.submit_comment(&offer_id, draft)
            .await
            .context("failed to post review")?;
    }

    print!("{}", render::offer_page(&page.view()));
    Ok(())
}

async fn show_favorites(coordinator: &Arc<Coordinator>) -> Result<()> {
    let mut page = FavoritesPageController::new(coordinator.clone());
    page.mount().await;
    let view = page.view();
    print!("{}", render::favorites(&view));
    if let FavoritesView::Error(message) = view {
        bail!(message);
    }
    Ok(())
}
