use hotel_bookings::{
    adapters::ToastNotificationService,
    application::booking::{
        BookingStore, ServiceDependencies, delete_selected_booking, lock_store, select_booking,
    },
    application::toast::ToastQueue,
    config::AppConfig,
    domain::RoomType,
    presentation::{BookingDetailView, BookingForm, BookingListView},
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing (stdout is reserved for the rendered views)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_bookings=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    // Initialize adapters
    let toasts = ToastQueue::from_config(&config);
    let notification_service = Arc::new(ToastNotificationService::new(toasts.clone()));
    let store = BookingStore::default().into_shared();
    let deps = ServiceDependencies::new(store, notification_service, config.clone());

    // Render the toast list whenever it changes
    let mut toast_listener = toasts.subscribe();
    let toast_printer = tokio::spawn(async move {
        while toast_listener.changed().await.is_ok() {
            let snapshot = toast_listener.borrow_and_update().clone();
            render("toasts", &snapshot);
        }
    });

    let mut form = BookingForm::new();

    // An empty submit only reveals the field errors
    if let Err(err) = form.submit(&deps).await {
        tracing::info!("Submit rejected: {}", err);
    }

    form.set_guest_name("Ada Lovelace");
    form.set_hotel_name("Harbour Grand");
    form.set_room_type(RoomType::Deluxe);
    form.set_check_in("2025-01-05");
    form.set_check_out("2025-01-08");
    let first = form.submit(&deps).await?;

    form.set_guest_name("Grace Hopper");
    form.set_hotel_name("Sea View Inn");
    form.set_room_type(RoomType::Suite);
    form.set_check_in("2024-12-30");
    form.set_check_out("2025-01-02");
    form.set_guests_input("1");
    form.submit(&deps).await?;

    render_store(&deps);

    select_booking(&deps, first);
    render_store(&deps);

    if let Some(deleted) = delete_selected_booking(&deps).await? {
        tracing::info!(booking_id = %deleted.id, "Deleted selected booking");
    }
    render_store(&deps);

    // Close every toast and let the removal timers run out
    toasts.dismiss(None);
    tokio::time::sleep(config.toast_remove_delay + std::time::Duration::from_millis(50)).await;
    render("toasts", &toasts.toasts());

    toast_printer.abort();
    Ok(())
}

fn render_store(deps: &ServiceDependencies) {
    let store = lock_store(&deps.store);
    render("list", &BookingListView::from_store(&store));
    render("details", &BookingDetailView::from_store(&store));
}

fn render<T: Serialize>(view: &str, data: &T) {
    match serde_json::to_string(data) {
        Ok(json) => println!("{{\"view\":\"{}\",\"data\":{}}}", view, json),
        Err(err) => tracing::error!("Failed to render {}: {}", view, err),
    }
}
