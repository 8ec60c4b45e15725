use chrono::Utc;
use std::sync::Arc;
use tavolo_booking::ReservationRepository;
use tokio::time::{interval, Duration};
use tracing::{error, info};

/// Periodically flips pending reservations whose time has already passed to
/// rejected, so owner dashboards don't fill up with unanswerable requests.
pub async fn start_expiry_worker(
    reservation_repo: Arc<dyn ReservationRepository>,
    sweep_seconds: u64,
) {
    info!("Expiry worker started, sweeping every {}s", sweep_seconds);

    let mut ticker = interval(Duration::from_secs(sweep_seconds));
    loop {
        ticker.tick().await;

        match reservation_repo
            .reject_overdue_pending(Utc::now().naive_utc())
            .await
        {
            Ok(0) => {}
            Ok(n) => info!("Rejected {} overdue pending reservations", n),
            Err(e) => error!("Expiry sweep failed: {}", e),
        }
    }
}
