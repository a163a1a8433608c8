use tracing_subscriber::util::SubscriberInitExt;

pub fn init_logging() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish()
        .init();
}
