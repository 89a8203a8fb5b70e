use roomdesk_core::entity::EntityKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roomdesk_api::server::run(EntityKind::Booking).await
}
