//! Dashboard panels. Each takes plain data props; the owning view keeps
//! the filters and the loaded snapshot.

mod header;
pub use header::DashboardHeader;

mod filter_bar;
pub use filter_bar::FilterBar;

mod kpi_cards;
pub use kpi_cards::KpiCards;

mod revenue_total;
pub use revenue_total::RevenueTotal;

mod broadband_pack;
pub use broadband_pack::BroadbandPack;

mod revenue_driver;
pub use revenue_driver::RevenueDriver;

mod export;
pub use export::ExportPanel;

mod utils;
pub(crate) use utils::*;
