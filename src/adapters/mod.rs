pub mod lemmy;
pub mod mlb;
pub mod nba;
pub mod nfl;
pub mod nhl;
pub mod prowl;

pub use lemmy::{Community, CommunityApi, CommunityResponse, LemmyClient};
pub use mlb::MlbClient;
pub use nba::NbaClient;
pub use nfl::NflClient;
pub use nhl::NhlClient;
pub use prowl::ProwlClient;
