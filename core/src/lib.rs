pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod overlay;
pub mod ranking;
pub mod session;
pub mod wire;

pub use catalog::{demo_image_sets, DEMO_CATALOG};
pub use config::{select_source, SurveySource, SOURCE_QUERY_KEYS};
pub use error::{FetchError, SessionError, WireError};
pub use model::{mask_display_name, ImageSet, MaskImage, MaskType, RankingEntry, Results};
pub use overlay::{
    OverlaySettings, TRANSPARENCY_DEFAULT, TRANSPARENCY_MAX, TRANSPARENCY_MIN, TRANSPARENCY_STEP,
};
pub use ranking::RankingStore;
pub use session::{validate_ranking, Advance, FetchTicket, Session, SessionPhase, SetResolution};
