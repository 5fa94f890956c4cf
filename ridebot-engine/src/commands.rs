//! Command vocabulary. Spellings live here so the dialogue dispatch and the
//! presentation text stay in one place.

pub const PING: &str = "/ping";
pub const START: &str = "/start";
pub const LIST_DRIVERS: &str = "/guidatori";
pub const BEST_DRIVERS: &str = "/miglior_guidatore";
pub const LIST_TRAVELS: &str = "/viaggi";
pub const RATE_DRIVER: &str = "/valuta";
pub const SEARCH_TRAVELS: &str = "/cerca";
pub const BOOK_TRAVEL: &str = "/prenota";
pub const ADD_DRIVER: &str = "/agg_guidatore";
pub const MODIFY_DRIVER: &str = "/mod_guidatore";
pub const DELETE_DRIVER: &str = "/canc_guidatore";
pub const ADD_TRAVEL: &str = "/agg_viaggio";
pub const MODIFY_TRAVEL: &str = "/mod_viaggio";
pub const DELETE_TRAVEL: &str = "/canc_viaggio";
/// Universal cancel; honored in every state before any dispatch.
pub const CANCEL: &str = "/annulla";
