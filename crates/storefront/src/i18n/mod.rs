//! Localized routing and message lookup.
//!
//! Every page URL is `/{locale}{localized path}`, where the localized path
//! comes from the per-locale table in [`routes`]. Text direction follows the
//! locale alone (see [`Locale::direction`]).

mod messages;
pub mod routes;

pub use messages::{message_key, month_name, t, tf};
pub use routes::{Resolved, Route, resolve, switch_locale};

pub use smarthome_core::{Direction, Locale};
