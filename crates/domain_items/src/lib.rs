//! Item Registry Domain
//!
//! Items reported as lost or found on a campus. An item's status moves
//! between `lost`, `found`, and `claimed`; the claims domain drives the
//! `claimed` transition, staff may override it.
//!
//! ```text
//! report lost ──► Lost
//! report found ─► Found ──(claim submitted)──► Claimed
//!                   ▲                             │
//!                   └──(last claim cancelled)─────┘
//! ```

pub mod item;
pub mod filter;
pub mod details;
pub mod ports;
pub mod service;
pub mod error;

pub use item::{Item, ItemCategory, ItemStatus, ItemReport, ItemUpdate};
pub use filter::{ItemFilter, ItemPage};
pub use details::{ItemDetails, Reporter};
pub use ports::ItemStore;
pub use service::ItemService;
pub use error::ItemError;
