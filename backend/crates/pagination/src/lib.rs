//! Offset pagination primitives shared by the admissions backend.
//!
//! The crate owns three concerns:
//!
//! - [`Sort`] and [`Direction`]: a sort specification parsed from the
//!   `field` or `field,direction` query form, with unrecognised direction
//!   tokens falling back to descending order;
//! - [`PageRequest`]: a validated zero-based page index, page size and sort;
//! - [`Page`]: the envelope returned to clients, carrying the slice of
//!   records plus the totals needed to navigate.
//!
//! Sort keys are generic so adapters can parse raw property names first and
//! map them onto a closed set of domain keys afterwards.

mod page;
mod sort;

pub use page::{Page, PageRequest, PageRequestError, SortOrder};
pub use sort::{Direction, Sort};

/// Page size used when a client omits the `size` parameter.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
