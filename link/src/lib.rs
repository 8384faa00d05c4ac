//! Staybook client library.
//!
//! Provides the typed interface for talking to a Staybook hotel-booking
//! backend: an HTTP client with automatic credential handling, wire models
//! for hotels/rooms/bookings/users, local date validation for searches and
//! booking submissions, and the session-identity state machine used by
//! frontends for role gating.
//!
//! # Example
//!
//! ```rust,no_run
//! use staybook_link::{ApiClient, BookingDates};
//! use chrono::{Local, NaiveDate};
//!
//! # async fn example() -> staybook_link::Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:8080/api")
//!     .build()?;
//!
//! let identity = client.login("alice", "secret123").await?;
//! println!("logged in as {} ({})", identity.username, identity.role);
//!
//! let dates = BookingDates::new(
//!     NaiveDate::from_ymd_opt(2026, 9, 1),
//!     NaiveDate::from_ymd_opt(2026, 9, 4),
//! );
//! let receipt = client
//!     .submit_booking("room-101", dates, Local::now().date_naive())
//!     .await?;
//! println!("{}", receipt.confirmation());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod identity;
pub mod models;
pub mod session;
pub mod uploads;

mod bookings;
mod hotels;
mod rooms;
mod transport;
mod users;

pub use auth::AuthProvider;
pub use bookings::filter_bookings;
pub use client::{ApiClient, ApiClientBuilder};
pub use dashboard::AdminOverview;
pub use dates::{booked_dates, BookingDates, BookingWindow, DateRange, SearchDates};
pub use error::{ApiError, Result};
pub use hotels::filter_hotels;
pub use identity::{IdentityStore, MemoryIdentityStore, StoredIdentity};
pub use models::{
    AvailabilityProbe, Booking, BookingReceipt, BookingStatus, ContactMessage, Hotel, HotelUpdate,
    NewHotel, NewRoom, NewUser, RegisterRequest, ReviewRequest, Role, Room, RoomUpdate, User,
    UserUpdate,
};
pub use rooms::{filter_rooms, RoomQuery, RoomSort};
pub use session::{Identity, SessionIdentity, SessionState};
pub use uploads::{image_url, FileUpload, DEFAULT_ROOM_IMAGE};
pub use users::filter_users;
