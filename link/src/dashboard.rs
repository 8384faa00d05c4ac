//! Admin dashboard load: concurrent, all-or-nothing.

use crate::{
    client::ApiClient,
    error::Result,
    models::{Booking, Hotel, Room, User},
};

/// Everything the admin dashboard needs, fetched in one load.
#[derive(Debug, Clone)]
pub struct AdminOverview {
    pub hotels: Vec<Hotel>,
    pub rooms: Vec<Room>,
    pub users: Vec<User>,
    pub bookings: Vec<Booking>,
}

impl ApiClient {
    /// Fetch hotels, rooms, users and bookings concurrently.
    ///
    /// The join is all-or-nothing: if any fetch fails the whole load
    /// fails, and no partial overview is returned.
    pub async fn admin_overview(&self) -> Result<AdminOverview> {
        let (hotels, rooms, users, bookings) = tokio::try_join!(
            self.hotels(),
            self.rooms(),
            self.users(),
            self.all_bookings(),
        )?;
        Ok(AdminOverview {
            hotels,
            rooms,
            users,
            bookings,
        })
    }
}
