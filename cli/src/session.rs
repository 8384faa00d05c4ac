//! CLI session state management.
//!
//! Owns the API client, the session identity restored from the identity
//! file, and the interactive command loop. Every gated command passes
//! through the role guard before any request is issued, and management
//! views are re-fetched after each confirmed mutation rather than patched
//! locally.

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use staybook_link::{
    booked_dates, filter_bookings, filter_hotels, filter_rooms, filter_users, image_url,
    ApiClient, ApiError, BookingDates, BookingWindow, ContactMessage, FileUpload, HotelUpdate,
    NewHotel, NewRoom, NewUser, RegisterRequest, ReviewRequest, Role, Room, RoomQuery, RoomSort,
    RoomUpdate, SearchDates, SessionIdentity, SessionState, UserUpdate,
};
use std::io::{self, Write};

use crate::error::{CliError, Result};
use crate::formatter::OutputFormatter;
use crate::identity::FileIdentityStore;
use crate::parser::{Command, CommandParser};
use crate::view::ViewState;

/// Output format for entity lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Interactive CLI session
pub struct CliSession {
    client: ApiClient,
    identity: SessionIdentity,
    store: FileIdentityStore,
    instance: String,
    parser: CommandParser,
    formatter: OutputFormatter,
    color: bool,
    search_results: ViewState<Vec<Room>>,
}

impl CliSession {
    /// Create a session, restoring any persisted identity for the
    /// instance. A missing or corrupt identity file starts Anonymous.
    pub fn new(
        client: ApiClient,
        store: FileIdentityStore,
        instance: String,
        format: OutputFormat,
        color: bool,
    ) -> Self {
        let identity = SessionIdentity::restore(&store, &instance);
        Self {
            client,
            identity,
            store,
            instance,
            parser: CommandParser::new(),
            formatter: OutputFormatter::new(format),
            color,
            search_results: ViewState::new(),
        }
    }

    /// The session identity holder (restored state, guard)
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// Execute one command line. Returns `false` when the session should
    /// end.
    pub async fn execute(&mut self, line: &str) -> Result<bool> {
        let command = self.parser.parse(line)?;
        match command {
            Command::Quit => return Ok(false),
            Command::Help => self.print_help(),
            Command::Whoami => self.cmd_whoami(),
            Command::Login { username } => self.cmd_login(username).await?,
            Command::Logout => self.cmd_logout()?,
            Command::Register => self.cmd_register().await?,

            Command::Search {
                from,
                to,
                room_type,
                sort,
            } => self.cmd_search(&from, &to, room_type, sort).await?,
            Command::Results => self.print_search_results()?,
            Command::Check { room_id, from, to } => self.cmd_check(&room_id, &from, &to).await?,
            Command::Book { room_id, from, to } => self.cmd_book(&room_id, &from, &to).await?,

            Command::Bookings { window } => self.cmd_bookings(window).await?,
            Command::Cancel { booking_id } => self.cmd_cancel(&booking_id).await?,
            Command::Invoice { booking_id, path } => self.cmd_invoice(&booking_id, path).await?,
            Command::Calendar { room_id } => self.cmd_calendar(&room_id).await?,

            Command::Hotels { query } => self.cmd_hotels(query).await?,
            Command::Hotel { id } => self.cmd_hotel(&id).await?,
            Command::Review {
                hotel_id,
                rating,
                comment,
            } => self.cmd_review(&hotel_id, &rating, comment).await?,
            Command::Contact => self.cmd_contact().await?,
            Command::Profile => self.cmd_profile().await?,
            Command::EditProfile => self.cmd_edit_profile().await?,

            Command::Dashboard => self.cmd_dashboard().await?,
            Command::AdminHotels { query } => self.cmd_admin_hotels(query).await?,
            Command::AdminRooms { query } => self.cmd_admin_rooms(query).await?,
            Command::AdminUsers { query } => self.cmd_admin_users(query).await?,
            Command::AdminBookings { query } => self.cmd_admin_bookings(query).await?,

            Command::AddHotel => self.cmd_add_hotel().await?,
            Command::EditHotel { id } => self.cmd_edit_hotel(&id).await?,
            Command::DeleteHotel { id } => self.cmd_delete_hotel(&id).await?,
            Command::AddRoom => self.cmd_add_room().await?,
            Command::EditRoom { id } => self.cmd_edit_room(&id).await?,
            Command::DeleteRoom { id } => self.cmd_delete_room(&id).await?,
            Command::AddUser => self.cmd_add_user().await?,
            Command::EditUser { id } => self.cmd_edit_user(&id).await?,
            Command::DeleteUser { id } => self.cmd_delete_user(&id).await?,
            Command::DeleteBooking { id } => self.cmd_delete_booking(&id).await?,

            Command::SetFormat(fmt) => self.cmd_set_format(&fmt)?,
            Command::Unknown(cmd) => {
                return Err(CliError::Parse(format!(
                    "unknown command '{}' (try 'help')",
                    cmd
                )))
            }
        }
        Ok(true)
    }

    /// Interactive readline loop
    pub async fn run_interactive(&mut self) -> Result<()> {
        self.print_banner();
        let mut editor = DefaultEditor::new().map_err(CliError::from)?;

        loop {
            match editor.readline("staybook> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(trimmed);
                    match self.execute(trimmed).await {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(CliError::Cancelled) => self.notify("Cancelled."),
                        Err(e) => self.report_error(&e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    // ---- identity commands ----

    fn cmd_whoami(&self) {
        match self.identity.state() {
            SessionState::Anonymous => println!("Not logged in."),
            SessionState::Authenticated(identity) => {
                println!("{} ({})", identity.username, identity.role);
            }
        }
    }

    /// Login and persist the identity for this instance
    pub async fn cmd_login(&mut self, username: Option<String>) -> Result<()> {
        let username = match username {
            Some(u) => u,
            None => self.prompt("Username")?,
        };
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::File(format!("Failed to read password: {}", e)))?;
        self.cmd_login_with_password(&username, &password).await
    }

    /// Login with known credentials (used by `--username`/`--password`)
    pub async fn cmd_login_with_password(&mut self, username: &str, password: &str) -> Result<()> {
        let identity = self.client.login(username, password).await?;
        let server_url = self.client.base_url().to_string();
        self.identity
            .login(identity.clone(), &mut self.store, &self.instance, Some(&server_url))?;
        self.notify(&format!(
            "Logged in as {} ({})",
            identity.username, identity.role
        ));
        if identity.role == Role::Admin {
            println!("Type 'dashboard' for the admin overview.");
        }
        Ok(())
    }

    fn cmd_logout(&mut self) -> Result<()> {
        self.identity.logout(&mut self.store, &self.instance)?;
        self.notify("Logged out.");
        Ok(())
    }

    async fn cmd_register(&mut self) -> Result<()> {
        let username = self.prompt("Username")?;
        let email = self.prompt("Email")?;
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::File(format!("Failed to read password: {}", e)))?;

        let request = RegisterRequest::new(username, email, password);
        self.client.register(&request).await?;
        self.notify("Registration successful! You can now login.");
        Ok(())
    }

    // ---- availability and booking ----

    async fn cmd_search(
        &mut self,
        from: &str,
        to: &str,
        room_type: Option<String>,
        sort: Option<String>,
    ) -> Result<()> {
        let dates = SearchDates::new(Some(parse_date(from)?), Some(parse_date(to)?));
        let range = dates.validate()?;
        let sort = sort.as_deref().and_then(RoomSort::parse);
        let query = RoomQuery::new(room_type, sort);

        let token = self.search_results.begin();
        let rooms = self.client.available_rooms(range).await?;
        let refined = query.apply(rooms);
        if self.search_results.accept(token, refined) {
            self.print_search_results()?;
        }
        Ok(())
    }

    fn print_search_results(&self) -> Result<()> {
        match self.search_results.get() {
            Some(rooms) if rooms.is_empty() => {
                println!("No rooms available for selected dates.");
            }
            Some(rooms) => print!("{}", self.formatter.rooms(rooms)?),
            None => println!("No search yet. Try: search <from> <to>"),
        }
        Ok(())
    }

    async fn cmd_check(&mut self, room_id: &str, from: &str, to: &str) -> Result<()> {
        let range = SearchDates::new(Some(parse_date(from)?), Some(parse_date(to)?)).validate()?;
        let probe = self.client.check_room_availability(room_id, range).await?;
        if probe.available {
            self.notify("Room is available for the selected dates.");
            println!("Note: availability is advisory; the room is not reserved until booked.");
        } else {
            println!("Room is already booked for the selected dates.");
        }
        Ok(())
    }

    async fn cmd_book(&mut self, room_id: &str, from: &str, to: &str) -> Result<()> {
        self.identity.authorize(None)?;
        let dates = BookingDates::new(Some(parse_date(from)?), Some(parse_date(to)?));
        let receipt = self
            .client
            .submit_booking(room_id, dates, today())
            .await?;
        self.notify(receipt.confirmation());
        Ok(())
    }

    async fn cmd_bookings(&mut self, window: Option<String>) -> Result<()> {
        self.identity.authorize(None)?;
        let window = match window {
            None => BookingWindow::All,
            Some(raw) => BookingWindow::parse(&raw).ok_or_else(|| {
                CliError::Parse(format!(
                    "unknown window '{}' (all, upcoming, completed, cancelled)",
                    raw
                ))
            })?,
        };

        let profile = self.client.profile().await?;
        let bookings = self.client.my_bookings(&profile.id).await?;
        let bookings = window.apply(bookings, today());
        if bookings.is_empty() {
            println!("You have no bookings to show.");
        } else {
            print!("{}", self.formatter.bookings(&bookings)?);
        }
        Ok(())
    }

    async fn cmd_cancel(&mut self, booking_id: &str) -> Result<()> {
        self.identity.authorize(None)?;
        self.client.cancel_booking(booking_id).await?;
        self.notify("Booking cancelled.");
        // Reload the authoritative list
        let profile = self.client.profile().await?;
        let bookings = self.client.my_bookings(&profile.id).await?;
        print!("{}", self.formatter.bookings(&bookings)?);
        Ok(())
    }

    async fn cmd_invoice(&mut self, booking_id: &str, path: Option<String>) -> Result<()> {
        self.identity.authorize(None)?;
        let bytes = self.client.booking_invoice(booking_id).await?;
        let path = path.unwrap_or_else(|| format!("invoice_{}.pdf", booking_id));
        std::fs::write(&path, bytes)?;
        self.notify(&format!("Invoice saved to {}", path));
        Ok(())
    }

    async fn cmd_calendar(&mut self, room_id: &str) -> Result<()> {
        let bookings = self.client.bookings_for_room(room_id).await?;
        let dates = booked_dates(&bookings);
        if dates.is_empty() {
            println!("No booked dates for this room.");
        } else {
            println!("Booked dates for room {}:", room_id);
            for date in dates {
                println!("  {}", date);
            }
        }
        Ok(())
    }

    // ---- hotels ----

    async fn cmd_hotels(&mut self, query: Option<String>) -> Result<()> {
        let hotels = match query {
            Some(q) => self.client.search_hotels(&q).await?,
            None => self.client.hotels().await?,
        };
        if hotels.is_empty() {
            println!("No hotels found for your search.");
        } else {
            print!("{}", self.formatter.hotels(&hotels)?);
        }
        Ok(())
    }

    async fn cmd_hotel(&mut self, id: &str) -> Result<()> {
        let hotel = self.client.hotel(id).await?;
        let rooms = self.client.rooms_by_hotel(id).await?;

        println!("{} ({})", hotel.name, hotel.location);
        println!("Price per night: {:.2}", hotel.price_per_night);
        if let Some(rating) = hotel.rating {
            println!("Rating: {:.1}/5", rating);
        }
        println!(
            "Image: {}",
            image_url(self.client.base_url(), hotel.image.as_deref())
        );
        println!();
        print!("{}", self.formatter.rooms(&rooms)?);
        Ok(())
    }

    async fn cmd_review(&mut self, hotel_id: &str, rating: &str, comment: String) -> Result<()> {
        let identity = self.identity.authorize(None)?;
        let rating: u8 = rating
            .parse()
            .map_err(|_| CliError::Parse(format!("invalid rating '{}' (1-5)", rating)))?;
        let review = ReviewRequest {
            hotel_id: hotel_id.to_string(),
            rating,
            comment,
            user_id: None,
            username: Some(identity.username.clone()),
        };
        self.client.add_review(&review).await?;
        self.notify("Review submitted. Thank you!");
        Ok(())
    }

    async fn cmd_contact(&mut self) -> Result<()> {
        let name = self.prompt("Name")?;
        let email = self.prompt("Email")?;
        let subject = self.prompt("Subject")?;
        let message = self.prompt("Message")?;

        let contact = ContactMessage {
            name,
            email,
            subject,
            message,
            captcha_token: None,
        };
        self.client.send_contact_message(&contact).await?;
        self.notify("Message sent successfully!");
        Ok(())
    }

    async fn cmd_profile(&mut self) -> Result<()> {
        self.identity.authorize(None)?;
        let user = self.client.profile().await?;
        println!("Username: {}", user.username);
        println!("Email:    {}", user.email);
        println!("Role:     {}", user.role);
        println!(
            "Avatar:   {}",
            image_url(self.client.base_url(), user.avatar.as_deref())
        );
        Ok(())
    }

    async fn cmd_edit_profile(&mut self) -> Result<()> {
        self.identity.authorize(None)?;
        let user = self.client.profile().await?;

        let username = self.prompt_default("Username", &user.username)?;
        let email = self.prompt_default("Email", &user.email)?;
        let avatar_path = self.prompt("Avatar image path (blank to keep)")?;
        let avatar = if avatar_path.is_empty() {
            None
        } else {
            let bytes = std::fs::read(&avatar_path)
                .map_err(|e| CliError::File(format!("Failed to read {}: {}", avatar_path, e)))?;
            let file_name = std::path::Path::new(&avatar_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "avatar".to_string());
            Some(FileUpload::new(file_name, bytes))
        };

        let updated = self
            .client
            .update_profile(&user.id, &username, &email, avatar)
            .await?;
        self.notify(&format!("Profile updated for {}.", updated.username));
        Ok(())
    }

    // ---- admin ----

    async fn cmd_dashboard(&mut self) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let overview = self.client.admin_overview().await?;
        println!("Hotels:   {}", overview.hotels.len());
        println!("Rooms:    {}", overview.rooms.len());
        println!("Users:    {}", overview.users.len());
        println!("Bookings: {}", overview.bookings.len());
        println!();
        println!("Use 'admin <hotels|rooms|users|bookings> [search]' for details.");
        Ok(())
    }

    async fn cmd_admin_hotels(&mut self, query: Option<String>) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let hotels = self.client.hotels().await?;
        let hotels = filter_hotels(hotels, query.as_deref().unwrap_or(""));
        print!("{}", self.formatter.hotels(&hotels)?);
        Ok(())
    }

    async fn cmd_admin_rooms(&mut self, query: Option<String>) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let rooms = self.client.rooms().await?;
        let rooms = filter_rooms(rooms, query.as_deref().unwrap_or(""));
        print!("{}", self.formatter.rooms(&rooms)?);
        Ok(())
    }

    async fn cmd_admin_users(&mut self, query: Option<String>) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let users = self.client.users().await?;
        let users = filter_users(users, query.as_deref().unwrap_or(""));
        print!("{}", self.formatter.users(&users)?);
        Ok(())
    }

    async fn cmd_admin_bookings(&mut self, query: Option<String>) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let bookings = self.client.all_bookings().await?;
        let bookings = filter_bookings(bookings, query.as_deref().unwrap_or(""));
        print!("{}", self.formatter.bookings(&bookings)?);
        Ok(())
    }

    async fn cmd_add_hotel(&mut self) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let name = self.prompt("Name")?;
        let location = self.prompt("Location")?;
        let price_per_night = parse_price(&self.prompt("Price per night")?)?;
        let hotel_number = optional(self.prompt("Hotel number (optional)")?);
        let image = optional(self.prompt("Image file name (optional)")?);

        let hotel = NewHotel {
            name,
            location,
            price_per_night,
            hotel_number,
            image,
        };
        self.client.add_hotel(&hotel).await?;
        self.notify("Hotel added successfully!");
        self.reload_admin_hotels().await
    }

    async fn cmd_edit_hotel(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let hotel = self.client.hotel(id).await?;

        let name = self.prompt_default("Name", &hotel.name)?;
        let location = self.prompt_default("Location", &hotel.location)?;
        let price = self.prompt_default(
            "Price per night",
            &format!("{:.2}", hotel.price_per_night),
        )?;

        let update = HotelUpdate {
            name,
            location,
            price_per_night: parse_price(&price)?,
            available: Some(hotel.available),
            image: hotel.image.clone(),
        };
        self.client.update_hotel(id, &update).await?;
        self.notify("Hotel updated successfully!");
        self.reload_admin_hotels().await
    }

    async fn cmd_delete_hotel(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        if !self.confirm("Delete this hotel?")? {
            return Err(CliError::Cancelled);
        }
        self.client.delete_hotel(id).await?;
        self.notify("Hotel deleted successfully!");
        self.reload_admin_hotels().await
    }

    async fn cmd_add_room(&mut self) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let room_number = self.prompt("Room number")?;
        let room_type = self.prompt("Type")?;
        let price_per_night = parse_price(&self.prompt("Price per night")?)?;
        let hotel_id = self.prompt("Hotel id")?;

        let room = NewRoom {
            room_number,
            room_type,
            price_per_night,
            hotel_id,
        };
        match self.client.add_room(&room).await {
            Ok(()) => {
                self.notify("Room added successfully!");
                // List reloads only after a confirmed mutation
                self.reload_admin_rooms().await
            }
            Err(err) => {
                if let Some(msg) = duplicate_room_message(&err) {
                    println!("{}", msg);
                    Ok(())
                } else {
                    Err(err.into())
                }
            }
        }
    }

    async fn cmd_edit_room(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let rooms = self.client.rooms().await?;
        let room = rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Room {} not found", id)))?;

        let room_number = self.prompt_default("Room number", &room.room_number)?;
        let room_type = self.prompt_default("Type", &room.room_type)?;
        let price = self.prompt_default(
            "Price per night",
            &format!("{:.2}", room.price_per_night),
        )?;
        let hotel_id =
            self.prompt_default("Hotel id", room.hotel_id.as_deref().unwrap_or(""))?;

        let update = RoomUpdate {
            room_number,
            room_type,
            price_per_night: parse_price(&price)?,
            hotel_id,
        };
        self.client.update_room(id, &update).await?;
        self.notify("Room updated successfully!");
        self.reload_admin_rooms().await
    }

    async fn cmd_delete_room(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        if !self.confirm("Delete this room?")? {
            return Err(CliError::Cancelled);
        }
        self.client.delete_room(id).await?;
        self.notify("Room deleted successfully!");
        self.reload_admin_rooms().await
    }

    async fn cmd_add_user(&mut self) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let username = self.prompt("Username")?;
        let email = self.prompt("Email")?;
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::File(format!("Failed to read password: {}", e)))?;
        let role = parse_role(&self.prompt_default("Role", "USER")?)?;

        let user = NewUser {
            username,
            email,
            password,
            role,
        };
        self.client.admin_add_user(&user).await?;
        self.notify("User added successfully!");
        self.reload_admin_users().await
    }

    async fn cmd_edit_user(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        let users = self.client.users().await?;
        let user = users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

        let username = self.prompt_default("Username", &user.username)?;
        let email = self.prompt_default("Email", &user.email)?;
        let role = parse_role(&self.prompt_default("Role", user.role.as_str())?)?;

        let update = UserUpdate {
            username,
            email,
            role,
        };
        self.client.admin_update_user(id, &update).await?;
        self.notify("User updated successfully!");
        self.reload_admin_users().await
    }

    async fn cmd_delete_user(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        if !self.confirm("Delete this user?")? {
            return Err(CliError::Cancelled);
        }
        self.client.delete_user(id).await?;
        self.notify("User deleted successfully!");
        self.reload_admin_users().await
    }

    async fn cmd_delete_booking(&mut self, id: &str) -> Result<()> {
        self.identity.authorize(Some(Role::Admin))?;
        if !self.confirm("Delete this booking?")? {
            return Err(CliError::Cancelled);
        }
        self.client.delete_booking(id).await?;
        self.notify("Booking deleted successfully!");
        let bookings = self.client.all_bookings().await?;
        print!("{}", self.formatter.bookings(&bookings)?);
        Ok(())
    }

    // ---- list reloads (mutate, then invalidate-and-reload) ----

    async fn reload_admin_hotels(&mut self) -> Result<()> {
        let hotels = self.client.hotels().await?;
        print!("{}", self.formatter.hotels(&hotels)?);
        Ok(())
    }

    async fn reload_admin_rooms(&mut self) -> Result<()> {
        let rooms = self.client.rooms().await?;
        print!("{}", self.formatter.rooms(&rooms)?);
        Ok(())
    }

    async fn reload_admin_users(&mut self) -> Result<()> {
        let users = self.client.users().await?;
        print!("{}", self.formatter.users(&users)?);
        Ok(())
    }

    // ---- plumbing ----

    fn cmd_set_format(&mut self, fmt: &str) -> Result<()> {
        match fmt.to_lowercase().as_str() {
            "table" => self.formatter.set_format(OutputFormat::Table),
            "json" => self.formatter.set_format(OutputFormat::Json),
            other => {
                return Err(CliError::Parse(format!(
                    "unknown format '{}' (table, json)",
                    other
                )))
            }
        }
        Ok(())
    }

    fn prompt(&self, label: &str) -> Result<String> {
        print!("{}: ", label);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn prompt_default(&self, label: &str, default: &str) -> Result<String> {
        print!("{} [{}]: ", label, default);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        print!("{} [y/N]: ", question);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn notify(&self, message: &str) {
        if self.color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
    }

    /// Print an error: page-level states stand alone, everything else is
    /// a transient notification.
    pub fn report_error(&self, err: &CliError) {
        let page_level = err.api().map(ApiError::is_page_level).unwrap_or(false);
        if page_level {
            if self.color {
                eprintln!("{}", err.to_string().red().bold());
            } else {
                eprintln!("{}", err);
            }
        } else if self.color {
            eprintln!("{} {}", "Error:".red(), err);
        } else {
            eprintln!("Error: {}", err);
        }
    }

    fn print_banner(&self) {
        println!("Staybook CLI — connected to {}", self.client.base_url());
        match self.identity.state() {
            SessionState::Anonymous => println!("Not logged in. Type 'login' to sign in."),
            SessionState::Authenticated(identity) => {
                println!("Signed in as {} ({})", identity.username, identity.role);
            }
        }
        println!("Type 'help' for commands.");
    }

    fn print_help(&self) {
        println!("General:");
        println!("  help                             Show this help");
        println!("  whoami                           Show the signed-in identity");
        println!("  login [username]                 Sign in");
        println!("  logout                           Sign out and clear the saved identity");
        println!("  register                         Create an account");
        println!("  format <table|json>              Switch output format");
        println!("  quit                             Exit");
        println!();
        println!("Rooms and bookings:");
        println!("  search <from> <to> [type] [price|rating]");
        println!("                                   Find rooms free in a date range");
        println!("  results                          Re-print the last search");
        println!("  check <room-id> <from> <to>      Advisory availability probe");
        println!("  book <room-id> <from> <to>       Book a room");
        println!("  bookings [all|upcoming|completed|cancelled]");
        println!("                                   List your bookings");
        println!("  cancel <booking-id>              Cancel a booking");
        println!("  invoice <booking-id> [path]      Download a booking invoice");
        println!("  calendar <room-id>               Show booked dates for a room");
        println!();
        println!("Hotels:");
        println!("  hotels [search]                  Browse hotels");
        println!("  hotel <id>                       Hotel details and rooms");
        println!("  review <hotel-id> <1-5> <text>   Leave a review");
        println!("  contact                          Send a message to the service");
        println!("  profile / edit-profile           View or update your profile");
        println!();
        println!("Admin:");
        println!("  dashboard                        Overview counts");
        println!("  admin <hotels|rooms|users|bookings> [search]");
        println!("  add-hotel / edit-hotel <id> / delete-hotel <id>");
        println!("  add-room / edit-room <id> / delete-room <id>");
        println!("  add-user / edit-user <id> / delete-user <id>");
        println!("  delete-booking <id>");
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CliError::Parse(format!("invalid date '{}' (expected YYYY-MM-DD)", raw))
    })
}

fn parse_price(raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::Parse(format!("invalid price '{}'", raw)))
}

fn parse_role(raw: &str) -> Result<Role> {
    Role::parse_normalized(raw)
        .ok_or_else(|| CliError::Parse(format!("invalid role '{}' (USER or ADMIN)", raw)))
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The backend reports duplicate room numbers with a raw index-violation
/// message; translate it for the user. Any other error passes through.
fn duplicate_room_message(err: &ApiError) -> Option<&'static str> {
    if let ApiError::Server { message, .. } = err {
        if message.contains("E11000") && message.contains("roomNumber") {
            return Some("Room number already exists. Please use a different number.");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_session() -> (CliSession, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileIdentityStore::with_path(temp_dir.path().join("identity.toml"));
        let client = ApiClient::builder()
            .base_url("http://192.0.2.1:9/api")
            .timeout(std::time::Duration::from_millis(200))
            .connect_timeout(std::time::Duration::from_millis(200))
            .max_retries(0)
            .build()
            .unwrap();
        let session = CliSession::new(
            client,
            store,
            "local".to_string(),
            OutputFormat::Table,
            false,
        );
        (session, temp_dir)
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("01/03/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_parse_price_and_role() {
        assert_eq!(parse_price("1200.50").unwrap(), 1200.50);
        assert!(parse_price("cheap").is_err());
        assert_eq!(parse_role("admin").unwrap(), Role::Admin);
        assert!(parse_role("wizard").is_err());
    }

    #[test]
    fn test_duplicate_room_detection() {
        let err = ApiError::Server {
            status_code: 500,
            message: "E11000 duplicate key error collection: rooms index: roomNumber_1".into(),
        };
        assert_eq!(
            duplicate_room_message(&err),
            Some("Room number already exists. Please use a different number.")
        );

        let other = ApiError::Server {
            status_code: 500,
            message: "E11000 duplicate key error collection: users index: email_1".into(),
        };
        assert_eq!(duplicate_room_message(&other), None);
        assert_eq!(duplicate_room_message(&ApiError::Timeout("t".into())), None);
    }

    #[tokio::test]
    async fn test_admin_commands_denied_when_anonymous() {
        let (mut session, _dir) = test_session();
        // Guard fires before any request: an unroutable backend still
        // produces the auth message, not a network error
        let err = session.execute("dashboard").await.unwrap_err();
        assert_eq!(err.to_string(), "Please login to continue.");

        let err = session.execute("admin users").await.unwrap_err();
        assert_eq!(err.to_string(), "Please login to continue.");
    }

    #[tokio::test]
    async fn test_book_denied_when_anonymous() {
        let (mut session, _dir) = test_session();
        let err = session
            .execute("book r1 2030-01-10 2030-01-12")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please login to continue.");
    }

    #[tokio::test]
    async fn test_search_rejects_bad_date_before_network() {
        let (mut session, _dir) = test_session();
        let err = session
            .execute("search 2025-13-99 2025-01-01")
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_range_locally() {
        let (mut session, _dir) = test_session();
        let err = session
            .execute("search 2025-01-10 2025-01-09")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "End date must be after start date!");
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let (mut session, _dir) = test_session();
        assert!(!session.execute("quit").await.unwrap());
        assert!(session.execute("help").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_command_is_parse_error() {
        let (mut session, _dir) = test_session();
        let err = session.execute("teleport home").await.unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[tokio::test]
    async fn test_format_switch() {
        let (mut session, _dir) = test_session();
        assert!(session.execute("format json").await.unwrap());
        assert_eq!(session.formatter.format(), OutputFormat::Json);
        assert!(session.execute("format csv").await.is_err());
    }
}
