//! Command parser for the interactive session.
//!
//! Parses user input lines into session commands. Dates and numbers stay
//! as raw strings here; the session validates them so that validation
//! messages come from one place.

use crate::error::{CliError, Result};

/// Parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Whoami,
    Login { username: Option<String> },
    Logout,
    Register,

    /// Availability search: dates plus optional type filter and sort
    Search {
        from: String,
        to: String,
        room_type: Option<String>,
        sort: Option<String>,
    },
    /// Re-print the last search results
    Results,
    /// Advisory availability probe for one room
    Check {
        room_id: String,
        from: String,
        to: String,
    },
    Book {
        room_id: String,
        from: String,
        to: String,
    },

    Bookings { window: Option<String> },
    Cancel { booking_id: String },
    Invoice { booking_id: String, path: Option<String> },
    Calendar { room_id: String },

    Hotels { query: Option<String> },
    Hotel { id: String },
    Review {
        hotel_id: String,
        rating: String,
        comment: String,
    },
    Contact,
    Profile,
    EditProfile,

    /// Admin overview (concurrent all-or-nothing load)
    Dashboard,
    AdminHotels { query: Option<String> },
    AdminRooms { query: Option<String> },
    AdminUsers { query: Option<String> },
    AdminBookings { query: Option<String> },

    AddHotel,
    EditHotel { id: String },
    DeleteHotel { id: String },
    AddRoom,
    EditRoom { id: String },
    DeleteRoom { id: String },
    AddUser,
    EditUser { id: String },
    DeleteUser { id: String },
    DeleteBooking { id: String },

    SetFormat(String),
    Unknown(String),
}

/// Command parser
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a command line
    pub fn parse(&self, line: &str) -> Result<Command> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CliError::Parse("Empty command".into()));
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let command = parts[0].to_lowercase();
        let args = parts.get(1..).unwrap_or(&[]);

        match command.as_str() {
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "help" | "?" => Ok(Command::Help),
            "whoami" => Ok(Command::Whoami),
            "login" => Ok(Command::Login {
                username: args.first().map(|s| s.to_string()),
            }),
            "logout" => Ok(Command::Logout),
            "register" => Ok(Command::Register),

            "search" => {
                if args.len() < 2 {
                    return Err(CliError::Parse(
                        "search requires: search <from> <to> [type] [price|rating]".into(),
                    ));
                }
                let mut room_type = None;
                let mut sort = None;
                for extra in &args[2..] {
                    match extra.to_lowercase().as_str() {
                        "price" | "lowprice" | "rating" | "highrating" => {
                            sort = Some(extra.to_string());
                        }
                        _ => room_type = Some(extra.to_string()),
                    }
                }
                Ok(Command::Search {
                    from: args[0].to_string(),
                    to: args[1].to_string(),
                    room_type,
                    sort,
                })
            }
            "results" => Ok(Command::Results),
            "check" => {
                if args.len() != 3 {
                    return Err(CliError::Parse(
                        "check requires: check <room-id> <from> <to>".into(),
                    ));
                }
                Ok(Command::Check {
                    room_id: args[0].to_string(),
                    from: args[1].to_string(),
                    to: args[2].to_string(),
                })
            }
            "book" => {
                if args.len() != 3 {
                    return Err(CliError::Parse(
                        "book requires: book <room-id> <from> <to>".into(),
                    ));
                }
                Ok(Command::Book {
                    room_id: args[0].to_string(),
                    from: args[1].to_string(),
                    to: args[2].to_string(),
                })
            }

            "bookings" => Ok(Command::Bookings {
                window: args.first().map(|s| s.to_string()),
            }),
            "cancel" => match args.first() {
                Some(id) => Ok(Command::Cancel {
                    booking_id: id.to_string(),
                }),
                None => Err(CliError::Parse("cancel requires a booking id".into())),
            },
            "invoice" => match args.first() {
                Some(id) => Ok(Command::Invoice {
                    booking_id: id.to_string(),
                    path: args.get(1).map(|s| s.to_string()),
                }),
                None => Err(CliError::Parse("invoice requires a booking id".into())),
            },
            "calendar" => match args.first() {
                Some(id) => Ok(Command::Calendar {
                    room_id: id.to_string(),
                }),
                None => Err(CliError::Parse("calendar requires a room id".into())),
            },

            "hotels" => Ok(Command::Hotels {
                query: join_optional(args),
            }),
            "hotel" => match args.first() {
                Some(id) => Ok(Command::Hotel { id: id.to_string() }),
                None => Err(CliError::Parse("hotel requires a hotel id".into())),
            },
            "review" => {
                if args.len() < 3 {
                    return Err(CliError::Parse(
                        "review requires: review <hotel-id> <rating> <comment>".into(),
                    ));
                }
                Ok(Command::Review {
                    hotel_id: args[0].to_string(),
                    rating: args[1].to_string(),
                    comment: args[2..].join(" "),
                })
            }
            "contact" => Ok(Command::Contact),
            "profile" => Ok(Command::Profile),
            "edit-profile" => Ok(Command::EditProfile),

            "dashboard" => Ok(Command::Dashboard),
            "admin" => match args.first().map(|s| s.to_lowercase()) {
                None => Ok(Command::Dashboard),
                Some(section) => {
                    let query = join_optional(&args[1..]);
                    match section.as_str() {
                        "hotels" => Ok(Command::AdminHotels { query }),
                        "rooms" => Ok(Command::AdminRooms { query }),
                        "users" => Ok(Command::AdminUsers { query }),
                        "bookings" => Ok(Command::AdminBookings { query }),
                        other => Err(CliError::Parse(format!(
                            "unknown admin section '{}' (hotels, rooms, users, bookings)",
                            other
                        ))),
                    }
                }
            },

            "add-hotel" => Ok(Command::AddHotel),
            "edit-hotel" => with_id(args, "edit-hotel", |id| Command::EditHotel { id }),
            "delete-hotel" => with_id(args, "delete-hotel", |id| Command::DeleteHotel { id }),
            "add-room" => Ok(Command::AddRoom),
            "edit-room" => with_id(args, "edit-room", |id| Command::EditRoom { id }),
            "delete-room" => with_id(args, "delete-room", |id| Command::DeleteRoom { id }),
            "add-user" => Ok(Command::AddUser),
            "edit-user" => with_id(args, "edit-user", |id| Command::EditUser { id }),
            "delete-user" => with_id(args, "delete-user", |id| Command::DeleteUser { id }),
            "delete-booking" => {
                with_id(args, "delete-booking", |id| Command::DeleteBooking { id })
            }

            "format" => match args.first() {
                Some(fmt) => Ok(Command::SetFormat(fmt.to_string())),
                None => Err(CliError::Parse("format requires: table or json".into())),
            },

            _ => Ok(Command::Unknown(parts[0].to_string())),
        }
    }
}

fn with_id(args: &[&str], name: &str, build: impl FnOnce(String) -> Command) -> Result<Command> {
    match args.first() {
        Some(id) => Ok(build(id.to_string())),
        None => Err(CliError::Parse(format!("{} requires an id", name))),
    }
}

fn join_optional(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_and_help() {
        let parser = CommandParser::new();
        assert_eq!(parser.parse("quit").unwrap(), Command::Quit);
        assert_eq!(parser.parse("exit").unwrap(), Command::Quit);
        assert_eq!(parser.parse("help").unwrap(), Command::Help);
        assert_eq!(parser.parse("?").unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_login_variants() {
        let parser = CommandParser::new();
        assert_eq!(
            parser.parse("login").unwrap(),
            Command::Login { username: None }
        );
        assert_eq!(
            parser.parse("login alice").unwrap(),
            Command::Login {
                username: Some("alice".into())
            }
        );
    }

    #[test]
    fn test_parse_search() {
        let parser = CommandParser::new();
        assert_eq!(
            parser.parse("search 2025-03-01 2025-03-04").unwrap(),
            Command::Search {
                from: "2025-03-01".into(),
                to: "2025-03-04".into(),
                room_type: None,
                sort: None,
            }
        );
        assert_eq!(
            parser.parse("search 2025-03-01 2025-03-04 double price").unwrap(),
            Command::Search {
                from: "2025-03-01".into(),
                to: "2025-03-04".into(),
                room_type: Some("double".into()),
                sort: Some("price".into()),
            }
        );
        assert!(parser.parse("search 2025-03-01").is_err());
    }

    #[test]
    fn test_parse_book_requires_three_args() {
        let parser = CommandParser::new();
        assert_eq!(
            parser.parse("book r1 2025-03-01 2025-03-04").unwrap(),
            Command::Book {
                room_id: "r1".into(),
                from: "2025-03-01".into(),
                to: "2025-03-04".into(),
            }
        );
        assert!(parser.parse("book r1 2025-03-01").is_err());
    }

    #[test]
    fn test_parse_admin_sections() {
        let parser = CommandParser::new();
        assert_eq!(parser.parse("admin").unwrap(), Command::Dashboard);
        assert_eq!(
            parser.parse("admin users alice").unwrap(),
            Command::AdminUsers {
                query: Some("alice".into())
            }
        );
        assert_eq!(
            parser.parse("admin BOOKINGS").unwrap(),
            Command::AdminBookings { query: None }
        );
        assert!(parser.parse("admin payments").is_err());
    }

    #[test]
    fn test_parse_review_joins_comment() {
        let parser = CommandParser::new();
        assert_eq!(
            parser.parse("review h1 5 great stay, would return").unwrap(),
            Command::Review {
                hotel_id: "h1".into(),
                rating: "5".into(),
                comment: "great stay, would return".into(),
            }
        );
    }

    #[test]
    fn test_parse_mutations_require_ids() {
        let parser = CommandParser::new();
        assert!(parser.parse("delete-room").is_err());
        assert_eq!(
            parser.parse("delete-room r9").unwrap(),
            Command::DeleteRoom { id: "r9".into() }
        );
    }

    #[test]
    fn test_parse_unknown() {
        let parser = CommandParser::new();
        assert_eq!(
            parser.parse("teleport").unwrap(),
            Command::Unknown("teleport".into())
        );
    }

    #[test]
    fn test_empty_command() {
        let parser = CommandParser::new();
        assert!(parser.parse("").is_err());
        assert!(parser.parse("   ").is_err());
    }
}
