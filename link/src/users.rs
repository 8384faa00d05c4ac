//! User endpoints: profile, admin management and contact messages.

use crate::{
    client::ApiClient,
    error::Result,
    models::{ContactMessage, NewUser, User, UserUpdate},
    uploads::{profile_form, FileUpload},
};

impl ApiClient {
    /// Profile of the signed-in user (identified by the session
    /// credential)
    pub async fn profile(&self) -> Result<User> {
        self.transport.get_json("/user/profile", &[]).await
    }

    /// List all users (admin)
    pub async fn users(&self) -> Result<Vec<User>> {
        self.transport.get_json("/user/all", &[]).await
    }

    /// Create a user (admin). Local validation runs first.
    pub async fn admin_add_user(&self, user: &NewUser) -> Result<()> {
        user.validate()?;
        self.transport.post_unit("/user/admin/add", user).await
    }

    /// Update a user's account fields (admin)
    pub async fn admin_update_user(&self, id: &str, update: &UserUpdate) -> Result<()> {
        self.transport
            .put_unit(&format!("/user/admin/update/{}", id), update)
            .await
    }

    /// Delete a user (admin)
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.transport.delete(&format!("/user/delete/{}", id)).await
    }

    /// Update the signed-in user's profile, optionally replacing the
    /// avatar. Sent as multipart form data; returns the updated profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
        avatar: Option<FileUpload>,
    ) -> Result<User> {
        let form = profile_form(username, email, avatar);
        self.transport
            .put_multipart(&format!("/user/update/{}", user_id), form)
            .await
    }

    /// Send a contact-form message. Local validation runs first.
    pub async fn send_contact_message(&self, message: &ContactMessage) -> Result<()> {
        message.validate()?;
        self.transport.post_unit("/contact", message).await
    }
}

/// Client-side user list filtering (case-insensitive substring over
/// username and email). Keeps arrival order.
pub fn filter_users(users: Vec<User>, query: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return users;
    }
    users.into_iter().filter(|u| u.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": username,
            "username": username,
            "email": email,
            "role": "USER",
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_users_case_insensitive() {
        let users = vec![
            user("Alice", "alice@example.com"),
            user("bob", "bob@corp.io"),
            user("carol", "carol@example.com"),
        ];
        let by_name = filter_users(users.clone(), "ALICE");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].username, "Alice");

        let by_email = filter_users(users, "example.com");
        assert_eq!(by_email.len(), 2);
    }

    #[test]
    fn test_filter_users_empty_query() {
        let users = vec![user("a", "a@b.c")];
        assert_eq!(filter_users(users, "").len(), 1);
    }
}
