//! User directory service
//!
//! Owns the live roster, account creation and federated merge, login
//! validation, and presence transitions.

use huddle_common::generate_user_code;
use huddle_core::{DocumentRef, DomainError, Fields, PresenceStatus, Query, Route, User};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{status_fields, user_from_document, user_to_fields, RegistrationForm};
use crate::state::Mirror;

use super::context::ServiceContext;
use super::error::{LogFailure, ServiceError, ServiceResult};

/// User directory service
///
/// Subscribes to the user collection on construction; the subscription is
/// released by [`UserDirectory::dispose`] or when the service is dropped.
#[derive(Debug)]
pub struct UserDirectory {
    ctx: ServiceContext,
    roster: Mirror<User>,
}

impl UserDirectory {
    /// Create the service and subscribe to the roster
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ctx: ServiceContext) -> ServiceResult<Self> {
        let listener = ctx
            .store()
            .listen(Query::collection(ctx.user_collection()))
            .log_failure("Roster subscription")?;
        let roster = Mirror::spawn("users", listener, user_from_document);
        info!(collection = ctx.user_collection(), "Roster subscribed");

        Ok(Self { ctx, roster })
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    fn user_ref(&self, id: &str) -> DocumentRef {
        DocumentRef::new(self.ctx.user_collection(), id)
    }

    // === Roster ===

    /// Live roster mirror
    pub fn roster(&self) -> &Mirror<User> {
        &self.roster
    }

    /// Current roster in store order
    pub fn users(&self) -> Vec<User> {
        self.roster.current().to_vec()
    }

    /// Wait until the roster contains `id`
    pub async fn wait_for_user(&self, id: &str) -> ServiceResult<User> {
        let view = self.roster.wait_for(|v| v.contains(id)).await?;
        view.get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    // === Account creation ===

    /// Persist a user.
    ///
    /// Without an id a fresh one is allocated; the document is written with
    /// its own id in a single `set`. With an id the document at that id is
    /// created or overwritten.
    #[instrument(skip(self, user), fields(explicit_id = user.has_id()))]
    pub async fn create_user(&self, user: &User) -> ServiceResult<DocumentRef> {
        let reference = if user.has_id() {
            self.user_ref(&user.id)
        } else {
            self.ctx.store().new_document_ref(self.ctx.user_collection())
        };

        let mut fields = user_to_fields(user);
        fields.insert("id".into(), json!(reference.id()));

        self.ctx
            .store()
            .set(&reference, fields)
            .await
            .log_failure("Create user")?;

        info!(user_id = %reference.id(), "User created");
        Ok(reference)
    }

    /// Build and persist a user from the registration form
    #[instrument(skip(self, form))]
    pub async fn upload_user_data(&self, form: &RegistrationForm) -> ServiceResult<DocumentRef> {
        form.validate().log_failure("Registration")?;

        let name = match form.name.trim() {
            "" => format!("User {}", generate_user_code()),
            name => name.to_string(),
        };

        let mut user = User::new(name, form.email.trim().to_string());
        user.password_hash = self
            .ctx
            .password_service()
            .hash(&form.password)
            .log_failure("Password hashing")?;
        user.user_image.clone_from(&form.image);

        self.create_user(&user).await
    }

    /// Reconcile a federated sign-in with the roster.
    ///
    /// A first sign-in creates the user. Later sign-ins refresh email, image,
    /// status, last seen, and emojis but keep the stored name unless it is empty.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn save_federated_user(&self, user: &User) -> ServiceResult<DocumentRef> {
        if !user.has_id() {
            return Err(DomainError::MissingIdentifier("federated user"))
                .log_failure("Federated sign-in");
        }

        let query = Query::collection(self.ctx.user_collection()).where_eq("id", user.id.as_str());
        let existing = self
            .ctx
            .store()
            .query(&query)
            .await
            .log_failure("Federated lookup")?;

        let Some(stored) = existing.first() else {
            return self.create_user(user).await;
        };

        let name = match stored.get_str("name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => user.name.clone(),
        };

        let mut fields = Fields::new();
        fields.insert("email".into(), json!(user.email));
        fields.insert("userImage".into(), json!(user.user_image));
        if let Some(status) = user.status {
            fields.insert("status".into(), json!(status.as_str()));
        }
        fields.insert("lastSeen".into(), json!(user.last_seen.timestamp_millis()));
        fields.insert("recentEmojis".into(), json!(user.recent_emojis));
        fields.insert("name".into(), json!(name));

        let reference = stored.reference.clone();
        self.ctx
            .store()
            .update(&reference, fields)
            .await
            .log_failure("Federated update")?;

        info!(user_id = %reference.id(), "Federated user updated");
        Ok(reference)
    }

    // === Login ===

    /// Check credentials and finalize the login on the first match.
    ///
    /// Returns `Ok(false)` for an unknown email or a wrong password.
    #[instrument(skip(self, password))]
    pub async fn login_user(&self, email: &str, password: &str) -> ServiceResult<bool> {
        let query = Query::collection(self.ctx.user_collection()).where_eq("email", email);
        let matches = self
            .ctx
            .store()
            .query(&query)
            .await
            .log_failure("Login lookup")?;

        if matches.is_empty() {
            warn!("Login failed: unknown email");
            return Ok(false);
        }

        let passwords = self.ctx.password_service();
        let found = matches.iter().find(|doc| {
            passwords.matches(password, doc.get_str("passwordHash").unwrap_or_default())
        });

        match found {
            Some(doc) => {
                self.finalize_login(doc.id()).await?;
                Ok(true)
            }
            None => {
                warn!("Login failed: invalid password");
                Ok(false)
            }
        }
    }

    /// Mark the user online, ensure default channel membership, then navigate
    /// home after the configured delay.
    #[instrument(skip(self))]
    pub async fn finalize_login(&self, user_id: &str) -> ServiceResult<()> {
        self.update_user_status(user_id, PresenceStatus::Online).await?;

        self.ctx
            .channels()
            .update_standard_channel(user_id)
            .await
            .log_failure("Standard channel update")?;

        self.ctx
            .session()
            .update(|s| s.logged_user_id = Some(user_id.to_string()));

        let delay = self.ctx.config().ui.login_redirect_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.ctx.navigator().navigate(Route::Home {
            user_id: user_id.to_string(),
        });
        info!(user_id = %user_id, "User logged in");
        Ok(())
    }

    /// Mark the user offline and return to the login view
    #[instrument(skip(self))]
    pub async fn logout_user(&self, user_id: &str) -> ServiceResult<()> {
        self.update_user_status(user_id, PresenceStatus::Offline).await?;

        self.ctx.session().update(|s| s.logged_user_id = None);
        self.ctx.navigator().navigate(Route::Login);

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    // === Partial updates ===

    #[instrument(skip(self, emojis))]
    pub async fn update_recent_emojis(&self, user_id: &str, emojis: &[String]) -> ServiceResult<()> {
        let mut fields = Fields::new();
        fields.insert("recentEmojis".into(), json!(emojis));
        self.update_fields(user_id, fields, "Recent emojis update").await
    }

    #[instrument(skip(self))]
    pub async fn update_user_info(
        &self,
        user_id: &str,
        name: &str,
        user_image: &str,
    ) -> ServiceResult<()> {
        let mut fields = Fields::new();
        fields.insert("name".into(), json!(name));
        fields.insert("userImage".into(), json!(user_image));
        self.update_fields(user_id, fields, "User info update").await
    }

    /// Write status and id in one partial update
    #[instrument(skip(self))]
    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: PresenceStatus,
    ) -> ServiceResult<()> {
        self.update_fields(user_id, status_fields(user_id, status), "Status update")
            .await
    }

    async fn update_fields(
        &self,
        user_id: &str,
        fields: Fields,
        action: &'static str,
    ) -> ServiceResult<()> {
        if user_id.is_empty() {
            return Err(DomainError::MissingIdentifier("user")).log_failure(action);
        }

        self.ctx
            .store()
            .update(&self.user_ref(user_id), fields)
            .await
            .log_failure(action)?;

        info!(user_id = %user_id, "{action} applied");
        Ok(())
    }

    // === Lookups ===

    /// Find a user in the roster mirror
    pub fn get_user_by_id(&self, user_id: &str) -> ServiceResult<User> {
        self.roster
            .current()
            .get(user_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Loose name check: true if some user's name contains every
    /// whitespace-separated token of `name`, ignoring case
    pub fn is_valid_user(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        let tokens: Vec<&str> = needle.split_whitespace().collect();
        self.roster
            .current()
            .iter()
            .any(|user| user.name_contains_all(&tokens))
    }

    /// Users currently online
    pub fn online_users(&self) -> Vec<User> {
        self.roster
            .current()
            .iter()
            .filter(|user| user.is_online())
            .cloned()
            .collect()
    }

    /// Release the roster subscription
    pub fn dispose(&self) {
        self.roster.dispose();
        info!("Roster subscription released");
    }
}
