use std::sync::Arc;

use roomdesk_core::error::CoreError;
use roomdesk_core::listing::ListRequest;
use roomdesk_core::roles::Role;
use roomdesk_core::types::DbId;
use roomdesk_core::validation::{validate_email, validate_name, validate_password, validate_role};
use roomdesk_db::models::client::{
    Client, ClientChanges, CreateClient, NewClient, UpdateClient, CLIENT_FIELDS,
};
use roomdesk_db::store::ClientStore;
use roomdesk_events::OutboxDispatcher;

use super::parse_list;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

const ENTITY: &str = "Client";

/// Same message for unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

const DUPLICATE_EMAIL: &str = "a client with this email address already exists";

const EDIT_CONFLICT: &str =
    "unable to update the record due to an edit conflict, please try again";

pub struct ClientService {
    store: Arc<dyn ClientStore>,
    dispatcher: Arc<OutboxDispatcher>,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>, dispatcher: Arc<OutboxDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Validate, reject a taken email, hash the password, insert, then
    /// publish `client.created`. A missing role defaults to `client`.
    pub async fn create(&self, input: &CreateClient) -> AppResult<Client> {
        validate_name("fname", &input.fname)?;
        validate_name("sname", &input.sname)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        let role = match input.user_role.as_deref() {
            Some(role) => validate_role(role)?,
            None => Role::Client,
        };

        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(CoreError::Conflict(DUPLICATE_EMAIL.into()).into());
        }

        let new_client = NewClient {
            fname: input.fname.clone(),
            sname: input.sname.clone(),
            email: input.email.clone(),
            password_hash: hash(&input.password)?,
            user_role: role.as_str().to_string(),
            activated: input.activated.unwrap_or(false),
        };

        let (client, event) = self.store.create(&new_client).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to create client");
        })?;
        tracing::info!(client_id = client.id, role = %role, "Client created");

        self.dispatcher.dispatch(&event).await;
        Ok(client)
    }

    /// Self-service sign-up: always role `client`, never pre-activated.
    pub async fn register(
        &self,
        fname: &str,
        sname: &str,
        email: &str,
        password: &str,
    ) -> AppResult<Client> {
        let input = CreateClient {
            fname: fname.to_string(),
            sname: sname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            user_role: Some(Role::Client.as_str().to_string()),
            activated: Some(false),
        };
        self.create(&input).await
    }

    /// Check credentials. Deactivated clients may still authenticate.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Client> {
        let client = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        let matches = verify_password(password, &client.password_hash).map_err(|e| {
            AppError::InternalError(format!("Stored password hash is unreadable: {e}"))
        })?;
        if !matches {
            tracing::info!(client_id = client.id, "Login rejected: wrong password");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
        }

        Ok(client)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Client> {
        let client = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(client)
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Client> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client with email {email} not found")))
    }

    /// Version-checked full update.
    ///
    /// Fails with `NotFound` for an absent id, `EditConflict` for a stale
    /// version and `Conflict` when the new email belongs to another client.
    pub async fn update(&self, id: DbId, input: &UpdateClient) -> AppResult<Client> {
        validate_name("fname", &input.fname)?;
        validate_name("sname", &input.sname)?;
        validate_email(&input.email)?;
        let role = validate_role(&input.user_role)?;
        if let Some(password) = &input.password {
            validate_password(password)?;
        }

        if let Some(owner) = self.store.find_by_email(&input.email).await? {
            if owner.id != id {
                return Err(CoreError::Conflict(DUPLICATE_EMAIL.into()).into());
            }
        }

        let changes = ClientChanges {
            fname: input.fname.clone(),
            sname: input.sname.clone(),
            email: input.email.clone(),
            user_role: role.as_str().to_string(),
            activated: input.activated,
            expected_version: input.version,
            password_hash: input.password.as_deref().map(hash).transpose()?,
        };

        match self.store.update(id, &changes).await? {
            Some(client) => {
                tracing::info!(client_id = id, version = client.version, "Client updated");
                Ok(client)
            }
            None => match self.store.find_by_id(id).await? {
                None => Err(CoreError::NotFound { entity: ENTITY, id }.into()),
                Some(current) => {
                    tracing::info!(
                        client_id = id,
                        expected = input.version,
                        current = current.version,
                        "Client update rejected: stale version",
                    );
                    Err(AppError::EditConflict(EDIT_CONFLICT.into()))
                }
            },
        }
    }

    /// Deleting an absent client is `NotFound`.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        tracing::info!(client_id = id, "Client deleted");
        Ok(())
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Vec<Client>> {
        let query = parse_list(request, CLIENT_FIELDS)?;
        Ok(self.store.list(&query).await?)
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}
