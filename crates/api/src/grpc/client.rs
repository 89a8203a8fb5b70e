use std::sync::Arc;

use roomdesk_core::roles::{READ_ROLES, WRITE_ROLES};
use roomdesk_db::models::client::{Client, CreateClient, UpdateClient};
use roomdesk_proto::v1 as pb;
use roomdesk_proto::v1::client_service_server::ClientService;
use tonic::{Request, Response, Status};

use super::auth::authorize;
use super::list_request;
use crate::middleware::rbac::{ADMIN_REQUIRED, CLIENT_REQUIRED};
use crate::services;
use crate::state::AppState;

/// `roomdesk.v1.ClientService` over the shared client service.
pub struct ClientGrpc {
    clients: Arc<services::ClientService>,
}

impl ClientGrpc {
    pub fn new(state: &AppState) -> Self {
        Self {
            clients: state.clients.clone(),
        }
    }
}

fn to_proto(client: &Client) -> pb::Client {
    pb::Client {
        id: client.id,
        fname: client.fname.clone(),
        sname: client.sname.clone(),
        email: client.email.clone(),
        user_role: client.user_role.clone(),
        activated: client.activated,
        version: client.version,
    }
}

#[tonic::async_trait]
impl ClientService for ClientGrpc {
    async fn create_client(
        &self,
        request: Request<pb::CreateClientRequest>,
    ) -> Result<Response<pb::Client>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let req = request.into_inner();
        let input = CreateClient {
            fname: req.fname,
            sname: req.sname,
            email: req.email,
            password: req.password,
            user_role: (!req.user_role.is_empty()).then_some(req.user_role),
            activated: Some(req.activated),
        };

        let client = self.clients.create(&input).await?;
        Ok(Response::new(to_proto(&client)))
    }

    async fn get_client(
        &self,
        request: Request<pb::GetClientRequest>,
    ) -> Result<Response<pb::Client>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let client = self.clients.get(request.into_inner().id).await?;
        Ok(Response::new(to_proto(&client)))
    }

    async fn get_client_by_email(
        &self,
        request: Request<pb::GetClientByEmailRequest>,
    ) -> Result<Response<pb::Client>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let client = self
            .clients
            .get_by_email(&request.into_inner().email)
            .await?;
        Ok(Response::new(to_proto(&client)))
    }

    async fn update_client(
        &self,
        request: Request<pb::UpdateClientRequest>,
    ) -> Result<Response<pb::Client>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let req = request.into_inner();
        let input = UpdateClient {
            fname: req.fname,
            sname: req.sname,
            email: req.email,
            user_role: req.user_role,
            activated: req.activated,
            version: req.version,
            password: req.password,
        };

        let client = self.clients.update(req.id, &input).await?;
        Ok(Response::new(to_proto(&client)))
    }

    async fn delete_client(
        &self,
        request: Request<pb::DeleteClientRequest>,
    ) -> Result<Response<pb::DeleteClientResponse>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        self.clients.delete(request.into_inner().id).await?;
        Ok(Response::new(pb::DeleteClientResponse {}))
    }

    async fn list_clients(
        &self,
        request: Request<pb::ListClientsRequest>,
    ) -> Result<Response<pb::ListClientsResponse>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let clients = self
            .clients
            .list(&list_request(request.into_inner().options))
            .await?;

        Ok(Response::new(pb::ListClientsResponse {
            clients: clients.iter().map(to_proto).collect(),
        }))
    }
}
